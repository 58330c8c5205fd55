//! In-memory fakes and a harness for exercising the auth service
//! end-to-end without a database.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Duration;
use chrono::Utc;
use identity_service::identity::errors::AuthError;
use identity_service::identity::errors::NotifierError;
use identity_service::identity::models::AuthPolicy;
use identity_service::identity::models::EmailAddress;
use identity_service::identity::models::LoginCommand;
use identity_service::identity::models::RefreshTokenRecord;
use identity_service::identity::models::SignUpCommand;
use identity_service::identity::models::User;
use identity_service::identity::models::UserId;
use identity_service::identity::ports::RefreshTokenRepository;
use identity_service::identity::ports::ResetNotifier;
use identity_service::identity::ports::UserRepository;
use identity_service::identity::service::AuthService;
use identity_service::outbound::crypto::Argon2CredentialHasher;
use identity_service::outbound::crypto::JwtTokenCodec;
use identity_service::outbound::crypto::RandomSessionTokenGenerator;
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration_secret_at_least_32_bytes!";

pub struct InMemoryUserRepository {
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyRegistered(
                user.email.as_str().to_string(),
            ));
        }
        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError> {
        Ok(self.users.lock().unwrap().get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email.as_str() == email)
            .cloned())
    }

    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<User, AuthError> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(&id.0) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(user.clone())
            }
            None => Err(AuthError::UserNotFound(id.to_string())),
        }
    }
}

pub struct InMemoryRefreshTokenRepository {
    records: Mutex<Vec<RefreshTokenRecord>>,
    users: Arc<InMemoryUserRepository>,
}

impl InMemoryRefreshTokenRepository {
    pub fn new(users: Arc<InMemoryUserRepository>) -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            users,
        }
    }

    /// Force a stored token past its expiry, for expiry-path tests.
    pub fn expire(&self, token: &str) {
        let mut records = self.records.lock().unwrap();
        for record in records.iter_mut() {
            if record.token == token {
                record.expires_at = Utc::now() - Duration::hours(1);
            }
        }
    }

    /// Whether a record for this token still exists.
    pub fn contains(&self, token: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .iter()
            .any(|r| r.token == token)
    }
}

#[async_trait]
impl RefreshTokenRepository for InMemoryRefreshTokenRepository {
    async fn save(&self, record: RefreshTokenRecord) -> Result<(), AuthError> {
        self.records.lock().unwrap().push(record);
        Ok(())
    }

    async fn find_with_user(
        &self,
        token: &str,
    ) -> Result<Option<(RefreshTokenRecord, User)>, AuthError> {
        let record = {
            let records = self.records.lock().unwrap();
            records.iter().find(|r| r.token == token).cloned()
        };

        match record {
            Some(record) => {
                let user = self
                    .users
                    .find_by_id(&record.user_id)
                    .await?
                    .ok_or_else(|| AuthError::UserNotFound(record.user_id.to_string()))?;
                Ok(Some((record, user)))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, AuthError> {
        let mut records = self.records.lock().unwrap();
        let position = records.iter().position(|r| r.id == id);
        Ok(position.map(|i| records.remove(i)))
    }

    async fn revoke_all_for_user(&self, user_id: &UserId) -> Result<(), AuthError> {
        let mut records = self.records.lock().unwrap();
        for record in records.iter_mut() {
            if record.user_id == *user_id && !record.revoked {
                record.revoked = true;
            }
        }
        Ok(())
    }
}

/// Captures dispatched reset links instead of delivering them.
pub struct RecordingResetNotifier {
    links: Mutex<Vec<String>>,
}

impl RecordingResetNotifier {
    pub fn new() -> Self {
        Self {
            links: Mutex::new(Vec::new()),
        }
    }

    pub fn last_link(&self) -> Option<String> {
        self.links.lock().unwrap().last().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.links.lock().unwrap().is_empty()
    }
}

#[async_trait]
impl ResetNotifier for RecordingResetNotifier {
    async fn send_reset_link(&self, _email: &EmailAddress, link: &str) -> Result<(), NotifierError> {
        self.links.lock().unwrap().push(link.to_string());
        Ok(())
    }
}

pub type TestAuthService = AuthService<
    InMemoryUserRepository,
    InMemoryRefreshTokenRepository,
    RecordingResetNotifier,
    Argon2CredentialHasher,
    JwtTokenCodec,
    RandomSessionTokenGenerator,
>;

pub struct TestHarness {
    pub service: TestAuthService,
    pub refresh_tokens: Arc<InMemoryRefreshTokenRepository>,
    pub notifier: Arc<RecordingResetNotifier>,
}

impl TestHarness {
    pub fn new() -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let refresh_tokens = Arc::new(InMemoryRefreshTokenRepository::new(Arc::clone(&users)));
        let notifier = Arc::new(RecordingResetNotifier::new());

        let policy = AuthPolicy {
            token_secret: TEST_SECRET.to_string(),
            access_token_ttl: Duration::minutes(15),
            refresh_token_ttl: Duration::days(7),
            reset_token_ttl: Duration::hours(1),
            reset_link_base_url: "http://localhost:3000".to_string(),
        };

        let service = AuthService::new(
            users,
            Arc::clone(&refresh_tokens),
            Arc::clone(&notifier),
            Argon2CredentialHasher::new(),
            JwtTokenCodec::new(TEST_SECRET),
            RandomSessionTokenGenerator::new(),
            policy,
        );

        Self {
            service,
            refresh_tokens,
            notifier,
        }
    }

    /// Pull the token out of the most recently dispatched reset link.
    pub fn last_reset_token(&self) -> String {
        let link = self.notifier.last_link().expect("no reset link dispatched");
        link.split("token=")
            .nth(1)
            .expect("reset link carries no token")
            .to_string()
    }
}

pub fn sign_up_command(email: &str, name: &str, password: &str) -> SignUpCommand {
    SignUpCommand::new(
        EmailAddress::new(email.to_string()).expect("invalid test email"),
        name.to_string(),
        password.to_string(),
        password.to_string(),
    )
}

pub fn login_command(email: &str, password: &str) -> LoginCommand {
    LoginCommand::new(
        EmailAddress::new(email.to_string()).expect("invalid test email"),
        password.to_string(),
    )
}
