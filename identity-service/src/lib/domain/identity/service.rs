use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use chrono::Utc;

use crate::identity::errors::AuthError;
use crate::identity::models::AuthPolicy;
use crate::identity::models::AuthSession;
use crate::identity::models::LoginCommand;
use crate::identity::models::RefreshTokenRecord;
use crate::identity::models::SignUpCommand;
use crate::identity::models::User;
use crate::identity::models::UserId;
use crate::identity::models::UserProfile;
use crate::identity::ports::AuthServicePort;
use crate::identity::ports::CredentialHasher;
use crate::identity::ports::RefreshTokenRepository;
use crate::identity::ports::ResetNotifier;
use crate::identity::ports::SessionTokenGenerator;
use crate::identity::ports::TokenCodec;
use crate::identity::ports::UserRepository;

/// Authentication service implementation.
///
/// Concrete implementation of AuthServicePort. Every collaborator is an
/// injected capability, so any hashing algorithm, token format, or storage
/// backend can be swapped without touching the orchestration.
pub struct AuthService<UR, RR, RN, CH, TC, TG>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    RN: ResetNotifier,
    CH: CredentialHasher,
    TC: TokenCodec,
    TG: SessionTokenGenerator,
{
    users: Arc<UR>,
    refresh_tokens: Arc<RR>,
    reset_notifier: Arc<RN>,
    credential_hasher: CH,
    token_codec: TC,
    token_generator: TG,
    policy: AuthPolicy,
}

impl<UR, RR, RN, CH, TC, TG> AuthService<UR, RR, RN, CH, TC, TG>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    RN: ResetNotifier,
    CH: CredentialHasher,
    TC: TokenCodec,
    TG: SessionTokenGenerator,
{
    /// Create a new auth service with injected capabilities.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `refresh_tokens` - Refresh-token persistence implementation
    /// * `reset_notifier` - Reset-link delivery channel
    /// * `credential_hasher` - Password hashing capability
    /// * `token_codec` - Signed-token capability
    /// * `token_generator` - Opaque-token capability
    /// * `policy` - Validated token issuance policy
    ///
    /// # Returns
    /// Configured auth service instance
    pub fn new(
        users: Arc<UR>,
        refresh_tokens: Arc<RR>,
        reset_notifier: Arc<RN>,
        credential_hasher: CH,
        token_codec: TC,
        token_generator: TG,
        policy: AuthPolicy,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            reset_notifier,
            credential_hasher,
            token_codec,
            token_generator,
            policy,
        }
    }

    /// Issue an access/refresh pair for a verified user and persist the
    /// refresh-token record.
    async fn open_session(&self, user: User) -> Result<AuthSession, AuthError> {
        let claims = Claims::expiring(user.id, self.policy.access_token_ttl.num_seconds());
        let access_token = self.token_codec.sign(&claims, None)?;

        let refresh_token = self.token_generator.generate();
        let record = RefreshTokenRecord::issue(
            refresh_token.clone(),
            user.id,
            self.policy.refresh_token_ttl,
        );
        self.refresh_tokens.save(record).await?;

        tracing::info!(user_id = %user.id, "session issued");

        Ok(AuthSession {
            access_token,
            refresh_token,
            user: UserProfile::from(&user),
        })
    }

    /// Derive the per-user reset-token secret.
    ///
    /// The current password hash is part of the secret, so a password
    /// change invalidates every outstanding reset token at once.
    fn reset_secret(&self, user: &User) -> String {
        format!("{}{}", self.policy.token_secret, user.password_hash)
    }
}

#[async_trait]
impl<UR, RR, RN, CH, TC, TG> AuthServicePort for AuthService<UR, RR, RN, CH, TC, TG>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
    RN: ResetNotifier,
    CH: CredentialHasher,
    TC: TokenCodec,
    TG: SessionTokenGenerator,
{
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, AuthError> {
        if command.password != command.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        if self
            .users
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyRegistered(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.credential_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            name: command.name,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.users.create(user).await?;

        tracing::info!(user_id = %created.id, "user registered");

        Ok(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError> {
        // Unknown email and wrong password fail identically
        let user = self
            .users
            .find_by_email(command.email.as_str())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = self
            .credential_hasher
            .verify(&command.password, &user.password_hash)?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        self.open_session(user).await
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError> {
        let (record, user) = self
            .refresh_tokens
            .find_with_user(refresh_token)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        if record.revoked {
            tracing::warn!(user_id = %user.id, "refresh rejected: token revoked");
            return Err(AuthError::InvalidRefreshToken);
        }

        if record.is_expired(Utc::now()) {
            // Cleanup side effect: the dead record is gone before we fail
            self.refresh_tokens.delete(record.id).await?;
            tracing::warn!(user_id = %user.id, "refresh rejected: token expired");
            return Err(AuthError::InvalidRefreshToken);
        }

        // Rotation: every outstanding session dies, including the one just
        // presented. A stolen refresh token is good for at most one use.
        self.refresh_tokens.revoke_all_for_user(&user.id).await?;

        self.open_session(user).await
    }

    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))?;

        let secret = self.reset_secret(&user);
        let claims = Claims::expiring(user.id, self.policy.reset_token_ttl.num_seconds())
            .with_email(user.email.as_str().to_string());
        let token = self.token_codec.sign(&claims, Some(&secret))?;

        let link = format!(
            "{}/reset-password?token={}",
            self.policy.reset_link_base_url, token
        );
        self.reset_notifier.send_reset_link(&user.email, &link).await?;

        tracing::info!(user_id = %user.id, "password reset link dispatched");

        Ok(())
    }

    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError> {
        // Unverified decode only hints at the subject; nothing here is
        // trusted until the signature check below passes.
        let hint = self.token_codec.peek(token).ok_or(AuthError::InvalidToken)?;
        let subject = hint.sub.ok_or(AuthError::InvalidToken)?;
        let user_id = UserId::from_string(&subject).map_err(|_| AuthError::InvalidToken)?;

        let user = self
            .users
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(subject))?;

        // Bad signature, expiry, and tampering all collapse into the same
        // rejection
        let secret = self.reset_secret(&user);
        self.token_codec
            .verify(token, Some(&secret))
            .map_err(|_| AuthError::InvalidToken)?;

        let password_hash = self.credential_hasher.hash(new_password)?;
        self.users.update_password(&user.id, &password_hash).await?;

        tracing::info!(user_id = %user.id, "password reset completed");

        Ok(())
    }

    fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.token_codec
            .verify(token, None)
            .map_err(|_| AuthError::InvalidToken)
    }
}
