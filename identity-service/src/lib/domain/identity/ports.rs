use async_trait::async_trait;
use auth::Claims;
use uuid::Uuid;

use crate::identity::errors::AuthError;
use crate::identity::errors::CredentialError;
use crate::identity::errors::NotifierError;
use crate::identity::errors::TokenCodecError;
use crate::identity::models::AuthSession;
use crate::identity::models::EmailAddress;
use crate::identity::models::LoginCommand;
use crate::identity::models::RefreshTokenRecord;
use crate::identity::models::SignUpCommand;
use crate::identity::models::User;
use crate::identity::models::UserId;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Email, name, password, and confirmation copy
    ///
    /// # Returns
    /// Created user entity (password hashed, never plaintext)
    ///
    /// # Errors
    /// * `PasswordMismatch` - Confirmation does not match the password
    /// * `EmailAlreadyRegistered` - Email is already taken
    /// * `DatabaseError` - Persistence operation failed
    async fn sign_up(&self, command: SignUpCommand) -> Result<User, AuthError>;

    /// Authenticate with email and password, opening a new session.
    ///
    /// # Arguments
    /// * `command` - Email and plaintext password
    ///
    /// # Returns
    /// Access/refresh token pair plus the password-stripped user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password, identically
    /// * `DatabaseError` - Persistence operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;

    /// Exchange a refresh token for a fresh session, rotating out every
    /// outstanding refresh token of the owning user.
    ///
    /// # Arguments
    /// * `refresh_token` - Opaque refresh token string
    ///
    /// # Returns
    /// Fresh access/refresh token pair plus the user
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Unknown, revoked, or expired token,
    ///   identically; an expired record is also deleted
    /// * `DatabaseError` - Persistence operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<AuthSession, AuthError>;

    /// Issue a password-reset link to the account's notification channel.
    ///
    /// Unlike `login`, this path discloses account existence; the
    /// asymmetry is inherited deliberately from the original flow.
    ///
    /// # Arguments
    /// * `email` - Account email
    ///
    /// # Errors
    /// * `UserNotFound` - No account with this email
    /// * `Notification` - Link delivery failed
    async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;

    /// Consume a password-reset token and install a new password.
    ///
    /// # Arguments
    /// * `token` - Reset token from the emailed link
    /// * `new_password` - Replacement plaintext password
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, expired, or tampered token,
    ///   identically
    /// * `UserNotFound` - Token's subject no longer exists
    async fn reset_password(&self, token: &str, new_password: &str) -> Result<(), AuthError>;

    /// Verify an access token's signature and expiry, returning its claims.
    ///
    /// Pure computation against the server secret; storage is never
    /// consulted.
    ///
    /// # Errors
    /// * `InvalidToken` - Verification failed
    fn verify_access_token(&self, token: &str) -> Result<Claims, AuthError>;
}

/// Persistence operations for the user aggregate.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Arguments
    /// * `user` - User entity to create
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - Email is already registered
    /// * `DatabaseError` - Persistence operation failed
    async fn create(&self, user: User) -> Result<User, AuthError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Persistence operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, AuthError>;

    /// Retrieve user by exact email match.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Persistence operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;

    /// Replace a user's password hash.
    ///
    /// The only mutation the lifecycle permits after sign-up.
    ///
    /// # Returns
    /// Updated user entity
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Persistence operation failed
    async fn update_password(&self, id: &UserId, password_hash: &str) -> Result<User, AuthError>;
}

/// Persistence operations for refresh-token records.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a freshly issued record.
    ///
    /// # Errors
    /// * `DatabaseError` - Persistence operation failed
    async fn save(&self, record: RefreshTokenRecord) -> Result<(), AuthError>;

    /// Retrieve a record by its opaque token, joined with the owning user.
    ///
    /// # Returns
    /// The record/user pair, or None when no such token exists
    ///
    /// # Errors
    /// * `DatabaseError` - Persistence operation failed
    async fn find_with_user(&self, token: &str)
        -> Result<Option<(RefreshTokenRecord, User)>, AuthError>;

    /// Physically remove a record.
    ///
    /// # Returns
    /// The deleted record, or None when it was already gone
    ///
    /// # Errors
    /// * `DatabaseError` - Persistence operation failed
    async fn delete(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, AuthError>;

    /// Set `revoked` on every currently-unrevoked record of a user.
    ///
    /// Must be atomic with respect to concurrent refresh attempts; the
    /// Postgres adapter uses a single UPDATE.
    ///
    /// # Errors
    /// * `DatabaseError` - Persistence operation failed
    async fn revoke_all_for_user(&self, user_id: &UserId) -> Result<(), AuthError>;
}

/// One-way password hashing and verification.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash a plaintext password for storage.
    fn hash(&self, password: &str) -> Result<String, CredentialError>;

    /// Verify a plaintext password against a stored hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError>;
}

/// Signed-token encoding, verification, and unverified inspection.
pub trait TokenCodec: Send + Sync + 'static {
    /// Sign claims into a token, under the default secret or an override.
    fn sign(&self, claims: &Claims, secret_override: Option<&str>)
        -> Result<String, TokenCodecError>;

    /// Verify a token's signature and expiry, returning its claims.
    fn verify(&self, token: &str, secret_override: Option<&str>)
        -> Result<Claims, TokenCodecError>;

    /// Decode a token's claims without verifying its signature.
    ///
    /// Hint extraction only; never an authorization input.
    fn peek(&self, token: &str) -> Option<Claims>;
}

/// Opaque session-token generation.
///
/// Implementations must produce unpredictable, high-entropy strings.
pub trait SessionTokenGenerator: Send + Sync + 'static {
    fn generate(&self) -> String;
}

/// Delivery channel for password-reset links.
#[async_trait]
pub trait ResetNotifier: Send + Sync + 'static {
    /// Hand a reset link to the account's notification channel.
    ///
    /// # Arguments
    /// * `email` - Recipient address
    /// * `link` - Full reset URL with the embedded token
    ///
    /// # Errors
    /// * `DeliveryFailed` - The channel rejected the message
    async fn send_reset_link(&self, email: &EmailAddress, link: &str) -> Result<(), NotifierError>;
}
