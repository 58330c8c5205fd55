use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::EmailError;
use crate::identity::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered account. The password is stored only as an
/// Argon2id hash; `UserProfile` is the outward-facing view.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - UUID string to parse
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored and
/// compared case-sensitively, exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    ///
    /// # Returns
    /// Email string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Outward-facing view of a user.
///
/// Carries everything `User` does except the password hash, so callers
/// structurally cannot leak credential material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub email: EmailAddress,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

/// Persisted refresh-token record.
///
/// One row per issued session. `revoked` only ever moves false to true;
/// a revoked record must never be accepted again.
#[derive(Debug, Clone)]
pub struct RefreshTokenRecord {
    pub id: Uuid,
    pub token: String,
    pub user_id: UserId,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub created_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Build a fresh unrevoked record expiring `ttl` from now.
    ///
    /// # Arguments
    /// * `token` - Opaque token string
    /// * `user_id` - Owning user
    /// * `ttl` - Validity window
    ///
    /// # Returns
    /// RefreshTokenRecord ready for persistence
    pub fn issue(token: String, user_id: UserId, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            token,
            user_id,
            expires_at: now + ttl,
            revoked: false,
            created_at: now,
        }
    }

    /// Check whether the record's validity window has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

/// Token issuance policy for the auth service.
///
/// Passed explicitly at service construction; the core never reads the
/// environment. See `config::AuthConfig` for loading and validation.
#[derive(Debug, Clone)]
pub struct AuthPolicy {
    /// Server-wide signing secret
    pub token_secret: String,
    /// Access-token validity window
    pub access_token_ttl: Duration,
    /// Refresh-token validity window
    pub refresh_token_ttl: Duration,
    /// Password-reset-token validity window
    pub reset_token_ttl: Duration,
    /// Base URL embedded in reset links (no trailing slash)
    pub reset_link_base_url: String,
}

/// Command to register a new account.
#[derive(Debug)]
pub struct SignUpCommand {
    pub email: EmailAddress,
    pub name: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpCommand {
    /// Construct a new sign-up command.
    ///
    /// # Arguments
    /// * `email` - Validated email address
    /// * `name` - Display name
    /// * `password` - Plain text password (hashed by the service)
    /// * `confirm_password` - Confirmation copy, checked by the service
    ///
    /// # Returns
    /// SignUpCommand with validated email
    pub fn new(
        email: EmailAddress,
        name: String,
        password: String,
        confirm_password: String,
    ) -> Self {
        Self {
            email,
            name,
            password,
            confirm_password,
        }
    }
}

/// Command to authenticate with email and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

impl LoginCommand {
    pub fn new(email: EmailAddress, password: String) -> Self {
        Self { email, password }
    }
}

/// Result of a successful login or refresh.
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Short-lived signed access token
    pub access_token: String,
    /// Opaque refresh token, persisted server-side
    pub refresh_token: String,
    /// Owning user, password stripped
    pub user: UserProfile,
}
