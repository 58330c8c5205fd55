use thiserror::Error;

/// Error for UserId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for credential hashing operations
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

/// Error for signed-token codec operations
#[derive(Debug, Clone, Error)]
pub enum TokenCodecError {
    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    #[error("Token verification failed: {0}")]
    VerificationFailed(String),
}

/// Error for reset-link delivery operations
#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Failed to deliver reset link: {0}")]
    DeliveryFailed(String),
}

/// Classification of an `AuthError` for boundary layers.
///
/// Transport-neutral equivalent of an HTTP status class, so callers can
/// map failures without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or conflicting input (duplicate email, mismatched confirmation)
    BadRequest,
    /// Failed credential check or invalid/expired/revoked token
    Unauthorized,
    /// No such user, on paths where existence disclosure is acceptable
    NotFound,
    /// Collaborator failure surfaced unchanged
    Internal,
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid user ID: {0}")]
    InvalidUserId(#[from] UserIdError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    #[error("Token error: {0}")]
    Token(#[from] TokenCodecError),

    #[error("Notification error: {0}")]
    Notification(#[from] NotifierError),

    // Domain-level errors
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Email already registered: {0}")]
    EmailAlreadyRegistered(String),

    /// Covers both unknown email and wrong password, indistinguishably
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Covers missing, revoked, and expired refresh tokens, indistinguishably
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// Covers every reset/access token verification failure, indistinguishably
    #[error("Invalid token")]
    InvalidToken,

    #[error("User not found: {0}")]
    UserNotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AuthError {
    /// Classify this error for boundary handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidUserId(_)
            | AuthError::InvalidEmail(_)
            | AuthError::PasswordMismatch
            | AuthError::EmailAlreadyRegistered(_) => ErrorKind::BadRequest,

            AuthError::InvalidCredentials
            | AuthError::InvalidRefreshToken
            | AuthError::InvalidToken => ErrorKind::Unauthorized,

            AuthError::UserNotFound(_) => ErrorKind::NotFound,

            AuthError::Credential(_)
            | AuthError::Token(_)
            | AuthError::Notification(_)
            | AuthError::DatabaseError(_)
            | AuthError::Unknown(_) => ErrorKind::Internal,
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        AuthError::Unknown(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(AuthError::PasswordMismatch.kind(), ErrorKind::BadRequest);
        assert_eq!(
            AuthError::EmailAlreadyRegistered("a@x.com".to_string()).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            AuthError::InvalidRefreshToken.kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(AuthError::InvalidToken.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            AuthError::UserNotFound("a@x.com".to_string()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            AuthError::DatabaseError("boom".to_string()).kind(),
            ErrorKind::Internal
        );
    }
}
