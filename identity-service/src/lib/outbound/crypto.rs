//! Adapters backing the domain crypto ports with the `auth` crate.

use auth::Claims;
use auth::JwtHandler;
use auth::OpaqueTokenGenerator;
use auth::PasswordHasher;

use crate::identity::errors::CredentialError;
use crate::identity::errors::TokenCodecError;
use crate::identity::ports::CredentialHasher;
use crate::identity::ports::SessionTokenGenerator;
use crate::identity::ports::TokenCodec;

/// Argon2id-backed credential hasher.
pub struct Argon2CredentialHasher {
    hasher: PasswordHasher,
}

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self {
            hasher: PasswordHasher::new(),
        }
    }
}

impl Default for Argon2CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialHasher for Argon2CredentialHasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        self.hasher
            .hash(password)
            .map_err(|e| CredentialError::HashingFailed(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        self.hasher
            .verify(password, hash)
            .map_err(|e| CredentialError::VerificationFailed(e.to_string()))
    }
}

/// HS256-backed token codec.
///
/// Signs and verifies under the server-wide secret unless a caller
/// supplies an override (the password-reset flow derives one per user).
pub struct JwtTokenCodec {
    default_secret: String,
}

impl JwtTokenCodec {
    /// Create a codec with the server-wide signing secret.
    pub fn new(default_secret: impl Into<String>) -> Self {
        Self {
            default_secret: default_secret.into(),
        }
    }

    fn handler_for(&self, secret_override: Option<&str>) -> JwtHandler {
        let secret = secret_override.unwrap_or(&self.default_secret);
        JwtHandler::new(secret.as_bytes())
    }
}

impl TokenCodec for JwtTokenCodec {
    fn sign(
        &self,
        claims: &Claims,
        secret_override: Option<&str>,
    ) -> Result<String, TokenCodecError> {
        self.handler_for(secret_override)
            .encode(claims)
            .map_err(|e| TokenCodecError::SigningFailed(e.to_string()))
    }

    fn verify(
        &self,
        token: &str,
        secret_override: Option<&str>,
    ) -> Result<Claims, TokenCodecError> {
        self.handler_for(secret_override)
            .decode(token)
            .map_err(|e| TokenCodecError::VerificationFailed(e.to_string()))
    }

    fn peek(&self, token: &str) -> Option<Claims> {
        self.handler_for(None).decode_unverified(token).ok()
    }
}

/// Random alphanumeric session-token generator.
pub struct RandomSessionTokenGenerator {
    generator: OpaqueTokenGenerator,
}

impl RandomSessionTokenGenerator {
    pub fn new() -> Self {
        Self {
            generator: OpaqueTokenGenerator::new(),
        }
    }
}

impl Default for RandomSessionTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionTokenGenerator for RandomSessionTokenGenerator {
    fn generate(&self) -> String {
        self.generator.generate()
    }
}
