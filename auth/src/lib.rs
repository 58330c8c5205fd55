//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id)
//! - Signed token generation, verification, and unverified inspection
//! - Opaque session token generation
//!
//! Each service defines its own authentication traits and adapts these
//! implementations. This avoids coupling services through shared domain
//! logic while reducing code duplication.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Signed Tokens
//! ```
//! use auth::{Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::expiring("user123", 900).with_email("alice@example.com".to_string());
//! let token = handler.encode(&claims).unwrap();
//! let decoded: Claims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub.as_deref(), Some("user123"));
//! ```
//!
//! ## Opaque Session Tokens
//! ```
//! use auth::OpaqueTokenGenerator;
//!
//! let generator = OpaqueTokenGenerator::new();
//! let token = generator.generate();
//! assert_eq!(token.len(), 64);
//! ```

pub mod jwt;
pub mod opaque;
pub mod password;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use opaque::OpaqueTokenGenerator;
pub use password::PasswordError;
pub use password::PasswordHasher;
