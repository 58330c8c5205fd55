use rand::distributions::Alphanumeric;
use rand::thread_rng;
use rand::Rng;

/// Default opaque token length in characters.
const DEFAULT_TOKEN_LENGTH: usize = 64;

/// Opaque session token generator.
///
/// Produces cryptographically random alphanumeric strings suitable for
/// refresh tokens: unpredictable, high-entropy, and safe to embed in
/// headers or URLs without encoding.
pub struct OpaqueTokenGenerator {
    length: usize,
}

impl OpaqueTokenGenerator {
    /// Create a generator producing 64-character tokens.
    pub fn new() -> Self {
        Self {
            length: DEFAULT_TOKEN_LENGTH,
        }
    }

    /// Create a generator producing tokens of a custom length.
    ///
    /// # Arguments
    /// * `length` - Token length in characters (must be non-zero)
    pub fn with_length(length: usize) -> Self {
        Self { length }
    }

    /// Generate a new random token.
    ///
    /// # Returns
    /// Alphanumeric token string of the configured length
    pub fn generate(&self) -> String {
        thread_rng()
            .sample_iter(&Alphanumeric)
            .take(self.length)
            .map(char::from)
            .collect()
    }
}

impl Default for OpaqueTokenGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_length() {
        let generator = OpaqueTokenGenerator::new();
        assert_eq!(generator.generate().len(), 64);
    }

    #[test]
    fn test_custom_length() {
        let generator = OpaqueTokenGenerator::with_length(32);
        assert_eq!(generator.generate().len(), 32);
    }

    #[test]
    fn test_tokens_are_alphanumeric() {
        let generator = OpaqueTokenGenerator::new();
        let token = generator.generate();
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_tokens_are_unique() {
        let generator = OpaqueTokenGenerator::new();
        let first = generator.generate();
        let second = generator.generate();
        assert_ne!(first, second);
    }
}
