use async_trait::async_trait;

use crate::identity::errors::NotifierError;
use crate::identity::models::EmailAddress;
use crate::identity::ports::ResetNotifier;

/// Log-line reset-link delivery.
///
/// Stands in for a real mail/SMS sender: the link is emitted on the
/// service log and nowhere else. A deployment swaps this adapter for one
/// backed by an actual delivery channel.
pub struct TracingResetNotifier;

impl TracingResetNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingResetNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResetNotifier for TracingResetNotifier {
    async fn send_reset_link(&self, email: &EmailAddress, link: &str) -> Result<(), NotifierError> {
        tracing::info!(email = %email, link = %link, "password reset link");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delivery_always_succeeds() {
        let notifier = TracingResetNotifier::new();
        let email = EmailAddress::new("alice@example.com".to_string()).unwrap();

        let result = notifier
            .send_reset_link(&email, "http://localhost:3000/reset-password?token=abc")
            .await;
        assert!(result.is_ok());
    }
}
