use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("no recipients configured")]
    NoRecipients,
    #[error("delivery failed: {0}")]
    Delivery(String)
}

/// Delivers a textual message to a list of addresses.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &[String], subject: &str, body: &str) -> Result<(), NotifierError>;
}

/// Delivers messages into the application log.
///
/// An empty recipient list falls back to the configured default address.
pub struct LogNotifier {
    default_recipient: String
}

impl LogNotifier {
    pub fn new(default_recipient: impl Into<String>) -> Self {
        Self {
            default_recipient: default_recipient.into()
        }
    }

    pub fn recipients(&self, to: &[String]) -> Vec<String> {
        if to.is_empty() && !self.default_recipient.is_empty() {
            return vec![self.default_recipient.clone()];
        }

        to.to_vec()
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to: &[String], subject: &str, body: &str) -> Result<(), NotifierError> {
        let recipients = self.recipients(to);

        if recipients.is_empty() {
            return Err(NotifierError::NoRecipients);
        }

        info!(to = %recipients.join(","), subject, "{body}");

        Ok(())
    }
}
