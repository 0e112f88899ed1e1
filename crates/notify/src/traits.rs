//! Notifier trait definition and shared error types.

/// Errors that can occur while composing or delivering a notification.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to write notification log: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template rendering failed: {0}")]
    Template(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// A composed reminder for one proposal, ready for delivery.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Message {
    pub proposal_id: String,
    /// Raw proposal title, used in delivery diagnostics.
    pub title: String,
    /// Rendered message text.
    pub text: String,
}

/// Trait for notification channel implementations.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one message through this channel. Called once per message;
    /// failures are not retried.
    async fn send(&self, message: &Message) -> Result<(), NotifyError>;

    /// Human-readable name for this channel (e.g., "webhook", "file").
    fn channel_name(&self) -> &str;
}

/// Result of delivering a single message.
#[derive(Debug, Clone)]
pub struct DispatchResult {
    pub channel: String,
    pub proposal_id: String,
    pub title: String,
    pub success: bool,
    pub error: Option<String>,
    pub duration_ms: u64,
}
