//! Incoming-webhook notifier.
//!
//! Delivers each message as a JSON payload with a single `text` field and
//! link-preview suppression flags, the format chat incoming webhooks accept.

use std::time::Duration;

use crate::traits::{Message, Notifier, NotifyError};

#[derive(Debug, serde::Serialize)]
struct WebhookPayload<'a> {
    text: &'a str,
    unfurl_links: bool,
    unfurl_media: bool,
}

/// Posts messages to a configured webhook URL.
#[derive(Debug)]
pub struct WebhookNotifier {
    url: String,
    /// Shared HTTP client (connection pooling).
    client: reqwest::Client,
}

impl WebhookNotifier {
    /// Create a notifier whose requests give up after `timeout`.
    ///
    /// An empty `url` produces [`NotifyError::Config`].
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(NotifyError::Config("webhook URL must not be empty".to_string()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { url, client })
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, message: &Message) -> Result<(), NotifyError> {
        let payload = WebhookPayload {
            text: &message.text,
            unfurl_links: false,
            unfurl_media: false,
        };

        let response = self.client.post(&self.url).json(&payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(
                proposal_id = %message.proposal_id,
                %status,
                body = %body,
                "webhook returned non-2xx status"
            );
            return Err(NotifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(proposal_id = %message.proposal_id, %status, "webhook notification delivered");
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "webhook"
    }
}
