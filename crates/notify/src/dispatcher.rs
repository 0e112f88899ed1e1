//! Delivers composed messages through the configured channel.
//!
//! Messages are sent one after another, once each. A failed delivery is
//! recorded and does not stop the remaining messages.

use std::time::Instant;

use grump_core::{DeliveryMode, MonitorConfig};

use crate::file::FileNotifier;
use crate::traits::{DispatchResult, Message, Notifier, NotifyError};
use crate::webhook::WebhookNotifier;

/// Per-message outcome of one dispatch run.
#[derive(Debug, Clone, Default)]
pub struct DeliveryReport {
    pub results: Vec<DispatchResult>,
}

impl DeliveryReport {
    pub fn attempted(&self) -> usize {
        self.results.len()
    }

    pub fn delivered(&self) -> usize {
        self.results.iter().filter(|r| r.success).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &DispatchResult> {
        self.results.iter().filter(|r| !r.success)
    }

    pub fn all_delivered(&self) -> bool {
        self.delivered() == self.attempted()
    }
}

/// Sends messages through a single notification channel.
pub struct Dispatcher {
    channel: Box<dyn Notifier>,
}

impl Dispatcher {
    pub fn new(channel: Box<dyn Notifier>) -> Self {
        Self { channel }
    }

    /// Build the dispatcher selected by `config.delivery`.
    ///
    /// Returns `Ok(None)` in webhook mode when no webhook URL is
    /// configured; delivery is then skipped with a warning.
    pub fn from_config(config: &MonitorConfig) -> Result<Option<Self>, NotifyError> {
        let channel: Box<dyn Notifier> = match config.delivery {
            DeliveryMode::Webhook => match config.webhook_url.as_deref() {
                Some(url) => Box::new(WebhookNotifier::new(url, config.webhook_timeout())?),
                None => {
                    tracing::warn!("webhook URL not configured, skipping notifications");
                    return Ok(None);
                }
            },
            DeliveryMode::File => Box::new(FileNotifier::new(&config.notification_log)),
        };
        Ok(Some(Self::new(channel)))
    }

    pub fn channel_name(&self) -> &str {
        self.channel.channel_name()
    }

    /// Deliver every message once, in order.
    pub async fn dispatch(&self, messages: &[Message]) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let channel = self.channel.channel_name();

        for message in messages {
            let start = Instant::now();
            let result = self.channel.send(message).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            let (success, error) = match result {
                Ok(()) => {
                    tracing::info!(
                        channel,
                        title = %message.title,
                        duration_ms,
                        "Notification delivered"
                    );
                    (true, None)
                }
                Err(e) => {
                    tracing::warn!(
                        channel,
                        title = %message.title,
                        error = %e,
                        duration_ms,
                        "Notification delivery failed"
                    );
                    (false, Some(e.to_string()))
                }
            };

            report.results.push(DispatchResult {
                channel: channel.to_string(),
                proposal_id: message.proposal_id.clone(),
                title: message.title.clone(),
                success,
                error,
                duration_ms,
            });
        }

        report
    }
}
