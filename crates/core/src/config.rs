use std::env;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Reads configuration values by key. Backed by the process environment in
/// production and by plain maps in tests.
struct Source<F: Fn(&str) -> Option<String>>(F);

impl<F: Fn(&str) -> Option<String>> Source<F> {
    fn opt(&self, key: &str) -> Option<String> {
        (self.0)(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
    }

    fn or(&self, key: &str, default: &str) -> String {
        self.opt(key).unwrap_or_else(|| default.to_string())
    }

    fn i64(&self, key: &str, default: i64) -> i64 {
        self.opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    fn u32(&self, key: &str, default: u32) -> u32 {
        self.opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    fn u64(&self, key: &str, default: u64) -> u64 {
        self.opt(key).and_then(|v| v.parse().ok()).unwrap_or(default)
    }

    /// `Y`, `YES`, `TRUE` and `1` (any case) are true; anything else is false.
    fn flag(&self, key: &str) -> bool {
        self.opt(key)
            .map(|v| matches!(v.to_ascii_uppercase().as_str(), "Y" | "YES" | "TRUE" | "1"))
            .unwrap_or(false)
    }

    fn list(&self, key: &str) -> Vec<String> {
        self.opt(key)
            .map(|v| {
                v.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ── Shared pieces ─────────────────────────────────────────────

/// Message phrasing preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Default,
    Playful,
}

/// Where composed notifications end up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    Webhook,
    #[default]
    File,
}

/// Builds human-facing links into the Snapshot web app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotLinks {
    pub base_url: String,
    pub space: String,
}

impl SnapshotLinks {
    pub fn new(base_url: impl Into<String>, space: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            space: space.into(),
        }
    }

    /// Landing page of the space.
    pub fn space_url(&self) -> String {
        format!("{}/#/s:{}", self.base_url, self.space)
    }

    pub fn proposal_url(&self, proposal_id: &str) -> String {
        format!("{}/#/{}/proposal/{}", self.base_url, self.space, proposal_id)
    }
}

/// Knobs of the voting status analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Proposals older than this many whole days are dropped before analysis.
    pub max_proposal_age_days: i64,
    /// Minimum age at which a missing council vote becomes an alert.
    pub alert_threshold_days: i64,
    /// Expected council size, the denominator of the vote classification.
    pub council_size: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_proposal_age_days: 10,
            alert_threshold_days: 5,
            council_size: 6,
        }
    }
}

/// Everything the notification composer needs besides the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageConfig {
    pub tone: Tone,
    pub council_size: u32,
    pub alert_threshold_days: i64,
    pub links: SnapshotLinks,
    /// Recipient identifiers rendered as a `cc` block. Empty means no block.
    pub mentions: Vec<String>,
    pub dashboard_url: Option<String>,
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    pub api_url: String,
    pub snapshot_url: String,
    pub space: String,
    pub analysis: AnalysisConfig,
    pub wallets_file: PathBuf,
    pub output_html: PathBuf,
    pub show_completed: bool,
    pub tone: Tone,
    pub delivery: DeliveryMode,
    pub webhook_url: Option<String>,
    pub mentions: Vec<String>,
    pub notification_log: PathBuf,
    pub dashboard_url: Option<String>,
    pub source_timeout_secs: u64,
    pub webhook_timeout_secs: u64,
}

impl MonitorConfig {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let src = Source(lookup);
        Self {
            api_url: src.or("SNAPSHOT_API_URL", "https://hub.snapshot.org/graphql"),
            snapshot_url: src.or("SNAPSHOT_URL", "https://snapshot.org"),
            space: src.or("SNAPSHOT_SPACE", "council.graphprotocol.eth"),
            analysis: AnalysisConfig {
                max_proposal_age_days: src.i64("PROPOSAL_MAX_AGE_DAYS", 10),
                alert_threshold_days: src.i64("ALERT_THRESHOLD_DAYS", 5),
                council_size: src.u32("COUNCIL_MEMBERS_COUNT", 6),
            },
            wallets_file: PathBuf::from(src.or("WALLETS_FILE", "wallets.txt")),
            output_html: PathBuf::from(src.or("OUTPUT_HTML", "index.html")),
            show_completed: src.flag("SHOW_COMPLETED_PROPOSALS"),
            tone: if src.flag("FUN_MODE") {
                Tone::Playful
            } else {
                Tone::Default
            },
            delivery: if src.flag("POST_TO_SLACK") {
                DeliveryMode::Webhook
            } else {
                DeliveryMode::File
            },
            webhook_url: src.opt("SLACK_WEBHOOK_URL"),
            mentions: src.list("SLACK_MENTION_USERS"),
            notification_log: PathBuf::from(src.or("NOTIFICATION_LOG_FILE", "slack_message.txt")),
            dashboard_url: src.opt("DASHBOARD_URL"),
            source_timeout_secs: src.u64("SOURCE_TIMEOUT_SECS", 30),
            webhook_timeout_secs: src.u64("WEBHOOK_TIMEOUT_SECS", 10),
        }
    }

    /// Reject settings the monitor cannot run with.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.space.trim().is_empty() {
            return Err(CoreError::Config("space must not be empty".to_string()));
        }
        if self.api_url.trim().is_empty() {
            return Err(CoreError::Config("API URL must not be empty".to_string()));
        }
        if self.analysis.alert_threshold_days < 0 {
            return Err(CoreError::Config(format!(
                "alert threshold must not be negative (got {})",
                self.analysis.alert_threshold_days
            )));
        }
        if self.analysis.max_proposal_age_days < 0 {
            return Err(CoreError::Config(format!(
                "maximum proposal age must not be negative (got {})",
                self.analysis.max_proposal_age_days
            )));
        }
        if self.source_timeout_secs == 0 || self.webhook_timeout_secs == 0 {
            return Err(CoreError::Config("timeouts must be at least one second".to_string()));
        }
        Ok(())
    }

    pub fn links(&self) -> SnapshotLinks {
        SnapshotLinks::new(&self.snapshot_url, &self.space)
    }

    pub fn message_config(&self) -> MessageConfig {
        MessageConfig {
            tone: self.tone,
            council_size: self.analysis.council_size,
            alert_threshold_days: self.analysis.alert_threshold_days,
            links: self.links(),
            mentions: self.mentions.clone(),
            dashboard_url: self.dashboard_url.clone(),
        }
    }

    pub fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }

    /// Print a redacted summary for startup logs.
    pub fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!("  space:       {}", self.space);
        tracing::info!("  api:         {}", self.api_url);
        tracing::info!(
            "  analysis:    max_age={}d, threshold={}d, council_size={}",
            self.analysis.max_proposal_age_days,
            self.analysis.alert_threshold_days,
            self.analysis.council_size
        );
        tracing::info!("  wallets:     {}", self.wallets_file.display());
        tracing::info!(
            "  report:      {} (show_completed={})",
            self.output_html.display(),
            self.show_completed
        );
        tracing::info!(
            "  delivery:    {:?} (webhook={}, log={})",
            self.delivery,
            if self.webhook_url.is_some() { "set" } else { "(none)" },
            self.notification_log.display()
        );
        tracing::info!("  tone:        {:?}, mentions={}", self.tone, self.mentions.len());
    }
}
