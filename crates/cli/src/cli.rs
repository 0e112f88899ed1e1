use std::path::PathBuf;

use clap::Parser;

use grump_core::{DeliveryMode, MonitorConfig};

/// Council voting monitor.
///
/// Checks active proposals of a Snapshot space, reports which council
/// members have not voted yet and sends reminders for overdue proposals.
/// Settings come from the environment (and `.env`); flags override them.
#[derive(Parser, Debug)]
#[command(name = "grump", version, about = "Council voting monitor for Snapshot spaces")]
pub struct CliArgs {
    /// Council roster file, one wallet address per line
    #[arg(long)]
    pub wallets: Option<PathBuf>,

    /// Where to write the HTML report
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Snapshot space to monitor
    #[arg(long)]
    pub space: Option<String>,

    /// Post reminders to the webhook instead of the local log file
    #[arg(long, conflicts_with = "no_notify")]
    pub post: bool,

    /// Skip composing and delivering reminders
    #[arg(long)]
    pub no_notify: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl CliArgs {
    /// Overlay command-line flags on the environment config.
    pub fn apply(&self, config: &mut MonitorConfig) {
        if let Some(path) = &self.wallets {
            config.wallets_file = path.clone();
        }
        if let Some(path) = &self.output {
            config.output_html = path.clone();
        }
        if let Some(space) = &self.space {
            config.space = space.clone();
        }
        if self.post {
            config.delivery = DeliveryMode::Webhook;
        }
    }
}
