mod cli;
mod monitor;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use grump_core::{CouncilRoster, MonitorConfig};
use grump_snapshot::SnapshotClient;

use crate::cli::CliArgs;

/// `RUST_LOG` when set, otherwise the `--log-level` fallback.
fn log_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    // Before tracing, so RUST_LOG may come from .env.
    grump_core::config::load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&args.log_level))
        .with_target(false)
        .init();

    let mut config = MonitorConfig::from_env();
    args.apply(&mut config);
    config.validate().context("unusable configuration")?;
    config.log_summary();

    let roster = CouncilRoster::load(&config.wallets_file)
        .with_context(|| format!("failed to load council roster from {}", config.wallets_file.display()))?;
    info!(members = roster.len(), "council roster loaded");

    let client = SnapshotClient::new(&config.api_url, config.source_timeout())
        .context("failed to build Snapshot client")?;

    let outcome = monitor::run(&config, &roster, &client, !args.no_notify, Utc::now()).await;
    println!("{}", monitor::summary(&outcome));

    Ok(())
}
