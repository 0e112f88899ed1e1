//! One monitoring pass: list proposals, analyze, write the report, notify.
//!
//! Only roster loading is fatal (done by the caller). Every later stage
//! logs its failure and lets the pass finish.

use chrono::{DateTime, Utc};

use grump_analyzer::analyze;
use grump_core::{AlertBatch, CouncilRoster, MonitorConfig};
use grump_notify::{Composer, DeliveryReport, Dispatcher};
use grump_report::{ReportConfig, ReportRenderer};
use grump_snapshot::ProposalSource;

/// What a pass produced.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub batch: AlertBatch,
    pub report_written: bool,
    pub compose_failures: usize,
    /// `None` when notifications were disabled or no channel is configured.
    pub delivery: Option<DeliveryReport>,
}

pub async fn run(
    config: &MonitorConfig,
    roster: &CouncilRoster,
    source: &dyn ProposalSource,
    notify: bool,
    now: DateTime<Utc>,
) -> RunOutcome {
    let proposals = match source.active_proposals(&config.space).await {
        Ok(proposals) => proposals,
        Err(e) => {
            tracing::warn!(space = %config.space, error = %e, "failed to list proposals, continuing with none");
            Vec::new()
        }
    };
    tracing::info!(count = proposals.len(), space = %config.space, "active proposals fetched");

    let batch = analyze(roster, &proposals, source, now, &config.analysis).await;
    tracing::info!(
        considered = batch.summary.proposals_considered,
        assessed = batch.summary.proposals_assessed,
        alerting = batch.summary.proposals_alerting,
        alerts = batch.summary.alerts_raised,
        "analysis complete"
    );

    let mut outcome = RunOutcome {
        report_written: write_report(config, &batch, now).await,
        ..RunOutcome::default()
    };

    if notify {
        let composition = Composer::new().compose(&batch, &config.message_config());
        outcome.compose_failures = composition.failures.len();

        if composition.messages.is_empty() {
            tracing::info!("no reminders to send");
        } else {
            match Dispatcher::from_config(config) {
                Ok(Some(dispatcher)) => {
                    let report = dispatcher.dispatch(&composition.messages).await;
                    tracing::info!(
                        channel = dispatcher.channel_name(),
                        attempted = report.attempted(),
                        delivered = report.delivered(),
                        "reminders dispatched"
                    );
                    outcome.delivery = Some(report);
                }
                Ok(None) => {}
                Err(e) => tracing::error!(error = %e, "failed to set up notification channel"),
            }
        }
    } else {
        tracing::info!("notifications disabled");
    }

    outcome.batch = batch;
    outcome
}

async fn write_report(config: &MonitorConfig, batch: &AlertBatch, now: DateTime<Utc>) -> bool {
    let report_config = ReportConfig::from_monitor(config, env!("CARGO_PKG_VERSION"));
    let html = match ReportRenderer::new().render(batch, &report_config, now) {
        Ok(html) => html,
        Err(e) => {
            tracing::error!(error = %e, "failed to render report");
            return false;
        }
    };

    match tokio::fs::write(&config.output_html, html).await {
        Ok(()) => {
            tracing::info!(path = %config.output_html.display(), "report written");
            true
        }
        Err(e) => {
            tracing::error!(path = %config.output_html.display(), error = %e, "failed to write report");
            false
        }
    }
}

/// Console summary of the pass: alerts, unchecked proposals and the
/// reminder tally.
pub fn summary(outcome: &RunOutcome) -> String {
    let batch = &outcome.batch;
    let mut lines = vec![String::new(), format!("Proposals checked: {}", batch.summary.proposals_assessed)];

    if batch.alerts.is_empty() {
        lines.push("No alerts. Every council member is on track.".to_string());
    } else {
        lines.push(format!("Alerts: {}", batch.alerts.len()));
        for alert in &batch.alerts {
            lines.push(format!(
                "  {}... has not voted on \"{}\" ({} days old)",
                alert.wallet.prefix(10),
                alert.proposal_title,
                alert.age_days
            ));
        }
    }
    for diagnostic in &batch.diagnostics {
        lines.push(format!(
            "  could not check \"{}\": {}",
            diagnostic.proposal_title, diagnostic.error
        ));
    }

    if outcome.compose_failures > 0 {
        lines.push(format!("Reminders not composed: {}", outcome.compose_failures));
    }
    if let Some(delivery) = &outcome.delivery {
        lines.push(format!(
            "Reminders delivered: {}/{}",
            delivery.delivered(),
            delivery.attempted()
        ));
        for failure in delivery.failures() {
            lines.push(format!(
                "  not delivered \"{}\": {}",
                failure.title,
                failure.error.as_deref().unwrap_or("unknown error")
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    use chrono::{Duration, TimeZone};
    use grump_core::{Proposal, Vote};
    use grump_snapshot::SourceError;

    const A: &str = "0xaaaa000000000000000000000000000000000001";
    const B: &str = "0xbbbb000000000000000000000000000000000002";

    struct StaticSource {
        proposals: Result<Vec<Proposal>, u16>,
        votes: HashMap<String, Vec<Vote>>,
    }

    #[async_trait::async_trait]
    impl ProposalSource for StaticSource {
        async fn active_proposals(&self, _space: &str) -> Result<Vec<Proposal>, SourceError> {
            self.proposals.clone().map_err(|status| SourceError::Status {
                status,
                body: "unavailable".to_string(),
            })
        }

        async fn votes(&self, proposal_id: &str) -> Result<Vec<Vote>, SourceError> {
            Ok(self.votes.get(proposal_id).cloned().unwrap_or_default())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 28, 12, 0, 0).unwrap()
    }

    fn config(dir: &Path) -> MonitorConfig {
        let mut config = MonitorConfig::from_lookup(|_| None);
        config.output_html = dir.join("index.html");
        config.notification_log = dir.join("messages.txt");
        config.analysis.council_size = 2;
        config
    }

    fn source() -> StaticSource {
        let created = now() - Duration::days(6);
        let proposal = Proposal::new(
            "0xp1",
            "GGP-0042 Raise the cap",
            created,
            created + Duration::days(7),
        )
        .unwrap();
        StaticSource {
            proposals: Ok(vec![proposal]),
            votes: HashMap::from([("0xp1".to_string(), vec![Vote::new(A, now())])]),
        }
    }

    #[tokio::test]
    async fn full_pass_writes_report_and_log() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let roster = CouncilRoster::new([A, B]);

        let outcome = run(&config, &roster, &source(), true, now()).await;

        assert_eq!(outcome.batch.alerts.len(), 1);
        assert_eq!(outcome.batch.alerts[0].wallet.as_str(), B);
        assert!(outcome.report_written);
        let report = std::fs::read_to_string(&config.output_html).unwrap();
        assert!(report.contains(B));

        let delivery = outcome.delivery.unwrap();
        assert_eq!(delivery.attempted(), 1);
        assert!(delivery.all_delivered());
        let log = std::fs::read_to_string(&config.notification_log).unwrap();
        assert!(log.contains("GGP-0042 - \"Raise the cap\""));
    }

    #[tokio::test]
    async fn no_notify_skips_delivery() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let roster = CouncilRoster::new([A, B]);

        let outcome = run(&config, &roster, &source(), false, now()).await;

        assert!(outcome.delivery.is_none());
        assert!(!config.notification_log.exists());
        assert!(outcome.report_written);
    }

    #[tokio::test]
    async fn listing_failure_continues_with_empty_batch() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let roster = CouncilRoster::new([A, B]);
        let source = StaticSource {
            proposals: Err(503),
            votes: HashMap::new(),
        };

        let outcome = run(&config, &roster, &source, true, now()).await;

        assert!(outcome.batch.is_empty());
        assert!(outcome.delivery.is_none());
        let report = std::fs::read_to_string(&config.output_html).unwrap();
        assert!(report.contains("No recent proposals requiring attention"));
    }

    #[tokio::test]
    async fn unwritable_report_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        config.output_html = dir.path().join("missing").join("index.html");
        let roster = CouncilRoster::new([A, B]);

        let outcome = run(&config, &roster, &source(), true, now()).await;

        assert!(!outcome.report_written);
        assert_eq!(outcome.delivery.map(|d| d.delivered()), Some(1));
    }

    #[test]
    fn summary_reports_alerts_and_reminder_tally() {
        use grump_core::{AlertRecord, WalletAddress};
        use grump_notify::traits::DispatchResult;

        let mut outcome = RunOutcome::default();
        outcome.batch.summary.proposals_assessed = 1;
        outcome.batch.alerts.push(AlertRecord {
            wallet: WalletAddress::new(B),
            proposal_id: "0xp1".to_string(),
            proposal_title: "GGP-0042 Raise the cap".to_string(),
            age_days: 6,
        });
        outcome.compose_failures = 1;
        outcome.delivery = Some(DeliveryReport {
            results: vec![
                DispatchResult {
                    channel: "webhook".to_string(),
                    proposal_id: "0xp1".to_string(),
                    title: "GGP-0042 Raise the cap".to_string(),
                    success: false,
                    error: Some("webhook returned 404".to_string()),
                    duration_ms: 3,
                },
                DispatchResult {
                    channel: "webhook".to_string(),
                    proposal_id: "0xp2".to_string(),
                    title: "GGP-0043 Lower the cap".to_string(),
                    success: true,
                    error: None,
                    duration_ms: 2,
                },
            ],
        });

        let text = summary(&outcome);

        assert!(text.contains("Proposals checked: 1"));
        assert!(text.contains("0xbbbb0000... has not voted on \"GGP-0042 Raise the cap\" (6 days old)"));
        assert!(text.contains("Reminders not composed: 1"));
        assert!(text.contains("Reminders delivered: 1/2"));
        assert!(text.contains("not delivered \"GGP-0042 Raise the cap\": webhook returned 404"));
    }

    #[test]
    fn summary_without_alerts_or_notifications() {
        let text = summary(&RunOutcome::default());
        assert!(text.contains("No alerts."));
        assert!(!text.contains("Reminders"));
    }
}
