use chrono::{DateTime, Utc};
use serde::Serialize;

use grump_core::{AlertBatch, MonitorConfig, ProposalAssessment, SnapshotLinks, SourceDiagnostic, Tone, Urgency};

use crate::template::REPORT_TEMPLATE;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Template rendering failed: {0}")]
    Template(#[from] minijinja::Error),
}

/// Presentation settings of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub heading: String,
    pub links: SnapshotLinks,
    pub council_size: u32,
    pub alert_threshold_days: i64,
    /// Include proposals the whole council has already voted on.
    pub show_completed: bool,
    pub tone: Tone,
    pub version: String,
}

impl ReportConfig {
    pub fn from_monitor(config: &MonitorConfig, version: impl Into<String>) -> Self {
        Self {
            heading: "Council Voting Monitor".to_string(),
            links: config.links(),
            council_size: config.analysis.council_size,
            alert_threshold_days: config.analysis.alert_threshold_days,
            show_completed: config.show_completed,
            tone: config.tone,
            version: version.into(),
        }
    }
}

#[derive(Serialize)]
struct ReportView<'a> {
    heading: &'a str,
    space: &'a str,
    space_url: String,
    generated_at: String,
    council_size: u32,
    alerts_raised: usize,
    proposals: Vec<ProposalView<'a>>,
    diagnostics: &'a [SourceDiagnostic],
    playful: bool,
    version: &'a str,
}

#[derive(Serialize)]
struct ProposalView<'a> {
    id: &'a str,
    title: &'a str,
    link: String,
    age_days: i64,
    age_class: &'static str,
    days_left_text: String,
    days_left_class: &'static str,
    total_votes: usize,
    council_votes: usize,
    vote_class: &'static str,
    alert: bool,
    non_voters: Vec<&'a str>,
}

/// Assessments shown in the report. Unless `show_completed` is set,
/// proposals with every configured council vote in are hidden.
pub fn displayed<'a>(batch: &'a AlertBatch, config: &ReportConfig) -> Vec<&'a ProposalAssessment> {
    batch
        .assessments
        .iter()
        .filter(|a| config.show_completed || a.council_votes_cast < config.council_size as usize)
        .collect()
}

fn days_left_text(days_remaining: i64) -> String {
    match days_remaining {
        d if d < 0 => "Ended".to_string(),
        1 => "1 day left".to_string(),
        d => format!("{d} days left"),
    }
}

fn urgency_class(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Neutral => "",
        other => other.as_str(),
    }
}

/// Renders an [`AlertBatch`] into an HTML document.
#[derive(Debug, Default)]
pub struct ReportRenderer {
    _private: (),
}

impl ReportRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configured minijinja environment. The `.html` template name
    /// turns on HTML auto-escaping.
    fn build_env() -> minijinja::Environment<'static> {
        minijinja::Environment::new()
    }

    /// Render the report as of `generated_at`.
    pub fn render(
        &self,
        batch: &AlertBatch,
        config: &ReportConfig,
        generated_at: DateTime<Utc>,
    ) -> Result<String, ReportError> {
        let proposals: Vec<ProposalView<'_>> = displayed(batch, config)
            .into_iter()
            .map(|a| ProposalView {
                id: &a.proposal_id,
                title: &a.title,
                link: config.links.proposal_url(&a.proposal_id),
                age_days: a.age_days,
                age_class: if a.age_days >= config.alert_threshold_days { "old" } else { "" },
                days_left_text: days_left_text(a.days_remaining),
                days_left_class: urgency_class(a.urgency),
                total_votes: a.total_votes,
                council_votes: a.council_votes_cast,
                vote_class: a.vote_class.as_str(),
                alert: a.alert_triggered,
                non_voters: a.council_non_voters.iter().map(|w| w.as_str()).collect(),
            })
            .collect();

        let view = ReportView {
            heading: &config.heading,
            space: &config.links.space,
            space_url: config.links.space_url(),
            generated_at: generated_at.format("%d %b %Y at %H:%M (UTC)").to_string(),
            council_size: config.council_size,
            alerts_raised: batch.summary.alerts_raised,
            proposals,
            diagnostics: &batch.diagnostics,
            playful: config.tone == Tone::Playful,
            version: &config.version,
        };

        let html = Self::build_env().render_named_str("report.html", REPORT_TEMPLATE, &view)?;
        tracing::debug!(bytes = html.len(), "report rendered");
        Ok(html)
    }
}
