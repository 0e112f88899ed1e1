//! Turns an alert batch into reminder messages.
//!
//! One message is composed per assessment with `alert_triggered` set, in
//! batch order. The tone only selects the template; it never changes which
//! proposals get a message.

use std::sync::LazyLock;

use regex::Regex;

use grump_core::{AlertBatch, MessageConfig, ProposalAssessment};

use crate::templating::{pluralize, MessageContext, TemplateRenderer};
use crate::traits::Message;

/// `GGP-0055 Deploying ...`, `GIP-123 ...`: a governance code, whitespace,
/// then the free-text name.
static PROPOSAL_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(G[A-Z]P-\d+)\s+(.+)$").expect("proposal code pattern is valid")
});

/// A message that could not be composed.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ComposeFailure {
    pub proposal_id: String,
    pub title: String,
    pub error: String,
}

/// Output of [`Composer::compose`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct Composition {
    pub messages: Vec<Message>,
    pub failures: Vec<ComposeFailure>,
}

/// Builds reminder messages from an [`AlertBatch`].
#[derive(Debug, Clone, Default)]
pub struct Composer {
    renderer: TemplateRenderer,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_renderer(renderer: TemplateRenderer) -> Self {
        Self { renderer }
    }

    /// Compose one message per alerting proposal. A failure for one
    /// proposal is recorded and the rest are still composed.
    pub fn compose(&self, batch: &AlertBatch, config: &MessageConfig) -> Composition {
        let mut composition = Composition::default();

        for assessment in batch.triggered() {
            let ctx = message_context(assessment, config);
            match self.renderer.render(config.tone, &ctx) {
                Ok(text) => composition.messages.push(Message {
                    proposal_id: assessment.proposal_id.clone(),
                    title: assessment.title.clone(),
                    text,
                }),
                Err(e) => {
                    tracing::warn!(
                        proposal_id = %assessment.proposal_id,
                        title = %assessment.title,
                        error = %e,
                        "failed to compose reminder"
                    );
                    composition.failures.push(ComposeFailure {
                        proposal_id: assessment.proposal_id.clone(),
                        title: assessment.title.clone(),
                        error: e.to_string(),
                    });
                }
            }
        }

        composition
    }
}

fn message_context(assessment: &ProposalAssessment, config: &MessageConfig) -> MessageContext {
    MessageContext {
        title: format_title(&assessment.title),
        missing_votes: missing_votes(config.council_size, assessment.council_votes_cast),
        days_left: days_left_text(assessment.days_remaining),
        threshold_days: config.alert_threshold_days,
        non_voters: assessment
            .council_non_voters
            .iter()
            .map(|w| w.as_str().to_string())
            .collect(),
        link: config.links.proposal_url(&assessment.proposal_id),
        dashboard_url: config.dashboard_url.clone(),
        mentions: config.mentions.iter().map(|id| format!("<@{id}>")).collect(),
    }
}

/// `GGP-0055 Deploying token X` becomes `GGP-0055 - "Deploying token X"`;
/// any other title is wrapped in quotes.
pub fn format_title(title: &str) -> String {
    match PROPOSAL_CODE.captures(title) {
        Some(caps) => format!("{} - \"{}\"", &caps[1], &caps[2]),
        None => format!("\"{title}\""),
    }
}

/// Votes still missing against the configured council size.
pub fn missing_votes(council_size: u32, council_votes_cast: usize) -> u32 {
    let cast = u32::try_from(council_votes_cast).unwrap_or(u32::MAX);
    council_size.saturating_sub(cast)
}

/// `N day(s)` while the proposal runs, `0 days (ENDED)` once it is over.
pub fn days_left_text(days_remaining: i64) -> String {
    if days_remaining < 0 {
        "0 days (ENDED)".to_string()
    } else {
        format!("{days_remaining} {}", pluralize(days_remaining, "day"))
    }
}
