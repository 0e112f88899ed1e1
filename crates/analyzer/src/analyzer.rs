//! Per-proposal voting status and alert generation.
//!
//! Proposals are processed one at a time in input order. A failed vote
//! fetch drops that proposal from the batch and leaves a diagnostic; it
//! never aborts the run.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use grump_core::{
    AlertBatch, AlertRecord, AnalysisConfig, BatchSummary, CouncilRoster, Proposal,
    ProposalAssessment, SourceDiagnostic, Vote, WalletAddress,
};
use grump_snapshot::ProposalSource;

use crate::classify::{classify_urgency, classify_votes, whole_days};

/// Analyze `proposals` against the council roster as of `now`.
///
/// Only `source.votes` is called; the proposal list is supplied by the
/// caller. Output order follows input order, non-voters follow roster order.
pub async fn analyze(
    roster: &CouncilRoster,
    proposals: &[Proposal],
    source: &dyn ProposalSource,
    now: DateTime<Utc>,
    config: &AnalysisConfig,
) -> AlertBatch {
    let candidates: Vec<&Proposal> = proposals
        .iter()
        .filter(|p| p.is_active())
        .filter(|p| {
            let age = whole_days(p.created(), now);
            if age > config.max_proposal_age_days {
                debug!(proposal_id = p.id(), age_days = age, "proposal older than max age, skipped");
                false
            } else {
                true
            }
        })
        .collect();

    if candidates.is_empty() {
        return AlertBatch::empty();
    }

    let mut assessments = Vec::with_capacity(candidates.len());
    let mut alerts = Vec::new();
    let mut diagnostics = Vec::new();

    for proposal in &candidates {
        let votes = match source.votes(proposal.id()).await {
            Ok(votes) => votes,
            Err(e) => {
                warn!(
                    proposal_id = proposal.id(),
                    title = proposal.title(),
                    error = %e,
                    "failed to fetch votes, proposal excluded"
                );
                diagnostics.push(SourceDiagnostic {
                    proposal_id: proposal.id().to_string(),
                    proposal_title: proposal.title().to_string(),
                    error: e.to_string(),
                });
                continue;
            }
        };

        let assessment = assess(roster, proposal, &votes, now, config);
        if assessment.alert_triggered {
            alerts.extend(assessment.council_non_voters.iter().map(|wallet| AlertRecord {
                wallet: wallet.clone(),
                proposal_id: assessment.proposal_id.clone(),
                proposal_title: assessment.title.clone(),
                age_days: assessment.age_days,
            }));
        }
        assessments.push(assessment);
    }

    let summary = BatchSummary {
        proposals_considered: candidates.len(),
        proposals_assessed: assessments.len(),
        proposals_alerting: assessments.iter().filter(|a| a.alert_triggered).count(),
        alerts_raised: alerts.len(),
    };
    info!(
        considered = summary.proposals_considered,
        assessed = summary.proposals_assessed,
        alerts = summary.alerts_raised,
        "voting status analyzed"
    );

    AlertBatch {
        assessments,
        alerts,
        summary,
        diagnostics,
    }
}

/// Build the assessment of one proposal from its votes.
pub fn assess(
    roster: &CouncilRoster,
    proposal: &Proposal,
    votes: &[Vote],
    now: DateTime<Utc>,
    config: &AnalysisConfig,
) -> ProposalAssessment {
    let voters: HashSet<&WalletAddress> = votes.iter().map(|v| &v.voter).collect();

    let council_non_voters: Vec<WalletAddress> = roster
        .iter()
        .filter(|member| !voters.contains(member))
        .cloned()
        .collect();
    let council_votes_cast = roster.len() - council_non_voters.len();

    let age_days = whole_days(proposal.created(), now);
    let days_remaining = whole_days(now, proposal.end());
    let alert_triggered =
        age_days >= config.alert_threshold_days && !council_non_voters.is_empty();

    let vote_class = classify_votes(council_votes_cast, config.council_size);
    let urgency = classify_urgency(vote_class, days_remaining);

    ProposalAssessment {
        proposal_id: proposal.id().to_string(),
        title: proposal.title().to_string(),
        created: proposal.created(),
        end: proposal.end(),
        age_days,
        days_remaining,
        total_votes: votes.len(),
        council_votes_cast,
        council_non_voters,
        alert_triggered,
        vote_class,
        urgency,
    }
}
