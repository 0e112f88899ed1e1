//! Voting status analysis.
//!
//! Reconciles proposal timing, vote records and the council roster into
//! an [`AlertBatch`](grump_core::AlertBatch):
//! - age filtering against `max_proposal_age_days`
//! - per-proposal council membership, non-voters in roster order
//! - alert triggering against `alert_threshold_days`
//! - display classification of vote coverage and remaining time

pub mod analyzer;
pub mod classify;

pub use analyzer::{analyze, assess};
pub use classify::{classify_urgency, classify_votes, whole_days};
