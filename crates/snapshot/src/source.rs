//! Source trait definition and shared error types.

use grump_core::{Proposal, Vote};

/// Errors raised by a proposal source call.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("source returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("response carried no `{0}` data")]
    MissingData(&'static str),
}

/// Read-only query interface over a proposal platform.
#[async_trait::async_trait]
pub trait ProposalSource: Send + Sync {
    /// Active proposals of `space`, newest first.
    async fn active_proposals(&self, space: &str) -> Result<Vec<Proposal>, SourceError>;

    /// All votes cast on one proposal.
    async fn votes(&self, proposal_id: &str) -> Result<Vec<Vote>, SourceError>;
}
