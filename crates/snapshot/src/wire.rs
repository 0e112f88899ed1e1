//! Wire records returned by the Snapshot GraphQL API.
//!
//! Timestamps arrive as Unix seconds; they are converted to UTC datetimes
//! when the records are turned into `grump_core` values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use grump_core::{CoreError, Proposal, ProposalState, Vote, WalletAddress};

/// Request body of a GraphQL POST.
#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a, V: Serialize> {
    pub query: &'a str,
    pub variables: V,
}

/// Standard GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ProposalsData {
    pub proposals: Option<Vec<WireProposal>>,
}

#[derive(Debug, Deserialize)]
pub struct VotesData {
    pub votes: Option<Vec<WireVote>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireProposal {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub start: Option<i64>,
    pub end: i64,
    pub created: i64,
    pub state: ProposalState,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireVote {
    #[serde(default)]
    pub id: String,
    pub voter: String,
    #[serde(default)]
    pub choice: serde_json::Value,
    pub created: i64,
}

fn to_utc(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

impl TryFrom<WireProposal> for Proposal {
    type Error = CoreError;

    fn try_from(wire: WireProposal) -> Result<Self, Self::Error> {
        let invalid = |field: &str, secs: i64| CoreError::InvalidProposal {
            id: wire.id.clone(),
            reason: format!("{field} timestamp {secs} out of range"),
        };
        let created = to_utc(wire.created).ok_or_else(|| invalid("created", wire.created))?;
        let end = to_utc(wire.end).ok_or_else(|| invalid("end", wire.end))?;

        let mut proposal = Proposal::new(wire.id.clone(), wire.title, created, end)?
            .with_author(wire.author)
            .with_choices(wire.choices)
            .with_state(wire.state);
        if let Some(start) = wire.start.and_then(to_utc) {
            proposal = proposal.with_start(start);
        }
        Ok(proposal)
    }
}

impl From<WireVote> for Vote {
    /// An out-of-range cast time is replaced by the Unix epoch; the vote
    /// itself still counts.
    fn from(wire: WireVote) -> Self {
        let created = to_utc(wire.created).unwrap_or_else(|| {
            tracing::debug!(vote_id = %wire.id, created = wire.created, "vote timestamp out of range");
            DateTime::<Utc>::UNIX_EPOCH
        });
        Vote {
            voter: WalletAddress::new(&wire.voter),
            choice: wire.choice,
            created,
        }
    }
}
