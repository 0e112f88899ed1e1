use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A wallet address in canonical (trimmed, lower-case) form.
///
/// Every address that enters the system goes through [`WalletAddress::new`],
/// so roster entries and voter addresses always compare on the same form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Leading `len` characters, used to identify a wallet in console output.
    pub fn prefix(&self, len: usize) -> &str {
        self.0.get(..len).unwrap_or(&self.0)
    }
}

impl From<String> for WalletAddress {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for WalletAddress {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<WalletAddress> for String {
    fn from(addr: WalletAddress) -> Self {
        addr.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle state reported by the proposal platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalState {
    Pending,
    Active,
    Closed,
    #[serde(other)]
    Unknown,
}

/// A governance proposal as fetched from the source.
///
/// Construction goes through [`Proposal::new`], which rejects records whose
/// creation time lies after their end time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proposal {
    id: String,
    title: String,
    author: String,
    choices: Vec<String>,
    start: Option<DateTime<Utc>>,
    created: DateTime<Utc>,
    end: DateTime<Utc>,
    state: ProposalState,
}

impl Proposal {
    /// Create an active proposal with no author or choices.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        created: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Self, CoreError> {
        let id = id.into();
        if created > end {
            return Err(CoreError::InvalidProposal {
                id,
                reason: format!("created {created} is after end {end}"),
            });
        }
        Ok(Self {
            id,
            title: title.into(),
            author: String::new(),
            choices: Vec::new(),
            start: None,
            created,
            end,
            state: ProposalState::Active,
        })
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = choices;
        self
    }

    pub fn with_start(mut self, start: DateTime<Utc>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_state(mut self, state: ProposalState) -> Self {
        self.state = state;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn state(&self) -> ProposalState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ProposalState::Active
    }
}

/// A single vote cast on a proposal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: WalletAddress,
    /// Opaque choice payload: an index, a list of indices or a weight map
    /// depending on the proposal's voting type.
    pub choice: serde_json::Value,
    pub created: DateTime<Utc>,
}

impl Vote {
    pub fn new(voter: &str, created: DateTime<Utc>) -> Self {
        Self {
            voter: WalletAddress::new(voter),
            choice: serde_json::Value::Null,
            created,
        }
    }
}

/// Display band for how much of the council has voted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VoteClass {
    AllVoted,
    MostVoted,
    FewVoted,
}

impl VoteClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteClass::AllVoted => "all-voted",
            VoteClass::MostVoted => "most-voted",
            VoteClass::FewVoted => "few-voted",
        }
    }
}

impl fmt::Display for VoteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display band for the time left on a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Urgent,
    Soon,
    Neutral,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Urgent => "urgent",
            Urgency::Soon => "soon",
            Urgency::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Voting status of one proposal against the council roster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalAssessment {
    pub proposal_id: String,
    pub title: String,
    pub created: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Whole days since creation.
    pub age_days: i64,
    /// Whole days until end; negative once the proposal has ended.
    pub days_remaining: i64,
    /// Votes from any voter, council or not.
    pub total_votes: usize,
    pub council_votes_cast: usize,
    /// Roster members without a vote, in roster order.
    pub council_non_voters: Vec<WalletAddress>,
    pub alert_triggered: bool,
    pub vote_class: VoteClass,
    pub urgency: Urgency,
}

/// One council member who has not voted on an alerting proposal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRecord {
    pub wallet: WalletAddress,
    pub proposal_id: String,
    pub proposal_title: String,
    pub age_days: i64,
}

/// A proposal dropped from the batch because its votes could not be fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceDiagnostic {
    pub proposal_id: String,
    pub proposal_title: String,
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Proposals that survived the state and age filters.
    pub proposals_considered: usize,
    /// Proposals whose votes were fetched and assessed.
    pub proposals_assessed: usize,
    /// Proposals with `alert_triggered` set.
    pub proposals_alerting: usize,
    /// Alert records across all proposals.
    pub alerts_raised: usize,
}

/// Output of one analysis run, shared by the report renderer and the
/// notification composer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AlertBatch {
    pub assessments: Vec<ProposalAssessment>,
    pub alerts: Vec<AlertRecord>,
    pub summary: BatchSummary,
    pub diagnostics: Vec<SourceDiagnostic>,
}

impl AlertBatch {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assessments with `alert_triggered` set, in batch order.
    pub fn triggered(&self) -> impl Iterator<Item = &ProposalAssessment> {
        self.assessments.iter().filter(|a| a.alert_triggered)
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn wallet_address_is_canonical() {
        let a = WalletAddress::new("  0xAbCdEF0123  ");
        assert_eq!(a.as_str(), "0xabcdef0123");
        assert_eq!(a, WalletAddress::from("0XABCDEF0123"));
    }

    #[test]
    fn wallet_prefix_handles_short_addresses() {
        let a = WalletAddress::new("0x12345678901234");
        assert_eq!(a.prefix(10), "0x12345678");
        assert_eq!(WalletAddress::new("0x1").prefix(10), "0x1");
    }

    #[test]
    fn wallet_deserializes_normalized() {
        let a: WalletAddress = serde_json::from_str("\"0xDEADbeef\"").unwrap();
        assert_eq!(a.as_str(), "0xdeadbeef");
        assert_eq!(serde_json::to_string(&a).unwrap(), "\"0xdeadbeef\"");
    }

    #[test]
    fn proposal_rejects_end_before_creation() {
        let err = Proposal::new("p1", "t", ts(1_000), ts(999)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidProposal { ref id, .. } if id == "p1"));
    }

    #[test]
    fn proposal_accepts_equal_created_and_end() {
        let p = Proposal::new("p1", "t", ts(1_000), ts(1_000)).unwrap();
        assert!(p.is_active());
        assert_eq!(p.created(), p.end());
    }

    #[test]
    fn proposal_builder_sets_optional_fields() {
        let created = ts(1_700_000_000);
        let p = Proposal::new("0xabc", "GGP-1 Title", created, created + Duration::days(7))
            .unwrap()
            .with_author("0xauthor")
            .with_choices(vec!["Yes".into(), "No".into()])
            .with_start(created)
            .with_state(ProposalState::Closed);
        assert_eq!(p.author(), "0xauthor");
        assert_eq!(p.choices().len(), 2);
        assert_eq!(p.start(), Some(created));
        assert!(!p.is_active());
    }

    #[test]
    fn unknown_state_deserializes() {
        let s: ProposalState = serde_json::from_str("\"archived\"").unwrap();
        assert_eq!(s, ProposalState::Unknown);
        let s: ProposalState = serde_json::from_str("\"active\"").unwrap();
        assert_eq!(s, ProposalState::Active);
    }

    #[test]
    fn classes_render_as_css_names() {
        assert_eq!(VoteClass::MostVoted.to_string(), "most-voted");
        assert_eq!(Urgency::Urgent.to_string(), "urgent");
        assert_eq!(
            serde_json::to_string(&VoteClass::AllVoted).unwrap(),
            "\"all-voted\""
        );
    }

    #[test]
    fn empty_batch_has_no_triggered() {
        let batch = AlertBatch::empty();
        assert!(batch.is_empty());
        assert_eq!(batch.triggered().count(), 0);
        assert_eq!(batch.summary, BatchSummary::default());
    }
}
