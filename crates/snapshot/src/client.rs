//! GraphQL client for the Snapshot hub.
//!
//! Every call is a single POST with a bounded timeout. Failures are
//! reported to the caller and never retried.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use grump_core::{Proposal, Vote};

use crate::queries;
use crate::source::{ProposalSource, SourceError};
use crate::wire::{GraphQlRequest, GraphQlResponse, ProposalsData, VotesData};

/// Page size of the active-proposal listing.
pub const DEFAULT_PROPOSAL_LIMIT: u32 = 50;
/// Page size of the per-proposal vote listing.
pub const DEFAULT_VOTE_LIMIT: u32 = 1000;

/// Queries proposals and votes from a Snapshot GraphQL endpoint.
#[derive(Debug, Clone)]
pub struct SnapshotClient {
    endpoint: String,
    proposal_limit: u32,
    vote_limit: u32,
    /// Shared HTTP client (connection pooling).
    http: reqwest::Client,
}

impl SnapshotClient {
    /// Create a client for `endpoint` whose requests give up after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            proposal_limit: DEFAULT_PROPOSAL_LIMIT,
            vote_limit: DEFAULT_VOTE_LIMIT,
            http,
        })
    }

    pub fn with_limits(mut self, proposal_limit: u32, vote_limit: u32) -> Self {
        self.proposal_limit = proposal_limit;
        self.vote_limit = vote_limit;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn query<V, T>(&self, query: &str, variables: V) -> Result<T, SourceError>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::warn!(
                endpoint = %self.endpoint,
                %status,
                body = %body,
                "snapshot returned non-2xx status"
            );
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse<T> = response.json().await?;
        if let Some(errors) = envelope.errors.filter(|errors| !errors.is_empty()) {
            return Err(SourceError::GraphQl(
                errors.into_iter().map(|e| e.message).collect(),
            ));
        }
        envelope.data.ok_or(SourceError::MissingData("data"))
    }
}

#[async_trait::async_trait]
impl ProposalSource for SnapshotClient {
    async fn active_proposals(&self, space: &str) -> Result<Vec<Proposal>, SourceError> {
        let variables = serde_json::json!({ "space": space, "first": self.proposal_limit });
        let data: ProposalsData = self.query(queries::ACTIVE_PROPOSALS, variables).await?;
        let wire = data.proposals.ok_or(SourceError::MissingData("proposals"))?;

        let mut proposals = Vec::with_capacity(wire.len());
        for record in wire {
            let title = record.title.clone();
            match Proposal::try_from(record) {
                Ok(p) => proposals.push(p),
                Err(e) => tracing::warn!(%title, error = %e, "skipping malformed proposal"),
            }
        }

        tracing::debug!(space, count = proposals.len(), "fetched active proposals");
        Ok(proposals)
    }

    async fn votes(&self, proposal_id: &str) -> Result<Vec<Vote>, SourceError> {
        let variables = serde_json::json!({ "proposal": proposal_id, "first": self.vote_limit });
        let data: VotesData = self.query(queries::PROPOSAL_VOTES, variables).await?;
        let votes: Vec<Vote> = data
            .votes
            .ok_or(SourceError::MissingData("votes"))?
            .into_iter()
            .map(Vote::from)
            .collect();

        tracing::debug!(proposal_id, count = votes.len(), "fetched votes");
        Ok(votes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client(server: &MockServer) -> SnapshotClient {
        SnapshotClient::new(server.url("/graphql"), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn active_proposals_are_decoded() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/graphql")
                    .body_contains("query Proposals")
                    .body_contains("council.eth");
                then.status(200).json_body(json!({
                    "data": {
                        "proposals": [
                            {
                                "id": "0xnew",
                                "title": "GGP-0002 Newer",
                                "author": "0xauthor",
                                "choices": ["Yes", "No"],
                                "start": 1_700_100_000,
                                "end": 1_700_700_000,
                                "created": 1_700_100_000,
                                "state": "active"
                            },
                            {
                                "id": "0xold",
                                "title": "GGP-0001 Older",
                                "author": "0xauthor",
                                "choices": ["Yes", "No"],
                                "start": 1_700_000_000,
                                "end": 1_700_600_000,
                                "created": 1_700_000_000,
                                "state": "active"
                            }
                        ]
                    }
                }));
            })
            .await;

        let proposals = client(&server).active_proposals("council.eth").await.unwrap();
        mock.assert_async().await;
        assert_eq!(proposals.len(), 2);
        assert_eq!(proposals[0].id(), "0xnew");
        assert_eq!(proposals[1].title(), "GGP-0001 Older");
    }

    #[tokio::test]
    async fn malformed_proposals_are_skipped() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(json!({
                    "data": {
                        "proposals": [
                            {
                                "id": "0xbad",
                                "title": "Ends before it starts",
                                "end": 1_000,
                                "created": 2_000,
                                "state": "active"
                            },
                            {
                                "id": "0xgood",
                                "title": "Fine",
                                "end": 2_000,
                                "created": 1_000,
                                "state": "active"
                            }
                        ]
                    }
                }));
            })
            .await;

        let proposals = client(&server).active_proposals("s").await.unwrap();
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].id(), "0xgood");
    }

    #[tokio::test]
    async fn votes_are_decoded_and_normalized() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/graphql")
                    .body_contains("query Votes")
                    .body_contains("0xprop");
                then.status(200).json_body(json!({
                    "data": {
                        "votes": [
                            { "id": "v1", "voter": "0xAAA", "choice": 1, "created": 1_700_000_100 },
                            { "id": "v2", "voter": "0xbbb", "choice": [1, 2], "created": 1_700_000_200 }
                        ]
                    }
                }));
            })
            .await;

        let votes = client(&server).votes("0xprop").await.unwrap();
        mock.assert_async().await;
        assert_eq!(votes.len(), 2);
        assert_eq!(votes[0].voter.as_str(), "0xaaa");
        assert_eq!(votes[1].choice, json!([1, 2]));
    }

    #[tokio::test]
    async fn graphql_errors_are_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(json!({
                    "data": null,
                    "errors": [{ "message": "rate limited" }, { "message": "try later" }]
                }));
            })
            .await;

        let err = client(&server).votes("0xprop").await.unwrap_err();
        match err {
            SourceError::GraphQl(messages) => {
                assert_eq!(messages, vec!["rate limited".to_string(), "try later".to_string()]);
            }
            other => panic!("expected GraphQl error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(503).body("maintenance");
            })
            .await;

        let err = client(&server).active_proposals("s").await.unwrap_err();
        match err {
            SourceError::Status { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("expected Status error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_data_is_reported() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).json_body(json!({ "data": { "votes": null } }));
            })
            .await;

        let err = client(&server).votes("0xprop").await.unwrap_err();
        assert!(matches!(err, SourceError::MissingData("votes")));
    }

    #[tokio::test]
    async fn undecodable_body_is_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200).body("<html>not json</html>");
            })
            .await;

        let err = client(&server).votes("0xprop").await.unwrap_err();
        assert!(matches!(err, SourceError::Http(_)));
    }

    #[tokio::test]
    async fn slow_response_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/graphql");
                then.status(200)
                    .delay(Duration::from_millis(500))
                    .json_body(json!({ "data": { "votes": [] } }));
            })
            .await;

        let client = SnapshotClient::new(server.url("/graphql"), Duration::from_millis(50)).unwrap();
        match client.votes("0xprop").await.unwrap_err() {
            SourceError::Http(e) => assert!(e.is_timeout(), "expected timeout, got: {e}"),
            other => panic!("expected Http error, got: {other:?}"),
        }
    }

    #[test]
    fn with_limits_overrides_defaults() {
        let client = SnapshotClient::new("http://localhost/graphql", Duration::from_secs(1))
            .unwrap()
            .with_limits(10, 20);
        assert_eq!(client.proposal_limit, 10);
        assert_eq!(client.vote_limit, 20);
        assert_eq!(client.endpoint(), "http://localhost/graphql");
    }
}
