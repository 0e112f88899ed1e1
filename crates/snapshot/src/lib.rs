//! Proposal source for the council voting monitor.
//!
//! This crate provides:
//! - `ProposalSource` trait, the query interface the analyzer consumes
//! - `SnapshotClient`, a GraphQL implementation against the Snapshot hub
//! - wire records and their conversion into `grump_core` types

pub mod client;
pub mod queries;
pub mod source;
pub mod wire;

pub use client::SnapshotClient;
pub use source::{ProposalSource, SourceError};
