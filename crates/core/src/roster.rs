//! Council roster loading.
//!
//! The roster is a plain text file with one wallet address per line.
//! Blank lines and lines starting with `#` are ignored; every address is
//! normalized to lower case on load.

use std::collections::HashSet;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::CoreError;
use crate::model::WalletAddress;

const COMMENT_MARKER: char = '#';

/// Ordered, de-duplicated list of council member addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouncilRoster {
    members: Vec<WalletAddress>,
}

impl CouncilRoster {
    /// Build a roster from addresses, keeping the first occurrence of each.
    pub fn new<I, S>(addresses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut members = Vec::new();
        for raw in addresses {
            let addr = WalletAddress::new(raw.as_ref());
            if addr.as_str().is_empty() {
                continue;
            }
            if seen.insert(addr.clone()) {
                members.push(addr);
            } else {
                warn!(wallet = %addr, "duplicate council address ignored");
            }
        }
        Self { members }
    }

    /// Parse the line-oriented roster format.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER)),
        )
    }

    /// Load the roster from a file. A missing, unreadable or empty file is
    /// an error: nothing can be analyzed without a council list.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            return Err(CoreError::RosterMissing(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path).map_err(|source| CoreError::RosterUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let roster = Self::parse(&text);
        if roster.is_empty() {
            return Err(CoreError::RosterEmpty(path.to_path_buf()));
        }
        debug!(path = %path.display(), members = roster.len(), "council roster loaded");
        Ok(roster)
    }

    pub fn members(&self) -> &[WalletAddress] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &WalletAddress> {
        self.members.iter()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, addr: &WalletAddress) -> bool {
        self.members.contains(addr)
    }
}
