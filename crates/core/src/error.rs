use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("wallets file '{}' not found", .0.display())]
    RosterMissing(PathBuf),

    #[error("failed to read wallets file '{}': {source}", path.display())]
    RosterUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("wallets file '{}' contains no addresses", .0.display())]
    RosterEmpty(PathBuf),

    #[error("invalid proposal {id}: {reason}")]
    InvalidProposal { id: String, reason: String },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    /// True for the errors that mean the council list could not be loaded.
    pub fn is_roster(&self) -> bool {
        matches!(
            self,
            CoreError::RosterMissing(_) | CoreError::RosterUnreadable { .. } | CoreError::RosterEmpty(_)
        )
    }
}
