//! Error taxonomy for repository operations
//!
//! Conditions split into two families:
//!
//! - Recoverable "not ready yet" states (`AlreadyInitialized`,
//!   `NothingToCommit`, `UnknownBranch`, `BranchExists`): the CLI reports
//!   them and exits cleanly without touching any store.
//! - Structural failures (`InconsistentHead`, `MalformedStore`, `Io`):
//!   these abort the current operation.
//!
//! No operation retries automatically; retry is left to the caller.

use thiserror::Error;

/// For recoverable variants the `Display` string doubles as the console
/// message the CLI reports.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error(".git directory already exists in {0}")]
    AlreadyInitialized(String),

    #[error("No changes to commit.")]
    NothingToCommit,

    #[error("Branch {0} does not exist.")]
    UnknownBranch(String),

    #[error("Branch {0} already exists.")]
    BranchExists(String),

    #[error("HEAD points at branch {0}, which is missing from the branch store")]
    InconsistentHead(String),

    #[error("malformed {file}: {reason}")]
    MalformedStore { file: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RepoError {
    /// Recoverable conditions are reported to the user without aborting
    /// the process; everything else is a hard failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            RepoError::AlreadyInitialized(_)
                | RepoError::NothingToCommit
                | RepoError::UnknownBranch(_)
                | RepoError::BranchExists(_)
        )
    }
}
