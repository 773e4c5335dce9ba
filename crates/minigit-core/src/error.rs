//! Error types for repository operations.
//!
//! Every variant is recoverable: the repository is left exactly as it was
//! before the failing call.

use thiserror::Error;

/// All possible repository errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepoError {
    /// An operation other than `init` was attempted first.
    #[error("repository not initialized (run 'init' first)")]
    NotInitialized,
    /// `commit` was called with an empty staging area.
    #[error("nothing to commit (use 'add' first)")]
    NothingToCommit,
    /// A branch with this name is already registered.
    #[error("branch '{0}' already exists")]
    BranchAlreadyExists(String),
    /// No branch with this name exists.
    #[error("branch '{0}' not found")]
    BranchNotFound(String),
    /// A branch cannot be merged into itself.
    #[error("cannot merge branch '{0}' into itself")]
    MergeIntoSelf(String),
    /// The merge source has no commits.
    #[error("source branch '{0}' has no commits")]
    SourceBranchEmpty(String),
    /// No commit with this id could be located.
    #[error("commit '{0}' not found")]
    CommitNotFound(String),
    /// The active branch has no commits to operate on.
    #[error("no commits on the active branch")]
    NoCommits,
    /// The file is not present in the working set.
    #[error("file '{0}' not in working directory")]
    FileNotTracked(String),
    /// The active branch cannot be deleted.
    #[error("cannot delete the active branch '{0}'")]
    DeleteActiveBranch(String),
}

/// Convenience alias for Results in minigit.
pub type RepoResult<T> = Result<T, RepoError>;
