//! Whole-file comparison between the working set and the last commit.
//!
//! Equality is decided by fingerprint, not by line diffing. A modified file
//! reports both raw contents so the caller can show them side by side.

use serde::Serialize;

use crate::hash::fingerprint;
use crate::snapshot::Snapshot;

/// Why a working file counts as new.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NewReason {
    /// The active branch has no commits to compare against.
    NoCommits,
    /// The last commit does not contain this file.
    NotInLastCommit,
}

/// Result of comparing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DiffStatus {
    New {
        reason: NewReason,
    },
    Unchanged,
    Modified {
        committed_fingerprint: String,
        committed: String,
        working: String,
    },
}

/// Diff of a single working file against the active head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    pub name: String,
    pub working_fingerprint: String,
    #[serde(flatten)]
    pub status: DiffStatus,
}

impl DiffReport {
    pub fn is_modified(&self) -> bool {
        matches!(self.status, DiffStatus::Modified { .. })
    }
}

/// Compare `working` content of `name` against the committed snapshot, if any.
pub fn compare_file(name: &str, working: &str, committed: Option<&Snapshot>) -> DiffReport {
    let working_fingerprint = fingerprint(working);

    let status = match committed {
        None => DiffStatus::New {
            reason: NewReason::NoCommits,
        },
        Some(snapshot) => match snapshot.get(name) {
            None => DiffStatus::New {
                reason: NewReason::NotInLastCommit,
            },
            Some(old) => {
                let committed_fingerprint = fingerprint(old);
                if committed_fingerprint == working_fingerprint {
                    DiffStatus::Unchanged
                } else {
                    DiffStatus::Modified {
                        committed_fingerprint,
                        committed: old.to_string(),
                        working: working.to_string(),
                    }
                }
            }
        },
    };

    DiffReport {
        name: name.to_string(),
        working_fingerprint,
        status,
    }
}
