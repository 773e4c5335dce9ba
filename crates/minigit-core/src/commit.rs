//! Commits: immutable nodes of the version tree.
//!
//! A commit pairs a snapshot with its message, timestamp and a single parent
//! link. Commits live in a [`CommitGraph`](crate::graph::CommitGraph) and
//! refer to each other by [`CommitRef`], never by ownership.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::snapshot::Snapshot;

/// Stable handle to a commit inside its repository's graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CommitRef(pub(crate) usize);

impl CommitRef {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for CommitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the commit tree.
///
/// Everything except `children` is fixed at creation.
#[derive(Debug, Clone)]
pub struct Commit {
    id: String,
    message: String,
    timestamp: DateTime<Utc>,
    parent: Option<CommitRef>,
    children: Vec<CommitRef>,
    snapshot: Snapshot,
}

impl Commit {
    pub(crate) fn new(
        id: String,
        message: String,
        timestamp: DateTime<Utc>,
        parent: Option<CommitRef>,
        snapshot: Snapshot,
    ) -> Self {
        Self {
            id,
            message,
            timestamp,
            parent,
            children: Vec::new(),
            snapshot,
        }
    }

    /// Fingerprint-derived identifier.
    ///
    /// Only unique while timestamps differ: the same message and contents
    /// committed within one second produce the same id.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Parent commit (None for a root).
    pub fn parent(&self) -> Option<CommitRef> {
        self.parent
    }

    /// Commits attached directly beneath this one, oldest first.
    pub fn children(&self) -> &[CommitRef] {
        &self.children
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn file_count(&self) -> usize {
        self.snapshot.count()
    }

    pub(crate) fn attach_child(&mut self, child: CommitRef) {
        self.children.push(child);
    }
}
