//! The commit arena and its traversals.
//!
//! Every commit a repository ever creates is stored exactly once here.
//! Branch heads, the undo/redo stacks and parent/child links all hold
//! [`CommitRef`]s into this arena, so a commit stays alive for as long as
//! the repository does, however many places still refer to it.

use chrono::{DateTime, Utc};

use crate::commit::{Commit, CommitRef};
use crate::hash::fingerprint;
use crate::snapshot::Snapshot;

/// Owning store of all commits in one repository.
#[derive(Debug, Default, Clone)]
pub struct CommitGraph {
    commits: Vec<Commit>,
}

impl CommitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a commit and attach it beneath `parent`.
    ///
    /// The id is the fingerprint of `id_material`. The first commit ever
    /// created becomes the tree root used by [`find_in_tree`](Self::find_in_tree).
    pub fn create(
        &mut self,
        id_material: &str,
        message: String,
        timestamp: DateTime<Utc>,
        snapshot: Snapshot,
        parent: Option<CommitRef>,
    ) -> CommitRef {
        let new_ref = CommitRef(self.commits.len());
        let commit = Commit::new(fingerprint(id_material), message, timestamp, parent, snapshot);
        self.commits.push(commit);

        if let Some(p) = parent {
            self.commits[p.0].attach_child(new_ref);
        }
        new_ref
    }

    /// Look up a commit by handle.
    ///
    /// Handles are only ever minted by this graph, so they always resolve.
    pub fn get(&self, r: CommitRef) -> &Commit {
        &self.commits[r.0]
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// The first commit ever created in this repository.
    pub fn root(&self) -> Option<CommitRef> {
        if self.commits.is_empty() {
            None
        } else {
            Some(CommitRef(0))
        }
    }

    /// Walk parent links from `start`, newest to oldest.
    pub fn ancestry(&self, start: Option<CommitRef>) -> Ancestry<'_> {
        Ancestry {
            graph: self,
            next: start,
        }
    }

    /// Number of commits on the chain from `start` to its root.
    pub fn count_commits(&self, start: Option<CommitRef>) -> usize {
        self.ancestry(start).count()
    }

    /// Find a commit by id along the ancestry of `start`.
    pub fn find_in_history(&self, start: Option<CommitRef>, id: &str) -> Option<CommitRef> {
        self.ancestry(start).find(|&r| self.get(r).id() == id)
    }

    /// Depth-first search of the whole tree, from the first commit ever created.
    ///
    /// Not limited to any branch: a commit reachable under the root through
    /// any fork is found.
    pub fn find_in_tree(&self, id: &str) -> Option<CommitRef> {
        let mut stack: Vec<CommitRef> = self.root().into_iter().collect();

        while let Some(r) = stack.pop() {
            let commit = self.get(r);
            if commit.id() == id {
                return Some(r);
            }
            // Reverse so the oldest child is visited first.
            stack.extend(commit.children().iter().rev().copied());
        }
        None
    }
}

/// Iterator over a commit's ancestry chain.
pub struct Ancestry<'a> {
    graph: &'a CommitGraph,
    next: Option<CommitRef>,
}

impl Iterator for Ancestry<'_> {
    type Item = CommitRef;

    fn next(&mut self) -> Option<CommitRef> {
        let current = self.next?;
        self.next = self.graph.get(current).parent();
        Some(current)
    }
}
