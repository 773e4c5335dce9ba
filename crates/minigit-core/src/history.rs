//! Undo/redo stacks of head-moving actions.

use crate::commit::CommitRef;

/// Two unbounded LIFO stacks of commit references.
#[derive(Debug, Default, Clone)]
pub struct History {
    undo: Vec<CommitRef>,
    redo: Vec<CommitRef>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly created commit.
    ///
    /// Pushes onto undo and discards all redo history.
    pub fn record(&mut self, commit: CommitRef) {
        self.undo.push(commit);
        self.redo.clear();
    }

    pub fn pop_undo(&mut self) -> Option<CommitRef> {
        self.undo.pop()
    }

    pub fn pop_redo(&mut self) -> Option<CommitRef> {
        self.redo.pop()
    }

    pub fn push_undo(&mut self, commit: CommitRef) {
        self.undo.push(commit);
    }

    pub fn push_redo(&mut self, commit: CommitRef) {
        self.redo.push(commit);
    }

    pub fn peek_undo(&self) -> Option<CommitRef> {
        self.undo.last().copied()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
