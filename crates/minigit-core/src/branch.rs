//! Branches: named, movable pointers into the commit tree.
//!
//! The registry keeps branches in creation order and tracks exactly one
//! active branch. Branches never own commits.

use serde::Serialize;

use crate::commit::CommitRef;

/// A named pointer to a commit (None until the branch has a commit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    pub name: String,
    pub head: Option<CommitRef>,
}

/// Ordered, name-unique collection of branches with one active entry.
#[derive(Debug, Default, Clone)]
pub struct BranchRegistry {
    branches: Vec<Branch>,
    /// Name of the active branch. Stored by name so deleting other
    /// branches never shifts it.
    active: Option<String>,
}

impl BranchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a branch. The first branch ever added becomes active.
    ///
    /// Callers check uniqueness with [`find`](Self::find) first.
    pub fn add(&mut self, name: &str, head: Option<CommitRef>) {
        self.branches.push(Branch {
            name: name.to_string(),
            head,
        });
        if self.active.is_none() {
            self.active = Some(name.to_string());
        }
    }

    pub fn find(&self, name: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.name == name)
    }

    /// Make `name` the active branch. Returns false if it does not exist.
    pub fn switch(&mut self, name: &str) -> bool {
        if self.find(name).is_some() {
            self.active = Some(name.to_string());
            true
        } else {
            false
        }
    }

    /// Remove a branch. Refuses the active branch and unknown names.
    pub fn delete(&mut self, name: &str) -> bool {
        if self.active_name() == Some(name) {
            return false;
        }
        match self.branches.iter().position(|b| b.name == name) {
            Some(idx) => {
                self.branches.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn count(&self) -> usize {
        self.branches.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter()
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active(&self) -> Option<&Branch> {
        let name = self.active.as_deref()?;
        self.find(name)
    }

    pub fn active_mut(&mut self) -> Option<&mut Branch> {
        let name = self.active.as_deref()?;
        self.branches.iter_mut().find(|b| b.name == name)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active_name() == Some(name)
    }

    /// Head of the active branch.
    pub fn active_head(&self) -> Option<CommitRef> {
        self.active().and_then(|b| b.head)
    }

    /// Move the active branch's head.
    pub fn set_active_head(&mut self, head: Option<CommitRef>) {
        if let Some(branch) = self.active_mut() {
            branch.head = head;
        }
    }
}
