//! Repository: the main entry point for minigit operations.
//!
//! A Repository ties together the commit graph, branch registry, staging
//! area, working files and undo/redo history into one interface. Every
//! operation checks all of its preconditions before mutating anything, so
//! an `Err` always leaves the repository untouched.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, trace};

use crate::branch::BranchRegistry;
use crate::clock::{format_timestamp, Clock, SystemClock};
use crate::commit::{Commit, CommitRef};
use crate::config::RepoConfig;
use crate::diff::{self, DiffReport};
use crate::error::{RepoError, RepoResult};
use crate::graph::CommitGraph;
use crate::hash::fingerprint;
use crate::history::History;
use crate::snapshot::{FileEntry, Snapshot};

/// A single in-memory minigit repository.
#[derive(Debug)]
pub struct Repository {
    graph: CommitGraph,
    branches: BranchRegistry,
    staging: Snapshot,
    working: Snapshot,
    history: History,
    config: RepoConfig,
    clock: Box<dyn Clock>,
    initialized: bool,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository {
    /// Create an uninitialized repository with default settings.
    pub fn new() -> Self {
        Self::with_config(RepoConfig::default())
    }

    /// Create an uninitialized repository with the given settings.
    pub fn with_config(config: RepoConfig) -> Self {
        Self {
            graph: CommitGraph::new(),
            branches: BranchRegistry::new(),
            staging: Snapshot::new(),
            working: Snapshot::new(),
            history: History::new(),
            config,
            clock: Box::new(SystemClock),
            initialized: false,
        }
    }

    /// Replace the time source used for commit timestamps.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Initialize the repository, creating the default branch with no commits.
    ///
    /// Idempotent: a second call reports `already_initialized` and changes nothing.
    pub fn init(&mut self) -> RepoResult<InitOutcome> {
        if self.initialized {
            return Ok(InitOutcome {
                branch: self.active_branch_name(),
                already_initialized: true,
            });
        }

        let branch = self.config.default_branch.clone();
        self.branches.add(&branch, None);
        self.initialized = true;
        debug!(branch = %branch, "repository initialized");

        Ok(InitOutcome {
            branch,
            already_initialized: false,
        })
    }

    /// Discard everything and return to the uninitialized state.
    ///
    /// Configuration and clock are kept.
    pub fn reset(&mut self) {
        self.graph = CommitGraph::new();
        self.branches = BranchRegistry::new();
        self.staging.clear();
        self.working.clear();
        self.history.clear();
        self.initialized = false;
        debug!("repository reset");
    }

    /// Stage a file. The content is written to the working set as well.
    pub fn add(&mut self, name: &str, content: &str) -> RepoResult<AddOutcome> {
        self.ensure_initialized()?;

        self.staging.set(name, content);
        self.working.set(name, content);

        Ok(AddOutcome {
            name: name.to_string(),
            fingerprint: fingerprint(content),
        })
    }

    /// Turn the staging area into a new commit on the active branch.
    pub fn commit(&mut self, message: &str) -> RepoResult<CommitSummary> {
        self.ensure_initialized()?;
        if self.staging.is_empty() {
            return Err(RepoError::NothingToCommit);
        }

        let timestamp = self.clock.now();
        let mut material = format!("{message}{}", format_timestamp(&timestamp));
        for entry in &self.staging {
            material.push_str(&entry.content);
        }

        let parent = self.branches.active_head();
        let snapshot = self.staging.copy();
        let new_ref = self
            .graph
            .create(&material, message.to_string(), timestamp, snapshot, parent);

        self.branches.set_active_head(Some(new_ref));
        self.staging.clear();
        self.history.record(new_ref);

        let commit = self.graph.get(new_ref);
        let branch = self.active_branch_name();
        debug!(id = %commit.id(), branch = %branch, files = commit.file_count(), "commit created");

        Ok(CommitSummary {
            id: commit.id().to_string(),
            branch,
            message: commit.message().to_string(),
            file_count: commit.file_count(),
        })
    }

    /// History of the active branch, newest first.
    pub fn log(&self) -> RepoResult<LogOutcome> {
        self.ensure_initialized()?;

        let entries: Vec<LogEntry> = self
            .graph
            .ancestry(self.branches.active_head())
            .map(|r| LogEntry::from_commit(self.graph.get(r)))
            .collect();

        Ok(LogOutcome {
            branch: self.active_branch_name(),
            total: entries.len(),
            entries,
        })
    }

    /// Active branch, staged names, working files and history depths.
    pub fn status(&self) -> RepoResult<StatusReport> {
        self.ensure_initialized()?;

        Ok(StatusReport {
            branch: self.active_branch_name(),
            staged: self.staging.names(),
            working: self.working.iter().map(FileFingerprint::from_entry).collect(),
            undo_depth: self.history.undo_depth(),
            redo_depth: self.history.redo_depth(),
        })
    }

    /// Create a branch pointing at the active head.
    pub fn branch(&mut self, name: &str) -> RepoResult<BranchCreated> {
        self.ensure_initialized()?;
        if self.branches.find(name).is_some() {
            return Err(RepoError::BranchAlreadyExists(name.to_string()));
        }

        let head = self.branches.active_head();
        self.branches.add(name, head);
        debug!(branch = %name, "branch created");

        Ok(BranchCreated {
            name: name.to_string(),
            head: head.map(|r| self.graph.get(r).id().to_string()),
        })
    }

    /// Switch branches, replacing the working files with the target's head
    /// snapshot and clearing staging.
    pub fn checkout(&mut self, name: &str) -> RepoResult<CheckoutOutcome> {
        self.ensure_initialized()?;
        if !self.branches.switch(name) {
            return Err(RepoError::BranchNotFound(name.to_string()));
        }

        let head = self.branches.active_head();
        self.working = match head {
            Some(r) => self.graph.get(r).snapshot().copy(),
            None => Snapshot::new(),
        };
        self.staging.clear();
        debug!(branch = %name, files = self.working.count(), "checked out");

        Ok(CheckoutOutcome {
            branch: name.to_string(),
            has_commits: head.is_some(),
            restored_files: self.working.count(),
        })
    }

    /// All branches in creation order, marking the active one.
    pub fn list_branches(&self) -> RepoResult<BranchListing> {
        self.ensure_initialized()?;

        let branches: Vec<BranchInfo> = self
            .branches
            .iter()
            .map(|b| BranchInfo {
                name: b.name.clone(),
                active: self.branches.is_active(&b.name),
                head: b.head.map(|r| self.graph.get(r).id().to_string()),
            })
            .collect();

        Ok(BranchListing {
            total: branches.len(),
            branches,
        })
    }

    /// Remove a branch pointer. Commits it pointed at stay in the graph.
    pub fn delete_branch(&mut self, name: &str) -> RepoResult<BranchDeleted> {
        self.ensure_initialized()?;
        if self.branches.is_active(name) {
            return Err(RepoError::DeleteActiveBranch(name.to_string()));
        }
        if !self.branches.delete(name) {
            return Err(RepoError::BranchNotFound(name.to_string()));
        }
        debug!(branch = %name, "branch deleted");

        Ok(BranchDeleted {
            name: name.to_string(),
        })
    }

    /// Merge `source` into the active branch.
    ///
    /// The new snapshot starts as the active head's files and then takes
    /// every file from the source head, source winning on collisions. The
    /// result has a single parent (the active head).
    pub fn merge(&mut self, source: &str) -> RepoResult<MergeSummary> {
        self.ensure_initialized()?;
        let source_head = match self.branches.find(source) {
            None => return Err(RepoError::BranchNotFound(source.to_string())),
            Some(_) if self.branches.is_active(source) => {
                return Err(RepoError::MergeIntoSelf(source.to_string()))
            }
            Some(b) => b.head.ok_or_else(|| RepoError::SourceBranchEmpty(source.to_string()))?,
        };

        let target = self.active_branch_name();
        let parent = self.branches.active_head();

        let mut snapshot = match parent {
            Some(r) => self.graph.get(r).snapshot().copy(),
            None => Snapshot::new(),
        };
        for entry in self.graph.get(source_head).snapshot() {
            snapshot.set(&entry.name, &entry.content);
        }

        let timestamp = self.clock.now();
        let material = format!("merge:{source}{}", format_timestamp(&timestamp));
        let message = format!("Merge branch '{source}' into {target}");

        self.working = snapshot.copy();
        let new_ref = self
            .graph
            .create(&material, message, timestamp, snapshot, parent);
        self.branches.set_active_head(Some(new_ref));
        self.staging.clear();
        self.history.record(new_ref);

        let commit = self.graph.get(new_ref);
        debug!(id = %commit.id(), source = %source, target = %target, "merge commit created");

        Ok(MergeSummary {
            id: commit.id().to_string(),
            message: commit.message().to_string(),
            source: source.to_string(),
            target,
            file_count: commit.file_count(),
        })
    }

    /// Step the active branch back past the most recent recorded commit.
    pub fn undo(&mut self) -> RepoResult<UndoOutcome> {
        self.ensure_initialized()?;
        let Some(undone) = self.history.pop_undo() else {
            return Ok(UndoOutcome::NothingToUndo);
        };
        self.history.push_redo(undone);

        let commit = self.graph.get(undone);
        let undone_id = commit.id().to_string();
        let outcome = match commit.parent() {
            Some(parent) => {
                self.branches.set_active_head(Some(parent));
                let parent_commit = self.graph.get(parent);
                self.working = parent_commit.snapshot().copy();
                UndoOutcome::Reverted {
                    undone: undone_id,
                    head: parent_commit.id().to_string(),
                }
            }
            None => {
                self.branches.set_active_head(None);
                self.working = Snapshot::new();
                UndoOutcome::Emptied { undone: undone_id }
            }
        };
        debug!(?outcome, "undo");

        Ok(outcome)
    }

    /// Re-apply the most recently undone commit.
    pub fn redo(&mut self) -> RepoResult<RedoOutcome> {
        self.ensure_initialized()?;
        let Some(redone) = self.history.pop_redo() else {
            return Ok(RedoOutcome::NothingToRedo);
        };
        self.history.push_undo(redone);

        self.branches.set_active_head(Some(redone));
        let commit = self.graph.get(redone);
        self.working = commit.snapshot().copy();
        debug!(id = %commit.id(), "redo");

        Ok(RedoOutcome::Restored {
            id: commit.id().to_string(),
            message: commit.message().to_string(),
        })
    }

    /// Create a new commit on the active branch whose snapshot equals that
    /// of `commit_id`, which may live on any branch.
    ///
    /// Working files and staging both become the target snapshot.
    pub fn revert(&mut self, commit_id: &str) -> RepoResult<RevertSummary> {
        self.ensure_initialized()?;
        let head = self.branches.active_head().ok_or(RepoError::NoCommits)?;
        let target = self
            .locate(head, commit_id)
            .ok_or_else(|| RepoError::CommitNotFound(commit_id.to_string()))?;

        let snapshot = self.graph.get(target).snapshot().copy();
        self.working = snapshot.copy();
        self.staging = snapshot.copy();

        let timestamp = self.clock.now();
        let material = format!("revert:{commit_id}{}", format_timestamp(&timestamp));
        let message = format!("Revert to {commit_id}");
        let new_ref = self
            .graph
            .create(&material, message, timestamp, snapshot, Some(head));
        self.branches.set_active_head(Some(new_ref));
        self.history.record(new_ref);

        let commit = self.graph.get(new_ref);
        debug!(id = %commit.id(), target = %commit_id, "revert commit created");

        Ok(RevertSummary {
            id: commit.id().to_string(),
            target: commit_id.to_string(),
            file_count: commit.file_count(),
        })
    }

    /// Compare a working file against the active head's committed copy.
    pub fn diff(&self, name: &str) -> RepoResult<DiffReport> {
        self.ensure_initialized()?;
        let working = self
            .working
            .get(name)
            .ok_or_else(|| RepoError::FileNotTracked(name.to_string()))?;

        let committed = self.head().map(Commit::snapshot);
        Ok(diff::compare_file(name, working, committed))
    }

    /// Full details of a commit, located the same way `revert` does.
    pub fn show(&self, commit_id: &str) -> RepoResult<CommitDetail> {
        self.ensure_initialized()?;
        let found = match self.branches.active_head() {
            Some(head) => self.locate(head, commit_id),
            None => self.graph.find_in_tree(commit_id),
        };
        let r = found.ok_or_else(|| RepoError::CommitNotFound(commit_id.to_string()))?;

        let commit = self.graph.get(r);
        Ok(CommitDetail {
            id: commit.id().to_string(),
            message: commit.message().to_string(),
            timestamp: commit.timestamp(),
            parent: commit.parent().map(|p| self.graph.get(p).id().to_string()),
            children: commit
                .children()
                .iter()
                .map(|&c| self.graph.get(c).id().to_string())
                .collect(),
            files: commit.snapshot().copy(),
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Name of the active branch (None before `init`).
    pub fn active_branch(&self) -> Option<&str> {
        self.branches.active_name()
    }

    /// Head commit of the active branch.
    pub fn head(&self) -> Option<&Commit> {
        self.branches.active_head().map(|r| self.graph.get(r))
    }

    pub fn working_files(&self) -> &Snapshot {
        &self.working
    }

    pub fn staged_files(&self) -> &Snapshot {
        &self.staging
    }

    pub fn graph(&self) -> &CommitGraph {
        &self.graph
    }

    pub fn branches(&self) -> &BranchRegistry {
        &self.branches
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    fn ensure_initialized(&self) -> RepoResult<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(RepoError::NotInitialized)
        }
    }

    fn active_branch_name(&self) -> String {
        self.branches.active_name().unwrap_or_default().to_string()
    }

    /// Ancestry of `head` first, then the whole tree from the first commit.
    fn locate(&self, head: CommitRef, commit_id: &str) -> Option<CommitRef> {
        self.graph.find_in_history(Some(head), commit_id).or_else(|| {
            trace!(id = %commit_id, "not in active history, searching whole tree");
            self.graph.find_in_tree(commit_id)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InitOutcome {
    /// Active branch after the call.
    pub branch: String,
    /// True if the repository was already initialized.
    pub already_initialized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddOutcome {
    pub name: String,
    /// Fingerprint of the staged content.
    pub fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitSummary {
    pub id: String,
    pub branch: String,
    pub message: String,
    pub file_count: usize,
}

/// One commit in a log listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub file_count: usize,
}

impl LogEntry {
    fn from_commit(commit: &Commit) -> Self {
        Self {
            id: commit.id().to_string(),
            message: commit.message().to_string(),
            timestamp: commit.timestamp(),
            file_count: commit.file_count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogOutcome {
    pub branch: String,
    /// Newest first. Empty when the branch has no commits yet.
    pub entries: Vec<LogEntry>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFingerprint {
    pub name: String,
    pub fingerprint: String,
}

impl FileFingerprint {
    fn from_entry(entry: &FileEntry) -> Self {
        Self {
            name: entry.name.clone(),
            fingerprint: fingerprint(&entry.content),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub branch: String,
    /// Staged file names in staging order.
    pub staged: Vec<String>,
    pub working: Vec<FileFingerprint>,
    pub undo_depth: usize,
    pub redo_depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchCreated {
    pub name: String,
    /// Commit id the new branch points at (None if the active branch had none).
    pub head: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutOutcome {
    pub branch: String,
    pub has_commits: bool,
    /// Number of files now in the working set.
    pub restored_files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchInfo {
    pub name: String,
    pub active: bool,
    pub head: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchListing {
    pub branches: Vec<BranchInfo>,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchDeleted {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MergeSummary {
    pub id: String,
    pub message: String,
    pub source: String,
    pub target: String,
    pub file_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum UndoOutcome {
    /// Head moved back to the undone commit's parent.
    Reverted { undone: String, head: String },
    /// The undone commit was a root; the branch has no commits now.
    Emptied { undone: String },
    NothingToUndo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum RedoOutcome {
    Restored { id: String, message: String },
    NothingToRedo,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevertSummary {
    /// Id of the newly created revert commit.
    pub id: String,
    /// Id of the commit whose snapshot was restored.
    pub target: String,
    pub file_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitDetail {
    pub id: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub files: Snapshot,
}
