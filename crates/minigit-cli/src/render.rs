//! Human-readable rendering of repository outcomes.

use std::fmt::Write;

use clap::ValueEnum;
use minigit_core::clock::format_timestamp;
use minigit_core::diff::{DiffReport, DiffStatus, NewReason};
use minigit_core::repo::{
    AddOutcome, BranchCreated, BranchDeleted, BranchListing, CheckoutOutcome, CommitDetail,
    CommitSummary, InitOutcome, LogOutcome, MergeSummary, RedoOutcome, RevertSummary,
    StatusReport, UndoOutcome,
};
use serde::Serialize;

use crate::session::RepoListEntry;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Human,
    Json,
}

/// Render `value` as pretty JSON or through its human renderer.
pub fn emit<T: Serialize + ?Sized>(
    format: Format,
    value: &T,
    human: impl FnOnce(&T) -> String,
) -> String {
    match format {
        Format::Json => serde_json::to_string_pretty(value)
            .unwrap_or_else(|e| format!("{{\"error\":\"serialization failed: {e}\"}}")),
        Format::Human => human(value),
    }
}

/// Render an error message.
pub fn error(format: Format, message: &str) -> String {
    match format {
        Format::Json => serde_json::json!({ "error": message }).to_string(),
        Format::Human => format!("error: {message}"),
    }
}

/// Plain informational line (JSON mode wraps it as `{"message": ...}`).
pub fn message(format: Format, text: &str) -> String {
    match format {
        Format::Json => serde_json::json!({ "message": text }).to_string(),
        Format::Human => text.to_string(),
    }
}

pub fn init(out: &InitOutcome) -> String {
    if out.already_initialized {
        "repository already initialized".to_string()
    } else {
        format!("initialized empty minigit repository\nbranch: {} (active)", out.branch)
    }
}

pub fn add(out: &AddOutcome) -> String {
    format!("staged: {}  [hash: {}]", out.name, out.fingerprint)
}

pub fn commit(out: &CommitSummary) -> String {
    format!(
        "[{} {}] {}\n{} file(s) committed",
        out.branch, out.id, out.message, out.file_count
    )
}

pub fn log(out: &LogOutcome) -> String {
    if out.entries.is_empty() {
        return "no commits yet".to_string();
    }

    let mut s = format!("commit history ({})\n", out.branch);
    for entry in &out.entries {
        let _ = writeln!(s, "\ncommit {}", entry.id);
        let _ = writeln!(s, "  date:  {}", format_timestamp(&entry.timestamp));
        let _ = writeln!(s, "  msg:   {}", entry.message);
        let _ = writeln!(s, "  files: {}", entry.file_count);
    }
    let _ = write!(s, "\ntotal: {} commit(s)", out.total);
    s
}

pub fn status(out: &StatusReport) -> String {
    let mut s = format!("on branch: {}\n", out.branch);

    if !out.staged.is_empty() {
        s.push_str("\nstaged files:\n");
        for name in &out.staged {
            let _ = writeln!(s, "  + {name}");
        }
    }

    s.push_str("\nworking directory:\n");
    if out.working.is_empty() {
        s.push_str("  (empty)\n");
    } else {
        for file in &out.working {
            let _ = writeln!(s, "  {}  [{}]", file.name, file.fingerprint);
        }
    }

    let _ = write!(
        s,
        "\nundo stack: {} operation(s)\nredo stack: {} operation(s)",
        out.undo_depth, out.redo_depth
    );
    s
}

pub fn branch_created(out: &BranchCreated) -> String {
    format!("created branch: {}", out.name)
}

pub fn branch_deleted(out: &BranchDeleted) -> String {
    format!("deleted branch: {}", out.name)
}

pub fn checkout(out: &CheckoutOutcome) -> String {
    if out.has_commits {
        format!(
            "switched to branch: {}\nrestored {} file(s)",
            out.branch, out.restored_files
        )
    } else {
        format!("switched to branch: {}\nbranch has no commits yet", out.branch)
    }
}

pub fn branches(out: &BranchListing) -> String {
    let mut s = String::from("branches:\n");
    for b in &out.branches {
        if b.active {
            let _ = writeln!(s, "  * {} (active)", b.name);
        } else {
            let _ = writeln!(s, "    {}", b.name);
        }
    }
    let _ = write!(s, "total: {} branch(es)", out.total);
    s
}

pub fn merge(out: &MergeSummary) -> String {
    format!("{}\n[{}] {} file(s)", out.message, out.id, out.file_count)
}

pub fn undo(out: &UndoOutcome) -> String {
    match out {
        UndoOutcome::Reverted { head, .. } => format!("undo: reverted to commit {head}"),
        UndoOutcome::Emptied { .. } => "undo: reverted to initial state (no commits)".to_string(),
        UndoOutcome::NothingToUndo => "nothing to undo".to_string(),
    }
}

pub fn redo(out: &RedoOutcome) -> String {
    match out {
        RedoOutcome::Restored { id, message } => format!("redo: restored commit {id} ({message})"),
        RedoOutcome::NothingToRedo => "nothing to redo".to_string(),
    }
}

pub fn revert(out: &RevertSummary) -> String {
    format!(
        "reverted to commit {}\ncreated revert commit [{}]\n{} file(s) restored",
        out.target, out.id, out.file_count
    )
}

pub fn diff(out: &DiffReport) -> String {
    match &out.status {
        DiffStatus::New {
            reason: NewReason::NoCommits,
        } => format!(
            "no commits to compare against\n+ {} [{}] (new file)",
            out.name, out.working_fingerprint
        ),
        DiffStatus::New {
            reason: NewReason::NotInLastCommit,
        } => format!("+ {} (new, not in last commit)", out.name),
        DiffStatus::Unchanged => format!("{}: no changes", out.name),
        DiffStatus::Modified {
            committed_fingerprint,
            committed,
            working,
        } => format!(
            "{}: MODIFIED\nlast commit: [{committed_fingerprint}]\nworking:     [{}]\n\n\
             --- committed version ---\n{committed}\n--- working version ---\n{working}",
            out.name, out.working_fingerprint
        ),
    }
}

pub fn show(out: &CommitDetail) -> String {
    let mut s = format!("commit {}\n", out.id);
    let _ = writeln!(s, "  date:     {}", format_timestamp(&out.timestamp));
    let _ = writeln!(s, "  msg:      {}", out.message);
    let _ = writeln!(s, "  parent:   {}", out.parent.as_deref().unwrap_or("(root)"));
    if !out.children.is_empty() {
        let _ = writeln!(s, "  children: {}", out.children.join(", "));
    }
    let _ = write!(s, "  files:    {}", out.files.count());
    for file in &out.files {
        let _ = write!(s, "\n    {} = {}", file.name, file.content);
    }
    s
}

pub fn repos(entries: &[RepoListEntry]) -> String {
    let mut s = String::from("repositories:\n");
    if entries.is_empty() {
        s.push_str("  (none, run 'repo create <name>')\n");
    }
    for r in entries {
        if r.active {
            let _ = writeln!(s, "  * {} (active)", r.name);
        } else {
            let _ = writeln!(s, "    {}", r.name);
        }
    }
    let _ = write!(s, "total: {} repo(s)", entries.len());
    s
}
