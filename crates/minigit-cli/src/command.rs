//! Grammar of one shell line.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "minigit",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Create, switch to, or delete a repository.
    Repo {
        #[command(subcommand)]
        action: RepoAction,
    },

    /// List all repositories.
    Repos,

    /// Initialize the active repository.
    Init,

    /// Stage a file with the given content.
    Add {
        file: String,
        /// File content: the rest of the line as typed.
        content: Option<String>,
    },

    /// Commit staged files.
    Commit {
        /// Commit message: the rest of the line as typed.
        message: String,
    },

    /// Show commit history of the active branch.
    Log,

    /// Show working tree status.
    Status,

    /// Compare a working file with the last commit.
    Diff { file: String },

    /// Create a new branch at the current head.
    Branch { name: String },

    /// Delete a branch other than the active one.
    BranchDelete { name: String },

    /// Switch to a branch.
    Checkout { name: String },

    /// List all branches.
    Branches,

    /// Merge a branch into the active one.
    Merge { branch: String },

    /// Undo the last commit, merge or revert.
    Undo,

    /// Redo an undone commit.
    Redo,

    /// Restore a commit's files as a new commit.
    Revert { commit_id: String },

    /// Show one commit in detail.
    Show { commit_id: String },

    /// Discard the active repository's history and uninitialize it.
    Reset,

    /// Show available commands.
    Help,

    /// Leave the shell.
    #[command(alias = "quit")]
    Exit,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum RepoAction {
    Create { name: String },
    Switch { name: String },
    Delete { name: String },
}

pub const HELP: &str = "\
commands:
  repo create <name>      create a new repository and switch to it
  repo switch <name>      switch to a repository
  repo delete <name>      delete a repository
  repos                   list all repositories
  init                    initialize the active repository
  add <file> <content>    stage a file
  commit <message>        commit staged files
  log                     show commit history
  status                  show working tree status
  diff <file>             compare file with last commit
  branch <name>           create a new branch
  branch-delete <name>    delete a branch
  checkout <name>         switch to a branch
  branches                list all branches
  merge <branch>          merge branch into current
  undo                    undo last commit
  redo                    redo undone commit
  revert <commit-id>      restore a commit as a new commit
  show <commit-id>        show commit details
  reset                   discard history and uninitialize
  help                    show this help
  exit                    quit minigit";

/// Parse one line. `Ok(None)` for blank lines.
///
/// `add` content and `commit` messages keep their spacing: everything after
/// the leading words is passed through untouched, minus one separating space.
pub fn parse(line: &str) -> Result<Option<Command>, clap::Error> {
    let (verb, rest) = split_word(line);
    if verb.is_empty() {
        return Ok(None);
    }

    let mut args = vec![verb];
    match verb {
        "add" => {
            let (file, tail) = split_word(rest);
            args.push("--");
            if !file.is_empty() {
                args.push(file);
            }
            let tail = rest_of_line(tail);
            if !tail.is_empty() {
                args.push(tail);
            }
        }
        "commit" => {
            args.push("--");
            let tail = rest_of_line(rest);
            if !tail.is_empty() {
                args.push(tail);
            }
        }
        _ => args.extend(rest.split_whitespace()),
    }
    Line::try_parse_from(args).map(|l| Some(l.command))
}

/// First whitespace-delimited word and the raw text after it.
fn split_word(s: &str) -> (&str, &str) {
    let s = s.trim_start();
    match s.find(char::is_whitespace) {
        Some(i) => s.split_at(i),
        None => (s, ""),
    }
}

fn rest_of_line(rest: &str) -> &str {
    rest.strip_prefix(' ').unwrap_or(rest)
}
