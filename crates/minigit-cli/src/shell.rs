//! Line-oriented shell: parse a line, call the core, render the result.

use std::io::{BufRead, Write};

use anyhow::Context;
use minigit_core::config::RepoConfig;
use minigit_core::{RepoError, Repository};

use crate::command::{self, Command, RepoAction, HELP};
use crate::render::{self, Format};
use crate::session::{Session, SessionError};

/// Content stored when `add` is given no content.
const EMPTY_FILE_PLACEHOLDER: &str = "(empty file)";

/// What the shell wants the driver to do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Step {
    /// Print the text (if any) and read the next line.
    Continue(Option<String>),
    /// Print the farewell and stop.
    Exit(String),
}

#[derive(Debug, thiserror::Error)]
enum ShellError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

pub struct Shell {
    session: Session,
    format: Format,
}

impl Shell {
    pub fn new(config: RepoConfig, format: Format) -> Self {
        Self {
            session: Session::new(config),
            format,
        }
    }

    /// Prompt reflecting the active repository.
    pub fn prompt(&self) -> String {
        format!("{}> ", self.session.active_name().unwrap_or("minigit"))
    }

    /// Handle one input line.
    pub fn handle(&mut self, line: &str) -> Step {
        let cmd = match command::parse(line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => return Step::Continue(None),
            Err(e) if e.kind() == clap::error::ErrorKind::InvalidSubcommand => {
                let word = line.split_whitespace().next().unwrap_or_default();
                return Step::Continue(Some(render::error(
                    self.format,
                    &format!("unknown command: {word} (type 'help' for options)"),
                )));
            }
            Err(e) => {
                let usage = e.render().to_string();
                let usage = usage.trim_end().trim_start_matches("error: ");
                return Step::Continue(Some(render::error(self.format, usage)));
            }
        };

        match self.execute(cmd) {
            Ok(step) => step,
            Err(e) => Step::Continue(Some(render::error(self.format, &e.to_string()))),
        }
    }

    fn execute(&mut self, cmd: Command) -> Result<Step, ShellError> {
        let f = self.format;
        let text = match cmd {
            Command::Repo { action } => match action {
                RepoAction::Create { name } => {
                    self.session.create(&name)?;
                    render::message(f, &format!("created and switched to repository: {name}"))
                }
                RepoAction::Switch { name } => {
                    self.session.switch(&name)?;
                    render::message(f, &format!("switched to repo: {name}"))
                }
                RepoAction::Delete { name } => {
                    self.session.delete(&name)?;
                    render::message(f, &format!("deleted repository: {name}"))
                }
            },
            Command::Repos => render::emit(f, self.session.list().as_slice(), render::repos),
            Command::Help => render::message(f, HELP),
            Command::Exit => return Ok(Step::Exit(render::message(f, "goodbye"))),
            Command::Init => render::emit(f, &self.repo()?.init()?, render::init),
            Command::Add { file, content } => {
                let content = content.as_deref().unwrap_or(EMPTY_FILE_PLACEHOLDER);
                render::emit(f, &self.repo()?.add(&file, content)?, render::add)
            }
            Command::Commit { message } => {
                render::emit(f, &self.repo()?.commit(&message)?, render::commit)
            }
            Command::Log => render::emit(f, &self.repo()?.log()?, render::log),
            Command::Status => render::emit(f, &self.repo()?.status()?, render::status),
            Command::Diff { file } => render::emit(f, &self.repo()?.diff(&file)?, render::diff),
            Command::Branch { name } => {
                render::emit(f, &self.repo()?.branch(&name)?, render::branch_created)
            }
            Command::BranchDelete { name } => {
                render::emit(f, &self.repo()?.delete_branch(&name)?, render::branch_deleted)
            }
            Command::Checkout { name } => {
                render::emit(f, &self.repo()?.checkout(&name)?, render::checkout)
            }
            Command::Branches => render::emit(f, &self.repo()?.list_branches()?, render::branches),
            Command::Merge { branch } => {
                render::emit(f, &self.repo()?.merge(&branch)?, render::merge)
            }
            Command::Undo => render::emit(f, &self.repo()?.undo()?, render::undo),
            Command::Redo => render::emit(f, &self.repo()?.redo()?, render::redo),
            Command::Revert { commit_id } => {
                render::emit(f, &self.repo()?.revert(&commit_id)?, render::revert)
            }
            Command::Show { commit_id } => {
                render::emit(f, &self.repo()?.show(&commit_id)?, render::show)
            }
            Command::Reset => {
                self.repo()?.reset();
                render::message(f, "repository reset (run 'init' to start again)")
            }
        };
        Ok(Step::Continue(Some(text)))
    }

    fn repo(&mut self) -> Result<&mut Repository, SessionError> {
        self.session.active_repo()
    }
}

/// Drive `shell` with lines from `input`, writing results to `output`.
///
/// Prompts are written only when `interactive` is set.
pub fn run_lines<R: BufRead, W: Write>(
    shell: &mut Shell,
    input: R,
    mut output: W,
    interactive: bool,
) -> anyhow::Result<()> {
    if interactive {
        write!(output, "{}", shell.prompt())?;
        output.flush()?;
    }

    for line in input.lines() {
        let line = line.context("failed to read command")?;
        match shell.handle(&line) {
            Step::Continue(Some(text)) => writeln!(output, "{text}")?,
            Step::Continue(None) => {}
            Step::Exit(text) => {
                writeln!(output, "{text}")?;
                return Ok(());
            }
        }
        if interactive {
            write!(output, "{}", shell.prompt())?;
            output.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn shell() -> Shell {
        Shell::new(RepoConfig::default(), Format::Human)
    }

    fn say(shell: &mut Shell, line: &str) -> String {
        match shell.handle(line) {
            Step::Continue(Some(text)) => text,
            other => panic!("unexpected step for {line:?}: {other:?}"),
        }
    }

    #[test]
    fn test_requires_repository() {
        let mut sh = shell();
        assert!(say(&mut sh, "init").starts_with("error: no repository selected"));
    }

    #[test]
    fn test_requires_init() {
        let mut sh = shell();
        say(&mut sh, "repo create demo");
        assert_eq!(
            say(&mut sh, "status"),
            "error: repository not initialized (run 'init' first)"
        );
    }

    #[test]
    fn test_basic_session() {
        let mut sh = shell();
        say(&mut sh, "repo create demo");
        say(&mut sh, "init");
        assert!(say(&mut sh, "add a.txt hello world").starts_with("staged: a.txt"));
        assert!(say(&mut sh, "commit first commit").contains("1 file(s) committed"));

        let log = say(&mut sh, "log");
        assert!(log.contains("msg:   first commit"));
        assert!(log.ends_with("total: 1 commit(s)"));
        assert_eq!(sh.prompt(), "demo> ");
    }

    #[test]
    fn test_add_without_content_uses_placeholder() {
        let mut sh = shell();
        say(&mut sh, "repo create demo");
        say(&mut sh, "init");
        say(&mut sh, "add blank.txt");
        say(&mut sh, "commit blank");
        let show_log = say(&mut sh, "diff blank.txt");
        assert_eq!(show_log, "blank.txt: no changes");
    }

    #[test]
    fn test_content_and_message_keep_spacing() {
        let mut sh = shell();
        say(&mut sh, "repo create demo");
        say(&mut sh, "init");
        say(&mut sh, "add a.c int  main()\t{ }");
        say(&mut sh, "commit fix:  two   spaces");

        let repo = sh.session.active_repo().unwrap();
        let head = repo.head().unwrap();
        assert_eq!(head.message(), "fix:  two   spaces");
        assert_eq!(head.snapshot().get("a.c"), Some("int  main()\t{ }"));
        assert_eq!(
            repo.working_files().get("a.c"),
            Some("int  main()\t{ }")
        );
    }

    #[test]
    fn test_unknown_command() {
        let mut sh = shell();
        assert_eq!(
            say(&mut sh, "frobnicate now"),
            "error: unknown command: frobnicate (type 'help' for options)"
        );
    }

    #[test]
    fn test_usage_error_is_reported() {
        let mut sh = shell();
        assert!(say(&mut sh, "checkout").starts_with("error:"));
    }

    #[test]
    fn test_blank_line_is_silent() {
        let mut sh = shell();
        assert_eq!(sh.handle("   "), Step::Continue(None));
    }

    #[test]
    fn test_exit_and_quit() {
        let mut sh = shell();
        assert_eq!(sh.handle("exit"), Step::Exit("goodbye".into()));
        assert_eq!(sh.handle("quit"), Step::Exit("goodbye".into()));
    }

    #[test]
    fn test_json_format() {
        let mut sh = Shell::new(RepoConfig::default(), Format::Json);
        say(&mut sh, "repo create demo");
        say(&mut sh, "init");
        say(&mut sh, "add a.txt x");
        let out = say(&mut sh, "commit c1");
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["branch"], "main");
        assert_eq!(value["file_count"], 1);

        let err = say(&mut sh, "checkout ghost");
        let value: serde_json::Value = serde_json::from_str(&err).unwrap();
        assert_eq!(value["error"], "branch 'ghost' not found");
    }

    #[test]
    fn test_run_lines_stops_at_exit() {
        let mut sh = shell();
        let input = Cursor::new("repo create demo\ninit\nexit\nrepos\n");
        let mut output = Vec::new();
        run_lines(&mut sh, input, &mut output, false).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("created and switched to repository: demo"));
        assert!(text.trim_end().ends_with("goodbye"));
        assert!(!text.contains("repositories:"));
    }

    #[test]
    fn test_run_lines_from_script_file() {
        let mut script = tempfile::NamedTempFile::new().unwrap();
        writeln!(script, "repo create demo").unwrap();
        writeln!(script, "init").unwrap();
        writeln!(script, "add a.txt x").unwrap();
        writeln!(script, "commit c1").unwrap();
        writeln!(script, "branch feature").unwrap();
        writeln!(script, "branches").unwrap();

        let file = std::fs::File::open(script.path()).unwrap();
        let mut sh = shell();
        let mut output = Vec::new();
        run_lines(&mut sh, std::io::BufReader::new(file), &mut output, false).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("* main (active)"));
        assert!(text.contains("total: 2 branch(es)"));
    }
}
