//! minigit CLI: an interactive shell over in-memory repositories.

mod command;
mod render;
mod session;
mod shell;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use minigit_core::config::{RepoConfig, DEFAULT_BRANCH};
use tracing_subscriber::EnvFilter;

use crate::render::Format;
use crate::shell::Shell;

const BANNER: &str = "minigit: in-memory version control\ntype 'help' for commands.\n";

#[derive(Parser)]
#[command(name = "minigit", about = "minigit: in-memory version control shell", version)]
struct Cli {
    /// Branch created by `init` in new repositories.
    #[arg(long, env = "MINIGIT_DEFAULT_BRANCH", default_value = DEFAULT_BRANCH)]
    default_branch: String,

    /// Output format for command results.
    #[arg(long, value_enum, default_value_t = Format::Human)]
    format: Format,

    /// Read commands from this file instead of standard input.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log filter directive (e.g. "debug", "minigit_core=trace").
    #[arg(long, env = "MINIGIT_LOG", default_value = "warn")]
    log_level: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = RepoConfig {
        default_branch: cli.default_branch,
    };
    let mut shell = Shell::new(config, cli.format);

    match cli.script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("cannot open script {}", path.display()))?;
            tracing::debug!(script = %path.display(), "running script");
            shell::run_lines(&mut shell, BufReader::new(file), io::stdout().lock(), false)
        }
        None => {
            println!("{BANNER}");
            shell::run_lines(&mut shell, io::stdin().lock(), io::stdout().lock(), true)
        }
    }
}
