//! rollforward - list the chapter branches a change must be rolled into
//!
//! Refreshes the submodule at the repository root, then prints every
//! remote-tracking `<number>-<slug>` branch numbered after the given chapter.

use std::path::PathBuf;

use clap::Parser;
use rollforward::git::{FAILURE_EXIT_CODE, GitError};
use rollforward::styling::{ERROR, ERROR_EMOJI, eprintln};

mod commands;

use commands::{CommandEnv, OutputFormat, handle_roll};

#[derive(Parser, Debug)]
#[command(name = "rollforward")]
#[command(about = "Roll a chapter change forward through the remaining chapters")]
#[command(version)]
struct Cli {
    /// Starting chapter; branches with a higher number are listed
    chapter: u32,

    /// Repository root (defaults to the current directory)
    #[arg(short = 'C', long = "repo", value_name = "PATH", default_value = ".")]
    repo_dir: PathBuf,

    /// Remote holding the chapter branches [default: origin]
    #[arg(long)]
    remote: Option<String>,

    /// Skip `git submodule update`
    #[arg(long)]
    no_submodule_update: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log git commands to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        match e.downcast_ref::<GitError>() {
            // Already formatted with emoji and colors
            Some(git_error) => eprintln!("{git_error}"),
            None => eprintln!("{ERROR_EMOJI} {ERROR}{e:#}{ERROR:#}"),
        }
        std::process::exit(FAILURE_EXIT_CODE);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let env = CommandEnv::load(&cli.repo_dir, |config| {
        if let Some(remote) = cli.remote {
            config.remote = remote;
        }
        if cli.no_submodule_update {
            config.submodule_update = false;
        }
    })?;

    handle_roll(&env, cli.chapter, cli.format)
}

/// `RUST_LOG` wins when set; otherwise warnings only, or debug with `--verbose`.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
