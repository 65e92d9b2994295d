use anyhow::Context;
use clap::ValueEnum;
use rollforward::git::{ChapterBranch, ChapterPattern};
use rollforward::styling::println;

use super::CommandEnv;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `NN name` line per chapter
    #[default]
    Text,
    /// JSON array of `{chapter, name}` objects
    Json,
}

/// Refresh the submodule, then print every chapter branch after `start`.
///
/// Nothing reaches stdout unless both git steps succeed.
pub fn handle_roll(env: &CommandEnv, start: u32, format: OutputFormat) -> anyhow::Result<()> {
    let CommandEnv {
        repo,
        config,
        repo_root,
    } = env;

    if config.submodule_update {
        repo.submodule_update()?;
    } else {
        log::debug!("Submodule update disabled");
    }

    let pattern = ChapterPattern::new(&config.remote)
        .with_context(|| format!("Invalid remote name {:?}", config.remote))?;
    let branches = repo.chapter_branches(&pattern, start)?;

    if branches.is_empty() {
        log::debug!(
            "No {} chapter branches after {start:02} in {}",
            config.remote,
            repo_root.display()
        );
    }

    print_branches(&branches, format)
}

fn print_branches(branches: &[ChapterBranch], format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            for branch in branches {
                println!("{branch}");
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(branches)?);
        }
    }
    Ok(())
}
