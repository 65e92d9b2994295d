use std::path::{Path, PathBuf};

use anyhow::Context;
use rollforward::config::RollforwardConfig;
use rollforward::git::Repository;

/// Shared setup for command handlers: repository root, layered config and a
/// [`Repository`] bound to that root.
///
/// The root is resolved once here and handed to every git command, so nothing
/// downstream depends on the process working directory.
pub struct CommandEnv {
    pub repo: Repository,
    pub config: RollforwardConfig,
    pub repo_root: PathBuf,
}

impl CommandEnv {
    /// Resolve `repo_dir` and load its configuration.
    ///
    /// `overrides` runs after file and environment layers so CLI flags win.
    pub fn load(
        repo_dir: &Path,
        overrides: impl FnOnce(&mut RollforwardConfig),
    ) -> anyhow::Result<Self> {
        let repo_root = dunce::canonicalize(repo_dir)
            .with_context(|| format!("Cannot access repository at {}", repo_dir.display()))?;

        let mut config = RollforwardConfig::load(&repo_root).with_context(|| {
            format!(
                "Failed to load {}",
                RollforwardConfig::project_path(&repo_root).display()
            )
        })?;
        overrides(&mut config);
        log::debug!("Using {config:?} for {}", repo_root.display());

        let repo = Repository::at(&repo_root).with_timeout(config.timeout());

        Ok(Self {
            repo,
            config,
            repo_root,
        })
    }
}
