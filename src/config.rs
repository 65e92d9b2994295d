//! Configuration
//!
//! Settings are layered, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. `<repo>/.config/rollforward.toml`, checked into the book repository
//! 3. `ROLLFORWARD_*` environment variables (e.g. `ROLLFORWARD_REMOTE=upstream`)
//!
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ROLLFORWARD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollforwardConfig {
    /// Remote whose tracking branches hold the chapters
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Refresh the submodule checkout before listing chapters
    #[serde(default = "default_submodule_update")]
    pub submodule_update: bool,

    /// Kill git commands running longer than this many seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_submodule_update() -> bool {
    true
}

impl Default for RollforwardConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            submodule_update: default_submodule_update(),
            timeout_secs: None,
        }
    }
}

impl RollforwardConfig {
    /// Path of the project file for a repository root.
    pub fn project_path(repo_root: &Path) -> PathBuf {
        repo_root.join(".config").join("rollforward.toml")
    }

    /// Load configuration for the repository at `repo_root`.
    ///
    /// A missing project file is fine; a malformed one is an error.
    pub fn load(repo_root: &Path) -> Result<Self, ConfigError> {
        Self::load_with_env(repo_root, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(repo_root: &Path, env: Environment) -> Result<Self, ConfigError> {
        let path = Self::project_path(repo_root);
        if path.exists() {
            log::debug!("Loading {}", path.display());
        }

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(env.prefix_separator("_").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}
