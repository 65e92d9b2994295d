//! Git operations, run by spawning the `git` executable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::shell_exec::Cmd;

mod chapter;
mod error;

pub use chapter::{ChapterBranch, ChapterPattern};
pub use error::{FAILURE_EXIT_CODE, GitError};

/// Repository context for git operations.
///
/// Every command runs with the repository path as its working directory; the
/// process-wide current directory is never changed.
///
/// ```no_run
/// use rollforward::git::{ChapterPattern, Repository};
///
/// let repo = Repository::at("/path/to/book");
/// repo.submodule_update()?;
/// let pattern = ChapterPattern::new("origin").unwrap();
/// for branch in repo.chapter_branches(&pattern, 3)? {
///     println!("{branch}");
/// }
/// # Ok::<(), rollforward::git::GitError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
    timeout: Option<Duration>,
}

impl Repository {
    /// Create a repository context at the specified path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            timeout: None,
        }
    }

    /// Kill any git command that runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the path this repository context operates on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw `git branch -a` output: local and remote-tracking branches.
    pub fn list_all_branches(&self) -> Result<String, GitError> {
        self.run_command("git branch -a")
    }

    /// Remote-tracking chapter branches numbered strictly above `after`,
    /// in the order git lists them.
    pub fn chapter_branches(
        &self,
        pattern: &ChapterPattern,
        after: u32,
    ) -> Result<Vec<ChapterBranch>, GitError> {
        let listing = self.list_all_branches()?;
        Ok(pattern.chapters_after(&listing, after))
    }

    /// Check out every submodule at the commit recorded by this repository.
    pub fn submodule_update(&self) -> Result<(), GitError> {
        self.run_command("git submodule update")?;
        Ok(())
    }

    /// Run a command line (e.g. `git branch -a`) in this repository's context.
    ///
    /// The line is split on whitespace; nothing is quoted or expanded.
    /// Returns stdout on success. A non-zero exit becomes
    /// [`GitError::CommandFailed`] carrying the captured stderr.
    pub fn run_command(&self, command_line: &str) -> Result<String, GitError> {
        let cmd = Cmd::parse(command_line)
            .ok_or_else(|| GitError::Spawn {
                command: command_line.to_string(),
                message: "empty command line".to_string(),
            })?
            .current_dir(&self.path)
            .context(self.context_name())
            .timeout(self.timeout);
        let command = cmd.to_string();

        let output = cmd.run().map_err(|e| match (e.kind(), self.timeout) {
            (std::io::ErrorKind::TimedOut, Some(timeout)) => GitError::TimedOut {
                command: command.clone(),
                timeout,
            },
            _ => GitError::Spawn {
                command: command.clone(),
                message: e.to_string(),
            },
        })?;

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                command,
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Directory name used to tag log lines.
    fn context_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
