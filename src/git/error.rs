//! Error kinds for external git commands.
//!
//! Every failure of a spawned command is classified into one [`GitError`]
//! variant. The binary reports all of them the same way: formatted message on
//! stderr, exit status 1.

use std::fmt;
use std::time::Duration;

use crate::styling::{ERROR, ERROR_BOLD, ERROR_EMOJI, HINT, HINT_EMOJI, format_with_gutter};

/// Exit status for any failed external command.
pub const FAILURE_EXIT_CODE: i32 = 1;

#[derive(Debug)]
pub enum GitError {
    /// The command could not be started (e.g. `git` not on PATH)
    Spawn { command: String, message: String },
    /// The command ran and exited unsuccessfully
    CommandFailed {
        command: String,
        /// `None` when the child was terminated by a signal
        exit_code: Option<i32>,
        stderr: String,
    },
    /// The command exceeded the configured timeout and was killed
    TimedOut { command: String, timeout: Duration },
}

impl GitError {
    /// The command line that failed.
    pub fn command(&self) -> &str {
        match self {
            GitError::Spawn { command, .. }
            | GitError::CommandFailed { command, .. }
            | GitError::TimedOut { command, .. } => command,
        }
    }
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::Spawn { command, message } => write!(
                f,
                "{ERROR_EMOJI} {ERROR}Could not run {ERROR_BOLD}{command}{ERROR_BOLD:#}{ERROR}: {message}{ERROR:#}"
            ),
            GitError::CommandFailed {
                command,
                exit_code,
                stderr,
            } => {
                let status = match exit_code {
                    Some(code) => format!("exit code {code}"),
                    None => "terminated by signal".to_string(),
                };
                write!(
                    f,
                    "{ERROR_EMOJI} {ERROR}{ERROR_BOLD}{command}{ERROR_BOLD:#}{ERROR} failed ({status}){ERROR:#}"
                )?;
                let gutter = format_with_gutter(stderr);
                if !gutter.is_empty() {
                    write!(f, "\n{}", gutter.trim_end_matches('\n'))?;
                }
                Ok(())
            }
            GitError::TimedOut { command, timeout } => write!(
                f,
                "{ERROR_EMOJI} {ERROR}{ERROR_BOLD}{command}{ERROR_BOLD:#}{ERROR} timed out after {}s{ERROR:#}\n\n{HINT_EMOJI} {HINT}Raise timeout_secs in .config/rollforward.toml or unset it{HINT:#}",
                timeout.as_secs_f64()
            ),
        }
    }
}

impl std::error::Error for GitError {}
