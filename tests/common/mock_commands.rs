// Mock command helpers
//
// Mocks are POSIX shell scripts written into a temp `bin` dir that tests
// prepend to PATH. Each mock appends `<cwd>|<args>` to a log file so tests can
// assert which commands ran, in which order and from which directory.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Canned reply for one git subcommand.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    /// Seconds to block before replying (`exec sleep`, so killing the mock kills the sleep)
    pub hang_secs: Option<u32>,
}

impl MockResponse {
    pub fn ok(stdout: &str) -> Self {
        Self {
            stdout: stdout.to_string(),
            stderr: String::new(),
            exit_code: 0,
            hang_secs: None,
        }
    }

    pub fn fail(stderr: &str, exit_code: i32) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.to_string(),
            exit_code,
            hang_secs: None,
        }
    }

    pub fn hang(secs: u32) -> Self {
        Self {
            hang_secs: Some(secs),
            ..Self::ok("")
        }
    }

    fn to_script(&self) -> String {
        if let Some(secs) = self.hang_secs {
            // Forked, not exec'd: the sleep outlives the script like a git helper would
            return format!("        sleep {secs}\n        exit 0\n");
        }
        format!(
            "{}{}        exit {}\n",
            heredoc("", &self.stdout),
            heredoc(" >&2", &self.stderr),
            self.exit_code
        )
    }
}

/// `cat` a literal block; the terminator must sit at column 0.
fn heredoc(redirect: &str, content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }
    let newline = if content.ends_with('\n') { "" } else { "\n" };
    format!("        cat{redirect} <<'MOCK_EOF'\n{content}{newline}MOCK_EOF\n")
}

/// Write an executable mock script.
pub fn write_mock_script(bin_dir: &Path, name: &str, script: &str) {
    let script_path = bin_dir.join(name);
    fs::write(&script_path, script).unwrap();
    fs::set_permissions(&script_path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Create a mock `git` answering `submodule ...` and `branch ...`.
///
/// Any other subcommand exits 2 so unexpected calls show up as failures.
pub fn create_mock_git(
    bin_dir: &Path,
    log_path: &Path,
    submodule: &MockResponse,
    branch: &MockResponse,
) {
    let script = format!(
        r#"#!/bin/sh
printf '%s|%s\n' "$(pwd -P)" "$*" >> '{log}'
case "$1" in
    submodule)
{submodule}        ;;
    branch)
{branch}        ;;
    *)
        echo "mock git: unexpected arguments: $*" >&2
        exit 2
        ;;
esac
"#,
        log = log_path.display(),
        submodule = submodule.to_script(),
        branch = branch.to_script(),
    );

    write_mock_script(bin_dir, "git", &script);
}
