//! External command execution
//!
//! Every child process rollforward spawns goes through [`Cmd`], which gives a
//! single place for debug logging, timing and the optional timeout. Commands
//! are never passed through a shell: a command line is a program followed by
//! whitespace-separated arguments.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

/// Builder for executing commands with logging and an optional timeout.
///
/// ```ignore
/// let output = Cmd::new("git")
///     .args(["branch", "-a"])
///     .current_dir(&repo_root)
///     .context("book")
///     .run()?;
/// ```
#[derive(Debug, Clone)]
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    context: Option<String>,
    timeout: Option<Duration>,
}

impl Cmd {
    /// Create a new command builder for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            context: None,
            timeout: None,
        }
    }

    /// Build a command from a textual command line.
    ///
    /// Tokens are split on whitespace only; quotes and shell syntax are not
    /// interpreted. Returns `None` for a blank line.
    pub fn parse(command_line: &str) -> Option<Self> {
        let mut tokens = command_line.split_whitespace();
        let program = tokens.next()?;
        Some(Self::new(program).args(tokens))
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the command.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Set the logging context (typically the repository name).
    pub fn context(mut self, ctx: impl Into<String>) -> Self {
        self.context = Some(ctx.into());
        self
    }

    /// Kill the command, and anything it started, if it runs longer than
    /// `duration`. `None` waits indefinitely.
    pub fn timeout(mut self, duration: Option<Duration>) -> Self {
        self.timeout = duration;
        self
    }

    /// Execute the command and return its captured output.
    ///
    /// A non-zero exit is not an error at this level; callers inspect
    /// `output.status`. A timeout surfaces as `ErrorKind::TimedOut`.
    pub fn run(self) -> std::io::Result<Output> {
        match &self.context {
            Some(ctx) => log::debug!("$ {} [{}]", self, ctx),
            None => log::debug!("$ {}", self),
        }

        let t0 = Instant::now();

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }

        let result = match self.timeout {
            Some(timeout) => run_with_timeout(&mut cmd, timeout),
            None => cmd.stdin(Stdio::null()).output(),
        };

        let dur_ms = t0.elapsed().as_millis();
        match &result {
            Ok(output) => log::debug!(
                "$ {} finished in {}ms ok={}",
                self,
                dur_ms,
                output.status.success()
            ),
            Err(e) => log::debug!("$ {} failed after {}ms: {}", self, dur_ms, e),
        }

        result
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Spawn the process, drain stdout/stderr on background threads and wait up to
/// `timeout`. On expiry the child's whole process group is killed and the child
/// reaped.
fn run_with_timeout(cmd: &mut Command, timeout: Duration) -> std::io::Result<Output> {
    // Own process group, so helpers git starts (fetch, remote-http) die with it
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        cmd.process_group(0);
    }

    let mut child = cmd
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // Reading on separate threads keeps a chatty child from blocking on a full pipe
    let stdout_thread = drain(child.stdout.take());
    let stderr_thread = drain(child.stderr.take());

    let status = match child.wait_timeout(timeout)? {
        Some(status) => status,
        None => {
            kill_tree(&mut child);
            let _ = child.wait();
            // Readers stay detached; a process outside the group may still hold the pipes
            drop(stdout_thread);
            drop(stderr_thread);
            return Err(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                "command timed out",
            ));
        }
    };

    Ok(Output {
        status,
        stdout: stdout_thread.join().unwrap_or_default(),
        stderr: stderr_thread.join().unwrap_or_default(),
    })
}

#[cfg(unix)]
fn kill_tree(child: &mut Child) {
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    match i32::try_from(child.id()) {
        Ok(pgid) => {
            if let Err(e) = killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
                log::debug!("killpg({pgid}) failed: {e}");
                let _ = child.kill();
            }
        }
        Err(_) => {
            let _ = child.kill();
        }
    }
}

#[cfg(not(unix))]
fn kill_tree(child: &mut Child) {
    let _ = child.kill();
}

fn drain<R: Read + Send + 'static>(handle: Option<R>) -> std::thread::JoinHandle<Vec<u8>> {
    std::thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut handle) = handle {
            let _ = handle.read_to_end(&mut buf);
        }
        buf
    })
}
