//! Shell command execution
//!
//! Runs external commands (git, dpkg-buildpackage, custom build strings)
//! through `sh -c` and streams their output into the log while they run.
//! Standard output lines are logged at debug level, standard error lines at
//! info level. Both streams are drained concurrently and joined once the
//! process exits.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::Instrument;

/// Exit code reported when the process status carries no code or signal
pub const UNKNOWN_EXIT_CODE: i32 = -1;

/// How long output readers may keep running once the command has exited
///
/// Background processes started by a command inherit its pipes and can hold
/// them open indefinitely.
pub const DRAIN_GRACE: Duration = Duration::from_secs(2);

const SHELL: &str = "sh";

/// Command execution errors
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Process could not be started
    #[error("Failed to spawn '{command}': {error}")]
    SpawnFailed { command: String, error: String },

    /// Waiting for the process failed
    #[error("Failed to wait for '{command}': {error}")]
    WaitFailed { command: String, error: String },
}

/// Something that can run a shell command and report its exit code
///
/// A non-zero exit code is the only failure signal; interpreting it is up
/// to the caller.
#[allow(async_fn_in_trait)]
pub trait CommandExecutor {
    /// Run `command`, optionally inside `cwd`, and return its exit code
    async fn execute(&self, command: &str, cwd: Option<&Path>) -> Result<i32, RunnerError>;
}

/// Which stream a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

/// Runs commands through `sh -c`
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    /// Create a runner
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ShellRunner {
    async fn execute(&self, command: &str, cwd: Option<&Path>) -> Result<i32, RunnerError> {
        match cwd {
            Some(dir) => tracing::debug!("Running `{command}` in {}", dir.display()),
            None => tracing::debug!("Running `{command}`"),
        }

        let mut cmd = Command::new(SHELL);
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd.spawn().map_err(|e| RunnerError::SpawnFailed {
            command: command.to_string(),
            error: e.to_string(),
        })?;

        // Drain tasks inherit the caller's span so output stays scoped to the package
        let stdout = child
            .stdout
            .take()
            .map(|out| tokio::spawn(drain(out, Stream::Stdout).in_current_span()));
        let stderr = child
            .stderr
            .take()
            .map(|err| tokio::spawn(drain(err, Stream::Stderr).in_current_span()));

        let status = child.wait().await.map_err(|e| RunnerError::WaitFailed {
            command: command.to_string(),
            error: e.to_string(),
        })?;

        let deadline = tokio::time::Instant::now() + DRAIN_GRACE;
        for mut handle in [stdout, stderr].into_iter().flatten() {
            match tokio::time::timeout_at(deadline, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::warn!("Output reader for `{command}` failed: {e}"),
                Err(_) => {
                    tracing::debug!("Output of `{command}` still open after exit, detaching");
                    handle.abort();
                }
            }
        }

        let code = exit_code(status);
        tracing::debug!("`{command}` exited with code {code}");
        Ok(code)
    }
}

/// Forward every line of `reader` to the log until EOF
async fn drain<R: AsyncRead + Unpin>(reader: R, stream: Stream) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                let line = line.trim_end_matches(['\n', '\r']);
                match stream {
                    Stream::Stdout => tracing::debug!("{line}"),
                    Stream::Stderr => tracing::info!("{line}"),
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read {stream:?}: {e}");
                break;
            }
        }
    }
}

/// Convert a process status into a shell-style exit code
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    UNKNOWN_EXIT_CODE
}
