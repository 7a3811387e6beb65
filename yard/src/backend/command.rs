//! Backend command construction and execution.
//!
//! Backends are external executables. Their location is resolved from an
//! explicit directory override when one is recorded, otherwise the bare
//! program name is left to ambient `PATH` lookup; the process
//! environment is never mutated.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;

use crate::error::{Error, Result};
use crate::progress::{ProgressSink, TERMINAL_OUTPUT};

/// A fully resolved backend command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program path or bare name.
    pub program: PathBuf,
    /// Arguments, in order.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Creates a command with no arguments.
    #[must_use]
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends a `--flag value` pair.
    #[must_use]
    pub fn flag(self, flag: &str, value: impl Into<String>) -> Self {
        self.arg(flag).arg(value)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Resolves a program against an optional directory override.
///
/// With an override the program is addressed as `dir/name`; without one
/// the bare name is returned and resolution is left to `PATH`.
#[must_use]
pub fn resolve_program(override_dir: Option<&Path>, name: &str) -> PathBuf {
    match override_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Runs a command as a supervised subprocess, streaming output.
///
/// Stdout and stderr are piped and forwarded line by line to the sink
/// as [`TERMINAL_OUTPUT`] events, in emission order per stream. The
/// call returns only after the stream is fully drained and the exit
/// status collected, so the completion signal always follows the last
/// line.
///
/// # Errors
///
/// Returns an I/O error if the process cannot be spawned, or
/// `BackendCommandFailed` carrying the last output line when the
/// process exits non-zero.
pub async fn run_streamed(spec: &CommandSpec, sink: &dyn ProgressSink) -> Result<()> {
    log::debug!("running backend command: {spec}");

    let mut child = tokio::process::Command::new(&spec.program)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let (tx, mut rx) = mpsc::channel::<String>(64);
    if let Some(stdout) = child.stdout.take() {
        tokio::spawn(forward_lines(stdout, tx.clone()));
    }
    if let Some(stderr) = child.stderr.take() {
        tokio::spawn(forward_lines(stderr, tx.clone()));
    }
    // The channel closes once both reader tasks finish.
    drop(tx);

    let mut last_line = String::new();
    while let Some(line) = rx.recv().await {
        sink.emit(TERMINAL_OUTPUT, &line);
        last_line = line;
    }

    let status = child.wait().await?;
    if !status.success() {
        return Err(Error::BackendCommandFailed {
            command: spec.to_string(),
            message: last_line,
        });
    }

    Ok(())
}

async fn forward_lines<R>(reader: R, tx: mpsc::Sender<String>)
where
    R: tokio::io::AsyncRead + Unpin,
{
    let mut lines = tokio::io::BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if tx.send(line).await.is_err() {
            break;
        }
    }
}

/// Runs a short read-only command synchronously and captures stdout.
///
/// Used for liveness probes and teardown commands, which are not
/// streamed.
///
/// # Errors
///
/// Returns an I/O error if the process cannot be spawned, or
/// `BackendCommandFailed` carrying trimmed stderr on a non-zero exit.
pub fn run_capture(spec: &CommandSpec) -> Result<String> {
    log::debug!("running command: {spec}");

    let output = std::process::Command::new(&spec.program)
        .args(&spec.args)
        .output()?;

    if !output.status.success() {
        return Err(Error::BackendCommandFailed {
            command: spec.to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::MemorySink;

    #[test]
    fn test_command_spec_display() {
        let spec = CommandSpec::new("provisioner")
            .arg("create")
            .flag("--name", "atlas");
        assert_eq!(spec.to_string(), "provisioner create --name atlas");
    }

    #[test]
    fn test_resolve_program_with_override() {
        let resolved = resolve_program(Some(Path::new("/opt/bin")), "provisioner");
        assert_eq!(resolved, PathBuf::from("/opt/bin/provisioner"));
    }

    #[test]
    fn test_resolve_program_bare_name() {
        assert_eq!(resolve_program(None, "provisioner"), PathBuf::from("provisioner"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_streamed_forwards_lines_in_order() {
        let spec = CommandSpec::new("sh")
            .arg("-c")
            .arg("echo one; echo two; echo three");
        let sink = MemorySink::new();

        run_streamed(&spec, &sink).await.unwrap();

        assert_eq!(sink.lines(), ["one", "two", "three"]);
        assert!(sink.events().iter().all(|(event, _)| event == TERMINAL_OUTPUT));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_streamed_failure_carries_last_line() {
        let spec = CommandSpec::new("sh")
            .arg("-c")
            .arg("echo starting; echo boom; exit 3");
        let sink = MemorySink::new();

        let err = run_streamed(&spec, &sink).await.unwrap_err();
        match err {
            Error::BackendCommandFailed { message, .. } => assert_eq!(message, "boom"),
            other => panic!("unexpected error: {other}"),
        }
        // Everything emitted before the failure is still delivered.
        assert_eq!(sink.lines(), ["starting", "boom"]);
    }

    #[tokio::test]
    async fn test_run_streamed_missing_program() {
        let spec = CommandSpec::new("/nonexistent/provisioner");
        let sink = MemorySink::new();
        assert!(matches!(
            run_streamed(&spec, &sink).await,
            Err(Error::Io(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_capture_success() {
        let spec = CommandSpec::new("sh").arg("-c").arg("echo captured");
        assert_eq!(run_capture(&spec).unwrap(), "captured\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_run_capture_failure_carries_stderr() {
        let spec = CommandSpec::new("sh")
            .arg("-c")
            .arg("echo oops >&2; exit 1");
        let err = run_capture(&spec).unwrap_err();
        match err {
            Error::BackendCommandFailed { message, .. } => assert_eq!(message, "oops"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
