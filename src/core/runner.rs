//! Cipher tool process runner.
//!
//! Runs a child process with piped stdin, stdout and stderr. The pipes have
//! bounded OS buffers, so stdin is written while both output streams are
//! drained: three scoped threads live for the duration of one invocation and
//! the child is reaped only after all of them have finished.
//!
//! There is no timeout. A child that never exits blocks the caller.

use std::ffi::OsStr;
use std::fmt;
use std::io::{self, Read, Write};
use std::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};
use std::thread;

use tracing::{debug, trace};

use crate::error::{ProcessError, Result, Stream};

/// Outcome of one cipher tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Exit code, or `-1` if the child was terminated by a signal.
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandResult {
    /// Whether the child exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Captured stderr as text, lossily decoded, without trailing line breaks.
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr)
            .trim_end_matches(['\r', '\n'])
            .to_string()
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exit {} ({} bytes stdout): {}",
            self.exit_code,
            self.stdout.len(),
            self.stderr_text()
        )
    }
}

/// Run `command` with `args`, feeding `input` to its stdin.
///
/// Returns once the child has exited and both output streams are drained.
/// An absent or empty `input` closes stdin immediately.
///
/// # Errors
///
/// - `ProcessError::NoArguments` if `args` is empty; nothing is spawned.
/// - `ProcessError::Launch` if the child cannot be spawned.
/// - `ProcessError::Io` if a pipe read/write or the final wait fails. The
///   first failure in stdin, stdout, stderr order is reported, after every
///   stream task has finished and the child has been reaped.
pub fn run<S: AsRef<OsStr>>(command: &str, args: &[S], input: Option<&[u8]>) -> Result<CommandResult> {
    if args.is_empty() {
        return Err(ProcessError::NoArguments {
            command: command.to_string(),
        }
        .into());
    }

    trace!(
        command,
        args = args.len(),
        input_len = input.map_or(0, <[u8]>::len),
        "spawning cipher tool"
    );

    let mut child = Command::new(command)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| ProcessError::Launch {
            command: command.to_string(),
            source,
        })?;

    let (stdin, stdout, stderr) = take_pipes(&mut child);
    let (stdin_res, stdout_res, stderr_res) = thread::scope(|s| {
        let writer = s.spawn(move || write_input(stdin, input));
        let out = s.spawn(move || drain(stdout));
        let err = s.spawn(move || drain(stderr));
        (join(writer), join(out), join(err))
    });

    // Streams are complete; only now reap the child.
    let status = child.wait();
    let result = settle(command, stdin_res, stdout_res, stderr_res, status)?;

    debug!(
        command,
        exit_code = result.exit_code,
        stdout_len = result.stdout.len(),
        stderr_len = result.stderr.len(),
        "cipher tool finished"
    );
    Ok(result)
}

/// Combine the stream outcomes, reporting the first failure in stdin,
/// stdout, stderr, wait order.
fn settle(
    command: &str,
    stdin: io::Result<()>,
    stdout: io::Result<Vec<u8>>,
    stderr: io::Result<Vec<u8>>,
    status: io::Result<ExitStatus>,
) -> Result<CommandResult> {
    let io_err = |stream: Stream, source: io::Error| ProcessError::Io {
        command: command.to_string(),
        stream,
        source,
    };
    stdin.map_err(|e| io_err(Stream::Stdin, e))?;
    let stdout = stdout.map_err(|e| io_err(Stream::Stdout, e))?;
    let stderr = stderr.map_err(|e| io_err(Stream::Stderr, e))?;
    let status = status.map_err(|e| io_err(Stream::Wait, e))?;

    Ok(CommandResult {
        exit_code: status.code().unwrap_or(-1),
        stdout,
        stderr,
    })
}

fn take_pipes(child: &mut Child) -> (Option<ChildStdin>, Option<ChildStdout>, Option<ChildStderr>) {
    (child.stdin.take(), child.stdout.take(), child.stderr.take())
}

/// Write the payload and close stdin so the child sees end of input.
fn write_input(stdin: Option<ChildStdin>, input: Option<&[u8]>) -> io::Result<()> {
    let Some(mut stdin) = stdin else {
        return Ok(());
    };
    if let Some(bytes) = input.filter(|b| !b.is_empty()) {
        stdin.write_all(bytes)?;
        stdin.flush()?;
    }
    drop(stdin);
    Ok(())
}

fn drain<R: Read>(pipe: Option<R>) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        pipe.read_to_end(&mut buf)?;
    }
    Ok(buf)
}

/// Join a stream thread, turning a panic into an I/O error.
fn join<T>(handle: thread::ScopedJoinHandle<'_, io::Result<T>>) -> io::Result<T> {
    handle
        .join()
        .unwrap_or_else(|_| Err(io::Error::new(io::ErrorKind::Other, "stream thread panicked")))
}
