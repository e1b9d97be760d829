//! Full-duplex subprocess tests.
//!
//! These push more data through each pipe than an OS pipe buffer holds, so
//! a runner that drains streams sequentially would deadlock here.

#![cfg(unix)]

use gnupg_keychain::core::runner;
use gnupg_keychain::error::{Error, ProcessError, Stream};
use std::sync::{Arc, Barrier};
use std::thread;

const MIB: usize = 1024 * 1024;

#[test]
fn test_large_stdout_and_stderr_together() {
    let script = "head -c 2097152 /dev/zero; head -c 1048576 /dev/zero >&2";
    let result = runner::run("sh", &["-c", script], None).unwrap();

    assert!(result.success());
    assert_eq!(result.stdout.len(), 2 * MIB);
    assert_eq!(result.stderr.len(), MIB);
}

#[test]
fn test_large_stdin_while_output_fills_pipes() {
    // Output is produced before stdin is read, so both sides must be
    // serviced at once.
    let script = "head -c 1048576 /dev/zero >&2; head -c 1048576 /dev/zero; wc -c";
    let input = vec![b'x'; 3 * MIB];
    let result = runner::run("sh", &["-c", script], Some(&input)).unwrap();

    assert!(result.success());
    assert_eq!(result.stderr.len(), MIB);
    let count = String::from_utf8_lossy(&result.stdout[MIB..]);
    assert_eq!(count.trim(), (3 * MIB).to_string());
}

#[test]
fn test_binary_input_round_trips() {
    let input: Vec<u8> = (0..=255u8).cycle().take(MIB + 7).collect();
    let result = runner::run("cat", &["-"], Some(&input)).unwrap();
    assert_eq!(result.stdout, input);
}

#[test]
fn test_non_zero_exit_is_a_result() {
    let result = runner::run("sh", &["-c", "echo nope >&2; exit 3"], None).unwrap();
    assert!(!result.success());
    assert_eq!(result.exit_code, 3);
    assert_eq!(result.stderr_text(), "nope");
}

#[test]
fn test_missing_program_is_launch_error() {
    let err = runner::run("/nonexistent/gpg", &["--version"], None).unwrap_err();
    assert!(matches!(
        err,
        Error::Process(ProcessError::Launch { ref command, .. }) if command == "/nonexistent/gpg"
    ));
}

#[test]
fn test_concurrent_runs() {
    let barrier = Arc::new(Barrier::new(4));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let input = vec![b'a' + i as u8; MIB];
                let result = runner::run("cat", &["-"], Some(&input)).unwrap();
                result.stdout == input
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.iter().all(|&r| r), "every run should echo its own input");
}

#[test]
fn test_empty_arguments_are_rejected() {
    let err = runner::run("cat", &[] as &[&str], None).unwrap_err();
    assert!(matches!(err, Error::Process(ProcessError::NoArguments { .. })));
}

#[test]
fn test_child_exiting_before_reading_is_stdin_error() {
    // Far more than a pipe buffer, so the write cannot complete.
    let input = vec![b'x'; 4 * MIB];
    let err = runner::run("sh", &["-c", "echo early >&2; exit 5"], Some(&input)).unwrap_err();

    assert!(
        matches!(
            err,
            Error::Process(ProcessError::Io { stream: Stream::Stdin, .. })
        ),
        "unexpected error: {err}"
    );
    assert!(err.to_string().starts_with("sh stdin failed"));
}
