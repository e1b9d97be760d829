//! Error types for gnupg-keychain.
//!
//! Each concern has its own enum; `Error` wraps them so callers can match on
//! the layer that failed.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The provider failed initialization and cannot serve requests.
    #[error("gnupg keychain is not available: {0}")]
    Unsupported(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration loading and validation errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file not found (searched: {searched})")]
    NotFound { searched: String },

    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing required config field: {field}")]
    MissingField { field: &'static str },
}

/// Which part of a child process invocation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdin,
    Stdout,
    Stderr,
    Wait,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stdin => "stdin",
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
            Self::Wait => "wait",
        };
        f.write_str(name)
    }
}

/// Subprocess errors raised by the process runner.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("no arguments given for {command}")]
    NoArguments { command: String },

    #[error("failed to launch {command}: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} {stream} failed: {source}")]
    Io {
        command: String,
        stream: Stream,
        #[source]
        source: std::io::Error,
    },
}

/// Cipher tool errors (non-zero exits and unusable output).
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("gpg encrypt failed (exit {exit_code}): {stderr}")]
    EncryptionFailed { exit_code: i32, stderr: String },

    #[error("gpg decrypt failed (exit {exit_code}): {stderr}")]
    DecryptionFailed { exit_code: i32, stderr: String },

    #[error("{command} is not usable (exit {exit_code}): {stderr}")]
    Unusable {
        command: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("gpg produced invalid output: {0}")]
    InvalidOutput(String),
}

/// Key store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("vault identifier cannot be empty")]
    EmptyVaultId,

    #[error("no passphrase stored for vault '{vault}' ({path})")]
    NotFound { vault: String, path: PathBuf },

    #[error("failed to create key directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read key file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write key file {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to delete key file {path}: {source}")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("decrypted passphrase for vault '{0}' is not valid UTF-8")]
    InvalidUtf8(String),

    #[error("keychain is locked")]
    Locked,
}

pub type Result<T> = std::result::Result<T, Error>;
