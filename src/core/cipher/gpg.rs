//! GPG cipher backend.
//!
//! Encrypts secrets by running the GnuPG command line tool.
//!
//! ## Requirements
//!
//! - `gpg` (or the configured command) must be installed
//! - The keyring must hold the recipient's public key
//! - The private key must be available to the agent for decryption
//!
//! ## Wire contract
//!
//! ```text
//! gpg --version                                                     # probe
//! gpg -r <key> -e -a --no-comment --comment "Cryptomator: <label>"  # stdin: plaintext
//! gpg -d                                                            # stdin: armored text
//! ```

use tracing::{trace, warn};

use super::Cipher;
use crate::core::config::Config;
use crate::core::constants;
use crate::core::runner::{self, CommandResult};
use crate::error::{CipherError, Result};

/// GPG cipher backend using the gpg CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gpg {
    command: String,
}

impl Gpg {
    /// Backend running `command` (a name resolved via PATH, or a path).
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    /// Backend running the configured command.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.command())
    }

    /// Command this backend invokes.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Check that the tool runs and exits cleanly for `--version`.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::Unusable` on a non-zero exit, or the process
    /// error if the tool could not be launched.
    pub fn probe(&self) -> Result<()> {
        self.run_version().map(drop)
    }

    /// Readiness as a boolean. Never fails; the reason is logged.
    pub fn is_usable(&self) -> bool {
        match self.probe() {
            Ok(()) => true,
            Err(e) => {
                warn!(command = %self.command, error = %e, "gpg readiness check failed");
                false
            }
        }
    }

    /// First line of `--version` output, e.g. `gpg (GnuPG) 2.4.5`.
    ///
    /// # Errors
    ///
    /// Same as [`probe`](Self::probe).
    pub fn version(&self) -> Result<String> {
        let result = self.run_version()?;
        let stdout = String::from_utf8_lossy(&result.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    fn run_version(&self) -> Result<CommandResult> {
        let result = runner::run(&self.command, &["--version"], None)?;
        if !result.success() {
            return Err(CipherError::Unusable {
                command: self.command.clone(),
                exit_code: result.exit_code,
                stderr: result.stderr_text(),
            }
            .into());
        }
        Ok(result)
    }
}

impl Default for Gpg {
    fn default() -> Self {
        Self::new(constants::DEFAULT_COMMAND)
    }
}

impl Cipher for Gpg {
    fn name(&self) -> &'static str {
        "gpg"
    }

    fn encrypt(&self, payload: &[u8], recipient: &str, label: &str) -> Result<String> {
        trace!(payload_len = payload.len(), recipient, "encrypting with GPG");

        let comment = format!("{}: {}", constants::COMMENT_PREFIX, label);
        let args = ["-r", recipient, "-e", "-a", "--no-comment", "--comment", comment.as_str()];
        let result = runner::run(&self.command, &args, Some(payload))?;

        if !result.success() {
            return Err(CipherError::EncryptionFailed {
                exit_code: result.exit_code,
                stderr: result.stderr_text(),
            }
            .into());
        }

        // GPG armor is ASCII
        let armored = String::from_utf8(result.stdout)
            .map_err(|e| CipherError::InvalidOutput(format!("armor is not UTF-8: {}", e)))?;

        trace!(armored_len = armored.len(), "encrypted with GPG");
        Ok(armored)
    }

    fn decrypt(&self, armored: &str) -> Result<Vec<u8>> {
        trace!(armored_len = armored.len(), "decrypting with GPG");

        let result = runner::run(&self.command, &["-d"], Some(armored.as_bytes()))?;

        if !result.success() {
            return Err(CipherError::DecryptionFailed {
                exit_code: result.exit_code,
                stderr: result.stderr_text(),
            }
            .into());
        }

        trace!(payload_len = result.stdout.len(), "decrypted with GPG");
        Ok(result.stdout)
    }
}
