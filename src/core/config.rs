//! Configuration file management.
//!
//! Reads the flat JSON record that names the recipient key, the cipher tool
//! and the key directory. The record is immutable once loaded.
//!
//! ```json
//! {
//!   "keyId": "ABCD1234ABCD1234",
//!   "gnuPgCommand": "/usr/local/bin/gpg",
//!   "encryptKeyBasePath": "~/.config/cryptomator/keys/"
//! }
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::constants;
use crate::error::{ConfigError, Result};

/// On-disk shape of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    #[serde(default)]
    key_id: Option<String>,
    #[serde(default)]
    gnu_pg_command: Option<String>,
    #[serde(default)]
    encrypt_key_base_path: Option<String>,
}

/// Validated provider configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    key_id: String,
    command: Option<String>,
    key_base_path: Option<PathBuf>,
}

impl Config {
    /// Create a configuration for the given recipient key with defaults for
    /// everything else.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingField` if `key_id` is empty.
    pub fn new(key_id: impl Into<String>) -> Result<Self> {
        let key_id = key_id.into();
        if key_id.is_empty() {
            return Err(ConfigError::MissingField { field: "keyId" }.into());
        }
        Ok(Self {
            key_id,
            command: None,
            key_base_path: None,
        })
    }

    /// Use an explicit cipher tool instead of `gpg` from PATH.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = non_empty(command.into());
        self
    }

    /// Store key files under `path` instead of the default directory.
    pub fn with_key_base_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_base_path = Some(path.into());
        self
    }

    /// Load and validate a config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ReadFile` if the file cannot be read,
    /// `ConfigError::Parse` if it is not valid JSON for the record, or
    /// `ConfigError::MissingField` if `keyId` is absent or empty.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig =
            serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let config = Self::new(raw.key_id.unwrap_or_default())?;
        let config = match raw.gnu_pg_command {
            Some(command) => config.with_command(command),
            None => config,
        };
        let config = match raw.encrypt_key_base_path.and_then(non_empty) {
            Some(base) => config.with_key_base_path(expand_home(&base)),
            None => config,
        };

        debug!(
            key_id = %config.key_id,
            command = config.command(),
            "config loaded"
        );
        Ok(config)
    }

    /// Recipient key ID used for encryption.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Cipher tool to invoke: the configured path, or `gpg`.
    pub fn command(&self) -> &str {
        self.command
            .as_deref()
            .unwrap_or(constants::DEFAULT_COMMAND)
    }

    /// Directory holding one key file per vault.
    pub fn key_base_path(&self) -> PathBuf {
        match &self.key_base_path {
            Some(path) => path.clone(),
            None => home_dir().join(constants::KEY_DIR),
        }
    }
}

/// Locates and loads the config file from an ordered list of candidates.
///
/// The first candidate that exists and is a regular file wins.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    search_paths: Vec<PathBuf>,
}

impl ConfigLoader {
    /// Search only the given paths, in order.
    pub fn with_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// Candidate paths in lookup order.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Find the first existing config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` listing every searched path.
    pub fn locate(&self) -> Result<PathBuf> {
        for candidate in &self.search_paths {
            let is_file = candidate.is_file();
            debug!(path = %candidate.display(), found = is_file, "checking config file");
            if is_file {
                return Ok(candidate.clone());
            }
        }

        let searched = self
            .search_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(ConfigError::NotFound { searched }.into())
    }

    /// Locate and load the config file.
    pub fn load(&self) -> Result<Config> {
        Config::from_file(&self.locate()?)
    }
}

impl Default for ConfigLoader {
    /// System-wide file first, then the per-user file.
    fn default() -> Self {
        Self::with_paths([
            PathBuf::from(constants::SYSTEM_CONFIG_FILE),
            home_dir().join(constants::USER_CONFIG_FILE),
        ])
    }
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    if path == "~" {
        return home_dir();
    }
    match path.strip_prefix("~/") {
        Some(rest) => home_dir().join(rest),
        None => PathBuf::from(path),
    }
}
