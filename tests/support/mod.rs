//! Test support utilities for gnupg-keychain integration tests.
//!
//! Every test gets its own temp directory holding a config file, a key
//! directory and a stand-in gpg script, so tests never touch the real
//! keyring and can run in parallel.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;
pub mod skip;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment.
pub struct Test {
    /// Holds the config, the fake gpg and the key directory
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Environment backed by the fake gpg, configured for [`KEY_ID`].
    pub fn new() -> Self {
        let t = Self::bare();
        let gpg = t.write_script("gpg", FAKE_GPG);
        t.write_config(KEY_ID, Some(&gpg));
        t
    }

    /// Environment whose gpg exits non-zero for everything but `--version`.
    pub fn failing() -> Self {
        let t = Self::bare();
        let gpg = t.write_script("gpg", FAILING_GPG);
        t.write_config(KEY_ID, Some(&gpg));
        t
    }

    /// Temp directories only; no config is written.
    pub fn bare() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        Self { dir, home }
    }

    /// Path of the config file (may not exist yet).
    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    /// Directory the key files are written to.
    pub fn keys_dir(&self) -> PathBuf {
        self.dir.path().join("keys")
    }

    /// Write the config file. `command: None` leaves `gnuPgCommand` unset.
    pub fn write_config(&self, key_id: &str, command: Option<&str>) {
        let mut config = serde_json::json!({
            "keyId": key_id,
            "encryptKeyBasePath": self.keys_dir(),
        });
        if let Some(command) = command {
            config["gnuPgCommand"] = serde_json::Value::from(command);
        }
        fs::write(self.config_path(), config.to_string()).expect("failed to write config");
    }

    /// Write an executable script into the temp dir and return its path.
    pub fn write_script(&self, name: &str, body: &str) -> String {
        write_script(self.dir.path(), name, body)
    }

    /// Key file contents for a vault, read through the encoded name.
    pub fn key_file(&self, vault: &str) -> String {
        let name = gnupg_keychain::core::codec::encode_vault_id(vault);
        fs::read_to_string(self.keys_dir().join(name)).expect("failed to read key file")
    }
}

/// Write an executable `#!/bin/sh` script.
pub fn write_script(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, body).expect("failed to write script");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("failed to mark script executable");
    }
    path.display().to_string()
}
