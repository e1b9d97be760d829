//! Per-vault passphrase storage.
//!
//! Each vault's passphrase is encrypted by a [`Cipher`] and written as armored
//! text to `<base>/<encoded vault id>`. File names come from
//! [`encode_vault_id`], recomputed on every lookup.
//!
//! Writes are plain overwrites and nothing is locked: concurrent operations
//! on the same vault race at the filesystem level, last writer wins.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::cipher::{Cipher, Gpg};
use crate::core::codec::encode_vault_id;
use crate::core::config::Config;
use crate::error::{Result, StoreError};

/// A decrypted passphrase, wiped from memory on drop.
pub type Passphrase = Zeroizing<String>;

/// Filesystem key store backed by a cipher.
#[derive(Debug, Clone)]
pub struct KeyStore<C = Gpg> {
    base_dir: PathBuf,
    key_id: String,
    cipher: C,
}

impl KeyStore<Gpg> {
    /// Key store using the configured directory, recipient and gpg command.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.key_base_path(), config.key_id(), Gpg::from_config(config))
    }
}

impl<C: Cipher> KeyStore<C> {
    /// Key store writing under `base_dir`, encrypting to `key_id`.
    pub fn new(base_dir: impl Into<PathBuf>, key_id: impl Into<String>, cipher: C) -> Self {
        Self {
            base_dir: base_dir.into(),
            key_id: key_id.into(),
            cipher,
        }
    }

    /// Directory holding the key files.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The cipher doing the encryption.
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// Key file path for a vault.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::EmptyVaultId` for an empty identifier, which would
    /// otherwise address the base directory itself.
    pub fn path_for(&self, vault: &str) -> Result<PathBuf> {
        if vault.is_empty() {
            return Err(StoreError::EmptyVaultId.into());
        }
        Ok(self.base_dir.join(encode_vault_id(vault)))
    }

    /// Whether a key file exists for the vault.
    pub fn contains(&self, vault: &str) -> bool {
        self.path_for(vault).map(|p| p.is_file()).unwrap_or(false)
    }

    /// Encrypt `secret` and write it to the vault's key file.
    ///
    /// Creates the base directory (and parents) if missing and replaces any
    /// existing key file. The file is not written atomically.
    ///
    /// # Arguments
    ///
    /// * `vault` - Vault identifier
    /// * `label` - Human-readable name embedded in the armor comment
    /// * `secret` - Passphrase to store
    ///
    /// # Errors
    ///
    /// Returns the cipher error if encryption fails, or `StoreError` if the
    /// directory or file cannot be written.
    pub fn store(&self, vault: &str, label: &str, secret: &str) -> Result<()> {
        let path = self.path_for(vault)?;
        debug!(vault, label, path = %path.display(), cipher = self.cipher.name(), "storing passphrase");

        let armored = self
            .cipher
            .encrypt(secret.as_bytes(), &self.key_id, label)?;

        if !self.base_dir.is_dir() {
            info!(path = %self.base_dir.display(), "creating key directory");
            fs::create_dir_all(&self.base_dir).map_err(|source| StoreError::CreateDir {
                path: self.base_dir.clone(),
                source,
            })?;
        }

        write_key_file(&path, &armored)?;
        debug!(vault, armored_len = armored.len(), "passphrase stored");
        Ok(())
    }

    /// Re-encrypt and overwrite the vault's passphrase.
    ///
    /// Identical to [`store`](Self::store).
    pub fn change_passphrase(&self, vault: &str, label: &str, secret: &str) -> Result<()> {
        self.store(vault, label, secret)
    }

    /// Read and decrypt the vault's passphrase.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no regular key file exists,
    /// `StoreError::ReadFailed` if it cannot be read, the cipher error if
    /// decryption fails, or `StoreError::InvalidUtf8` if the plaintext is not
    /// text.
    pub fn load(&self, vault: &str) -> Result<Passphrase> {
        let path = self.path_for(vault)?;
        debug!(vault, path = %path.display(), "loading passphrase");

        if !path.is_file() {
            return Err(StoreError::NotFound {
                vault: vault.to_string(),
                path,
            }
            .into());
        }

        let armored = fs::read_to_string(&path).map_err(|source| StoreError::ReadFailed {
            path: path.clone(),
            source,
        })?;
        let bytes = self.cipher.decrypt(&armored)?;

        let secret = String::from_utf8(bytes).map_err(|e| {
            // Drop the rejected plaintext without leaving it in memory.
            drop(Zeroizing::new(e.into_bytes()));
            StoreError::InvalidUtf8(vault.to_string())
        })?;
        Ok(Zeroizing::new(secret))
    }

    /// Remove the vault's key file.
    ///
    /// A missing file (or a path that is not a regular file) is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DeleteFailed` if an existing file cannot be
    /// removed.
    pub fn delete(&self, vault: &str) -> Result<()> {
        let path = self.path_for(vault)?;
        if !path.is_file() {
            debug!(vault, path = %path.display(), "no key file to delete");
            return Ok(());
        }

        fs::remove_file(&path).map_err(|source| StoreError::DeleteFailed {
            path: path.clone(),
            source,
        })?;
        debug!(vault, path = %path.display(), "key file deleted");
        Ok(())
    }
}

/// Write armored text to a key file, owner-only on Unix.
fn write_key_file(path: &Path, armored: &str) -> Result<()> {
    let write_err = |source: std::io::Error| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    fs::write(path, armored).map_err(write_err)?;

    // Restrict permissions on key file (Unix only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(write_err)?;
    }

    Ok(())
}
