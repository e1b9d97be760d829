//! Cryptographic operations.
//!
//! Encryption is delegated to an external cipher tool. The `Cipher` trait is
//! the seam between the key store and whatever performs the encryption; the
//! only shipped backend is [`Gpg`].
//!
//! ## Adding a New Backend
//!
//! 1. Implement the `Cipher` trait
//! 2. Add the implementation in a new file (e.g., `age.rs`)
//! 3. Re-export from this module

use crate::error::Result;

mod gpg;

pub use gpg::Gpg;

/// Cryptographic backend trait.
///
/// Ciphertext is text (ASCII armor) so it can be stored and inspected as a
/// plain file; plaintext is raw bytes.
pub trait Cipher {
    /// Encrypt `payload` for `recipient`.
    ///
    /// # Arguments
    ///
    /// * `payload` - Bytes to encrypt
    /// * `recipient` - Recipient key ID (backend-specific)
    /// * `label` - Human-readable label embedded in the armor comment
    ///
    /// # Errors
    ///
    /// Returns `CipherError::EncryptionFailed` if the backend rejects the
    /// request, or a process error if the backend could not be run.
    fn encrypt(&self, payload: &[u8], recipient: &str, label: &str) -> Result<String>;

    /// Decrypt armored text back to the original bytes.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the backend rejects the
    /// ciphertext, or a process error if the backend could not be run.
    fn decrypt(&self, armored: &str) -> Result<Vec<u8>>;

    /// Backend name for display/logging.
    fn name(&self) -> &'static str;
}
