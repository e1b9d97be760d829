//! Passphrase commands: store, change, load, delete.

use std::io::{self, BufRead, IsTerminal, Write};

use dialoguer::Password;
use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::core::config::ConfigLoader;
use crate::core::provider::{GnuPgProvider, KeychainAccess};
use crate::error::{Error, Result};

/// Encrypt and store a passphrase.
pub fn store(loader: &ConfigLoader, vault: &str, label: Option<&str>) -> Result<()> {
    let provider = GnuPgProvider::initialize(loader)?;
    let existed = provider.key_store()?.contains(vault);
    if existed {
        output::warn(&format!("replacing stored passphrase for {}", output::vault(vault)));
    }

    let passphrase = read_passphrase()?;
    provider.store_passphrase(vault, label, &passphrase)?;
    output::success(&format!("stored passphrase for {}", output::vault(vault)));
    Ok(())
}

/// Re-encrypt a vault with a new passphrase.
pub fn change(loader: &ConfigLoader, vault: &str, label: Option<&str>) -> Result<()> {
    let provider = GnuPgProvider::initialize(loader)?;
    let passphrase = read_passphrase()?;
    provider.change_passphrase(vault, label, &passphrase)?;
    output::success(&format!("changed passphrase for {}", output::vault(vault)));
    Ok(())
}

/// Decrypt and print a passphrase to stdout.
pub fn load(loader: &ConfigLoader, vault: &str) -> Result<()> {
    let provider = GnuPgProvider::initialize(loader)?;
    let passphrase = provider.load_passphrase(vault)?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(passphrase.as_bytes())?;
    if stdout.is_terminal() {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;
    Ok(())
}

/// Delete a stored passphrase.
pub fn delete(loader: &ConfigLoader, vault: &str) -> Result<()> {
    let provider = GnuPgProvider::initialize(loader)?;
    let existed = provider.key_store()?.contains(vault);
    provider.delete_passphrase(vault)?;

    if existed {
        output::success(&format!("deleted passphrase for {}", output::vault(vault)));
    } else {
        output::warn(&format!("nothing stored for {}", output::vault(vault)));
    }
    Ok(())
}

/// Read a passphrase from piped stdin, or prompt with hidden input.
fn read_passphrase() -> Result<Zeroizing<String>> {
    let stdin = io::stdin();
    let passphrase = if !stdin.is_terminal() {
        debug!("reading passphrase from stdin");
        let mut line = Zeroizing::new(String::new());
        stdin.lock().read_line(&mut line)?;
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        line
    } else {
        Zeroizing::new(
            Password::new()
                .with_prompt("Passphrase")
                .with_confirmation("Confirm passphrase", "passphrases do not match")
                .interact()?,
        )
    };

    if passphrase.is_empty() {
        return Err(Error::InvalidInput("passphrase cannot be empty".to_string()));
    }
    Ok(passphrase)
}
