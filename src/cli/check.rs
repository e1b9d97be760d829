//! Diagnostic commands: check, path, encode.

use crate::cli::output;
use crate::core::cipher::Gpg;
use crate::core::codec::encode_vault_id;
use crate::core::config::{Config, ConfigLoader};
use crate::core::store::KeyStore;
use crate::error::Result;

/// Report the config and whether the cipher tool is usable.
///
/// Fails (non-zero exit) if the config is missing or the tool cannot run.
pub fn execute(loader: &ConfigLoader) -> Result<()> {
    output::header("Configuration");
    let path = loader.locate()?;
    output::kv("config:  ", path.display());

    let config = Config::from_file(&path)?;
    output::kv("key id:  ", config.key_id());

    let resolved = which::which(config.command())
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "not found on PATH".to_string());
    output::kv("command: ", format!("{} ({})", config.command(), resolved));

    let base = config.key_base_path();
    let stored = std::fs::read_dir(&base)
        .map(|entries| {
            entries
                .filter_map(|e| e.ok())
                .filter(|e| e.path().is_file())
                .count()
        })
        .unwrap_or(0);
    output::kv("keys:    ", format!("{} ({} stored)", base.display(), stored));

    println!();
    output::header("GnuPG");
    let gpg = Gpg::from_config(&config);
    match gpg.version() {
        Ok(version) => {
            output::kv("version: ", &version);
            output::success("gnupg keychain is usable");
            Ok(())
        }
        Err(e) => {
            output::kv("version: ", "unavailable");
            Err(e)
        }
    }
}

/// Print the key file path a vault maps to.
pub fn path(loader: &ConfigLoader, vault: &str) -> Result<()> {
    let config = loader.load()?;
    let store = KeyStore::from_config(&config);
    println!("{}", store.path_for(vault)?.display());
    Ok(())
}

/// Print the encoded file name for a vault identifier.
pub fn encode(vault: &str) -> Result<()> {
    println!("{}", encode_vault_id(vault));
    Ok(())
}
