//! Host-facing keychain provider.
//!
//! Adapts the key store to the operations a vault application expects from a
//! keychain integration. Initialization is two-phase: load the config, then
//! probe the cipher tool. [`GnuPgProvider::initialize`] reports either failure
//! as a typed error; [`GnuPgProvider::discover`] downgrades it to an
//! unsupported provider so the host can hide this backend instead of failing.

use tracing::{error, info};

use crate::core::cipher::Gpg;
use crate::core::config::{Config, ConfigLoader};
use crate::core::constants;
use crate::core::store::{KeyStore, Passphrase};
use crate::error::{Error, Result, StoreError};

/// Operations a host application drives a keychain backend with.
///
/// A `label` of `None` means the host did not name the vault; the provider
/// substitutes `"Vault"`.
pub trait KeychainAccess {
    /// Name shown to the user when choosing a backend.
    fn display_name(&self) -> &'static str;

    /// Whether the backend initialized and can serve requests.
    fn is_supported(&self) -> bool;

    /// Whether the backend is locked.
    fn is_locked(&self) -> bool;

    fn store_passphrase(&self, vault: &str, label: Option<&str>, passphrase: &str) -> Result<()>;

    fn load_passphrase(&self, vault: &str) -> Result<Passphrase>;

    /// Deleting a vault with nothing stored is not an error.
    fn delete_passphrase(&self, vault: &str) -> Result<()>;

    fn change_passphrase(&self, vault: &str, label: Option<&str>, passphrase: &str) -> Result<()>;
}

/// Behaviour switches the host chooses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// Refuse to delete while [`KeychainAccess::is_locked`] is true.
    ///
    /// [`GnuPgProvider`] is never locked, so for it this has no effect.
    pub lock_aware_delete: bool,
}

#[derive(Debug)]
enum State {
    Ready { config: Config, store: KeyStore<Gpg> },
    Unsupported(String),
}

/// GnuPG keychain provider.
#[derive(Debug)]
pub struct GnuPgProvider {
    state: State,
    capabilities: Capabilities,
}

impl GnuPgProvider {
    /// Load the config through `loader`, then probe the configured tool.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` if no valid config is found, or the probe
    /// error if the cipher tool cannot be run.
    pub fn initialize(loader: &ConfigLoader) -> Result<Self> {
        let config = loader.load()?;
        Self::from_config(config)
    }

    /// Probe the tool named by an already loaded config.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = KeyStore::from_config(&config);
        store.cipher().probe()?;

        info!(
            key_id = %config.key_id(),
            command = config.command(),
            base = %store.base_dir().display(),
            "gnupg keychain ready"
        );
        Ok(Self {
            state: State::Ready { config, store },
            capabilities: Capabilities::default(),
        })
    }

    /// Like [`initialize`](Self::initialize), but a failure yields an
    /// unsupported provider instead of an error.
    pub fn discover(loader: &ConfigLoader) -> Self {
        match Self::initialize(loader) {
            Ok(provider) => provider,
            Err(e) => {
                error!(error = %e, "gnupg keychain unavailable");
                Self::unsupported(e.to_string())
            }
        }
    }

    /// A provider that rejects every operation with `reason`.
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Self {
            state: State::Unsupported(reason.into()),
            capabilities: Capabilities::default(),
        }
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Config the provider runs with, if it initialized.
    pub fn config(&self) -> Option<&Config> {
        match &self.state {
            State::Ready { config, .. } => Some(config),
            State::Unsupported(_) => None,
        }
    }

    /// Why initialization failed, if it did.
    pub fn unsupported_reason(&self) -> Option<&str> {
        match &self.state {
            State::Ready { .. } => None,
            State::Unsupported(reason) => Some(reason.as_str()),
        }
    }

    /// The underlying key store.
    ///
    /// # Errors
    ///
    /// Returns `Error::Unsupported` if initialization failed.
    pub fn key_store(&self) -> Result<&KeyStore<Gpg>> {
        match &self.state {
            State::Ready { store, .. } => Ok(store),
            State::Unsupported(reason) => Err(Error::Unsupported(reason.clone())),
        }
    }
}

impl KeychainAccess for GnuPgProvider {
    fn display_name(&self) -> &'static str {
        constants::DISPLAY_NAME
    }

    fn is_supported(&self) -> bool {
        matches!(self.state, State::Ready { .. })
    }

    fn is_locked(&self) -> bool {
        // No lock state: gpg-agent handles unlocking the private key.
        false
    }

    fn store_passphrase(&self, vault: &str, label: Option<&str>, passphrase: &str) -> Result<()> {
        let label = label.unwrap_or(constants::DEFAULT_LABEL);
        info!(vault, label, "storing passphrase");
        self.key_store()?.store(vault, label, passphrase)
    }

    fn load_passphrase(&self, vault: &str) -> Result<Passphrase> {
        info!(vault, "loading passphrase");
        self.key_store()?.load(vault)
    }

    fn delete_passphrase(&self, vault: &str) -> Result<()> {
        info!(vault, "deleting passphrase");
        let store = self.key_store()?;
        if self.capabilities.lock_aware_delete && self.is_locked() {
            return Err(StoreError::Locked.into());
        }
        store.delete(vault)
    }

    fn change_passphrase(&self, vault: &str, label: Option<&str>, passphrase: &str) -> Result<()> {
        let label = label.unwrap_or(constants::DEFAULT_LABEL);
        info!(vault, label, "changing passphrase");
        self.key_store()?.change_passphrase(vault, label, passphrase)
    }
}
