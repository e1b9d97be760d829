//! gnupg-keychain - vault passphrases stored as GnuPG-encrypted files.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface and shell completions
//! │   ├── secrets       # store / change / load / delete
//! │   ├── check         # check / path / encode
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── config        # JSON config record and loader
//!     ├── codec         # Vault identifier -> file name
//!     ├── runner        # Full-duplex cipher tool invocation
//!     ├── cipher/       # Encryption backends
//!     │   ├── mod       # Cipher trait
//!     │   └── gpg       # gpg CLI implementation
//!     ├── store/        # One armored key file per vault
//!     └── provider      # Host-facing keychain provider
//! ```
//!
//! # Example
//!
//! ```no_run
//! use gnupg_keychain::{ConfigLoader, GnuPgProvider, KeychainAccess};
//!
//! let provider = GnuPgProvider::discover(&ConfigLoader::default());
//! if provider.is_supported() {
//!     provider.store_passphrase("vault-id", Some("Work"), "correct horse")?;
//!     let passphrase = provider.load_passphrase("vault-id")?;
//!     assert_eq!(passphrase.as_str(), "correct horse");
//! }
//! # Ok::<(), gnupg_keychain::error::Error>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::config::{Config, ConfigLoader};
pub use crate::core::provider::{Capabilities, GnuPgProvider, KeychainAccess};
pub use crate::core::store::{KeyStore, Passphrase};
