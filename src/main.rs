//! gnupg-keychain - vault passphrases stored as GnuPG-encrypted files.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gnupg_keychain::cli::output;
use gnupg_keychain::cli::{execute, Cli};
use gnupg_keychain::core::constants;
use gnupg_keychain::error::{ConfigError, Error, ProcessError, StoreError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("gnupg_keychain=debug")
        } else {
            EnvFilter::new("gnupg_keychain=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Config(ConfigError::NotFound { .. }) => {
                Some("create a config file containing {\"keyId\": \"<your key id>\"}")
            }
            Error::Config(ConfigError::MissingField { .. }) => {
                Some("set \"keyId\" to the GnuPG key that should encrypt passphrases")
            }
            Error::Process(ProcessError::Launch { .. }) => {
                Some("install GnuPG or set \"gnuPgCommand\" in the config")
            }
            Error::Store(StoreError::NotFound { .. }) => {
                Some("run: gnupg-keychain store <VAULT>")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
