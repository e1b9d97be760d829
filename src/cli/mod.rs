//! Command-line interface.

pub mod check;
pub mod output;
pub mod secrets;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::core::config::ConfigLoader;
use crate::error::Result;

/// gnupg-keychain - vault passphrases stored as GnuPG-encrypted files.
#[derive(Parser)]
#[command(
    name = "gnupg-keychain",
    about = "Store vault passphrases as GnuPG-encrypted files",
    version
)]
pub struct Cli {
    /// Read this config file instead of searching the default locations
    #[arg(long, global = true, env = "GNUPG_KEYCHAIN_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Encrypt and store a vault passphrase (read from stdin or prompted)
    Store {
        /// Vault identifier
        vault: String,
        /// Label written into the armor comment
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Replace a stored vault passphrase
    Change {
        /// Vault identifier
        vault: String,
        /// Label written into the armor comment
        #[arg(short, long)]
        label: Option<String>,
    },

    /// Decrypt a vault passphrase and print it
    Load {
        /// Vault identifier
        vault: String,
    },

    /// Delete a stored vault passphrase
    Delete {
        /// Vault identifier
        vault: String,
    },

    /// Print the key file path for a vault
    Path {
        /// Vault identifier
        vault: String,
    },

    /// Print the encoded key file name for a vault identifier
    Encode {
        /// Vault identifier
        vault: String,
    },

    /// Check the config and the gpg installation
    Check,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
}

impl From<Shell> for clap_complete::Shell {
    fn from(shell: Shell) -> Self {
        match shell {
            Shell::Bash => Self::Bash,
            Shell::Zsh => Self::Zsh,
            Shell::Fish => Self::Fish,
            Shell::PowerShell => Self::PowerShell,
        }
    }
}

impl Cli {
    /// Config loader honoring `--config`.
    pub fn loader(&self) -> ConfigLoader {
        match &self.config {
            Some(path) => ConfigLoader::with_paths([path.clone()]),
            None => ConfigLoader::default(),
        }
    }
}

/// Execute a parsed command line.
pub fn execute(cli: Cli) -> Result<()> {
    let loader = cli.loader();
    match cli.command {
        Command::Store { vault, label } => secrets::store(&loader, &vault, label.as_deref()),
        Command::Change { vault, label } => secrets::change(&loader, &vault, label.as_deref()),
        Command::Load { vault } => secrets::load(&loader, &vault),
        Command::Delete { vault } => secrets::delete(&loader, &vault),
        Command::Path { vault } => check::path(&loader, &vault),
        Command::Encode { vault } => check::encode(&vault),
        Command::Check => check::execute(&loader),
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(
                clap_complete::Shell::from(shell),
                &mut cmd,
                "gnupg-keychain",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
