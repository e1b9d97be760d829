//! Constants used throughout gnupg-keychain.
//!
//! Centralizes the fixed paths and names the config loader and cipher
//! backend fall back to.

/// Cipher tool invoked when the config does not name one.
pub const DEFAULT_COMMAND: &str = "gpg";

/// System-wide config file, checked first.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/cryptomator/config.json";

/// Per-user config file relative to HOME, checked second.
pub const USER_CONFIG_FILE: &str = ".config/cryptomator/config.json";

/// Key storage directory relative to HOME (~/.config/cryptomator/keys).
pub const KEY_DIR: &str = ".config/cryptomator/keys";

/// Prefix of the armor comment written into every key file.
pub const COMMENT_PREFIX: &str = "Cryptomator";

/// Label used when the host does not supply one.
pub const DEFAULT_LABEL: &str = "Vault";

/// Name reported to the host application.
pub const DISPLAY_NAME: &str = "GnuPG";

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GNUPG_KEYCHAIN_LOG";
