//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a gnupg-keychain command pointed at this test's config.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd =
            Command::cargo_bin("gnupg-keychain").expect("failed to find gnupg-keychain binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("GNUPG_KEYCHAIN_CONFIG", self.config_path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("GNUPG_KEYCHAIN_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `gnupg-keychain store`, passphrase on stdin.
    pub fn store(&self, vault: &str, passphrase: &str) -> Output {
        self.cmd()
            .args(["store", vault])
            .write_stdin(format!("{}\n", passphrase))
            .output()
            .expect("failed to run gnupg-keychain store")
    }

    /// Shortcut for `gnupg-keychain load`.
    pub fn load(&self, vault: &str) -> Output {
        self.cmd()
            .args(["load", vault])
            .output()
            .expect("failed to run gnupg-keychain load")
    }

    /// Shortcut for `gnupg-keychain delete`.
    pub fn delete(&self, vault: &str) -> Output {
        self.cmd()
            .args(["delete", vault])
            .output()
            .expect("failed to run gnupg-keychain delete")
    }
}
