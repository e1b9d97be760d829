//! Test fixtures and constants.

/// Key id the fake gpg accepts as a recipient.
pub const KEY_ID: &str = "ABCDEF0123456789";

/// Stand-in for gpg.
///
/// Encryption base64-encodes stdin inside an armor block that carries the
/// `--comment` value; decryption reverses it. Unknown recipients fail the
/// way gpg does, with a message on stderr.
pub const FAKE_GPG: &str = r#"#!/bin/sh
case "$1" in
  --version)
    echo "gpg (GnuPG) 2.4.5-fake"
    echo "libgcrypt 1.10.3"
    ;;
  -r)
    if [ "$2" != "ABCDEF0123456789" ]; then
      cat >/dev/null
      echo "gpg: $2: skipped: No public key" >&2
      exit 2
    fi
    echo "-----BEGIN PGP MESSAGE-----"
    echo "Comment: $7"
    echo
    base64
    echo "-----END PGP MESSAGE-----"
    ;;
  -d)
    grep -v -e '^-----' -e '^Comment:' -e '^$' | base64 -d
    ;;
  *)
    cat >/dev/null
    echo "gpg: unexpected arguments: $*" >&2
    exit 2
    ;;
esac
"#;

/// Stand-in for gpg that reports its version but cannot encrypt or decrypt.
pub const FAILING_GPG: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "gpg (GnuPG) 2.4.5-fake"
  exit 0
fi
cat >/dev/null
echo "gpg: decryption failed: No secret key" >&2
exit 2
"#;

/// Stand-in for gpg that is installed but broken.
pub const BROKEN_GPG: &str = r#"#!/bin/sh
echo "gpg: fatal: libgcrypt is too old" >&2
exit 2
"#;

/// Passphrases covering the encodings a host might hand over.
pub const PASSPHRASES: &[&str] = &[
    "correct horse battery staple",
    "päss wörd",
    "中文密码",
    "emoji 🔐 key",
    "  leading and trailing  ",
];
