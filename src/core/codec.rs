//! Vault identifier to key file name encoding.
//!
//! Vault identifiers are arbitrary Unicode; key file names must match
//! `[A-Za-z0-9_.-]+`. ASCII letters, digits, `-` and `.` pass through,
//! `_` doubles to `__`, and anything else becomes `_` plus the lowercase hex
//! of each UTF-16 code unit: two digits below `0x100`, four otherwise.
//!
//! The mapping is only ever computed forward. Lookups re-encode the
//! identifier, so there is no decoder.
//!
//! A two-digit escape followed by two literal hex digits would read the same
//! as a four-digit escape (`"é" + "ab"` vs `"\u{e9ab}"`). In that position the
//! first literal is escaped too, which keeps the encoding injective.
//! Key files written by encoders without this rule use the shorter name
//! for such identifiers (`_e9ab` for `"éab"`) and are not found under the
//! new one; they have to be stored again.

/// Encode a vault identifier as a filesystem-safe file name.
///
/// # Examples
///
/// ```
/// use gnupg_keychain::core::codec::encode_vault_id;
///
/// assert_eq!(encode_vault_id("My Vault"), "My_20Vault");
/// assert_eq!(encode_vault_id("a_b"), "a__b");
/// assert_eq!(encode_vault_id("café"), "caf_e9");
/// ```
pub fn encode_vault_id(vault: &str) -> String {
    let units: Vec<u16> = vault.encode_utf16().collect();
    let mut out = String::with_capacity(units.len() * 2);
    // Set right after a two-digit escape; the next literal may need escaping.
    let mut after_short_escape = false;

    for (i, &unit) in units.iter().enumerate() {
        let literal = literal_char(unit);
        match literal {
            Some('_') => {
                out.push_str("__");
                after_short_escape = false;
            }
            Some(c) if !(after_short_escape && is_hex_pair(&units[i..])) => {
                out.push(c);
                after_short_escape = false;
            }
            _ => {
                push_escape(&mut out, unit);
                after_short_escape = unit < 0x100;
            }
        }
    }

    out
}

/// The unit as a char if it may appear in a file name unescaped.
fn literal_char(unit: u16) -> Option<char> {
    let c = char::from_u32(u32::from(unit))?;
    if c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_' {
        Some(c)
    } else {
        None
    }
}

fn is_lower_hex(unit: u16) -> bool {
    matches!(unit, 0x30..=0x39 | 0x61..=0x66)
}

/// Whether the next two units are both literal lowercase hex digits.
fn is_hex_pair(units: &[u16]) -> bool {
    units.len() >= 2 && is_lower_hex(units[0]) && is_lower_hex(units[1])
}

fn push_escape(out: &mut String, unit: u16) {
    out.push('_');
    if unit < 0x100 {
        out.push_str(&format!("{:02x}", unit));
    } else {
        out.push_str(&format!("{:04x}", unit));
    }
}
