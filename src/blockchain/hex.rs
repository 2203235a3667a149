//! Hex string helpers for explorer wire values.

use crate::blockchain::types::{AdapterError, AdapterResult};

/// Marker prefix of hex-encoded wire values.
pub const HEX_MARKER: &str = "0x";

/// Strip the `0x` marker if present.
pub fn unprefix_hex(hex: &str) -> &str {
    hex.strip_prefix(HEX_MARKER).unwrap_or(hex)
}

/// Add the `0x` marker if missing.
pub fn prefix_hex(hex: &str) -> String {
    if hex.starts_with(HEX_MARKER) {
        hex.to_string()
    } else {
        format!("{}{}", HEX_MARKER, hex)
    }
}

/// Parse a hex integer, with or without marker.
pub fn unhex_int(hex: &str) -> AdapterResult<u64> {
    let digits = unprefix_hex(hex);
    u64::from_str_radix(digits, 16)
        .map_err(|e| AdapterError::Decode(format!("Invalid hex integer '{}': {}", hex, e)))
}

/// True for a non-empty string of hex digits, optionally marked.
pub fn is_hex(value: &str) -> bool {
    let digits = unprefix_hex(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_roundtrip() {
        let raw = "f4d8e706cfb25c0decbbdd4d2e2cc10c66376a3f";
        assert_eq!(unprefix_hex(&prefix_hex(raw)), raw);
    }

    #[test]
    fn test_prefix_is_idempotent() {
        let once = prefix_hex("abc");
        assert_eq!(prefix_hex(&once), once);
        assert_eq!(once, "0xabc");
    }

    #[test]
    fn test_unprefix_leaves_bare_value() {
        assert_eq!(unprefix_hex("abc"), "abc");
        assert_eq!(unprefix_hex(""), "");
    }

    #[test]
    fn test_unhex_int() {
        assert_eq!(unhex_int("0x1b4").unwrap(), 436);
        assert_eq!(unhex_int("ff").unwrap(), 255);
        assert!(unhex_int("0xzz").is_err());
        assert!(unhex_int("0x").is_err());
    }

    #[test]
    fn test_is_hex() {
        assert!(is_hex("0xdeadBEEF"));
        assert!(is_hex("1234"));
        assert!(!is_hex("0x"));
        assert!(!is_hex(""));
        assert!(!is_hex("not-hex"));
    }
}
