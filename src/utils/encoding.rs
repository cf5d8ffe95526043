//! `0x`-prefixed hex at the interface boundary.
//!
//! Cipher blobs, private keys and recovered plaintext cross the CLI and the
//! record store as `0x` + lower-case hex. Decoding accepts either case and
//! an optional prefix.

use crate::error::{Result, VaultError};

/// Remove a leading `0x`/`0X` if present
pub fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Encode bytes as `0x` + lower-case hex
pub fn hexlify(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode a hex string (with or without `0x`) into bytes
pub fn get_bytes(input: &str) -> Result<Vec<u8>> {
    let digits = strip_hex_prefix(input.trim());
    if digits.len() % 2 != 0 {
        return Err(VaultError::InvalidHex(format!(
            "odd number of hex digits in {input:?}"
        )));
    }
    Ok(hex::decode(digits)?)
}
