//! Utility functions and helpers
//!
//! This module contains hashing, hex encoding at the interface boundary,
//! and the bincode helpers used by the record store.

pub mod crypto;
pub mod encoding;
pub mod serialization;

pub use crypto::{current_timestamp, sha256_digest};
pub use encoding::{get_bytes, hexlify, strip_hex_prefix};
pub use serialization::{deserialize, serialize};
