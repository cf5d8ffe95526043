//! Addresses and private keys
//!
//! This module handles the 20-byte hex addresses that identify owners and
//! helper keys, and the raw private keys the vault protects.

pub mod address;
pub mod private_key;

pub use address::{validate_address, Address, HelperAddress, ADDRESS_LEN};
pub use private_key::{PrivateKey, PRIVATE_KEY_LEN};
