//! Error handling for the vault
//!
//! This module provides the error types for every keyguard, sealing and
//! record store operation.

use std::fmt;

/// Result type alias for vault operations
pub type Result<T> = std::result::Result<T, VaultError>;

/// Error types for vault operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// The platform could not supply randomness or hashing
    CryptoUnavailable(String),
    /// Cipher blob too short to carry a nonce and a tag
    MalformedPayload(String),
    /// AES-GCM refused to encrypt the input
    Encryption(String),
    /// AES-GCM tag did not verify (wrong key, tampered or truncated blob)
    AuthenticationFailed,
    /// Invalid helper or owner address format
    InvalidAddress(String),
    /// Invalid hex encoding at the interface boundary
    InvalidHex(String),
    /// A private key with no bytes
    EmptyPrivateKey,
    /// Attempt to store a record without ciphertext
    EmptyEncryptedPrivateKey,
    /// No key record stored for the owner
    RecordNotFound(String),
    /// Sealing or unsealing the helper address failed
    Sealing(String),
    /// Database-related errors
    Database(String),
    /// Serialization/deserialization errors
    Serialization(String),
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(String),
}

impl fmt::Display for VaultError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultError::CryptoUnavailable(msg) => {
                write!(f, "Cryptographic primitives unavailable: {msg}")
            }
            VaultError::MalformedPayload(msg) => write!(f, "Encrypted payload is malformed: {msg}"),
            VaultError::Encryption(msg) => write!(f, "Encryption error: {msg}"),
            VaultError::AuthenticationFailed => {
                write!(f, "Authentication failed: ciphertext does not verify")
            }
            VaultError::InvalidAddress(addr) => write!(f, "Invalid address: {addr}"),
            VaultError::InvalidHex(msg) => write!(f, "Invalid hex: {msg}"),
            VaultError::EmptyPrivateKey => write!(f, "Private key is empty"),
            VaultError::EmptyEncryptedPrivateKey => {
                write!(f, "Encrypted private key must not be empty")
            }
            VaultError::RecordNotFound(owner) => write!(f, "No key record found for {owner}"),
            VaultError::Sealing(msg) => write!(f, "Sealing error: {msg}"),
            VaultError::Database(msg) => write!(f, "Database error: {msg}"),
            VaultError::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            VaultError::Config(msg) => write!(f, "Configuration error: {msg}"),
            VaultError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for VaultError {}

impl From<std::io::Error> for VaultError {
    fn from(err: std::io::Error) -> Self {
        VaultError::Io(err.to_string())
    }
}

impl From<sled::Error> for VaultError {
    fn from(err: sled::Error) -> Self {
        VaultError::Database(err.to_string())
    }
}

impl From<bincode::error::EncodeError> for VaultError {
    fn from(err: bincode::error::EncodeError) -> Self {
        VaultError::Serialization(err.to_string())
    }
}

impl From<bincode::error::DecodeError> for VaultError {
    fn from(err: bincode::error::DecodeError) -> Self {
        VaultError::Serialization(err.to_string())
    }
}

impl From<hex::FromHexError> for VaultError {
    fn from(err: hex::FromHexError) -> Self {
        VaultError::InvalidHex(err.to_string())
    }
}
