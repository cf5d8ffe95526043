//! Injected cryptographic capability.
//!
//! The keyguard never reaches for a global random source or hash directly,
//! so the same logic runs against the OS in production and against scripted
//! providers in tests.

use crate::error::{Result, VaultError};
use crate::utils::sha256_digest;
use ring::rand::{SecureRandom, SystemRandom};
use std::sync::Arc;

/// Source of secure randomness and SHA-256 for the keyguard
pub trait CryptoProvider: Send + Sync {
    /// Fill `dest` with cryptographically secure random bytes
    fn fill_random(&self, dest: &mut [u8]) -> Result<()>;

    /// SHA-256 digest of `data`
    fn sha256(&self, data: &[u8]) -> [u8; 32];
}

/// Provider backed by the operating system through `ring`
#[derive(Clone)]
pub struct SystemCryptoProvider {
    rng: SystemRandom,
}

impl SystemCryptoProvider {
    pub fn new() -> Self {
        Self {
            rng: SystemRandom::new(),
        }
    }
}

impl Default for SystemCryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SystemCryptoProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SystemCryptoProvider")
    }
}

impl CryptoProvider for SystemCryptoProvider {
    fn fill_random(&self, dest: &mut [u8]) -> Result<()> {
        self.rng.fill(dest).map_err(|_| {
            VaultError::CryptoUnavailable("system random source is not available".to_string())
        })
    }

    fn sha256(&self, data: &[u8]) -> [u8; 32] {
        sha256_digest(data)
    }
}

impl<P: CryptoProvider + ?Sized> CryptoProvider for Arc<P> {
    fn fill_random(&self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_random(dest)
    }

    fn sha256(&self, data: &[u8]) -> [u8; 32] {
        (**self).sha256(data)
    }
}

impl<P: CryptoProvider + ?Sized> CryptoProvider for &P {
    fn fill_random(&self, dest: &mut [u8]) -> Result<()> {
        (**self).fill_random(dest)
    }

    fn sha256(&self, data: &[u8]) -> [u8; 32] {
        (**self).sha256(data)
    }
}
