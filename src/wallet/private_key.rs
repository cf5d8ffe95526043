use crate::error::{Result, VaultError};
use crate::keyguard::CryptoProvider;
use crate::utils::{get_bytes, hexlify};
use zeroize::ZeroizeOnDrop;

pub const PRIVATE_KEY_LEN: usize = 32;

/// Raw private key bytes; zeroed when dropped
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct PrivateKey {
    bytes: Vec<u8>,
}

impl PrivateKey {
    pub fn new(bytes: Vec<u8>) -> Result<Self> {
        if bytes.is_empty() {
            return Err(VaultError::EmptyPrivateKey);
        }
        Ok(Self { bytes })
    }

    /// Fresh 32-byte key from the provider
    pub fn generate<P: CryptoProvider + ?Sized>(provider: &P) -> Result<Self> {
        let mut bytes = vec![0u8; PRIVATE_KEY_LEN];
        provider.fill_random(&mut bytes)?;
        Ok(Self { bytes })
    }

    pub fn from_hex(input: &str) -> Result<Self> {
        Self::new(get_bytes(input)?)
    }

    pub fn to_hex(&self) -> String {
        hexlify(&self.bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivateKey")
            .field("length", &self.bytes.len())
            .finish()
    }
}
