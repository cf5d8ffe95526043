use crate::error::{Result, VaultError};
use crate::keyguard::cipher::{NONCE_LEN, TAG_LEN};
use crate::utils::{get_bytes, hexlify};

/// `nonce || ciphertext || tag` as produced by the keyguard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CipherBlob {
    nonce: [u8; NONCE_LEN],
    sealed: Vec<u8>,
}

impl CipherBlob {
    pub(crate) fn new(nonce: [u8; NONCE_LEN], sealed: Vec<u8>) -> Self {
        Self { nonce, sealed }
    }

    /// Split a raw blob into nonce and `ciphertext || tag`
    ///
    /// Anything of `NONCE_LEN` bytes or fewer cannot carry a ciphertext and
    /// is rejected as malformed. Longer blobs are accepted here even when too
    /// short for a tag; those fail later at verification.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() <= NONCE_LEN {
            return Err(VaultError::MalformedPayload(format!(
                "expected more than {NONCE_LEN} bytes, got {}",
                bytes.len()
            )));
        }

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(&bytes[..NONCE_LEN]);
        Ok(Self {
            nonce,
            sealed: bytes[NONCE_LEN..].to_vec(),
        })
    }

    pub fn from_hex(input: &str) -> Result<Self> {
        Self::from_bytes(&get_bytes(input)?)
    }

    pub fn nonce(&self) -> &[u8; NONCE_LEN] {
        &self.nonce
    }

    /// `ciphertext || tag`
    pub fn sealed(&self) -> &[u8] {
        &self.sealed
    }

    /// Length of the plaintext this blob decrypts to, if well formed
    pub fn plaintext_len(&self) -> Option<usize> {
        self.sealed.len().checked_sub(TAG_LEN)
    }

    pub fn len(&self) -> usize {
        NONCE_LEN + self.sealed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.sealed);
        out
    }

    /// `0x`-prefixed lower-case hex, the form stored and transmitted
    pub fn to_hex(&self) -> String {
        hexlify(&self.to_bytes())
    }
}

impl std::fmt::Display for CipherBlob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
