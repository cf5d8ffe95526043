use crate::error::{Result, VaultError};
use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce,
};
use zeroize::ZeroizeOnDrop;

/// AES-256 key length in bytes
pub const KEY_LEN: usize = 32;
/// AES-GCM nonce length in bytes (96 bits)
pub const NONCE_LEN: usize = 12;
/// AES-GCM authentication tag length in bytes
pub const TAG_LEN: usize = 16;

/// 256-bit symmetric key that zeros its memory on drop
#[derive(Clone, PartialEq, Eq, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    pub fn new(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Get key bytes (use carefully)
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("length", &KEY_LEN)
            .finish()
    }
}

fn encryption_failure(err: aes_gcm::Error) -> VaultError {
    VaultError::Encryption(format!("AES-256-GCM encryption failed: {err}"))
}

/// AES-256-GCM cipher bound to one key
pub struct Aes256GcmCipher {
    cipher: Aes256Gcm,
}

impl Aes256GcmCipher {
    pub fn new(key: &DerivedKey) -> Self {
        let aes_key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Self {
            cipher: Aes256Gcm::new(aes_key),
        }
    }

    /// Encrypt under the given nonce, returning `ciphertext || tag`
    pub fn encrypt_with_nonce(
        &self,
        plaintext: &[u8],
        nonce_bytes: &[u8; NONCE_LEN],
        aad: &[u8],
    ) -> Result<Vec<u8>> {
        let nonce = Nonce::from_slice(nonce_bytes);
        self.cipher
            .encrypt(
                nonce,
                Payload {
                    msg: plaintext,
                    aad,
                },
            )
            .map_err(encryption_failure)
    }

    /// Verify and decrypt `ciphertext || tag`
    ///
    /// Any verification failure is reported as
    /// [`VaultError::AuthenticationFailed`]; no plaintext is released.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        nonce_bytes: &[u8; NONCE_LEN],
        aad: &[u8],
    ) -> Result<Vec<u8>> {
        let nonce = Nonce::from_slice(nonce_bytes);
        self.cipher
            .decrypt(
                nonce,
                Payload {
                    msg: ciphertext,
                    aad,
                },
            )
            .map_err(|_| VaultError::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encryption_decryption() {
        let key = DerivedKey::new([1u8; KEY_LEN]);
        let cipher = Aes256GcmCipher::new(&key);
        let nonce = [2u8; NONCE_LEN];
        let plaintext = b"Hello, World! This is a test of AES-256-GCM encryption.";

        let ciphertext = cipher.encrypt_with_nonce(plaintext, &nonce, &[]).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len() + TAG_LEN);

        let decrypted = cipher.decrypt(&ciphertext, &nonce, &[]).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_different_keys_produce_different_results() {
        let cipher1 = Aes256GcmCipher::new(&DerivedKey::new([1u8; KEY_LEN]));
        let cipher2 = Aes256GcmCipher::new(&DerivedKey::new([2u8; KEY_LEN]));
        let nonce = [0u8; NONCE_LEN];

        let ciphertext1 = cipher1.encrypt_with_nonce(b"secret", &nonce, &[]).unwrap();
        let ciphertext2 = cipher2.encrypt_with_nonce(b"secret", &nonce, &[]).unwrap();
        assert_ne!(ciphertext1, ciphertext2);

        assert_eq!(
            cipher2.decrypt(&ciphertext1, &nonce, &[]),
            Err(VaultError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_aad_mismatch_fails() {
        let cipher = Aes256GcmCipher::new(&DerivedKey::new([3u8; KEY_LEN]));
        let nonce = [4u8; NONCE_LEN];

        let ciphertext = cipher.encrypt_with_nonce(b"secret", &nonce, b"owner-a").unwrap();
        assert_eq!(
            cipher.decrypt(&ciphertext, &nonce, b"owner-b"),
            Err(VaultError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_encryption_failure_is_not_a_payload_error() {
        let err = encryption_failure(aes_gcm::Error);
        assert!(matches!(err, VaultError::Encryption(_)));
        assert!(err.to_string().contains("AES-256-GCM encryption failed"));
    }

    #[test]
    fn test_debug_hides_key() {
        let key = DerivedKey::new([9u8; KEY_LEN]);
        let shown = format!("{key:?}");
        assert!(shown.contains("length"));
        assert!(!shown.contains('9'));
    }
}
