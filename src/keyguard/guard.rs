use crate::error::Result;
use crate::keyguard::blob::CipherBlob;
use crate::keyguard::cipher::{Aes256GcmCipher, DerivedKey, NONCE_LEN};
use crate::keyguard::provider::{CryptoProvider, SystemCryptoProvider};
use crate::utils::{get_bytes, hexlify};

/// Derives a per-helper-address AES-256-GCM key and encrypts or decrypts
/// one opaque payload at a time.
///
/// Both operations are stateless; a single keyguard can be shared across
/// threads as long as its provider can.
#[derive(Debug, Clone, Default)]
pub struct SymmetricKeyguard<P = SystemCryptoProvider> {
    provider: P,
}

impl SymmetricKeyguard<SystemCryptoProvider> {
    pub fn new() -> Self {
        Self::with_provider(SystemCryptoProvider::new())
    }
}

impl<P: CryptoProvider> SymmetricKeyguard<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// `SHA-256(lowercase(helper_address))`, used directly as the AES key
    ///
    /// Mixed-case and lower-case spellings of the same address derive the
    /// same key.
    pub fn derive_key(&self, helper_address: &str) -> DerivedKey {
        let canonical = helper_address.to_lowercase();
        DerivedKey::new(self.provider.sha256(canonical.as_bytes()))
    }

    /// Encrypt `plaintext` under a fresh random nonce
    ///
    /// The returned blob is `12 + plaintext.len() + 16` bytes long and differs
    /// on every call.
    pub fn encrypt(&self, plaintext: &[u8], helper_address: &str) -> Result<CipherBlob> {
        let mut nonce = [0u8; NONCE_LEN];
        self.provider.fill_random(&mut nonce)?;

        let key = self.derive_key(helper_address);
        let sealed = Aes256GcmCipher::new(&key).encrypt_with_nonce(plaintext, &nonce, &[])?;
        Ok(CipherBlob::new(nonce, sealed))
    }

    /// Decrypt a raw `nonce || ciphertext || tag` blob
    pub fn decrypt(&self, cipher_blob: &[u8], helper_address: &str) -> Result<Vec<u8>> {
        let blob = CipherBlob::from_bytes(cipher_blob)?;
        self.decrypt_blob(&blob, helper_address)
    }

    pub fn decrypt_blob(&self, blob: &CipherBlob, helper_address: &str) -> Result<Vec<u8>> {
        let key = self.derive_key(helper_address);
        Aes256GcmCipher::new(&key).decrypt(blob.sealed(), blob.nonce(), &[])
    }

    /// Hex in, `0x` hex out; the form the CLI and record store exchange
    pub fn encrypt_hex(&self, plaintext_hex: &str, helper_address: &str) -> Result<String> {
        let plaintext = get_bytes(plaintext_hex)?;
        Ok(self.encrypt(&plaintext, helper_address)?.to_hex())
    }

    pub fn decrypt_hex(&self, cipher_blob_hex: &str, helper_address: &str) -> Result<String> {
        let blob = CipherBlob::from_hex(cipher_blob_hex)?;
        Ok(hexlify(&self.decrypt_blob(&blob, helper_address)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultError;
    use crate::keyguard::cipher::TAG_LEN;
    use crate::utils::sha256_digest;
    use std::sync::atomic::{AtomicU8, Ordering};

    const HELPER_ONE: &str = "0x0000000000000000000000000000000000000001";
    const HELPER_TWO: &str = "0x0000000000000000000000000000000000000002";
    const HELPER_MIXED: &str = "0xAbCdEF0123456789aBcDeF0123456789AbCdEf01";

    /// Counts up so every nonce is distinct and predictable
    struct CountingProvider {
        next: AtomicU8,
    }

    impl CryptoProvider for CountingProvider {
        fn fill_random(&self, dest: &mut [u8]) -> Result<()> {
            let value = self.next.fetch_add(1, Ordering::SeqCst);
            dest.iter_mut().for_each(|b| *b = value);
            Ok(())
        }

        fn sha256(&self, data: &[u8]) -> [u8; 32] {
            sha256_digest(data)
        }
    }

    struct UnavailableProvider;

    impl CryptoProvider for UnavailableProvider {
        fn fill_random(&self, _dest: &mut [u8]) -> Result<()> {
            Err(VaultError::CryptoUnavailable("no entropy".to_string()))
        }

        fn sha256(&self, data: &[u8]) -> [u8; 32] {
            sha256_digest(data)
        }
    }

    #[test]
    fn test_round_trip_various_lengths() {
        use rand::RngCore;

        let guard = SymmetricKeyguard::new();
        let mut rng = rand::thread_rng();
        for len in [1usize, 16, 31, 32, 33, 64, 257] {
            let mut plaintext = vec![0u8; len];
            rng.fill_bytes(&mut plaintext);
            let blob = guard.encrypt(&plaintext, HELPER_MIXED).unwrap();
            assert_eq!(blob.len(), NONCE_LEN + len + TAG_LEN);
            assert_eq!(
                guard.decrypt(&blob.to_bytes(), HELPER_MIXED).unwrap(),
                plaintext
            );
        }
    }

    #[test]
    fn test_encryption_is_not_deterministic() {
        let guard = SymmetricKeyguard::new();
        let plaintext = [0x42u8; 32];

        let first = guard.encrypt(&plaintext, HELPER_ONE).unwrap();
        let second = guard.encrypt(&plaintext, HELPER_ONE).unwrap();
        assert_ne!(first, second);
        assert_ne!(first.nonce(), second.nonce());

        assert_eq!(guard.decrypt_blob(&first, HELPER_ONE).unwrap(), plaintext);
        assert_eq!(guard.decrypt_blob(&second, HELPER_ONE).unwrap(), plaintext);
    }

    #[test]
    fn test_nonce_comes_from_provider() {
        let guard = SymmetricKeyguard::with_provider(CountingProvider {
            next: AtomicU8::new(5),
        });
        let first = guard.encrypt(b"key", HELPER_ONE).unwrap();
        let second = guard.encrypt(b"key", HELPER_ONE).unwrap();
        assert_eq!(first.nonce(), &[5u8; NONCE_LEN]);
        assert_eq!(second.nonce(), &[6u8; NONCE_LEN]);
    }

    #[test]
    fn test_zero_key_scenario() {
        let guard = SymmetricKeyguard::new();
        let plaintext = [0u8; 32];

        let blob = guard.encrypt(&plaintext, HELPER_ONE).unwrap().to_bytes();
        assert_eq!(blob.len(), 60);

        assert_eq!(guard.decrypt(&blob, HELPER_ONE).unwrap(), vec![0u8; 32]);
        assert_eq!(
            guard.decrypt(&blob, HELPER_TWO),
            Err(VaultError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_wrong_address_rejected() {
        let guard = SymmetricKeyguard::new();
        let blob = guard.encrypt(b"private key bytes", HELPER_MIXED).unwrap();
        assert_eq!(
            guard.decrypt_blob(&blob, HELPER_ONE),
            Err(VaultError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_every_bit_flip_detected() {
        let guard = SymmetricKeyguard::new();
        let blob = guard.encrypt(&[0x11u8; 8], HELPER_ONE).unwrap().to_bytes();

        for byte in 0..blob.len() {
            for bit in 0..8 {
                let mut tampered = blob.clone();
                tampered[byte] ^= 1 << bit;
                assert_eq!(
                    guard.decrypt(&tampered, HELPER_ONE),
                    Err(VaultError::AuthenticationFailed),
                    "flip of bit {bit} in byte {byte} went unnoticed"
                );
            }
        }
    }

    #[test]
    fn test_truncated_and_extended_blobs_rejected() {
        let guard = SymmetricKeyguard::new();
        let blob = guard.encrypt(b"0123456789", HELPER_ONE).unwrap().to_bytes();

        let truncated = &blob[..blob.len() - 1];
        assert_eq!(
            guard.decrypt(truncated, HELPER_ONE),
            Err(VaultError::AuthenticationFailed)
        );

        let mut extended = blob.clone();
        extended.push(0);
        assert_eq!(
            guard.decrypt(&extended, HELPER_ONE),
            Err(VaultError::AuthenticationFailed)
        );

        // Longer than a nonce but shorter than a tag
        assert_eq!(
            guard.decrypt(&blob[..NONCE_LEN + 4], HELPER_ONE),
            Err(VaultError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_malformed_payload() {
        let guard = SymmetricKeyguard::new();
        for len in [0usize, 1, NONCE_LEN] {
            assert!(matches!(
                guard.decrypt(&vec![0u8; len], HELPER_ONE),
                Err(VaultError::MalformedPayload(_))
            ));
        }
    }

    #[test]
    fn test_address_case_is_ignored() {
        let guard = SymmetricKeyguard::new();
        let upper = "0xABCDEF0123456789ABCDEF0123456789ABCDEF01";
        let lower = "0xabcdef0123456789abcdef0123456789abcdef01";

        assert_eq!(guard.derive_key(upper), guard.derive_key(lower));
        assert_eq!(guard.derive_key(HELPER_MIXED), guard.derive_key(lower));

        let blob = guard.encrypt(b"secret", upper).unwrap();
        assert_eq!(guard.decrypt_blob(&blob, lower).unwrap(), b"secret");
    }

    #[test]
    fn test_derived_key_is_sha256_of_lowercase() {
        let guard = SymmetricKeyguard::new();
        let key = guard.derive_key("0xABC");
        assert_eq!(key.as_bytes(), &sha256_digest(b"0xabc"));
    }

    #[test]
    fn test_unavailable_provider() {
        let guard = SymmetricKeyguard::with_provider(UnavailableProvider);
        assert!(matches!(
            guard.encrypt(b"secret", HELPER_ONE),
            Err(VaultError::CryptoUnavailable(_))
        ));
    }

    #[test]
    fn test_hex_boundary() {
        let guard = SymmetricKeyguard::new();
        let private_key = "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

        let blob_hex = guard.encrypt_hex(private_key, HELPER_MIXED).unwrap();
        assert!(blob_hex.starts_with("0x"));
        assert_eq!(blob_hex.len(), 2 + 2 * (NONCE_LEN + 32 + TAG_LEN));

        let recovered = guard.decrypt_hex(&blob_hex, HELPER_MIXED).unwrap();
        assert_eq!(recovered, private_key);
    }

    #[test]
    fn test_shared_across_threads() {
        let guard = std::sync::Arc::new(SymmetricKeyguard::new());
        let handles: Vec<_> = (0..4u8)
            .map(|i| {
                let guard = guard.clone();
                std::thread::spawn(move || {
                    let blob = guard.encrypt(&[i; 16], HELPER_ONE).unwrap();
                    guard.decrypt_blob(&blob, HELPER_ONE).unwrap()
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), vec![i as u8; 16]);
        }
    }
}
