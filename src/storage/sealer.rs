//! Confidential storage of the helper address.
//!
//! In the deployed system the helper address travels through a homomorphic
//! encryption channel and only its owner can have it decrypted. Locally the
//! same role is played by a [`HelperSealer`]; [`PassphraseSealer`] binds the
//! sealed address to its owner and to a passphrase.

use crate::error::{Result, VaultError};
use crate::keyguard::{Aes256GcmCipher, CryptoProvider, DerivedKey, SystemCryptoProvider};
use crate::keyguard::{KEY_LEN, NONCE_LEN, TAG_LEN};
use crate::wallet::{Address, HelperAddress, ADDRESS_LEN};
use argon2::{Algorithm, Argon2, Params, Version};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

pub const SALT_LEN: usize = 16;
/// `salt || nonce || ciphertext || tag`
pub const SEALED_HELPER_LEN: usize = SALT_LEN + NONCE_LEN + ADDRESS_LEN + TAG_LEN;

/// Keeps a helper address confidential for one owner
pub trait HelperSealer {
    fn seal(&self, owner: &Address, helper: &HelperAddress) -> Result<Vec<u8>>;

    fn unseal(&self, owner: &Address, sealed: &[u8]) -> Result<HelperAddress>;
}

/// Argon2id and passphrase settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SealerSettings {
    pub min_passphrase_length: usize,
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for SealerSettings {
    fn default() -> Self {
        Self {
            min_passphrase_length: 8,
            memory_kib: 65536,
            iterations: 3,
            parallelism: 1,
        }
    }
}

/// Seals helper addresses with AES-256-GCM under an Argon2id passphrase key
///
/// The owner address is bound as associated data, so a sealed helper copied
/// into another owner's record does not open.
pub struct PassphraseSealer<P = SystemCryptoProvider> {
    passphrase: Zeroizing<String>,
    settings: SealerSettings,
    provider: P,
}

impl PassphraseSealer<SystemCryptoProvider> {
    pub fn new(passphrase: &str, settings: SealerSettings) -> Result<Self> {
        Self::with_provider(passphrase, settings, SystemCryptoProvider::new())
    }
}

impl<P: CryptoProvider> PassphraseSealer<P> {
    pub fn with_provider(passphrase: &str, settings: SealerSettings, provider: P) -> Result<Self> {
        if passphrase.chars().count() < settings.min_passphrase_length {
            return Err(VaultError::Sealing(format!(
                "Passphrase must be at least {} characters long",
                settings.min_passphrase_length
            )));
        }

        Ok(Self {
            passphrase: Zeroizing::new(passphrase.to_string()),
            settings,
            provider,
        })
    }

    fn derive_key(&self, salt: &[u8]) -> Result<DerivedKey> {
        let params = Params::new(
            self.settings.memory_kib,
            self.settings.iterations,
            self.settings.parallelism,
            Some(KEY_LEN),
        )
        .map_err(|e| VaultError::Config(format!("Invalid Argon2 parameters: {e}")))?;

        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        argon2
            .hash_password_into(self.passphrase.as_bytes(), salt, key.as_mut_slice())
            .map_err(|e| VaultError::Sealing(format!("Key derivation failed: {e}")))?;

        Ok(DerivedKey::new(*key))
    }
}

impl<P: CryptoProvider> HelperSealer for PassphraseSealer<P> {
    fn seal(&self, owner: &Address, helper: &HelperAddress) -> Result<Vec<u8>> {
        let mut salt = [0u8; SALT_LEN];
        let mut nonce = [0u8; NONCE_LEN];
        self.provider.fill_random(&mut salt)?;
        self.provider.fill_random(&mut nonce)?;

        let key = self.derive_key(&salt)?;
        let sealed = Aes256GcmCipher::new(&key).encrypt_with_nonce(
            helper.as_bytes(),
            &nonce,
            owner.as_bytes(),
        )?;

        let mut out = Vec::with_capacity(SEALED_HELPER_LEN);
        out.extend_from_slice(&salt);
        out.extend_from_slice(&nonce);
        out.extend_from_slice(&sealed);
        log::debug!("Sealed helper address for {owner}");
        Ok(out)
    }

    fn unseal(&self, owner: &Address, sealed: &[u8]) -> Result<HelperAddress> {
        if sealed.len() != SEALED_HELPER_LEN {
            return Err(VaultError::MalformedPayload(format!(
                "sealed helper must be {SEALED_HELPER_LEN} bytes, got {}",
                sealed.len()
            )));
        }

        let (salt, rest) = sealed.split_at(SALT_LEN);
        let (nonce_bytes, ciphertext) = rest.split_at(NONCE_LEN);
        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);

        let key = self.derive_key(salt)?;
        let plain = Zeroizing::new(Aes256GcmCipher::new(&key).decrypt(
            ciphertext,
            &nonce,
            owner.as_bytes(),
        )?);

        let bytes: [u8; ADDRESS_LEN] = plain.as_slice().try_into().map_err(|_| {
            VaultError::Sealing(format!("unsealed helper has {} bytes", plain.len()))
        })?;
        Ok(HelperAddress::from_bytes(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_settings() -> SealerSettings {
        SealerSettings {
            memory_kib: 64,
            iterations: 1,
            ..SealerSettings::default()
        }
    }

    fn address(last: u8) -> Address {
        let mut bytes = [0u8; ADDRESS_LEN];
        bytes[ADDRESS_LEN - 1] = last;
        Address::from_bytes(bytes)
    }

    #[test]
    fn test_seal_unseal() {
        let sealer = PassphraseSealer::new("correct horse battery", fast_settings()).unwrap();
        let owner = address(1);
        let helper = address(0xAA);

        let sealed = sealer.seal(&owner, &helper).unwrap();
        assert_eq!(sealed.len(), SEALED_HELPER_LEN);
        assert_eq!(sealer.unseal(&owner, &sealed).unwrap(), helper);
    }

    #[test]
    fn test_sealing_is_randomized() {
        let sealer = PassphraseSealer::new("correct horse battery", fast_settings()).unwrap();
        let owner = address(1);
        let helper = address(0xAA);

        assert_ne!(
            sealer.seal(&owner, &helper).unwrap(),
            sealer.seal(&owner, &helper).unwrap()
        );
    }

    #[test]
    fn test_wrong_passphrase() {
        let sealer = PassphraseSealer::new("correct horse battery", fast_settings()).unwrap();
        let other = PassphraseSealer::new("incorrect horse battery", fast_settings()).unwrap();
        let owner = address(1);

        let sealed = sealer.seal(&owner, &address(0xAA)).unwrap();
        assert_eq!(
            other.unseal(&owner, &sealed),
            Err(VaultError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_bound_to_owner() {
        let sealer = PassphraseSealer::new("correct horse battery", fast_settings()).unwrap();
        let sealed = sealer.seal(&address(1), &address(0xAA)).unwrap();
        assert_eq!(
            sealer.unseal(&address(2), &sealed),
            Err(VaultError::AuthenticationFailed)
        );
    }

    #[test]
    fn test_short_passphrase_rejected() {
        assert!(matches!(
            PassphraseSealer::new("short", fast_settings()),
            Err(VaultError::Sealing(_))
        ));
    }

    #[test]
    fn test_wrong_length_rejected() {
        let sealer = PassphraseSealer::new("correct horse battery", fast_settings()).unwrap();
        assert!(matches!(
            sealer.unseal(&address(1), &[0u8; 10]),
            Err(VaultError::MalformedPayload(_))
        ));
    }
}
