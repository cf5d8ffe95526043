use crate::error::Result;
use crate::keyguard::{CipherBlob, CryptoProvider, SymmetricKeyguard, SystemCryptoProvider};
use crate::storage::{HelperSealer, KeyRecord, KeyRecordStore};
use crate::wallet::{Address, HelperAddress, PrivateKey};

/// Outcome of encrypting and storing a private key
#[derive(Debug, Clone)]
pub struct StoredRecord {
    pub owner: Address,
    pub helper: HelperAddress,
    pub cipher_blob: CipherBlob,
    pub record: KeyRecord,
}

/// Encrypt-and-store / fetch-and-recover over one record store
///
/// The private key is encrypted under a fresh helper address; only the
/// sealed helper and the cipher blob are persisted.
pub struct Vault<S, P = SystemCryptoProvider> {
    store: KeyRecordStore,
    sealer: S,
    keyguard: SymmetricKeyguard<P>,
}

impl<S: HelperSealer> Vault<S, SystemCryptoProvider> {
    pub fn new(store: KeyRecordStore, sealer: S) -> Self {
        Self::with_keyguard(store, sealer, SymmetricKeyguard::new())
    }
}

impl<S: HelperSealer, P: CryptoProvider> Vault<S, P> {
    pub fn with_keyguard(store: KeyRecordStore, sealer: S, keyguard: SymmetricKeyguard<P>) -> Self {
        Self {
            store,
            sealer,
            keyguard,
        }
    }

    pub fn store(&self) -> &KeyRecordStore {
        &self.store
    }

    pub fn keyguard(&self) -> &SymmetricKeyguard<P> {
        &self.keyguard
    }

    /// Generate a helper address, encrypt `private_key` under it, seal the
    /// helper and persist both for `owner`
    pub fn store_private_key(&self, owner: &Address, private_key: &PrivateKey) -> Result<StoredRecord> {
        let helper = HelperAddress::generate(self.keyguard.provider())?;
        let cipher_blob = self
            .keyguard
            .encrypt(private_key.as_bytes(), &helper.to_string())?;

        let record = self.persist(owner, &helper, &cipher_blob)?;
        Ok(StoredRecord {
            owner: *owner,
            helper,
            cipher_blob,
            record,
        })
    }

    /// Store a cipher blob produced elsewhere under a known helper address
    pub fn store_encrypted(
        &self,
        owner: &Address,
        helper: &HelperAddress,
        encrypted_private_key: &[u8],
    ) -> Result<KeyRecord> {
        let cipher_blob = CipherBlob::from_bytes(encrypted_private_key)?;
        self.persist(owner, helper, &cipher_blob)
    }

    fn persist(
        &self,
        owner: &Address,
        helper: &HelperAddress,
        cipher_blob: &CipherBlob,
    ) -> Result<KeyRecord> {
        let sealed_helper = self.sealer.seal(owner, helper)?;
        self.store
            .store_key_record(owner, sealed_helper, cipher_blob.to_bytes())
    }

    pub fn encrypted_private_key(&self, owner: &Address) -> Result<CipherBlob> {
        CipherBlob::from_bytes(&self.store.get_encrypted_private_key(owner)?)
    }

    /// Unseal the helper address stored for `owner`
    pub fn reveal_helper(&self, owner: &Address) -> Result<HelperAddress> {
        let sealed = self.store.get_encrypted_helper_address(owner)?;
        self.sealer.unseal(owner, &sealed)
    }

    /// Unseal the helper and decrypt the stored private key with it
    pub fn recover_private_key(&self, owner: &Address) -> Result<PrivateKey> {
        let record = self.store.get_key_record(owner)?;
        let helper = self.sealer.unseal(owner, &record.sealed_helper)?;
        let cipher_blob = CipherBlob::from_bytes(&record.encrypted_private_key)?;

        let plaintext = self.keyguard.decrypt_blob(&cipher_blob, &helper.to_string())?;
        log::info!("Recovered private key for {owner}");
        PrivateKey::new(plaintext)
    }

    pub fn has_record(&self, owner: &Address) -> Result<bool> {
        self.store.has_key_record(owner)
    }

    pub fn clear(&self, owner: &Address) -> Result<()> {
        self.store.clear_key_record(owner)
    }

    pub fn owners(&self) -> Result<Vec<Address>> {
        self.store.owners()
    }
}
