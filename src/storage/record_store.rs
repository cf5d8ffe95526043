use crate::error::{Result, VaultError};
use crate::utils::{current_timestamp, deserialize, serialize};
use crate::wallet::{Address, ADDRESS_LEN};
use serde::{Deserialize, Serialize};
use std::path::Path;

const KEY_RECORD_TREE: &str = "key_records";

/// Everything stored for one owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct KeyRecord {
    /// Canonical owner address (`0x` + lower-case hex)
    pub owner: String,
    /// Helper address as produced by a [`crate::storage::HelperSealer`]
    pub sealed_helper: Vec<u8>,
    /// Cipher blob of the private key
    pub encrypted_private_key: Vec<u8>,
    pub created_at: u64,
    pub updated_at: u64,
}

/// Per-owner key records in an embedded sled database
#[derive(Clone)]
pub struct KeyRecordStore {
    db: sled::Db,
    records: sled::Tree,
}

impl KeyRecordStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<KeyRecordStore> {
        let db = sled::open(path.as_ref()).map_err(|e| {
            VaultError::Database(format!(
                "Failed to open record database at {}: {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_db(db)
    }

    /// In-memory store removed when dropped
    pub fn open_temporary() -> Result<KeyRecordStore> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::from_db(db)
    }

    fn from_db(db: sled::Db) -> Result<KeyRecordStore> {
        let records = db
            .open_tree(KEY_RECORD_TREE)
            .map_err(|e| VaultError::Database(format!("Failed to open record tree: {e}")))?;
        Ok(KeyRecordStore { db, records })
    }

    /// Store or replace the record for `owner`
    ///
    /// A replaced record keeps its original `created_at`.
    pub fn store_key_record(
        &self,
        owner: &Address,
        sealed_helper: Vec<u8>,
        encrypted_private_key: Vec<u8>,
    ) -> Result<KeyRecord> {
        if encrypted_private_key.is_empty() {
            return Err(VaultError::EmptyEncryptedPrivateKey);
        }
        if sealed_helper.is_empty() {
            return Err(VaultError::Sealing(
                "sealed helper address is empty".to_string(),
            ));
        }

        self.store_key_record_at(owner, sealed_helper, encrypted_private_key, current_timestamp()?)
    }

    /// Compare-and-swap loop so a concurrent replace cannot lose `created_at`
    pub(crate) fn store_key_record_at(
        &self,
        owner: &Address,
        sealed_helper: Vec<u8>,
        encrypted_private_key: Vec<u8>,
        now: u64,
    ) -> Result<KeyRecord> {
        let key = &owner.as_bytes()[..];
        let mut record = KeyRecord {
            owner: owner.to_string(),
            sealed_helper,
            encrypted_private_key,
            created_at: now,
            updated_at: now,
        };

        loop {
            let current = self.records.get(key)?;
            record.created_at = match &current {
                Some(bytes) => Self::decode(bytes)?.created_at,
                None => now,
            };

            let bytes = serialize(&record)?;
            let swapped = self
                .records
                .compare_and_swap(key, current, Some(bytes))
                .map_err(|e| VaultError::Database(format!("Failed to store key record: {e}")))?;
            match swapped {
                Ok(()) => break,
                Err(_) => log::debug!("Key record for {owner} changed during store, retrying"),
            }
        }
        self.flush()?;

        log::info!("KeyRecordStored owner={owner}");
        Ok(record)
    }

    pub fn has_key_record(&self, owner: &Address) -> Result<bool> {
        Ok(self.records.contains_key(owner.as_bytes())?)
    }

    pub fn get_key_record(&self, owner: &Address) -> Result<KeyRecord> {
        self.find(owner)?
            .ok_or_else(|| VaultError::RecordNotFound(owner.to_string()))
    }

    pub fn get_encrypted_private_key(&self, owner: &Address) -> Result<Vec<u8>> {
        Ok(self.get_key_record(owner)?.encrypted_private_key)
    }

    pub fn get_encrypted_helper_address(&self, owner: &Address) -> Result<Vec<u8>> {
        Ok(self.get_key_record(owner)?.sealed_helper)
    }

    pub fn clear_key_record(&self, owner: &Address) -> Result<()> {
        let removed = self
            .records
            .remove(owner.as_bytes())
            .map_err(|e| VaultError::Database(format!("Failed to clear key record: {e}")))?;
        if removed.is_none() {
            return Err(VaultError::RecordNotFound(owner.to_string()));
        }
        self.flush()?;

        log::info!("KeyRecordCleared owner={owner}");
        Ok(())
    }

    /// Owners with a stored record, in key order
    pub fn owners(&self) -> Result<Vec<Address>> {
        let mut owners = Vec::new();
        for item in self.records.iter() {
            let (k, _) = item.map_err(|e| {
                VaultError::Database(format!("Failed to iterate record tree: {e}"))
            })?;
            let bytes: [u8; ADDRESS_LEN] = k.as_ref().try_into().map_err(|_| {
                VaultError::Database(format!("Unexpected record key length {}", k.len()))
            })?;
            owners.push(Address::from_bytes(bytes));
        }
        Ok(owners)
    }

    pub fn count_records(&self) -> usize {
        self.records.len()
    }

    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    fn find(&self, owner: &Address) -> Result<Option<KeyRecord>> {
        match self.records.get(owner.as_bytes())? {
            Some(bytes) => Ok(Some(Self::decode(&bytes)?)),
            None => Ok(None),
        }
    }

    fn decode(bytes: &[u8]) -> Result<KeyRecord> {
        deserialize(bytes).map_err(|e| {
            VaultError::Serialization(format!("Failed to deserialize key record: {e}"))
        })
    }
}
