//! Data storage and persistence
//!
//! This module persists per-owner key records in sled and keeps the helper
//! address confidential at rest through a [`HelperSealer`].

pub mod record_store;
pub mod sealer;

pub use record_store::{KeyRecord, KeyRecordStore};
pub use sealer::{HelperSealer, PassphraseSealer, SealerSettings, SEALED_HELPER_LEN};
