//! Vault service
//!
//! Sequences the keyguard, the helper sealer and the record store into the
//! store / fetch / recover flow.

pub mod vault;

pub use vault::{StoredRecord, Vault};
