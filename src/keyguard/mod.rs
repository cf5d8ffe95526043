//! Symmetric keyguard for helper-address encryption
//!
//! A private key is protected with AES-256-GCM under a key derived from a
//! helper address: `key = SHA-256(lowercase(address))`. The output of an
//! encryption is a single [`CipherBlob`] laid out as
//! `nonce (12) || ciphertext || tag (16)`.
//!
//! Anyone holding the helper address in clear can decrypt the blob. Keeping
//! that address confidential is the job of the sealing layer
//! (see [`crate::storage::sealer`]), not of this module.

pub mod blob;
pub mod cipher;
pub mod guard;
pub mod provider;

pub use blob::CipherBlob;
pub use cipher::{Aes256GcmCipher, DerivedKey, KEY_LEN, NONCE_LEN, TAG_LEN};
pub use guard::SymmetricKeyguard;
pub use provider::{CryptoProvider, SystemCryptoProvider};
