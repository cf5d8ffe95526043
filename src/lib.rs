//! # Private Key Vault
//!
//! Keeps a private key encrypted under a "helper address" and stores the
//! result per owner. When I come back to this code, here's what I need to
//! remember:
//!
//! ## What It Does
//! - **Keyguard**: `key = SHA-256(lowercase(helper_address))`, AES-256-GCM
//!   with a fresh 96-bit nonce, output `nonce || ciphertext || tag`
//! - **Records**: per-owner sealed helper address plus cipher blob, in sled
//! - **Sealing**: the helper address is only stored sealed; locally that is
//!   Argon2id + AES-256-GCM bound to the owner
//!
//! ## How the Code Is Organized
//! - `keyguard/`: key derivation, the AES-GCM cipher, cipher blobs, and the
//!   injected crypto provider
//! - `wallet/`: addresses and private keys
//! - `storage/`: the sled record store and helper sealers
//! - `core/`: the vault service tying the pieces together
//! - `config/`: settings from TOML and environment
//! - `utils/`: hashing, hex at the boundary, bincode helpers
//! - `cli/`: command-line interface
//!
//! ## Caveat
//! Whoever learns a helper address in clear can decrypt its blob. The
//! keyguard does not mix in any owner secret; confidentiality of the helper
//! address is the whole protection.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod keyguard;
pub mod storage;
pub mod utils;
pub mod wallet;

// Re-export commonly used types for convenience
pub use cli::{Command, Opt};
pub use config::{Config, GLOBAL_CONFIG};
pub use core::{StoredRecord, Vault};
pub use error::{Result, VaultError};
pub use keyguard::{
    Aes256GcmCipher, CipherBlob, CryptoProvider, DerivedKey, SymmetricKeyguard,
    SystemCryptoProvider, KEY_LEN, NONCE_LEN, TAG_LEN,
};
pub use storage::{HelperSealer, KeyRecord, KeyRecordStore, PassphraseSealer, SealerSettings};
pub use utils::{current_timestamp, get_bytes, hexlify, sha256_digest};
pub use wallet::{validate_address, Address, HelperAddress, PrivateKey, ADDRESS_LEN};
