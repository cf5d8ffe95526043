//! Configuration management
//!
//! This module handles the settings of the vault tool: where the record
//! database lives and how the helper sealer derives its keys.
//!
//! Values come from an optional TOML file (`VAULT_CONFIG`) overridden by
//! environment variables.

pub mod settings;

pub use settings::{Config, GLOBAL_CONFIG};
