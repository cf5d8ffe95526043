use crate::error::{Result, VaultError};
use crate::storage::SealerSettings;
use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::sync::RwLock;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(Config::new);

static DEFAULT_DB_PATH: &str = "vault_records";

const CONFIG_FILE_ENV: &str = "VAULT_CONFIG";

const DB_PATH_KEY: &str = "VAULT_DB_PATH";
const MIN_PASSPHRASE_LEN_KEY: &str = "VAULT_MIN_PASSPHRASE_LEN";
const ARGON2_MEMORY_KIB_KEY: &str = "VAULT_ARGON2_MEMORY_KIB";
const ARGON2_ITERATIONS_KEY: &str = "VAULT_ARGON2_ITERATIONS";
const ARGON2_PARALLELISM_KEY: &str = "VAULT_ARGON2_PARALLELISM";

const ENV_KEYS: [&str; 5] = [
    DB_PATH_KEY,
    MIN_PASSPHRASE_LEN_KEY,
    ARGON2_MEMORY_KIB_KEY,
    ARGON2_ITERATIONS_KEY,
    ARGON2_PARALLELISM_KEY,
];

/// Layout of the optional TOML configuration file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    db_path: Option<String>,
    min_passphrase_length: Option<usize>,
    argon2_memory_kib: Option<u32>,
    argon2_iterations: Option<u32>,
    argon2_parallelism: Option<u32>,
}

pub struct Config {
    inner: RwLock<HashMap<String, String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Defaults overridden by environment variables
    ///
    /// The TOML file named by `VAULT_CONFIG` is only read by [`Config::load_from_env`].
    pub fn new() -> Config {
        let config = Config::empty();
        config.apply_env();
        config
    }

    /// Read the TOML file named by `VAULT_CONFIG`, if set
    ///
    /// A missing or invalid file is an error. Environment variables still
    /// take precedence over the file.
    pub fn load_from_env(&self) -> Result<()> {
        self.load_with(env::var(CONFIG_FILE_ENV).ok())
    }

    fn load_with(&self, config_file: Option<String>) -> Result<()> {
        let Some(path) = config_file else {
            return Ok(());
        };
        self.load_file(&path)
            .map_err(|e| VaultError::Config(format!("Cannot load config file {path}: {e}")))?;
        self.apply_env();
        Ok(())
    }

    fn apply_env(&self) {
        for key in ENV_KEYS {
            if let Ok(value) = env::var(key) {
                self.set(key, value);
            }
        }
    }

    fn empty() -> Config {
        let mut map = HashMap::new();
        map.insert(String::from(DB_PATH_KEY), String::from(DEFAULT_DB_PATH));
        Config {
            inner: RwLock::new(map),
        }
    }

    pub fn from_toml_str(contents: &str) -> Result<Config> {
        let config = Config::empty();
        config.apply_toml(contents)?;
        Ok(config)
    }

    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        self.apply_toml(&contents)?;
        log::debug!("Loaded config file {}", path.as_ref().display());
        Ok(())
    }

    fn apply_toml(&self, contents: &str) -> Result<()> {
        let file: FileConfig = toml::from_str(contents)
            .map_err(|e| VaultError::Config(format!("Invalid config file: {e}")))?;

        if let Some(path) = file.db_path {
            self.set(DB_PATH_KEY, path);
        }
        if let Some(len) = file.min_passphrase_length {
            self.set(MIN_PASSPHRASE_LEN_KEY, len.to_string());
        }
        if let Some(memory) = file.argon2_memory_kib {
            self.set(ARGON2_MEMORY_KIB_KEY, memory.to_string());
        }
        if let Some(iterations) = file.argon2_iterations {
            self.set(ARGON2_ITERATIONS_KEY, iterations.to_string());
        }
        if let Some(parallelism) = file.argon2_parallelism {
            self.set(ARGON2_PARALLELISM_KEY, parallelism.to_string());
        }
        Ok(())
    }

    fn set(&self, key: &str, value: String) {
        let mut inner = self
            .inner
            .write()
            .expect("Failed to acquire write lock on config - this should never happen");
        inner.insert(String::from(key), value);
    }

    fn get(&self, key: &str) -> Option<String> {
        let inner = self
            .inner
            .read()
            .expect("Failed to acquire read lock on config - this should never happen");
        inner.get(key).cloned()
    }

    pub fn get_db_path(&self) -> String {
        self.get(DB_PATH_KEY)
            .unwrap_or_else(|| String::from(DEFAULT_DB_PATH))
    }

    pub fn set_db_path(&self, path: String) {
        self.set(DB_PATH_KEY, path);
    }

    /// Sealer settings with any configured overrides applied
    pub fn sealer_settings(&self) -> Result<SealerSettings> {
        let defaults = SealerSettings::default();
        Ok(SealerSettings {
            min_passphrase_length: self
                .parse_or(MIN_PASSPHRASE_LEN_KEY, defaults.min_passphrase_length)?,
            memory_kib: self.parse_or(ARGON2_MEMORY_KIB_KEY, defaults.memory_kib)?,
            iterations: self.parse_or(ARGON2_ITERATIONS_KEY, defaults.iterations)?,
            parallelism: self.parse_or(ARGON2_PARALLELISM_KEY, defaults.parallelism)?,
        })
    }

    fn parse_or<T: std::str::FromStr>(&self, key: &str, default: T) -> Result<T> {
        match self.get(key) {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| VaultError::Config(format!("{key} is not a valid number: {raw}"))),
            None => Ok(default),
        }
    }
}
