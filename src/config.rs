//! Configuration loading and management.
//!
//! Configuration is loaded with the following precedence:
//! 1. Environment variables (`PARLOR_*`)
//! 2. Config file (`~/.parlor/config.toml`)
//! 3. Defaults

use crate::error::{Error, Result};
use crate::storage::FileBackend;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the parlor home directory.
    pub path: PathBuf,

    /// Total byte budget for the key-value store. Unset means unlimited.
    pub quota_bytes: Option<u64>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_parlor_home(),
            quota_bytes: None,
        }
    }
}

impl Config {
    /// Open the file backend this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns an error if the store directory cannot be created.
    pub fn open_backend(&self) -> Result<FileBackend> {
        match self.storage.quota_bytes {
            Some(quota) => FileBackend::with_quota(self.storage.path.clone(), quota),
            None => FileBackend::new(self.storage.path.clone()),
        }
    }
}

/// Get the default parlor home directory.
fn default_parlor_home() -> PathBuf {
    dirs::home_dir().map_or_else(|| PathBuf::from(".parlor"), |h| h.join(".parlor"))
}

/// Load configuration with precedence: env vars → file → defaults.
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed.
pub fn load_config() -> Result<Config> {
    let mut config = Config::default();

    // Try to load config file
    let config_path = get_config_path();
    if config_path.exists() {
        let contents = fs::read_to_string(&config_path).map_err(Error::Storage)?;
        config = toml::from_str(&contents).map_err(|e| Error::Config(e.to_string()))?;
    }

    // Override with environment variables
    apply_env_overrides(&mut config);

    Ok(config)
}

/// Get the path to the config file.
fn get_config_path() -> PathBuf {
    if let Ok(path) = env::var("PARLOR_CONFIG") {
        return PathBuf::from(path);
    }

    if let Ok(home) = env::var("PARLOR_HOME") {
        return PathBuf::from(home).join("config.toml");
    }

    default_parlor_home().join("config.toml")
}

/// Apply environment variable overrides to config.
fn apply_env_overrides(config: &mut Config) {
    // Storage path
    if let Ok(path) = env::var("PARLOR_STORAGE_PATH") {
        config.storage.path = PathBuf::from(path);
    } else if let Ok(home) = env::var("PARLOR_HOME") {
        config.storage.path = PathBuf::from(home);
    }

    // Storage quota
    if let Ok(val) = env::var("PARLOR_QUOTA_BYTES") {
        if let Ok(quota) = val.parse() {
            config.storage.quota_bytes = Some(quota);
        }
    }
}
