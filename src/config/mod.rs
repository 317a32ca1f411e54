//! Configuration management for the privilege tooling
//!
//! This module handles loading, layering, and validation of the storage, catalog and logging
//! settings.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{PrivilegeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Environment variable selecting the storage backend
pub const ENV_STORAGE_BACKEND: &str = "PRIVILEGE_STORAGE_BACKEND";
/// Environment variable with the file backend directory
pub const ENV_STORAGE_PATH: &str = "PRIVILEGE_STORAGE_PATH";
/// Environment variable disabling optimistic locking when set to `false`
pub const ENV_OPTIMISTIC_LOCKING: &str = "PRIVILEGE_OPTIMISTIC_LOCKING";
/// Environment variable with the Redis URL
pub const ENV_REDIS_URL: &str = "PRIVILEGE_REDIS_URL";
/// Environment variable with the Redis key prefix
pub const ENV_REDIS_KEY_PREFIX: &str = "PRIVILEGE_REDIS_KEY_PREFIX";
/// Environment variable with the menu tree path
pub const ENV_MENU_PATH: &str = "PRIVILEGE_MENU_PATH";
/// Environment variable with the log level
pub const ENV_LOG_LEVEL: &str = "PRIVILEGE_LOG_LEVEL";
/// Environment variable switching to JSON logs
pub const ENV_LOG_JSON: &str = "PRIVILEGE_LOG_JSON";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the three privilege resources are persisted
    pub storage: StorageConfig,
    /// Where the menu tree comes from
    pub catalog: CatalogConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// The file may be incomplete on its own; validate after the environment and flag layers.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PrivilegeError::config(format!("Failed to read config file: {}", e)))?;

        let config = Self::parse_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config = Self::parse_yaml(content)?;
        config.validate()?;
        Ok(config)
    }

    fn parse_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| PrivilegeError::config(format!("Failed to parse config: {}", e)))
    }

    /// Overlay the `PRIVILEGE_*` environment variables that are set
    ///
    /// Nothing is validated here; validate the fully layered configuration instead.
    pub fn with_env(self) -> Result<Self> {
        info!("Applying configuration from environment variables");

        self.with_lookup(|name| std::env::var(name).ok())
    }

    /// Overlay values from an arbitrary variable lookup; unset variables leave `self` unchanged
    pub fn with_lookup<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup(ENV_STORAGE_BACKEND) {
            self.storage.backend = backend.parse()?;
        }
        if let Some(path) = lookup(ENV_STORAGE_PATH) {
            self.storage.path = Some(path);
        }
        if let Some(locking) = lookup(ENV_OPTIMISTIC_LOCKING) {
            self.storage.optimistic_locking = parse_bool(ENV_OPTIMISTIC_LOCKING, &locking)?;
        }
        if let Some(url) = lookup(ENV_REDIS_URL) {
            self.storage.redis.url = url;
        }
        if let Some(prefix) = lookup(ENV_REDIS_KEY_PREFIX) {
            self.storage.redis.key_prefix = prefix;
        }
        if let Some(menu_path) = lookup(ENV_MENU_PATH) {
            self.catalog.menu_path = Some(menu_path);
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(json) = lookup(ENV_LOG_JSON) {
            self.logging.json = parse_bool(ENV_LOG_JSON, &json)?;
        }

        Ok(self)
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.storage
    }

    /// Get catalog configuration
    pub fn catalog(&self) -> &CatalogConfig {
        &self.catalog
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.storage
            .validate()
            .map_err(|e| PrivilegeError::config(format!("Storage config error: {}", e)))?;

        self.catalog
            .validate()
            .map_err(|e| PrivilegeError::config(format!("Catalog config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| PrivilegeError::config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| PrivilegeError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(PrivilegeError::config(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}
