//! Storage configuration

use super::*;
use crate::utils::error::PrivilegeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available storage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory, lost on exit
    #[default]
    Memory,
    /// JSON files in a local directory
    File,
    /// Redis hashes (requires the `redis` feature)
    Redis,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Memory => "memory",
            Self::File => "file",
            Self::Redis => "redis",
        };
        f.write_str(name)
    }
}

impl FromStr for StorageBackend {
    type Err = PrivilegeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "redis" => Ok(Self::Redis),
            other => Err(PrivilegeError::config(format!(
                "Unknown storage backend: {}",
                other
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend holding the resources
    #[serde(default)]
    pub backend: StorageBackend,
    /// Directory for the file backend
    #[serde(default)]
    pub path: Option<String>,
    /// Redis configuration
    #[serde(default)]
    pub redis: RedisStorageConfig,
    /// Send the loaded version with every save and reject stale writes
    #[serde(default = "default_optimistic_locking")]
    pub optimistic_locking: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            redis: RedisStorageConfig::default(),
            optimistic_locking: default_optimistic_locking(),
        }
    }
}


/// Redis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedisStorageConfig {
    /// Redis URL
    #[serde(default = "default_redis_url")]
    pub url: String,
    /// Prefix of the per-resource hash keys
    #[serde(default = "default_redis_key_prefix")]
    pub key_prefix: String,
}

impl Default for RedisStorageConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
            key_prefix: default_redis_key_prefix(),
        }
    }
}
