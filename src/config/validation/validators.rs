//! Validators for each configuration section

use super::trait_def::Validate;
use crate::config::models::*;
use crate::utils::logging::level_filter;
use tracing::debug;

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating storage configuration");

        match self.backend {
            StorageBackend::Memory => Ok(()),
            StorageBackend::File => match self.path.as_deref() {
                Some(path) if !path.trim().is_empty() => Ok(()),
                _ => Err("File storage requires a non-empty path".to_string()),
            },
            StorageBackend::Redis => self.redis.validate(),
        }
    }
}

impl Validate for RedisStorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Redis URL cannot be empty".to_string());
        }

        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err("Redis URL must start with redis:// or rediss://".to_string());
        }

        if self.key_prefix.trim().is_empty() {
            return Err("Redis key prefix cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        if let Some(path) = &self.menu_path {
            if path.trim().is_empty() {
                return Err("Menu path cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        level_filter(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))
    }
}
