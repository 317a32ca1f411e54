//! Storage layer for the privilege stores
//!
//! The core only needs whole-resource reads and writes of three JSON documents. Each backend
//! keeps a version counter per resource so editors can detect that someone saved in between.

/// Wire documents and conversions
pub mod document;
/// Local JSON file backend
pub mod files;
/// In-process backend
pub mod memory;
/// Redis backend
#[cfg(feature = "redis")]
pub mod redis;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::utils::error::{PrivilegeError, Result};

pub use document::PersistedResource;
pub use files::LocalFileStore;
pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use self::redis::RedisStore;

/// The three independently stored resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Entitlements,
    RoleGrants,
    UserOverrides,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::Entitlements, Self::RoleGrants, Self::UserOverrides];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entitlements => "entitlements",
            Self::RoleGrants => "role_grants",
            Self::UserOverrides => "user_overrides",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = PrivilegeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| PrivilegeError::validation(format!("Unknown resource: {}", s)))
    }
}

/// A stored resource with its version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResource {
    /// Incremented on every save, starting at 1
    pub version: u64,
    /// Time of the last save
    pub updated_at: DateTime<Utc>,
    /// The resource document
    pub data: serde_json::Value,
}

/// Key-value persistence boundary for the privilege stores.
///
/// Implementations must not retry; failures go back to the caller unchanged.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrivilegeStore: Send + Sync {
    /// Read the whole resource, `None` if it was never saved
    async fn load(&self, kind: ResourceKind) -> Result<Option<StoredResource>>;

    /// Replace the whole resource and return its new version.
    ///
    /// With `expected_version`, the write only happens if the stored version (0 when absent)
    /// still matches; otherwise it fails with `Conflict`. Without it the last write wins.
    async fn save(
        &self,
        kind: ResourceKind,
        data: serde_json::Value,
        expected_version: Option<u64>,
    ) -> Result<u64>;

    /// Check that the backend is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Build the store selected by the configuration
pub async fn create_store(config: &StorageConfig) -> Result<Arc<dyn PrivilegeStore>> {
    info!("Initializing {} privilege store", config.backend);

    let store: Arc<dyn PrivilegeStore> = match config.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => {
            let path = config
                .path
                .as_deref()
                .ok_or_else(|| PrivilegeError::config("File storage requires a path"))?;
            Arc::new(LocalFileStore::new(path).await?)
        }
        #[cfg(feature = "redis")]
        StorageBackend::Redis => Arc::new(self::redis::RedisStore::new(&config.redis).await?),
        #[cfg(not(feature = "redis"))]
        StorageBackend::Redis => {
            return Err(PrivilegeError::config(
                "Redis storage requires the `redis` feature",
            ));
        }
    };

    Ok(store)
}

/// Compare a stored version against the one the caller expects
pub(crate) fn check_version(
    kind: ResourceKind,
    current: u64,
    expected_version: Option<u64>,
) -> Result<()> {
    match expected_version {
        Some(expected) if expected != current => Err(PrivilegeError::conflict(format!(
            "{} was modified by someone else (expected version {}, found {})",
            kind, expected, current
        ))),
        _ => Ok(()),
    }
}
