//! In-process store, used by tests and as a cache-less default

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::debug;

use crate::utils::error::Result;

use super::{PrivilegeStore, ResourceKind, StoredResource, check_version};

/// Store holding the resources in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    resources: RwLock<HashMap<ResourceKind, StoredResource>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrivilegeStore for MemoryStore {
    async fn load(&self, kind: ResourceKind) -> Result<Option<StoredResource>> {
        Ok(self.resources.read().get(&kind).cloned())
    }

    async fn save(
        &self,
        kind: ResourceKind,
        data: serde_json::Value,
        expected_version: Option<u64>,
    ) -> Result<u64> {
        let mut resources = self.resources.write();
        let current = resources.get(&kind).map_or(0, |stored| stored.version);
        check_version(kind, current, expected_version)?;

        let version = current + 1;
        resources.insert(
            kind,
            StoredResource {
                version,
                updated_at: chrono::Utc::now(),
                data,
            },
        );

        debug!("Saved {} in memory at version {}", kind, version);
        Ok(version)
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
