//! Main privilege service implementation

use std::fmt;
use std::sync::Arc;

use tracing::info;

use crate::auth::privilege::{
    EntitlementStore, PrivilegeSystem, RoleGrantStore, UserOverrideStore,
};
use crate::config::Config;
use crate::core::catalog::Catalog;
use crate::storage::{PersistedResource, PrivilegeStore, create_store};
use crate::utils::error::Result;

use super::session::EditSession;

/// Entry point for consumers: owns the catalog and the persistence backend
#[derive(Clone)]
pub struct PrivilegeService {
    store: Arc<dyn PrivilegeStore>,
    catalog: Arc<Catalog>,
    optimistic_locking: bool,
}

impl PrivilegeService {
    /// Create a service over a store and catalog, with optimistic locking on
    pub fn new(store: Arc<dyn PrivilegeStore>, catalog: Arc<Catalog>) -> Self {
        Self {
            store,
            catalog,
            optimistic_locking: true,
        }
    }

    pub fn with_optimistic_locking(mut self, enabled: bool) -> Self {
        self.optimistic_locking = enabled;
        self
    }

    /// Build the store and catalog described by the configuration
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store = create_store(&config.storage).await?;
        let catalog = match config.catalog.menu_path.as_deref() {
            Some(path) => Catalog::from_file(path).await?,
            None => Catalog::default(),
        };

        info!(
            "Privilege service initialized with {} store and {} pages",
            config.storage.backend,
            catalog.len()
        );
        Ok(Self::new(store, Arc::new(catalog))
            .with_optimistic_locking(config.storage.optimistic_locking))
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn store(&self) -> &Arc<dyn PrivilegeStore> {
        &self.store
    }

    pub fn optimistic_locking(&self) -> bool {
        self.optimistic_locking
    }

    /// Start editing one resource
    pub async fn open<T: PersistedResource>(&self) -> Result<EditSession<T>> {
        EditSession::load(Arc::clone(&self.store), self.optimistic_locking).await
    }

    pub async fn edit_entitlements(&self) -> Result<EditSession<EntitlementStore>> {
        self.open().await
    }

    pub async fn edit_grants(&self) -> Result<EditSession<RoleGrantStore>> {
        self.open().await
    }

    pub async fn edit_overrides(&self) -> Result<EditSession<UserOverrideStore>> {
        self.open().await
    }

    /// Load a read-only snapshot of all three stores for resolution
    pub async fn load_system(&self) -> Result<PrivilegeSystem> {
        let entitlements = self.load_committed::<EntitlementStore>().await?;
        let grants = self.load_committed::<RoleGrantStore>().await?;
        let overrides = self.load_committed::<UserOverrideStore>().await?;

        Ok(PrivilegeSystem::from_parts(
            Arc::clone(&self.catalog),
            entitlements,
            grants,
            overrides,
        ))
    }

    /// Check that the backend is reachable
    pub async fn health_check(&self) -> Result<()> {
        self.store.health_check().await
    }

    async fn load_committed<T: PersistedResource>(&self) -> Result<T> {
        Ok(self.open::<T>().await?.into_committed())
    }
}

impl fmt::Debug for PrivilegeService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivilegeService")
            .field("pages", &self.catalog.len())
            .field("optimistic_locking", &self.optimistic_locking)
            .finish_non_exhaustive()
    }
}
