//! Edit session over one persisted resource

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::storage::{PersistedResource, PrivilegeStore};
use crate::utils::error::Result;

/// A loaded resource with a private draft.
///
/// Mutations go to the draft. `save` writes the whole draft and only then promotes it to the
/// committed copy, so a failed save leaves the committed state as it was.
pub struct EditSession<T: PersistedResource> {
    store: Arc<dyn PrivilegeStore>,
    committed: T,
    draft: T,
    /// Version the committed copy was loaded or saved at, 0 if never stored
    version: u64,
    optimistic_locking: bool,
}

impl<T: PersistedResource> EditSession<T> {
    /// Load the resource from the store; a missing resource starts empty
    pub async fn load(store: Arc<dyn PrivilegeStore>, optimistic_locking: bool) -> Result<Self> {
        let (committed, version) = match store.load(T::KIND).await? {
            Some(stored) => (T::from_value(stored.data)?, stored.version),
            None => {
                debug!("No stored {} yet, starting empty", T::KIND);
                (T::default(), 0)
            }
        };

        Ok(Self {
            store,
            draft: committed.clone(),
            committed,
            version,
            optimistic_locking,
        })
    }

    /// Last persisted state
    pub fn committed(&self) -> &T {
        &self.committed
    }

    /// Working copy including unsaved edits
    pub fn draft(&self) -> &T {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut T {
        &mut self.draft
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the draft differs from the committed copy
    pub fn is_dirty(&self) -> bool {
        self.draft != self.committed
    }

    /// Drop unsaved edits
    pub fn discard(&mut self) {
        self.draft = self.committed.clone();
    }

    /// Persist the draft and return the stored version.
    ///
    /// With optimistic locking the save carries the loaded version and fails with `Conflict`
    /// if someone saved in between; the draft is kept so the caller can reload and reapply.
    pub async fn save(&mut self) -> Result<u64> {
        if !self.is_dirty() {
            debug!("No changes to {}, skipping save", T::KIND);
            return Ok(self.version);
        }

        let data = self.draft.to_value()?;
        let expected_version = self.optimistic_locking.then_some(self.version);

        let version = match self.store.save(T::KIND, data, expected_version).await {
            Ok(version) => version,
            Err(e) => {
                warn!("Saving {} failed: {}", T::KIND, e);
                return Err(e);
            }
        };

        self.committed = self.draft.clone();
        self.version = version;
        info!("Saved {} at version {}", T::KIND, version);
        Ok(version)
    }

    /// Reload from the store, dropping the draft
    pub async fn reload(&mut self) -> Result<()> {
        let fresh = Self::load(Arc::clone(&self.store), self.optimistic_locking).await?;
        self.committed = fresh.committed;
        self.draft = fresh.draft;
        self.version = fresh.version;
        Ok(())
    }

    /// Consume the session, keeping the committed copy
    pub fn into_committed(self) -> T {
        self.committed
    }
}

impl<T: PersistedResource + fmt::Debug> fmt::Debug for EditSession<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditSession")
            .field("kind", &T::KIND)
            .field("version", &self.version)
            .field("dirty", &self.is_dirty())
            .field("optimistic_locking", &self.optimistic_locking)
            .finish()
    }
}
