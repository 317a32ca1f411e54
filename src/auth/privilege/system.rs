//! Privilege system core functionality

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use tracing::info;

use crate::core::catalog::{Catalog, Page};
use crate::core::models::{RoleDirectory, User};
use crate::utils::error::Result;

use super::entitlements::EntitlementStore;
use super::grants::RoleGrantStore;
use super::overrides::UserOverrideStore;
use super::resolver::PrivilegeResolver;
use super::selection::{GrantScope, OverrideScope};
use super::types::{PagePrivilege, PermissionCheck, PrivilegeFlag};

/// In-memory snapshot of the catalog and the three privilege stores.
///
/// Every operation here is synchronous; loading and saving the stores is the job of
/// [`PrivilegeService`](crate::services::privilege::PrivilegeService).
#[derive(Debug, Clone, Default)]
pub struct PrivilegeSystem {
    catalog: Arc<Catalog>,
    entitlements: EntitlementStore,
    grants: RoleGrantStore,
    overrides: UserOverrideStore,
}

impl PrivilegeSystem {
    /// Create an empty system over a catalog
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::from_parts(
            catalog,
            EntitlementStore::new(),
            RoleGrantStore::new(),
            UserOverrideStore::new(),
        )
    }

    /// Assemble a system from loaded stores
    pub fn from_parts(
        catalog: Arc<Catalog>,
        entitlements: EntitlementStore,
        grants: RoleGrantStore,
        overrides: UserOverrideStore,
    ) -> Self {
        info!(
            "Privilege system ready: {} pages, {} grants, {} overrides",
            catalog.len(),
            grants.len(),
            overrides.len()
        );
        Self {
            catalog,
            entitlements,
            grants,
            overrides,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn entitlements(&self) -> &EntitlementStore {
        &self.entitlements
    }

    pub fn grants(&self) -> &RoleGrantStore {
        &self.grants
    }

    pub fn overrides(&self) -> &UserOverrideStore {
        &self.overrides
    }

    pub fn resolver(&self) -> PrivilegeResolver<'_> {
        PrivilegeResolver::new(&self.entitlements, &self.grants, &self.overrides)
    }

    // ===== Entitlements =====

    pub fn is_entitled(&self, hotel_id: &str, page_id: &str) -> bool {
        self.entitlements.is_entitled(hotel_id, page_id)
    }

    pub fn set_entitled(&mut self, hotel_id: &str, page_id: &str, enabled: bool) -> Result<bool> {
        self.entitlements.set_entitled(hotel_id, page_id, enabled)
    }

    pub fn list_entitled(&self, hotel_id: &str) -> BTreeSet<String> {
        self.entitlements.list_entitled(hotel_id)
    }

    // ===== Role grants =====

    pub fn get_grant(&self, hotel_id: &str, role_name: &str, page_id: &str) -> PagePrivilege {
        self.grants.get_grant(hotel_id, role_name, page_id)
    }

    pub fn toggle_grant(
        &mut self,
        hotel_id: &str,
        role_name: &str,
        page_id: &str,
        flag: PrivilegeFlag,
    ) -> Result<PagePrivilege> {
        self.grants.toggle_grant(hotel_id, role_name, page_id, flag)
    }

    pub fn list_grantable_pages(&self, hotel_id: &str, role_name: &str) -> Result<Vec<&Page>> {
        self.grants
            .list_grantable_pages(&self.entitlements, &self.catalog, hotel_id, role_name)
    }

    /// Rows of the grant editing matrix for a complete selection
    pub fn grant_matrix(&self, scope: &GrantScope) -> Result<Vec<(&Page, PagePrivilege)>> {
        Ok(self
            .list_grantable_pages(scope.hotel_id(), scope.role_name())?
            .into_iter()
            .map(|page| {
                let privilege = self
                    .grants
                    .get_grant(scope.hotel_id(), scope.role_name(), &page.id);
                (page, privilege)
            })
            .collect())
    }

    // ===== User overrides =====

    pub fn get_override(&self, hotel_id: &str, role_name: &str, user_id: &str, page_id: &str) -> PagePrivilege {
        self.overrides
            .get_override(hotel_id, role_name, user_id, page_id)
    }

    pub fn toggle_override(
        &mut self,
        hotel_id: &str,
        role_name: &str,
        user_id: &str,
        page_id: &str,
        flag: PrivilegeFlag,
    ) -> Result<PagePrivilege> {
        self.overrides
            .toggle_override(hotel_id, role_name, user_id, page_id, flag)
    }

    /// Rows of the override editing matrix: page, effective privilege, and whether an
    /// override entry backs it
    pub fn override_matrix(&self, scope: &OverrideScope) -> Result<Vec<(&Page, PagePrivilege, bool)>> {
        let resolver = self.resolver();
        self.list_grantable_pages(scope.hotel_id(), scope.role_name())?
            .into_iter()
            .map(|page| {
                let effective = resolver.effective_privilege(
                    scope.hotel_id(),
                    scope.role_name(),
                    scope.user_id(),
                    &page.id,
                )?;
                let overridden = resolver.is_overridden(
                    scope.hotel_id(),
                    scope.role_name(),
                    scope.user_id(),
                    &page.id,
                );
                Ok((page, effective, overridden))
            })
            .collect()
    }

    // ===== Resolution =====

    pub fn merged_role_view(
        &self,
        hotel_id: &str,
        user: &User,
        directory: &RoleDirectory,
    ) -> HashMap<String, PagePrivilege> {
        self.resolver().merged_role_view(hotel_id, user, directory)
    }

    pub fn effective_privilege(
        &self,
        hotel_id: &str,
        role_name: &str,
        user_id: &str,
        page_id: &str,
    ) -> Result<PagePrivilege> {
        self.resolver()
            .effective_privilege(hotel_id, role_name, user_id, page_id)
    }

    pub fn check(
        &self,
        hotel_id: &str,
        user: &User,
        directory: &RoleDirectory,
        page_id: &str,
        flag: PrivilegeFlag,
    ) -> Result<PermissionCheck> {
        self.resolver()
            .check(hotel_id, user, directory, page_id, flag)
    }
}
