//! Role grant store

use tracing::debug;

use crate::core::catalog::{Catalog, Page};
use crate::utils::error::Result;

use super::entitlements::EntitlementStore;
use super::helpers::require_key;
use super::matrix::PrivilegeMatrix;
use super::types::{GrantKey, PagePrivilege, PrivilegeFlag};

/// Privilege triple per (hotel, role name, page)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleGrantStore {
    matrix: PrivilegeMatrix<GrantKey>,
}

impl RoleGrantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored grant; absence means no permission
    pub fn get_grant(&self, hotel_id: &str, role_name: &str, page_id: &str) -> PagePrivilege {
        self.matrix.get(&GrantKey::new(hotel_id, role_name, page_id))
    }

    /// Stored grant, `None` when the role has no entry for the page
    pub fn find_grant(&self, hotel_id: &str, role_name: &str, page_id: &str) -> Option<PagePrivilege> {
        self.matrix.find(&GrantKey::new(hotel_id, role_name, page_id))
    }

    /// Flip exactly one flag of a grant and return the new triple
    pub fn toggle_grant(
        &mut self,
        hotel_id: &str,
        role_name: &str,
        page_id: &str,
        flag: PrivilegeFlag,
    ) -> Result<PagePrivilege> {
        require_key("hotel", hotel_id)?;
        require_key("role", role_name)?;
        require_key("page", page_id)?;

        let privilege = self
            .matrix
            .toggle(GrantKey::new(hotel_id, role_name, page_id), flag);
        debug!(
            "Toggled {} for role {} on {} in hotel {}: {}",
            flag, role_name, page_id, hotel_id, privilege
        );
        Ok(privilege)
    }

    /// Replace a grant's triple
    pub fn set_grant(
        &mut self,
        hotel_id: &str,
        role_name: &str,
        page_id: &str,
        privilege: PagePrivilege,
    ) -> Result<()> {
        require_key("hotel", hotel_id)?;
        require_key("role", role_name)?;
        require_key("page", page_id)?;

        self.matrix
            .set(GrantKey::new(hotel_id, role_name, page_id), privilege);
        Ok(())
    }

    /// Pages presented for grant editing: entitled submodule pages, in catalog order.
    ///
    /// Pages that lost their entitlement are hidden even when a dormant grant exists.
    pub fn list_grantable_pages<'c>(
        &self,
        entitlements: &EntitlementStore,
        catalog: &'c Catalog,
        hotel_id: &str,
        role_name: &str,
    ) -> Result<Vec<&'c Page>> {
        require_key("hotel", hotel_id)?;
        require_key("role", role_name)?;

        Ok(catalog
            .grantable()
            .filter(|page| entitlements.is_entitled(hotel_id, &page.id))
            .collect())
    }

    /// Every stored grant of one role, dormant ones included
    pub fn grants_for_role<'a>(
        &'a self,
        hotel_id: &'a str,
        role_name: &'a str,
    ) -> impl Iterator<Item = (&'a str, PagePrivilege)> + 'a {
        self.matrix
            .iter()
            .filter(move |(key, _)| key.hotel_id == hotel_id && key.role_name == role_name)
            .map(|(key, privilege)| (key.page_id.as_str(), *privilege))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GrantKey, &PagePrivilege)> {
        self.matrix.iter()
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }
}

impl FromIterator<(GrantKey, PagePrivilege)> for RoleGrantStore {
    fn from_iter<I: IntoIterator<Item = (GrantKey, PagePrivilege)>>(iter: I) -> Self {
        Self {
            matrix: iter.into_iter().collect(),
        }
    }
}
