//! User override store

use tracing::debug;

use crate::utils::error::Result;

use super::helpers::require_key;
use super::matrix::PrivilegeMatrix;
use super::types::{OverrideKey, PagePrivilege, PrivilegeFlag};

/// Privilege triple per (hotel, role name, user, page).
///
/// An override belongs to one (role, user) pairing; the same user under another role has a
/// separate slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserOverrideStore {
    matrix: PrivilegeMatrix<OverrideKey>,
}

impl UserOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored override, zero when absent
    pub fn get_override(
        &self,
        hotel_id: &str,
        role_name: &str,
        user_id: &str,
        page_id: &str,
    ) -> PagePrivilege {
        self.matrix
            .get(&OverrideKey::new(hotel_id, role_name, user_id, page_id))
    }

    /// Stored override, `None` when no entry exists
    pub fn find_override(
        &self,
        hotel_id: &str,
        role_name: &str,
        user_id: &str,
        page_id: &str,
    ) -> Option<PagePrivilege> {
        self.matrix
            .find(&OverrideKey::new(hotel_id, role_name, user_id, page_id))
    }

    /// Flip exactly one flag of an override and return the new triple.
    ///
    /// A missing entry is created with all flags off before the flip; it does not start from
    /// the role grant.
    pub fn toggle_override(
        &mut self,
        hotel_id: &str,
        role_name: &str,
        user_id: &str,
        page_id: &str,
        flag: PrivilegeFlag,
    ) -> Result<PagePrivilege> {
        require_key("hotel", hotel_id)?;
        require_key("role", role_name)?;
        require_key("user", user_id)?;
        require_key("page", page_id)?;

        let privilege = self.matrix.toggle(
            OverrideKey::new(hotel_id, role_name, user_id, page_id),
            flag,
        );
        debug!(
            "Toggled {} override for user {} (role {}) on {} in hotel {}: {}",
            flag, user_id, role_name, page_id, hotel_id, privilege
        );
        Ok(privilege)
    }

    /// Replace an override's triple
    pub fn set_override(
        &mut self,
        hotel_id: &str,
        role_name: &str,
        user_id: &str,
        page_id: &str,
        privilege: PagePrivilege,
    ) -> Result<()> {
        require_key("hotel", hotel_id)?;
        require_key("role", role_name)?;
        require_key("user", user_id)?;
        require_key("page", page_id)?;

        self.matrix.set(
            OverrideKey::new(hotel_id, role_name, user_id, page_id),
            privilege,
        );
        Ok(())
    }

    /// Remove an override so the role grant applies again
    pub fn clear_override(
        &mut self,
        hotel_id: &str,
        role_name: &str,
        user_id: &str,
        page_id: &str,
    ) -> Option<PagePrivilege> {
        self.matrix
            .remove(&OverrideKey::new(hotel_id, role_name, user_id, page_id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OverrideKey, &PagePrivilege)> {
        self.matrix.iter()
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }
}

impl FromIterator<(OverrideKey, PagePrivilege)> for UserOverrideStore {
    fn from_iter<I: IntoIterator<Item = (OverrideKey, PagePrivilege)>>(iter: I) -> Self {
        Self {
            matrix: iter.into_iter().collect(),
        }
    }
}
