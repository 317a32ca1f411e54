//! Privilege resolution
//!
//! Two read paths are kept apart. The merged role view ORs the grants of every held role and
//! ignores overrides; it backs read-only summaries. The effective privilege looks at a single
//! (role, user) pairing, where an override replaces the role grant as a whole triple.
//! Both answer with the zero privilege for pages the hotel is not entitled to.

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::core::models::{RoleDirectory, User};
use crate::utils::error::Result;

use super::entitlements::EntitlementStore;
use super::grants::RoleGrantStore;
use super::helpers::require_key;
use super::overrides::UserOverrideStore;
use super::types::{PagePrivilege, PermissionCheck, PrivilegeFlag};

/// Read-only view over the three stores
#[derive(Debug, Clone, Copy)]
pub struct PrivilegeResolver<'a> {
    entitlements: &'a EntitlementStore,
    grants: &'a RoleGrantStore,
    overrides: &'a UserOverrideStore,
}

impl<'a> PrivilegeResolver<'a> {
    pub fn new(
        entitlements: &'a EntitlementStore,
        grants: &'a RoleGrantStore,
        overrides: &'a UserOverrideStore,
    ) -> Self {
        Self {
            entitlements,
            grants,
            overrides,
        }
    }

    /// What the user can do on each page by virtue of all roles held in the hotel.
    ///
    /// Roles from other hotels and unknown role ids are ignored.
    pub fn merged_role_view(
        &self,
        hotel_id: &str,
        user: &User,
        directory: &RoleDirectory,
    ) -> HashMap<String, PagePrivilege> {
        let held = directory.held_roles(hotel_id, user);
        debug!(
            "Merging {} role(s) of user {} in hotel {}",
            held.len(),
            user.id,
            hotel_id
        );
        self.merged_view_for_roles(hotel_id, held.iter().map(|role| role.name.as_str()))
    }

    /// OR-merge of the named roles' grants.
    ///
    /// Keys are every entitled page plus every page one of the roles holds a grant on. Pages
    /// outside the entitlement map to the zero privilege.
    pub fn merged_view_for_roles<I, S>(&self, hotel_id: &str, role_names: I) -> HashMap<String, PagePrivilege>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let role_names: Vec<S> = role_names.into_iter().collect();

        let mut pages: BTreeSet<&str> = self.entitlements.entitled_pages(hotel_id).collect();
        for role in &role_names {
            pages.extend(
                self.grants
                    .grants_for_role(hotel_id, role.as_ref())
                    .map(|(page_id, _)| page_id),
            );
        }

        pages
            .into_iter()
            .map(|page_id| {
                let merged = self.merged_privilege(hotel_id, &role_names, page_id);
                (page_id.to_string(), merged)
            })
            .collect()
    }

    /// OR-merge of the named roles' grants for one page
    pub fn merged_privilege<S: AsRef<str>>(&self, hotel_id: &str, role_names: &[S], page_id: &str) -> PagePrivilege {
        if !self.entitlements.is_entitled(hotel_id, page_id) {
            return PagePrivilege::NONE;
        }

        role_names
            .iter()
            .fold(PagePrivilege::NONE, |merged, role| {
                merged | self.grants.get_grant(hotel_id, role.as_ref(), page_id)
            })
    }

    /// Privilege of one user under one role.
    ///
    /// An override for the exact key is returned verbatim. Otherwise the role's own grant
    /// applies; other roles the user holds are not consulted.
    pub fn effective_privilege(
        &self,
        hotel_id: &str,
        role_name: &str,
        user_id: &str,
        page_id: &str,
    ) -> Result<PagePrivilege> {
        require_key("hotel", hotel_id)?;
        require_key("role", role_name)?;
        require_key("user", user_id)?;
        require_key("page", page_id)?;

        Ok(self.resolve_effective(hotel_id, role_name, user_id, page_id))
    }

    /// Whether an override entry exists for the exact key
    pub fn is_overridden(&self, hotel_id: &str, role_name: &str, user_id: &str, page_id: &str) -> bool {
        self.overrides
            .find_override(hotel_id, role_name, user_id, page_id)
            .is_some()
    }

    /// Final privilege of a user on a page: the effective privilege under each held role,
    /// OR-merged across roles
    pub fn user_privilege(
        &self,
        hotel_id: &str,
        user: &User,
        directory: &RoleDirectory,
        page_id: &str,
    ) -> Result<PagePrivilege> {
        require_key("hotel", hotel_id)?;
        require_key("user", &user.id)?;
        require_key("page", page_id)?;

        Ok(directory
            .held_roles(hotel_id, user)
            .iter()
            .fold(PagePrivilege::NONE, |merged, role| {
                merged | self.resolve_effective(hotel_id, &role.name, &user.id, page_id)
            }))
    }

    /// Can the user perform `flag` on the page in the hotel
    pub fn check(
        &self,
        hotel_id: &str,
        user: &User,
        directory: &RoleDirectory,
        page_id: &str,
        flag: PrivilegeFlag,
    ) -> Result<PermissionCheck> {
        require_key("hotel", hotel_id)?;
        require_key("user", &user.id)?;
        require_key("page", page_id)?;

        if !self.entitlements.is_entitled(hotel_id, page_id) {
            return Ok(PermissionCheck {
                granted: false,
                granted_by_roles: vec![],
                denial_reason: Some(format!(
                    "Page {} is not enabled for hotel {}",
                    page_id, hotel_id
                )),
            });
        }

        let held = directory.held_roles(hotel_id, user);
        if held.is_empty() {
            return Ok(PermissionCheck {
                granted: false,
                granted_by_roles: vec![],
                denial_reason: Some(format!(
                    "User {} holds no roles in hotel {}",
                    user.id, hotel_id
                )),
            });
        }

        let mut granted_by_roles: Vec<String> = held
            .iter()
            .filter(|role| {
                self.resolve_effective(hotel_id, &role.name, &user.id, page_id)
                    .get(flag)
            })
            .map(|role| role.name.clone())
            .collect();
        granted_by_roles.sort();

        if granted_by_roles.is_empty() {
            Ok(PermissionCheck {
                granted: false,
                granted_by_roles,
                denial_reason: Some(format!("Missing {} privilege on {}", flag, page_id)),
            })
        } else {
            Ok(PermissionCheck {
                granted: true,
                granted_by_roles,
                denial_reason: None,
            })
        }
    }

    fn resolve_effective(&self, hotel_id: &str, role_name: &str, user_id: &str, page_id: &str) -> PagePrivilege {
        if !self.entitlements.is_entitled(hotel_id, page_id) {
            return PagePrivilege::NONE;
        }

        self.overrides
            .find_override(hotel_id, role_name, user_id, page_id)
            .unwrap_or_else(|| self.grants.get_grant(hotel_id, role_name, page_id))
    }
}
