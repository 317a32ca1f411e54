//! Role registry
//!
//! The creation path for roles. Grants are addressed by role name within a hotel, so this is
//! where duplicate names are refused.

use std::collections::HashMap;

use tracing::debug;

use crate::utils::error::{PrivilegeError, Result};

use super::role::Role;
use super::user::User;

/// Registry of roles across hotels
#[derive(Debug, Clone, Default)]
pub struct RoleDirectory {
    roles: HashMap<String, Role>,
}

impl RoleDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a role, refusing a second role with the same name in the same hotel
    pub fn add_role(&mut self, role: Role) -> Result<()> {
        if role.name.trim().is_empty() {
            return Err(PrivilegeError::validation("Role name cannot be empty"));
        }
        if role.hotel_id.trim().is_empty() {
            return Err(PrivilegeError::validation("Role must belong to a hotel"));
        }
        if self.find_by_name(&role.hotel_id, &role.name).is_some() {
            return Err(PrivilegeError::validation(format!(
                "Role '{}' already exists in hotel {}",
                role.name, role.hotel_id
            )));
        }
        if self.roles.contains_key(&role.id) {
            return Err(PrivilegeError::validation(format!(
                "Role id {} is already registered",
                role.id
            )));
        }

        debug!("Registered role {} in hotel {}", role.name, role.hotel_id);
        self.roles.insert(role.id.clone(), role);
        Ok(())
    }

    /// Remove a role. Grants stored under its name are left in place.
    pub fn remove_role(&mut self, role_id: &str) -> Option<Role> {
        self.roles.remove(role_id)
    }

    /// Get role by id
    pub fn get(&self, role_id: &str) -> Option<&Role> {
        self.roles.get(role_id)
    }

    /// Find a role by its name within a hotel
    pub fn find_by_name(&self, hotel_id: &str, name: &str) -> Option<&Role> {
        self.roles
            .values()
            .find(|role| role.hotel_id == hotel_id && role.name == name)
    }

    /// Roles of one hotel, sorted by name
    pub fn roles_in_hotel(&self, hotel_id: &str) -> Vec<&Role> {
        let mut roles: Vec<&Role> = self
            .roles
            .values()
            .filter(|role| role.belongs_to(hotel_id))
            .collect();
        roles.sort_by(|a, b| a.name.cmp(&b.name));
        roles
    }

    /// Roles the user holds in the given hotel. Unknown ids and foreign roles are skipped.
    pub fn held_roles<'a>(&'a self, hotel_id: &str, user: &User) -> Vec<&'a Role> {
        user.role_ids
            .iter()
            .filter_map(|role_id| self.roles.get(role_id))
            .filter(|role| role.belongs_to(hotel_id))
            .collect()
    }

    /// Check that every role the user holds exists and belongs to the user's hotel
    pub fn validate_user(&self, user: &User) -> Result<()> {
        for role_id in &user.role_ids {
            match self.roles.get(role_id) {
                None => {
                    return Err(PrivilegeError::not_found(format!("Role not found: {}", role_id)));
                }
                Some(role) if role.hotel_id != user.hotel_id => {
                    return Err(PrivilegeError::validation(format!(
                        "Role {} belongs to hotel {}, user {} belongs to hotel {}",
                        role.name, role.hotel_id, user.id, user.hotel_id
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
