//! User model

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A console user and the roles held in the home hotel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User ID
    pub id: String,
    /// Home hotel
    pub hotel_id: String,
    /// Held role ids
    #[serde(default)]
    pub role_ids: BTreeSet<String>,
}

impl User {
    /// Create a user without roles
    pub fn new(id: impl Into<String>, hotel_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            hotel_id: hotel_id.into(),
            role_ids: BTreeSet::new(),
        }
    }

    /// Add a held role
    pub fn with_role(mut self, role_id: impl Into<String>) -> Self {
        self.role_ids.insert(role_id.into());
        self
    }

    pub fn holds(&self, role_id: &str) -> bool {
        self.role_ids.contains(role_id)
    }
}
