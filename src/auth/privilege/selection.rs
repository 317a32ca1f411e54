//! Editing selections
//!
//! The console picks a hotel, then one of its roles, then (for overrides) a user before any
//! matrix is shown. A selection with a missing key has no matrix; asking for one is a caller
//! bug and fails with `InvalidSelection`.

use serde::{Deserialize, Serialize};

use crate::utils::error::{PrivilegeError, Result};

/// Partial selection for the role grant matrix
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantSelection {
    pub hotel_id: Option<String>,
    pub role_name: Option<String>,
}

impl GrantSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a hotel. Clears the role, which belonged to the previous hotel.
    pub fn with_hotel(mut self, hotel_id: impl Into<String>) -> Self {
        self.hotel_id = Some(hotel_id.into());
        self.role_name = None;
        self
    }

    pub fn with_role(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = Some(role_name.into());
        self
    }

    pub fn is_complete(&self) -> bool {
        self.scope().is_ok()
    }

    /// Complete scope, or `InvalidSelection` naming the first missing key
    pub fn scope(&self) -> Result<GrantScope> {
        Ok(GrantScope {
            hotel_id: required("hotel", &self.hotel_id)?,
            role_name: required("role", &self.role_name)?,
        })
    }
}

/// Complete (hotel, role) selection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GrantScope {
    hotel_id: String,
    role_name: String,
}

impl GrantScope {
    pub fn new(hotel_id: impl Into<String>, role_name: impl Into<String>) -> Result<Self> {
        GrantSelection {
            hotel_id: Some(hotel_id.into()),
            role_name: Some(role_name.into()),
        }
        .scope()
    }

    pub fn hotel_id(&self) -> &str {
        &self.hotel_id
    }

    pub fn role_name(&self) -> &str {
        &self.role_name
    }
}

/// Partial selection for the user override matrix
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideSelection {
    pub hotel_id: Option<String>,
    pub role_name: Option<String>,
    pub user_id: Option<String>,
}

impl OverrideSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a hotel. Clears role and user.
    pub fn with_hotel(mut self, hotel_id: impl Into<String>) -> Self {
        self.hotel_id = Some(hotel_id.into());
        self.role_name = None;
        self.user_id = None;
        self
    }

    /// Select a role. Clears the user.
    pub fn with_role(mut self, role_name: impl Into<String>) -> Self {
        self.role_name = Some(role_name.into());
        self.user_id = None;
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn is_complete(&self) -> bool {
        self.scope().is_ok()
    }

    /// Complete scope, or `InvalidSelection` naming the first missing key
    pub fn scope(&self) -> Result<OverrideScope> {
        Ok(OverrideScope {
            hotel_id: required("hotel", &self.hotel_id)?,
            role_name: required("role", &self.role_name)?,
            user_id: required("user", &self.user_id)?,
        })
    }
}

/// Complete (hotel, role, user) selection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OverrideScope {
    hotel_id: String,
    role_name: String,
    user_id: String,
}

impl OverrideScope {
    pub fn new(
        hotel_id: impl Into<String>,
        role_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Result<Self> {
        OverrideSelection {
            hotel_id: Some(hotel_id.into()),
            role_name: Some(role_name.into()),
            user_id: Some(user_id.into()),
        }
        .scope()
    }

    pub fn hotel_id(&self) -> &str {
        &self.hotel_id
    }

    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The (hotel, role) part of the scope
    pub fn grant_scope(&self) -> GrantScope {
        GrantScope {
            hotel_id: self.hotel_id.clone(),
            role_name: self.role_name.clone(),
        }
    }
}

// Blank keys are rejected; others are kept verbatim to match the store keys
fn required(name: &str, value: &Option<String>) -> Result<String> {
    match value.as_deref() {
        Some(v) if !v.trim().is_empty() => Ok(v.to_string()),
        _ => Err(PrivilegeError::invalid_selection(format!(
            "{} must be selected",
            name
        ))),
    }
}
