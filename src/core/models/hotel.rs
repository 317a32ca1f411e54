//! Hotel (tenant) model

use serde::{Deserialize, Serialize};

/// Tenant identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    /// Hotel ID
    pub id: String,
    /// Display name
    pub name: String,
    /// Descriptive fields opaque to the privilege model
    #[serde(default)]
    pub attributes: serde_json::Map<String, serde_json::Value>,
}

impl Hotel {
    /// Create a new hotel
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: serde_json::Map::new(),
        }
    }
}
