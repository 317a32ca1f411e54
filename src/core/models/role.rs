//! Role model

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A role inside one hotel.
///
/// Grants are keyed by `(hotel_id, name)`, so the name is the role's identity within its hotel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    /// Role ID
    pub id: String,
    /// Role name, unique per hotel
    pub name: String,
    /// Owning hotel
    pub hotel_id: String,
}

impl Role {
    /// Create a role with a generated id
    pub fn new(hotel_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            hotel_id: hotel_id.into(),
        }
    }

    /// Create a role with a known id
    pub fn with_id(
        id: impl Into<String>,
        hotel_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            hotel_id: hotel_id.into(),
        }
    }

    pub fn belongs_to(&self, hotel_id: &str) -> bool {
        self.hotel_id == hotel_id
    }
}
