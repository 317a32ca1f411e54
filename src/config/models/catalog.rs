//! Catalog configuration

use serde::{Deserialize, Serialize};

/// Where the menu tree is read from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// YAML or JSON menu tree
    #[serde(default)]
    pub menu_path: Option<String>,
}
