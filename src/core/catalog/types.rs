//! Catalog type definitions

use serde::{Deserialize, Serialize};

/// A node of the navigation menu supplied by the surrounding console
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Route of the node, used as the page id
    pub path: String,
    /// Display name
    pub label: String,
    /// Nested menu entries
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Create a leaf node
    pub fn leaf(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            children: Vec::new(),
        }
    }

    /// Create a node with children
    pub fn module(path: impl Into<String>, label: impl Into<String>, children: Vec<MenuNode>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
            children,
        }
    }
}

/// A flattened catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Route of the page, unique across the catalog
    pub id: String,
    /// Display name, carried through for rendering
    pub label: String,
    /// Nesting depth, 0 for top-level modules
    pub depth: usize,
    /// Id of the enclosing node, `None` at depth 0
    pub parent_id: Option<String>,
}

impl Page {
    /// Only submodule pages carry privileges; depth-0 entries are section headers.
    pub fn is_grantable(&self) -> bool {
        self.depth > 0
    }
}
