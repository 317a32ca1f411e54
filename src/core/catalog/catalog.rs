//! Flattened catalog with lookups

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::utils::error::{PrivilegeError, Result};

use super::flatten::flatten;
use super::types::{MenuNode, Page};

/// Immutable page catalog computed once from the menu tree
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Page>", into = "Vec<Page>")]
pub struct Catalog {
    pages: Vec<Page>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from a menu tree, rejecting duplicate page ids
    pub fn from_menu(tree: &[MenuNode]) -> Result<Self> {
        let catalog = Self::try_from(flatten(tree))?;
        debug!("Flattened menu into {} pages", catalog.len());
        Ok(catalog)
    }

    /// Load the menu tree from a YAML or JSON file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading menu catalog from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PrivilegeError::config(format!("Failed to read menu file: {}", e)))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let tree: Vec<MenuNode> = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };

        Self::from_menu(&tree)
    }

    /// All pages in pre-order
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Pages that can carry grants, in pre-order
    pub fn grantable(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter().filter(|page| page.is_grantable())
    }

    /// Look up a page by id
    pub fn get(&self, page_id: &str) -> Option<&Page> {
        self.index.get(page_id).map(|&i| &self.pages[i])
    }

    /// Whether the catalog knows the page
    pub fn contains(&self, page_id: &str) -> bool {
        self.index.contains_key(page_id)
    }

    /// Direct children of a page
    pub fn children_of<'a>(&'a self, page_id: &'a str) -> impl Iterator<Item = &'a Page> + 'a {
        self.pages
            .iter()
            .filter(move |page| page.parent_id.as_deref() == Some(page_id))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl TryFrom<Vec<Page>> for Catalog {
    type Error = PrivilegeError;

    fn try_from(pages: Vec<Page>) -> Result<Self> {
        let mut index = HashMap::with_capacity(pages.len());
        for (i, page) in pages.iter().enumerate() {
            if index.insert(page.id.clone(), i).is_some() {
                return Err(PrivilegeError::validation(format!(
                    "Duplicate page id in menu: {}",
                    page.id
                )));
            }
        }
        Ok(Self { pages, index })
    }
}

impl From<Catalog> for Vec<Page> {
    fn from(catalog: Catalog) -> Self {
        catalog.pages
    }
}
