//! Flat privilege matrix over a composite key
//!
//! Role grants and user overrides share this storage: one map from a composite key to a
//! privilege triple, where a missing entry reads as no permission.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::hash::Hash;

use super::types::{PagePrivilege, PrivilegeFlag};

/// Map from a composite key to a page privilege
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegeMatrix<K: Eq + Hash> {
    entries: HashMap<K, PagePrivilege>,
}

impl<K: Eq + Hash> Default for PrivilegeMatrix<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> PrivilegeMatrix<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored privilege, or the zero privilege when absent
    pub fn get(&self, key: &K) -> PagePrivilege {
        self.entries.get(key).copied().unwrap_or_default()
    }

    /// Stored privilege, `None` when no entry exists
    pub fn find(&self, key: &K) -> Option<PagePrivilege> {
        self.entries.get(key).copied()
    }

    /// Flip one flag, creating the entry with the other flags off if needed
    pub fn toggle(&mut self, key: K, flag: PrivilegeFlag) -> PagePrivilege {
        let privilege = match self.entries.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(PagePrivilege::NONE),
        };
        privilege.toggle(flag);
        *privilege
    }

    /// Replace the whole triple
    pub fn set(&mut self, key: K, privilege: PagePrivilege) {
        self.entries.insert(key, privilege);
    }

    /// Drop an entry
    pub fn remove(&mut self, key: &K) -> Option<PagePrivilege> {
        self.entries.remove(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &PagePrivilege)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash> FromIterator<(K, PagePrivilege)> for PrivilegeMatrix<K> {
    fn from_iter<I: IntoIterator<Item = (K, PagePrivilege)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
