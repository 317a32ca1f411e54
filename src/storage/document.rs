//! Wire documents
//!
//! On the wire each resource is a nested JSON map keyed hotel first; in memory the stores use
//! flat composite keys. This module converts between the two.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Serialize, de::DeserializeOwned};

use crate::auth::privilege::{
    EntitlementStore, GrantKey, OverrideKey, PagePrivilege, RoleGrantStore, UserOverrideStore,
};
use crate::utils::error::Result;

use super::ResourceKind;

/// `hotel -> [page]`
pub type EntitlementDocument = BTreeMap<String, BTreeSet<String>>;

/// `hotel -> role -> page -> privilege`
pub type RoleGrantDocument = BTreeMap<String, BTreeMap<String, BTreeMap<String, PagePrivilege>>>;

/// `hotel -> role -> user -> page -> privilege`
pub type UserOverrideDocument =
    BTreeMap<String, BTreeMap<String, BTreeMap<String, BTreeMap<String, PagePrivilege>>>>;

/// An in-memory store that is persisted as one whole resource
pub trait PersistedResource: Clone + Default + PartialEq + Send + Sync + 'static {
    /// Wire form
    type Document: Serialize + DeserializeOwned;

    /// Which resource this store is saved as
    const KIND: ResourceKind;

    fn to_document(&self) -> Self::Document;

    fn from_document(document: Self::Document) -> Self;

    /// Serialize to the JSON stored by the backends
    fn to_value(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.to_document())?)
    }

    /// Deserialize from the JSON stored by the backends
    fn from_value(value: serde_json::Value) -> Result<Self> {
        let document: Self::Document = serde_json::from_value(value)?;
        Ok(Self::from_document(document))
    }
}

impl PersistedResource for EntitlementStore {
    type Document = EntitlementDocument;

    const KIND: ResourceKind = ResourceKind::Entitlements;

    fn to_document(&self) -> Self::Document {
        self.hotels()
            .map(|hotel_id| (hotel_id.to_string(), self.list_entitled(hotel_id)))
            .collect()
    }

    fn from_document(document: Self::Document) -> Self {
        document.into_iter().collect()
    }
}

impl PersistedResource for RoleGrantStore {
    type Document = RoleGrantDocument;

    const KIND: ResourceKind = ResourceKind::RoleGrants;

    fn to_document(&self) -> Self::Document {
        let mut document = RoleGrantDocument::new();
        for (key, privilege) in self.iter() {
            document
                .entry(key.hotel_id.clone())
                .or_default()
                .entry(key.role_name.clone())
                .or_default()
                .insert(key.page_id.clone(), *privilege);
        }
        document
    }

    fn from_document(document: Self::Document) -> Self {
        let mut entries = Vec::new();
        for (hotel_id, roles) in document {
            for (role_name, pages) in roles {
                entries.extend(pages.into_iter().map(|(page_id, privilege)| {
                    (
                        GrantKey {
                            hotel_id: hotel_id.clone(),
                            role_name: role_name.clone(),
                            page_id,
                        },
                        privilege,
                    )
                }));
            }
        }
        entries.into_iter().collect()
    }
}

impl PersistedResource for UserOverrideStore {
    type Document = UserOverrideDocument;

    const KIND: ResourceKind = ResourceKind::UserOverrides;

    fn to_document(&self) -> Self::Document {
        let mut document = UserOverrideDocument::new();
        for (key, privilege) in self.iter() {
            document
                .entry(key.hotel_id.clone())
                .or_default()
                .entry(key.role_name.clone())
                .or_default()
                .entry(key.user_id.clone())
                .or_default()
                .insert(key.page_id.clone(), *privilege);
        }
        document
    }

    fn from_document(document: Self::Document) -> Self {
        let mut entries = Vec::new();
        for (hotel_id, roles) in document {
            for (role_name, users) in roles {
                for (user_id, pages) in users {
                    for (page_id, privilege) in pages {
                        entries.push((
                            OverrideKey {
                                hotel_id: hotel_id.clone(),
                                role_name: role_name.clone(),
                                user_id: user_id.clone(),
                                page_id,
                            },
                            privilege,
                        ));
                    }
                }
            }
        }
        entries.into_iter().collect()
    }
}
