//! Hotel entitlement store

use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::utils::error::Result;

use super::helpers::require_key;

/// Per-hotel set of pages switched on for that tenant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntitlementStore {
    hotels: HashMap<String, BTreeSet<String>>,
}

impl EntitlementStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the page is switched on for the hotel
    pub fn is_entitled(&self, hotel_id: &str, page_id: &str) -> bool {
        self.hotels
            .get(hotel_id)
            .is_some_and(|pages| pages.contains(page_id))
    }

    /// Switch a page on or off for a hotel.
    ///
    /// Idempotent. Returns whether the stored state changed. Grants and overrides for the page
    /// are not touched, so switching it back on restores them.
    pub fn set_entitled(&mut self, hotel_id: &str, page_id: &str, enabled: bool) -> Result<bool> {
        require_key("hotel", hotel_id)?;
        require_key("page", page_id)?;

        let changed = if enabled {
            self.hotels
                .entry(hotel_id.to_string())
                .or_default()
                .insert(page_id.to_string())
        } else {
            let removed = self
                .hotels
                .get_mut(hotel_id)
                .is_some_and(|pages| pages.remove(page_id));
            if self.hotels.get(hotel_id).is_some_and(BTreeSet::is_empty) {
                self.hotels.remove(hotel_id);
            }
            removed
        };

        if changed {
            debug!(
                "Page {} {} for hotel {}",
                page_id,
                if enabled { "entitled" } else { "disentitled" },
                hotel_id
            );
        }
        Ok(changed)
    }

    /// Pages entitled to the hotel
    pub fn list_entitled(&self, hotel_id: &str) -> BTreeSet<String> {
        self.hotels.get(hotel_id).cloned().unwrap_or_default()
    }

    /// Borrowing variant of [`list_entitled`](Self::list_entitled)
    pub fn entitled_pages(&self, hotel_id: &str) -> impl Iterator<Item = &str> {
        self.hotels
            .get(hotel_id)
            .into_iter()
            .flat_map(|pages| pages.iter().map(String::as_str))
    }

    /// Hotels with at least one entitled page
    pub fn hotels(&self) -> impl Iterator<Item = &str> {
        self.hotels.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }
}

impl FromIterator<(String, BTreeSet<String>)> for EntitlementStore {
    fn from_iter<I: IntoIterator<Item = (String, BTreeSet<String>)>>(iter: I) -> Self {
        Self {
            hotels: iter
                .into_iter()
                .filter(|(_, pages)| !pages.is_empty())
                .collect(),
        }
    }
}
