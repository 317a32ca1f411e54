//! Common test utilities for hotel-privileges
//!
//! - Sample menu, roles and users
//! - Services over in-memory and file stores

pub mod fixtures;

// Re-export commonly used items
pub use fixtures::{HotelFixture, menu};
