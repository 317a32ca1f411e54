//! # hotel-privileges
//!
//! Multi-tenant page privilege model for hotel administration consoles.
//!
//! ## Features
//!
//! - **Page catalog**: flattens the console menu into an ordered list of pages
//! - **Entitlements**: which pages each hotel has switched on
//! - **Role grants**: read/write/maintain per (hotel, role, page)
//! - **User overrides**: a per-user refinement of a role grant
//! - **Resolution**: merged role views, effective privileges and permission checks
//! - **Persistence**: whole-resource versioned saves to memory, local files or Redis
//!
//! ## Quick Start
//!
//! ```rust
//! use hotel_privileges::{Catalog, MenuNode, PrivilegeFlag, PrivilegeSystem};
//! use std::sync::Arc;
//!
//! # fn main() -> hotel_privileges::Result<()> {
//! let menu = vec![MenuNode::module(
//!     "operations",
//!     "Operations",
//!     vec![MenuNode::leaf("rooms", "Rooms")],
//! )];
//! let mut system = PrivilegeSystem::new(Arc::new(Catalog::from_menu(&menu)?));
//!
//! system.set_entitled("H1", "rooms", true)?;
//! system.toggle_grant("H1", "Manager", "rooms", PrivilegeFlag::Read)?;
//!
//! let privilege = system.effective_privilege("H1", "Manager", "u1", "rooms")?;
//! assert!(privilege.read && !privilege.write);
//! # Ok(())
//! # }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod auth;
pub mod config;
pub mod core;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{PrivilegeError, Result};

pub use auth::privilege::{
    EntitlementStore, GrantScope, GrantSelection, OverrideScope, OverrideSelection,
    PagePrivilege, PermissionCheck, PrivilegeFlag, PrivilegeResolver, PrivilegeSystem,
    RoleGrantStore, UserOverrideStore,
};
pub use core::catalog::{Catalog, MenuNode, Page, flatten};
pub use core::models::{Hotel, Role, RoleDirectory, User};
pub use services::{EditSession, PrivilegeService};
pub use storage::{PrivilegeStore, ResourceKind, create_store};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
