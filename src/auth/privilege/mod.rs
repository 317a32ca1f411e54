//! Page privilege model
//!
//! Entitlements switch pages on per hotel, role grants attach a read/write/maintain triple to
//! each (hotel, role, page), user overrides refine that per (hotel, role, user, page), and the
//! resolver folds them into effective permissions.

mod entitlements;
mod grants;
mod helpers;
mod matrix;
mod overrides;
mod resolver;
mod selection;
mod system;
mod types;

// Re-export public types and structs
pub use entitlements::EntitlementStore;
pub use grants::RoleGrantStore;
pub use matrix::PrivilegeMatrix;
pub use overrides::UserOverrideStore;
pub use resolver::PrivilegeResolver;
pub use selection::{GrantScope, GrantSelection, OverrideScope, OverrideSelection};
pub use system::PrivilegeSystem;
pub use types::{GrantKey, OverrideKey, PagePrivilege, PermissionCheck, PrivilegeFlag};
