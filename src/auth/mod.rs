//! Authorization
//!
//! Page-level privileges for hotel administration consoles.

pub mod privilege;

pub use privilege::{PagePrivilege, PermissionCheck, PrivilegeFlag, PrivilegeSystem};
