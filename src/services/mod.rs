//! Services module
//!
//! Loading and saving the privilege stores on top of the storage backends.

pub mod privilege;

pub use privilege::{EditSession, PrivilegeService};
