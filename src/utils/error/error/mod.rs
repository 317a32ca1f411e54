//! Error handling for the privilege model
//!
//! This module defines all error types used throughout the crate.

mod helpers;
mod types;

pub use types::{PrivilegeError, Result};
