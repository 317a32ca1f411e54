//! Helper functions for privilege operations

use crate::utils::error::{PrivilegeError, Result};

/// Fail with `InvalidSelection` when a required key is blank
pub(super) fn require_key<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(PrivilegeError::invalid_selection(format!(
            "{} is required",
            name
        )));
    }
    Ok(value)
}
