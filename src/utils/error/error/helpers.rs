//! Helper functions for creating specific error types

use super::types::PrivilegeError;

/// Helper functions for creating specific errors
impl PrivilegeError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn invalid_selection<S: Into<String>>(message: S) -> Self {
        Self::InvalidSelection(message.into())
    }

    pub fn persistence<S: Into<String>>(message: S) -> Self {
        Self::Persistence(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether the error came from the persistence boundary.
    ///
    /// The admin console shows these to the operator and lets them retry the save.
    pub fn is_persistence_failure(&self) -> bool {
        match self {
            Self::Persistence(_) | Self::Conflict(_) => true,
            #[cfg(feature = "redis")]
            Self::Redis(_) => true,
            _ => false,
        }
    }

    /// Whether the error indicates a caller bug rather than a missing permission
    pub fn is_caller_error(&self) -> bool {
        matches!(self, Self::InvalidSelection(_) | Self::Validation(_))
    }
}
