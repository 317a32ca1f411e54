//! Error type definitions

use thiserror::Error;

/// Result type alias for the privilege model
pub type Result<T> = std::result::Result<T, PrivilegeError>;

/// Main error type for the privilege model
///
/// A page missing from a hotel's entitlement is deliberately absent here: resolution answers
/// with the zero privilege instead of failing.
#[derive(Error, Debug)]
pub enum PrivilegeError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// An operation was invoked without one of its required keys
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Load or save against the backing store did not complete
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// The stored resource changed since it was loaded
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Redis errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
