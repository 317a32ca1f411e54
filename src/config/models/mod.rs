//! Configuration data models

pub mod catalog;
pub mod logging;
pub mod storage;

// Re-export all configuration types
pub use catalog::*;
pub use logging::*;
pub use storage::*;

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}

/// Default Redis URL
pub fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

/// Default Redis key prefix
pub fn default_redis_key_prefix() -> String {
    "privileges".to_string()
}

pub fn default_optimistic_locking() -> bool {
    true
}
