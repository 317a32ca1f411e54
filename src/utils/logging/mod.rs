//! Logging setup
//!
//! Installs a `tracing` subscriber from [`LoggingConfig`]. `RUST_LOG`, when set, wins over the
//! configured level.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

use crate::config::LoggingConfig;
use crate::utils::error::{PrivilegeError, Result};

/// Parse a configured level or directive list such as `info,hotel_privileges=debug`
pub fn level_filter(level: &str) -> std::result::Result<EnvFilter, ParseError> {
    EnvFilter::try_new(level.to_ascii_lowercase())
}

/// Build the level filter, honouring `RUST_LOG`
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => level_filter(&config.level).map_err(|e| {
            PrivilegeError::config(format!("Invalid log level '{}': {}", config.level, e))
        }),
    }
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;

    let installed = if config.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_writer(std::io::stderr)
            .try_init()
    };

    installed.map_err(|e| PrivilegeError::internal(format!("Failed to initialize logging: {}", e)))
}
