//! Redis storage implementation
//!
//! Each resource lives in one hash at `<prefix>:<resource>` with `version`, `data` and
//! `updated_at` fields. Saves go through a Lua script so the version check and write are atomic.

mod store;

// Re-export public types
pub use store::RedisStore;
