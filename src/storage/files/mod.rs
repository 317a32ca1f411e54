//! Local file storage implementation
//!
//! One JSON envelope per resource under a base directory.

mod local;

// Re-export public types
pub use local::LocalFileStore;
