//! Page catalog
//!
//! Turns the navigation menu tree into the flat, pre-ordered list of addressable pages that
//! every privilege matrix is rendered against.

mod catalog;
mod flatten;
mod types;

pub use catalog::Catalog;
pub use flatten::flatten;
pub use types::{MenuNode, Page};
