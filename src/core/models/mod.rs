//! Core data models
//!
//! Tenants, roles and users as seen by the privilege model. Only identifiers and role
//! membership matter here; everything else is carried for the console.

pub mod directory;
pub mod hotel;
pub mod role;
pub mod user;

pub use directory::RoleDirectory;
pub use hotel::Hotel;
pub use role::Role;
pub use user::User;
