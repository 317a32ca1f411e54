//! Privilege editing service
//!
//! Screens load a resource once, edit a draft, and save explicitly. The committed copy only
//! changes after the backend confirms the write.

mod service;
mod session;
#[cfg(test)]
mod tests;

pub use service::PrivilegeService;
pub use session::EditSession;
