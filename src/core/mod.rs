//! Core domain: the page catalog and the tenant, role and user entities

pub mod catalog;
pub mod models;
