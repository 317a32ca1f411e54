//! Integration tests for hotel-privileges
//!
//! These tests drive the service, stores and resolver together without mocking.

pub mod config_tests;
pub mod persistence_tests;
pub mod scenario_tests;
