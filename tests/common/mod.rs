//! Common test utilities for race-results-dl integration tests

#[allow(dead_code)]
pub mod fixtures;

pub use fixtures::*;
