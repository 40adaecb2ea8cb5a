//! Common test utilities for thumbforge
//!
//! This module provides shared test infrastructure for all tests:
//! - In-memory SQLite database support
//! - Test fixtures and data factories
//! - Gemini mock helpers
//! - A listening test server for SDK round-trips

pub mod database;
pub mod fixtures;
pub mod providers;
pub mod server;

// Re-export commonly used items
pub use database::TestDatabase;
pub use fixtures::AccountFactory;
pub use server::TestServer;

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
