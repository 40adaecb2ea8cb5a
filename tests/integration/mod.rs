//! Integration tests
//!
//! Component-interaction tests: account flows through the SDK, full
//! generation round-trips, and database operations.

mod auth_flow_tests;
mod database_tests;
mod generation_tests;
