//! Integration test suite for alaunch
//!
//! End-to-end tests that run the update pipeline and the `alaunch` binary
//! against a local HTTP server. No external network access is needed.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **pipeline**: `UpdatePipeline` over `HttpSource`
//! - **cli**: the `alaunch` binary via `assert_cmd`

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod pipeline;
