//! Gantry webhook HTTP server library
//!
//! Exposes the router, configuration, and error types for reuse in tests.

pub mod api;
pub mod config;
pub mod error;
pub mod rules_loader;
