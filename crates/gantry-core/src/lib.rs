//! Gantry Core - Core types for the gantry hook manager
//!
//! This crate provides the fundamental types used across the gantry workspace:
//! - The service-hook event model and event-category table
//! - Rule configuration (filters, actions, label selectors) and validation
//! - Filter predicate helpers
//! - The template-renderer seam consumed by the engine

pub mod config;
pub mod error;
pub mod event;
pub mod filters;
pub mod template;

// Re-export commonly used types
pub use config::{Actions, Rule, RuleFile};
pub use error::CoreError;
pub use event::Event;
pub use template::TemplateRenderer;
