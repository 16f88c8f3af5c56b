//! Engine error types

use gantry_core::template::TemplateError;
use thiserror::Error;

/// Engine error
///
/// Matching errors abort the evaluation of the whole event: when a filter
/// cannot be decided, the rule cannot be safely skipped or fired. Dispatch
/// failures are never surfaced here; they are collected per action in the
/// [`crate::DispatchOutcome`].
#[derive(Error, Debug)]
pub enum EngineError {
    /// A boolean template predicate failed to render
    #[error("Template filter {position} failed: {source}")]
    TemplateFilter {
        position: usize,
        #[source]
        source: TemplateError,
    },

    /// A branch-ref pattern failed to compile at match time. Patterns are
    /// vetted at load, so this indicates the rule set bypassed validation.
    #[error("Filter pattern failed to compile: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
