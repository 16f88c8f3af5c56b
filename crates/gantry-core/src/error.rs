//! Core error types

use thiserror::Error;

/// Core error
#[derive(Error, Debug)]
pub enum CoreError {
    /// Event payload could not be decoded
    #[error("Invalid event payload: {0}")]
    InvalidEvent(#[from] serde_json::Error),

    /// Rule file could not be parsed
    #[error("Invalid rule file: {0}")]
    InvalidRuleFile(#[from] serde_yaml::Error),

    /// One or more configuration violations, reported as a batch
    #[error("Configuration validation failed:\n{}", .0.join("\n"))]
    Validation(Vec<String>),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
