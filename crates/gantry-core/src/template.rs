//! Template-renderer seam
//!
//! Rendering is an external capability from the core's point of view: the
//! engine provides the implementation, the core only defines the contract
//! so that rule validation can syntax-check templated fields at load time.

use thiserror::Error;

/// Template error
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template text failed to parse
    #[error("Template parse error: {0}")]
    Parse(String),

    /// Template failed during rendering
    #[error("Template render error: {0}")]
    Render(String),
}

/// Renders string templates against an arbitrary JSON data context.
///
/// Implementations must be pure: rendering the same template against the
/// same context twice yields identical output.
pub trait TemplateRenderer: Send + Sync {
    /// Render a template string with the given context.
    fn render(&self, template: &str, ctx: &serde_json::Value) -> Result<String, TemplateError>;

    /// Check that a template parses, without evaluating it.
    fn validate(&self, template: &str) -> Result<(), TemplateError>;
}
