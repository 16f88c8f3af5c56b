//! Minijinja template rendering
//!
//! Filter templates and action parameters are arbitrary strings from the
//! rule file, not pre-registered files, so a fresh [`minijinja::Environment`]
//! is created per render call. Undefined variables are strict errors: a
//! filter template that reaches for a field the event does not carry must
//! surface an error, not silently render empty text.

use gantry_core::template::{TemplateError, TemplateRenderer};
use minijinja::UndefinedBehavior;

/// [`TemplateRenderer`] backed by minijinja.
///
/// `eq`/`length`/`lower`/`upper` come with the builtins; `contains` and
/// `title` are registered on top since the rule templates use them.
#[derive(Debug, Default, Clone, Copy)]
pub struct MinijinjaRenderer;

impl MinijinjaRenderer {
    /// Create a new renderer.
    pub fn new() -> Self {
        Self
    }

    fn build_env() -> minijinja::Environment<'static> {
        let mut env = minijinja::Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.add_filter("contains", contains_filter);
        env.add_filter("title", title_filter);
        env
    }
}

impl TemplateRenderer for MinijinjaRenderer {
    fn render(&self, template: &str, ctx: &serde_json::Value) -> Result<String, TemplateError> {
        if template.is_empty() {
            return Ok(String::new());
        }
        Self::build_env()
            .render_str(template, ctx)
            .map_err(|e| TemplateError::Render(e.to_string()))
    }

    fn validate(&self, template: &str) -> Result<(), TemplateError> {
        Self::build_env()
            .template_from_str(template)
            .map_err(|e| TemplateError::Parse(e.to_string()))?;
        Ok(())
    }
}

/// Custom filter: substring containment.
fn contains_filter(value: String, needle: String) -> bool {
    value.contains(&needle)
}

/// Custom filter: Title Case every whitespace-separated word.
fn title_filter(value: String) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
