//! Rule file loading
//!
//! Reads and validates the rule file once at startup. Violations are
//! collected and reported as one batch so a broken file surfaces every
//! problem in a single run.

use anyhow::{bail, Context};
use gantry_core::template::TemplateRenderer;
use gantry_core::RuleFile;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Load and validate the rule file at `path`.
pub fn load_rules(path: &Path, renderer: &dyn TemplateRenderer) -> anyhow::Result<Arc<RuleFile>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rule file {}", path.display()))?;

    let rules = RuleFile::from_yaml(&text)
        .with_context(|| format!("Failed to parse rule file {}", path.display()))?;

    let report = rules.validate(renderer);
    for warning in &report.warnings {
        warn!(warning, "Rule file warning");
    }
    if !report.is_ok() {
        for violation in &report.violations {
            error!(violation, "Rule file violation");
        }
        bail!(
            "Rule file {} failed validation with {} violation(s)",
            path.display(),
            report.violations.len()
        );
    }

    info!(
        path = %path.display(),
        rules = rules.service_hooks.len(),
        "Loaded rule file"
    );
    Ok(Arc::new(rules))
}
