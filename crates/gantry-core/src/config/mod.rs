//! Rule configuration
//!
//! The rule file is loaded once at startup, validated as a batch, and then
//! shared read-only across concurrently evaluated events. Validation
//! distinguishes violations (fatal, reported together) from warnings
//! (advisories such as an empty rule list).

pub mod resource;
pub mod sample;
pub mod selector;

pub use resource::{ResourceDocument, ResourceMetadata};
pub use selector::{LabelSelector, LabelSelectorRequirement, ResolvedSelector, SelectorOperator};

use crate::error::{CoreError, Result};
use crate::template::TemplateRenderer;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// The root of the rule file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleFile {
    /// Ordered service-hook rules; evaluation order is significant
    #[serde(default)]
    pub service_hooks: Vec<Rule>,
}

/// One configured rule: an event selector, conjunctive resource filters,
/// and the actions to dispatch on a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Event selector: a wire-exact event type or a category alias
    pub event: String,

    /// Resource filters; every non-empty list must be satisfied
    #[serde(default, rename = "resourceFilters")]
    pub filters: ResourceFilters,

    /// When true, later rules are still evaluated after this rule matches
    #[serde(default, rename = "continue")]
    pub continue_matching: bool,

    /// Actions to dispatch when the rule matches
    #[serde(default, rename = "rules")]
    pub actions: Actions,
}

/// Conjunctive attribute filters. Each list, when non-empty, constrains the
/// corresponding event attribute; an empty list is vacuously satisfied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceFilters {
    #[serde(default)]
    pub statuses: Vec<String>,

    #[serde(default)]
    pub reasons: Vec<String>,

    #[serde(default)]
    pub projects: Vec<String>,

    #[serde(default)]
    pub releases: Vec<String>,

    #[serde(default)]
    pub environments: Vec<String>,

    #[serde(default)]
    pub approval_types: Vec<String>,

    #[serde(default)]
    pub repositories: Vec<String>,

    /// ERE patterns matched against the source branch ref
    #[serde(default)]
    pub source_refs: Vec<String>,

    /// ERE patterns matched against the target branch ref
    #[serde(default)]
    pub target_refs: Vec<String>,

    /// Boolean template predicates; each must render to "true"
    #[serde(default)]
    pub templates: Vec<String>,
}

/// The actions a matched rule dispatches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Actions {
    /// Resource documents to apply
    #[serde(default)]
    pub apply: Vec<ApplyAction>,

    /// Resources to delete, selected by label
    #[serde(default)]
    pub delete: Vec<DeleteAction>,
}

/// An opaque templated resource document to apply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplyAction(pub String);

/// A delete of resources selected by label.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAction {
    /// API version of the resources to delete; `v1` for the core API
    pub api_version: String,

    /// Resource kind
    pub kind: String,

    /// Namespace; a template string. Absent means cluster scope.
    #[serde(default)]
    pub namespace: Option<String>,

    /// Label selector for the resources to delete
    pub selector: LabelSelector,

    /// Safety cap: the action fails if the selector finds more resources
    #[serde(default)]
    pub limit: Option<usize>,
}

/// The outcome of validating a rule file: fatal violations plus non-fatal
/// advisory warnings, both reported as batches.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
    pub violations: Vec<String>,
}

impl ValidationReport {
    /// Whether the configuration is acceptable (warnings allowed).
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }

    /// Convert into a result, keeping the warnings on success.
    pub fn into_result(self) -> Result<Vec<String>> {
        if self.violations.is_empty() {
            Ok(self.warnings)
        } else {
            Err(CoreError::Validation(self.violations))
        }
    }
}

impl RuleFile {
    /// Parse a rule file from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Validate the whole file. Templated fields are rendered against a
    /// fixed sample context purely to catch template mistakes early.
    pub fn validate(&self, renderer: &dyn TemplateRenderer) -> ValidationReport {
        let mut report = ValidationReport::default();

        if self.service_hooks.is_empty() {
            report
                .warnings
                .push("No rules were defined; incoming events will only be logged".to_string());
            return report;
        }

        for (pos, rule) in self.service_hooks.iter().enumerate() {
            let mut violations = Vec::new();
            rule.validate(renderer, &mut report.warnings, &mut violations);
            report.violations.extend(
                violations
                    .into_iter()
                    .map(|violation| format!("Service hook rule {pos}: {violation}")),
            );
        }

        report
    }
}

impl Rule {
    fn validate(
        &self,
        renderer: &dyn TemplateRenderer,
        warnings: &mut Vec<String>,
        violations: &mut Vec<String>,
    ) {
        if self.event.is_empty() {
            violations.push("the `event` field must be defined".to_string());
        }

        self.filters.validate(renderer, violations);

        if self.actions.is_empty() {
            warnings.push(format!(
                "Rule for event `{}` defines no actions and will only log matches",
                self.event
            ));
        }

        for (pos, action) in self.actions.apply.iter().enumerate() {
            action.validate(pos, renderer, violations);
        }

        for (pos, action) in self.actions.delete.iter().enumerate() {
            action.validate(pos, renderer, violations);
        }
    }
}

impl ResourceFilters {
    fn validate(&self, renderer: &dyn TemplateRenderer, violations: &mut Vec<String>) {
        for (pos, pattern) in self.source_refs.iter().enumerate() {
            if let Err(err) = Regex::new(pattern) {
                violations.push(format!("`sourceRefs` {pos}: invalid pattern: {err}"));
            }
        }

        for (pos, pattern) in self.target_refs.iter().enumerate() {
            if let Err(err) = Regex::new(pattern) {
                violations.push(format!("`targetRefs` {pos}: invalid pattern: {err}"));
            }
        }

        for (pos, template) in self.templates.iter().enumerate() {
            if !template.contains("{{") {
                violations.push(format!(
                    "template filter {pos}: no template syntax found; the filter would never \
                     render to \"true\""
                ));
            } else if let Err(err) = renderer.validate(template) {
                violations.push(format!("template filter {pos}: {err}"));
            }
        }
    }
}

impl Actions {
    /// Whether the rule declares no actions at all.
    pub fn is_empty(&self) -> bool {
        self.apply.is_empty() && self.delete.is_empty()
    }

    /// Total number of declared actions.
    pub fn len(&self) -> usize {
        self.apply.len() + self.delete.len()
    }
}

impl ApplyAction {
    fn validate(&self, pos: usize, renderer: &dyn TemplateRenderer, violations: &mut Vec<String>) {
        if self.0.is_empty() {
            violations.push(format!("apply action {pos}: the document must not be empty"));
            return;
        }

        match renderer.render(&self.0, &sample::sample_context()) {
            Ok(rendered) => {
                if let Err(err) = ResourceDocument::parse(&rendered) {
                    violations.push(format!(
                        "apply action {pos}: document is not valid YAML after templating \
                         with sample data: {err}"
                    ));
                }
            }
            Err(err) => violations.push(format!("apply action {pos}: {err}")),
        }
    }
}

impl DeleteAction {
    fn validate(&self, pos: usize, renderer: &dyn TemplateRenderer, violations: &mut Vec<String>) {
        let mut local = Vec::new();

        if self.api_version.is_empty() {
            local.push("`apiVersion` must be defined; use \"v1\" for the core API".to_string());
        }

        if self.kind.is_empty() {
            local.push("the resource `kind` must be defined".to_string());
        }

        self.selector.validate(&mut local);

        if let Some(namespace) = &self.namespace {
            if let Err(err) = renderer.validate(namespace) {
                local.push(format!("`namespace`: {err}"));
            }
        }

        if self.limit == Some(0) {
            local.push("if a `limit` is defined, it must be greater than 0".to_string());
        }

        violations.extend(
            local
                .into_iter()
                .map(|violation| format!("delete action {pos}: {violation}")),
        );
    }
}
