//! Label selectors
//!
//! Selectors address remote resources by key-value labels. Values may be
//! template strings; they are resolved per dispatched event, never at load
//! time. A selector with no constraints at all is invalid — it would match
//! everything, which is never what a delete rule means.

use crate::template::{TemplateError, TemplateRenderer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Label selector over match-labels and match-expressions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Exact label requirements; values are template strings
    #[serde(default)]
    pub match_labels: BTreeMap<String, String>,

    /// Set-based label requirements
    #[serde(default)]
    pub match_expressions: Vec<LabelSelectorRequirement>,
}

/// One set-based label requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSelectorRequirement {
    /// Label key
    pub key: String,

    /// Requirement operator
    pub operator: SelectorOperator,

    /// Values; template strings. Required for `In`/`NotIn`, forbidden for
    /// `Exists`/`DoesNotExist`.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Selector requirement operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectorOperator {
    In,
    NotIn,
    Exists,
    DoesNotExist,
}

impl fmt::Display for SelectorOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SelectorOperator::In => "In",
            SelectorOperator::NotIn => "NotIn",
            SelectorOperator::Exists => "Exists",
            SelectorOperator::DoesNotExist => "DoesNotExist",
        };
        write!(f, "{s}")
    }
}

impl LabelSelector {
    /// Whether the selector carries no constraints at all.
    pub fn is_empty(&self) -> bool {
        self.match_labels.is_empty() && self.match_expressions.is_empty()
    }

    /// Collect validation violations for this selector.
    pub fn validate(&self, violations: &mut Vec<String>) {
        if self.is_empty() {
            violations.push(
                "No label selector was defined; a selector without constraints would match \
                 every resource"
                    .to_string(),
            );
        }

        for (pos, requirement) in self.match_expressions.iter().enumerate() {
            requirement.validate(pos, violations);
        }
    }

    /// Resolve every templated value against the given context.
    pub fn resolve(
        &self,
        renderer: &dyn TemplateRenderer,
        ctx: &serde_json::Value,
    ) -> Result<ResolvedSelector, TemplateError> {
        let mut match_labels = BTreeMap::new();
        for (key, value) in &self.match_labels {
            match_labels.insert(key.clone(), renderer.render(value, ctx)?);
        }

        let mut match_expressions = Vec::with_capacity(self.match_expressions.len());
        for requirement in &self.match_expressions {
            let mut values = Vec::with_capacity(requirement.values.len());
            for value in &requirement.values {
                values.push(renderer.render(value, ctx)?);
            }
            match_expressions.push(ResolvedRequirement {
                key: requirement.key.clone(),
                operator: requirement.operator,
                values,
            });
        }

        Ok(ResolvedSelector {
            match_labels,
            match_expressions,
        })
    }
}

impl LabelSelectorRequirement {
    fn validate(&self, pos: usize, violations: &mut Vec<String>) {
        if self.key.is_empty() {
            violations.push(format!("Match expression {pos}: the label key must be defined"));
        }

        match self.operator {
            SelectorOperator::Exists | SelectorOperator::DoesNotExist => {
                if !self.values.is_empty() {
                    violations.push(format!(
                        "Match expression {pos}: operator {} cannot define values",
                        self.operator
                    ));
                }
            }
            SelectorOperator::In | SelectorOperator::NotIn => {
                if self.values.is_empty() {
                    violations.push(format!(
                        "Match expression {pos}: operator {} must define at least one value",
                        self.operator
                    ));
                }
            }
        }
    }
}

/// A selector with all template values resolved, ready for the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSelector {
    pub match_labels: BTreeMap<String, String>,
    pub match_expressions: Vec<ResolvedRequirement>,
}

/// A resolved set-based requirement.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequirement {
    pub key: String,
    pub operator: SelectorOperator,
    pub values: Vec<String>,
}

impl fmt::Display for ResolvedSelector {
    /// Canonical `key=value,key in (a,b),!key` selector-string form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self
            .match_labels
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect();

        for requirement in &self.match_expressions {
            parts.push(match requirement.operator {
                SelectorOperator::In => {
                    format!("{} in ({})", requirement.key, requirement.values.join(","))
                }
                SelectorOperator::NotIn => {
                    format!("{} notin ({})", requirement.key, requirement.values.join(","))
                }
                SelectorOperator::Exists => requirement.key.clone(),
                SelectorOperator::DoesNotExist => format!("!{}", requirement.key),
            });
        }

        write!(f, "{}", parts.join(","))
    }
}
