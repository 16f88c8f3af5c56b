//! Service-hook event model
//!
//! An [`Event`] is one parsed inbound CI/CD notification. Every event family
//! shares the envelope fields; everything family-specific lives in the
//! untyped `resource` payload and is reached through accessors that return
//! `None` when the family does not carry that attribute. Absent attributes
//! never fail a filter.

pub mod category;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One inbound service-hook notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Notification id assigned by the sender
    #[serde(default)]
    pub id: String,

    /// Wire-exact event type, e.g. `git.pullrequest.updated`
    pub event_type: String,

    /// Publisher that emitted the event
    #[serde(default)]
    pub publisher_id: String,

    /// Scope the subscription was created in
    #[serde(default)]
    pub scope: String,

    /// The full untyped resource payload
    #[serde(default)]
    pub resource: Value,
}

impl Event {
    /// Decode an event from raw payload bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// `resource.status`
    pub fn status(&self) -> Option<&str> {
        self.resource.get("status").and_then(Value::as_str)
    }

    /// `resource.reason`
    pub fn reason(&self) -> Option<&str> {
        self.resource.get("reason").and_then(Value::as_str)
    }

    /// Project name, from `resource.project.name` or, for git events,
    /// `resource.repository.project.name`.
    pub fn project_name(&self) -> Option<&str> {
        self.field_str(&["project", "name"])
            .or_else(|| self.field_str(&["repository", "project", "name"]))
    }

    /// `resource.release.releaseDefinition.name`
    pub fn release_definition_name(&self) -> Option<&str> {
        self.field_str(&["release", "releaseDefinition", "name"])
    }

    /// Whether the event carries a release payload at all.
    pub fn has_release(&self) -> bool {
        matches!(self.resource.get("release"), Some(v) if !v.is_null())
    }

    /// Environment names from `resource.release.environments[].name`,
    /// followed by `resource.environment.name` for deployment events.
    /// Ordered as they appear in the payload.
    pub fn environment_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        if let Some(environments) = self
            .field(&["release", "environments"])
            .and_then(Value::as_array)
        {
            names.extend(
                environments
                    .iter()
                    .filter_map(|env| env.get("name").and_then(Value::as_str)),
            );
        }
        if let Some(name) = self.field_str(&["environment", "name"]) {
            names.push(name);
        }
        names
    }

    /// `resource.approval.approvalType`
    pub fn approval_type(&self) -> Option<&str> {
        self.field_str(&["approval", "approvalType"])
    }

    /// `resource.repository.name`
    pub fn repository_name(&self) -> Option<&str> {
        self.field_str(&["repository", "name"])
    }

    /// `resource.sourceRefName`
    pub fn source_ref_name(&self) -> Option<&str> {
        self.resource.get("sourceRefName").and_then(Value::as_str)
    }

    /// `resource.targetRefName`
    pub fn target_ref_name(&self) -> Option<&str> {
        self.resource.get("targetRefName").and_then(Value::as_str)
    }

    fn field(&self, path: &[&str]) -> Option<&Value> {
        let mut current = &self.resource;
        for segment in path {
            current = current.get(segment)?;
        }
        Some(current)
    }

    fn field_str(&self, path: &[&str]) -> Option<&str> {
        self.field(path).and_then(Value::as_str)
    }
}
