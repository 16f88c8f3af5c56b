//! Template argument context
//!
//! Action parameters (namespaces, label values, apply documents) render
//! against a flattened view of the event: the commonly used attributes
//! under stable names, plus the full resource payload for anything else.

use chrono::Utc;
use gantry_core::Event;
use serde_json::{json, Value};

/// Build the data context used to resolve a matched rule's action
/// parameters for one event.
pub fn template_context(event: &Event) -> Value {
    json!({
        "event_type": event.event_type,
        "project_name": event.project_name(),
        "repository_name": event.repository_name(),
        "build_number": event.resource.get("buildNumber"),
        "pull_request_id": event.resource.get("pullRequestId"),
        "resource_name": event.resource.get("name"),
        "resource_reason": event.reason(),
        "resource_url": event.resource.get("url"),
        "current_time": Utc::now().to_rfc3339(),
        "resource": event.resource,
    })
}
