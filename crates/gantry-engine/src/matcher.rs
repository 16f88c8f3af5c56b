//! Event matcher
//!
//! Decides whether one configured rule applies to one decoded event. All
//! checks are conjunctive and evaluated in a fixed order, short-circuiting
//! on the first failing filter. An attribute the event does not carry never
//! fails a filter; an empty filter list is vacuously satisfied.

use crate::error::{EngineError, Result};
use gantry_core::event::category;
use gantry_core::filters::{contains_fold, intersects_fold, matches_any};
use gantry_core::template::TemplateRenderer;
use gantry_core::{Event, Rule};
use tracing::debug;

/// Whether `rule` applies to `event`.
///
/// A template predicate that fails to render returns an error rather than a
/// non-match: the filter outcome is unknown, so the caller must abort the
/// evaluation of this event.
pub fn matches(rule: &Rule, event: &Event, renderer: &dyn TemplateRenderer) -> Result<bool> {
    if !category::selector_matches(&rule.event, &event.event_type) {
        return Ok(false);
    }

    let filters = &rule.filters;

    if let Some(status) = event.status() {
        if !contains_fold(status, &filters.statuses) {
            return Ok(false);
        }
    }

    if let Some(reason) = event.reason() {
        if !contains_fold(reason, &filters.reasons) {
            return Ok(false);
        }
    }

    if let Some(project) = event.project_name() {
        if !contains_fold(project, &filters.projects) {
            return Ok(false);
        }
    }

    // Gated on the release payload itself: a release event whose definition
    // name is missing still has to satisfy a non-empty releases filter.
    if event.has_release() {
        let release = event.release_definition_name().unwrap_or_default();
        if !contains_fold(release, &filters.releases) {
            return Ok(false);
        }
    }

    if !intersects_fold(&event.environment_names(), &filters.environments) {
        return Ok(false);
    }

    if let Some(approval_type) = event.approval_type() {
        if !contains_fold(approval_type, &filters.approval_types) {
            return Ok(false);
        }
    }

    if let Some(repository) = event.repository_name() {
        if !contains_fold(repository, &filters.repositories) {
            return Ok(false);
        }
    }

    if let Some(source_ref) = event.source_ref_name() {
        if !matches_any(source_ref, &filters.source_refs)? {
            return Ok(false);
        }
    }

    if let Some(target_ref) = event.target_ref_name() {
        if !matches_any(target_ref, &filters.target_refs)? {
            return Ok(false);
        }
    }

    for (position, template) in filters.templates.iter().enumerate() {
        let rendered = renderer
            .render(template, &event.resource)
            .map_err(|source| EngineError::TemplateFilter { position, source })?;
        debug!(position, template, rendered, "Evaluated template filter");
        if !rendered.trim().eq_ignore_ascii_case("true") {
            return Ok(false);
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::MinijinjaRenderer;
    use gantry_core::config::ResourceFilters;
    use serde_json::json;

    fn build_event(resource: serde_json::Value) -> Event {
        Event {
            id: String::new(),
            event_type: "build.complete".to_string(),
            publisher_id: String::new(),
            scope: String::new(),
            resource,
        }
    }

    fn rule_for(event: &str, filters: ResourceFilters) -> Rule {
        Rule {
            event: event.to_string(),
            filters,
            continue_matching: false,
            actions: Default::default(),
        }
    }

    fn list(entries: &[&str]) -> Vec<String> {
        entries.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_filters_match_any_event() {
        let rule = rule_for("build.complete", ResourceFilters::default());
        let event = build_event(json!({ "status": "succeeded", "reason": "manual" }));

        assert!(matches(&rule, &event, &MinijinjaRenderer).unwrap());
    }

    #[test]
    fn test_event_selector_must_match() {
        let rule = rule_for("git.push", ResourceFilters::default());
        let event = build_event(json!({}));

        assert!(!matches(&rule, &event, &MinijinjaRenderer).unwrap());
    }

    #[test]
    fn test_category_selector_matches_members() {
        let mut event = build_event(json!({}));
        event.event_type = "ms.vss-release.release-created-event".to_string();

        let rule = rule_for("Releases", ResourceFilters::default());
        assert!(matches(&rule, &event, &MinijinjaRenderer).unwrap());

        let rule = rule_for("Builds", ResourceFilters::default());
        assert!(!matches(&rule, &event, &MinijinjaRenderer).unwrap());
    }

    #[test]
    fn test_status_membership_is_case_insensitive() {
        let rule = rule_for(
            "build.complete",
            ResourceFilters {
                statuses: list(&["a", "b"]),
                ..Default::default()
            },
        );

        for (status, expected) in [("a", true), ("A", true), ("b", true), ("c", false)] {
            let event = build_event(json!({ "status": status }));
            assert_eq!(
                matches(&rule, &event, &MinijinjaRenderer).unwrap(),
                expected,
                "status {status}"
            );
        }
    }

    #[test]
    fn test_attribute_membership_filters() {
        // Each membership filter wires the same case-insensitive check to a
        // different event attribute.
        let cases = [
            (
                ResourceFilters {
                    reasons: list(&["manual", "schedule"]),
                    ..Default::default()
                },
                json!({ "reason": "Manual" }),
                json!({ "reason": "triggered" }),
            ),
            (
                ResourceFilters {
                    projects: list(&["storefront"]),
                    ..Default::default()
                },
                json!({ "project": { "name": "Storefront" } }),
                json!({ "project": { "name": "billing" } }),
            ),
            (
                ResourceFilters {
                    releases: list(&["nightly"]),
                    ..Default::default()
                },
                json!({ "release": { "releaseDefinition": { "name": "Nightly" } } }),
                json!({ "release": { "releaseDefinition": { "name": "hourly" } } }),
            ),
            (
                ResourceFilters {
                    approval_types: list(&["preDeploy"]),
                    ..Default::default()
                },
                json!({ "approval": { "approvalType": "predeploy" } }),
                json!({ "approval": { "approvalType": "postDeploy" } }),
            ),
        ];

        for (filters, hit, miss) in cases {
            let rule = rule_for("build.complete", filters);
            assert!(
                matches(&rule, &build_event(hit.clone()), &MinijinjaRenderer).unwrap(),
                "expected match for {hit}"
            );
            assert!(
                !matches(&rule, &build_event(miss.clone()), &MinijinjaRenderer).unwrap(),
                "expected non-match for {miss}"
            );
        }
    }

    #[test]
    fn test_releases_filter_gates_on_the_release_payload() {
        let rule = rule_for(
            "ms.vss-release.release-created-event",
            ResourceFilters {
                releases: list(&["nightly"]),
                ..Default::default()
            },
        );

        // A release payload without a definition name cannot satisfy a
        // non-empty releases filter.
        let mut unnamed = build_event(json!({ "release": { "id": 7 } }));
        unnamed.event_type = "ms.vss-release.release-created-event".to_string();
        assert!(!matches(&rule, &unnamed, &MinijinjaRenderer).unwrap());

        // No release payload at all: the filter does not apply.
        let mut bare = build_event(json!({}));
        bare.event_type = "ms.vss-release.release-created-event".to_string();
        assert!(matches(&rule, &bare, &MinijinjaRenderer).unwrap());
    }

    #[test]
    fn test_absent_attribute_passes_filter() {
        let rule = rule_for(
            "build.complete",
            ResourceFilters {
                statuses: list(&["succeeded"]),
                ..Default::default()
            },
        );
        // No status on the event at all: the filter does not apply.
        let event = build_event(json!({}));

        assert!(matches(&rule, &event, &MinijinjaRenderer).unwrap());
    }

    #[test]
    fn test_environment_intersection() {
        let rule = rule_for(
            "build.complete",
            ResourceFilters {
                environments: list(&["production"]),
                ..Default::default()
            },
        );

        let hit = build_event(json!({
            "release": { "environments": [{ "name": "staging" }, { "name": "Production" }] }
        }));
        assert!(matches(&rule, &hit, &MinijinjaRenderer).unwrap());

        let miss = build_event(json!({
            "release": { "environments": [{ "name": "staging" }] }
        }));
        assert!(!matches(&rule, &miss, &MinijinjaRenderer).unwrap());

        // Filter non-empty but event has no environments: non-match.
        let none = build_event(json!({}));
        assert!(!matches(&rule, &none, &MinijinjaRenderer).unwrap());
    }

    #[test]
    fn test_source_ref_pattern() {
        let rule = rule_for(
            "build.complete",
            ResourceFilters {
                source_refs: list(&["^refs/heads/feature/.+$"]),
                ..Default::default()
            },
        );

        let hit = build_event(json!({ "sourceRefName": "refs/heads/feature/login" }));
        assert!(matches(&rule, &hit, &MinijinjaRenderer).unwrap());

        let miss = build_event(json!({ "sourceRefName": "refs/heads/master" }));
        assert!(!matches(&rule, &miss, &MinijinjaRenderer).unwrap());
    }

    #[test]
    fn test_template_filter_true_any_case() {
        let event = build_event(json!({ "status": "succeeded" }));

        for template in [
            r#"{{ status == "succeeded" }}"#,
            r#"{{ "TRUE" if status == "succeeded" else "no" }}"#,
        ] {
            let rule = rule_for(
                "build.complete",
                ResourceFilters {
                    templates: vec![template.to_string()],
                    ..Default::default()
                },
            );
            assert!(
                matches(&rule, &event, &MinijinjaRenderer).unwrap(),
                "template {template}"
            );
        }
    }

    #[test]
    fn test_template_filter_non_true_is_a_non_match() {
        let rule = rule_for(
            "build.complete",
            ResourceFilters {
                templates: vec![r#"{{ status == "failed" }}"#.to_string()],
                ..Default::default()
            },
        );
        let event = build_event(json!({ "status": "succeeded" }));

        assert!(!matches(&rule, &event, &MinijinjaRenderer).unwrap());
    }

    #[test]
    fn test_template_filter_render_error_propagates() {
        let rule = rule_for(
            "build.complete",
            ResourceFilters {
                templates: vec!["{{ no_such_field }}".to_string()],
                ..Default::default()
            },
        );
        let event = build_event(json!({ "status": "succeeded" }));

        let err = matches(&rule, &event, &MinijinjaRenderer).unwrap_err();
        assert!(matches!(err, EngineError::TemplateFilter { position: 0, .. }));
    }

    #[test]
    fn test_all_filters_conjunctive() {
        let rule = rule_for(
            "git.pullrequest.merged",
            ResourceFilters {
                statuses: list(&["completed"]),
                repositories: list(&["web-app"]),
                target_refs: list(&["^refs/heads/master$"]),
                templates: vec![r#"{{ createdBy.displayName | contains("Obama") }}"#.to_string()],
                ..Default::default()
            },
        );

        let mut event = build_event(json!({
            "status": "completed",
            "targetRefName": "refs/heads/master",
            "createdBy": { "displayName": "Barack Obama" },
            "repository": { "name": "web-app" }
        }));
        event.event_type = "git.pullrequest.merged".to_string();

        assert!(matches(&rule, &event, &MinijinjaRenderer).unwrap());

        // One failing filter sinks the whole rule.
        event.resource["repository"]["name"] = json!("other-repo");
        assert!(!matches(&rule, &event, &MinijinjaRenderer).unwrap());
    }
}
