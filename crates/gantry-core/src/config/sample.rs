//! Representative sample context for load-time template checks
//!
//! Templated fields are resolved lazily, per dispatched event. At load time
//! the only goal is to catch template mistakes early, so every templated
//! field is rendered once against this fixed sample payload. The values are
//! never used for anything else.

use serde_json::{json, Value};

/// A sample pull-request event resource covering the fields the filter and
/// parameter templates commonly reach for.
pub fn sample_resource() -> Value {
    json!({
        "pullRequestId": 1,
        "status": "completed",
        "reason": "manual",
        "createdBy": {
            "id": "SampleUserId",
            "displayName": "FirstName Last-Name",
            "uniqueName": "firstnamelast-name@example.com"
        },
        "title": "Sample Pull Request",
        "sourceRefName": "refs/heads/feature/sample",
        "targetRefName": "refs/heads/master",
        "repository": {
            "id": "SampleRepositoryId",
            "name": "SampleRepository",
            "project": { "id": "SampleProjectId", "name": "SampleProject" }
        },
        "commits": [
            { "commitId": "SampleCommitId1" },
            { "commitId": "SampleCommitId2" }
        ],
        "release": {
            "releaseDefinition": { "name": "SampleRelease" },
            "environments": [
                { "name": "SampleEnvironment" }
            ]
        }
    })
}

/// The sample context used to exercise action-parameter templates: the
/// flattened fields the dispatcher exposes, plus the sample resource.
pub fn sample_context() -> Value {
    json!({
        "event_type": "git.pullrequest.updated",
        "project_name": "SampleProject",
        "repository_name": "SampleRepository",
        "build_number": "20260829.1",
        "pull_request_id": 1,
        "resource_name": "Sample Pull Request",
        "resource_reason": "manual",
        "resource_url": "https://ci.example.com/SampleProject",
        "current_time": "2026-08-29T00:00:00Z",
        "resource": sample_resource(),
    })
}
