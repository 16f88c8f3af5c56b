//! Event-category expansion
//!
//! A rule's event selector may name either a concrete wire-exact event type
//! or a category alias that stands for a fixed set of event types. Expansion
//! is a pure lookup with no mutable state.

/// The Build Completed event
pub const BUILD_COMPLETE: &str = "build.complete";
/// The Release Abandoned event
pub const RELEASE_ABANDONED: &str = "ms.vss-release.release-abandoned-event";
/// The Release Created event
pub const RELEASE_CREATED: &str = "ms.vss-release.release-created-event";
/// The Release Deployment Approval Completed event
pub const DEPLOYMENT_APPROVAL_COMPLETED: &str =
    "ms.vss-release.deployment-approval-completed-event";
/// The Release Deployment Approval Pending event
pub const DEPLOYMENT_APPROVAL_PENDING: &str = "ms.vss-release.deployment-approval-pending-event";
/// The Release Deployment Completed event
pub const DEPLOYMENT_COMPLETED: &str = "ms.vss-release.deployment-completed-event";
/// The Release Deployment Started event
pub const DEPLOYMENT_STARTED: &str = "ms.vss-release.deployment-started-event";
/// The Code Checked In event
pub const CODE_CHECKED_IN: &str = "tfvc.checkin";
/// The Code Pushed event
pub const CODE_PUSHED: &str = "git.push";
/// The Pull Request Created event
pub const PULL_REQUEST_CREATED: &str = "git.pullrequest.created";
/// The Pull Request Merged event
pub const PULL_REQUEST_MERGED: &str = "git.pullrequest.merged";
/// The Pull Request Updated event
pub const PULL_REQUEST_UPDATED: &str = "git.pullrequest.updated";
/// The Work Item Created event
pub const WORK_ITEM_CREATED: &str = "workitem.created";
/// The Work Item Deleted event
pub const WORK_ITEM_DELETED: &str = "workitem.deleted";
/// The Work Item Restored event
pub const WORK_ITEM_RESTORED: &str = "workitem.restored";
/// The Work Item Updated event
pub const WORK_ITEM_UPDATED: &str = "workitem.updated";
/// The Work Item Commented event
pub const WORK_ITEM_COMMENTED: &str = "workitem.commented";

/// Expand an event selector into the wire-exact event types it stands for.
///
/// Category aliases map to their member sets; anything else is treated as a
/// concrete event type and expands to itself.
pub fn expand(selector: &str) -> Vec<&'static str> {
    match selector {
        "Builds" => vec![BUILD_COMPLETE],
        "Releases" => vec![RELEASE_ABANDONED, RELEASE_CREATED],
        "Release Deployment Approvals" => {
            vec![DEPLOYMENT_APPROVAL_COMPLETED, DEPLOYMENT_APPROVAL_PENDING]
        }
        "Release Deployments" => vec![DEPLOYMENT_COMPLETED, DEPLOYMENT_STARTED],
        "Code" => vec![CODE_CHECKED_IN, CODE_PUSHED],
        "Pull Requests" => vec![
            PULL_REQUEST_CREATED,
            PULL_REQUEST_MERGED,
            PULL_REQUEST_UPDATED,
        ],
        "Work Items" => vec![
            WORK_ITEM_CREATED,
            WORK_ITEM_DELETED,
            WORK_ITEM_RESTORED,
            WORK_ITEM_UPDATED,
            WORK_ITEM_COMMENTED,
        ],
        _ => Vec::new(),
    }
}

/// Whether a selector matches an event type, expanding category aliases.
/// Comparison is exact and case-sensitive.
pub fn selector_matches(selector: &str, event_type: &str) -> bool {
    let members = expand(selector);
    if members.is_empty() {
        selector == event_type
    } else {
        members.contains(&event_type)
    }
}
