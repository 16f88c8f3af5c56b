//! Action dispatcher
//!
//! Turns a matched rule's action list into concurrent remote operations.
//! Every action runs in its own task; delete actions fan out a second level
//! with one task per discovered resource. The dispatcher joins every task
//! it launched before returning, and a fault inside one task becomes that
//! task's failure entry instead of taking down its siblings.

use crate::gateway::ClusterGateway;
use crate::outcome::DispatchOutcome;
use gantry_core::config::{Actions, ApplyAction, DeleteAction, ResourceDocument};
use gantry_core::template::TemplateRenderer;
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Dispatches matched-rule actions through the cluster gateway.
#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn ClusterGateway>,
    renderer: Arc<dyn TemplateRenderer>,
}

impl Dispatcher {
    /// Create a dispatcher.
    pub fn new(gateway: Arc<dyn ClusterGateway>, renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self { gateway, renderer }
    }

    /// Execute every action concurrently and aggregate the results.
    ///
    /// Actions have no ordering relative to each other; callers must not
    /// assume apply-before-delete or vice versa.
    pub async fn dispatch(&self, actions: &Actions, ctx: &Value) -> DispatchOutcome {
        let mut tasks = JoinSet::new();

        for (pos, action) in actions.apply.iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let renderer = Arc::clone(&self.renderer);
            let action = action.clone();
            let ctx = ctx.clone();
            tasks.spawn(async move { run_apply(pos, &action, &ctx, gateway, renderer).await });
        }

        for (pos, action) in actions.delete.iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let renderer = Arc::clone(&self.renderer);
            let action = action.clone();
            let ctx = ctx.clone();
            tasks.spawn(async move { run_delete(pos, &action, &ctx, gateway, renderer).await });
        }

        let mut outcome = DispatchOutcome::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => outcome.merge(result),
                // A panicking action must not crash the dispatch; it
                // becomes that action's failure entry.
                Err(err) => outcome.record_error(format!("Action task fault: {err}")),
            }
        }
        outcome
    }
}

async fn run_apply(
    pos: usize,
    action: &ApplyAction,
    ctx: &Value,
    gateway: Arc<dyn ClusterGateway>,
    renderer: Arc<dyn TemplateRenderer>,
) -> DispatchOutcome {
    let mut outcome = DispatchOutcome::default();

    let rendered = match renderer.render(&action.0, ctx) {
        Ok(rendered) => rendered,
        Err(err) => {
            outcome.record_error(format!("Apply action {pos}: {err}"));
            return outcome;
        }
    };
    debug!(pos, rendered, "Templated apply document");

    let doc = match ResourceDocument::parse(&rendered) {
        Ok(doc) => doc,
        Err(err) => {
            outcome.record_error(format!(
                "Apply action {pos}: templated document is not valid YAML: {err}"
            ));
            return outcome;
        }
    };

    match gateway.apply(&doc).await {
        Ok(()) => {
            info!(
                api_version = doc.api_version,
                kind = doc.kind,
                name = doc.display_name(),
                "Applied resource"
            );
            outcome.applied += 1;
        }
        Err(err) => outcome.record_error(format!(
            "Apply action {pos} ({} {} {}): {err}",
            doc.api_version,
            doc.kind,
            doc.display_name()
        )),
    }

    outcome
}

async fn run_delete(
    pos: usize,
    action: &DeleteAction,
    ctx: &Value,
    gateway: Arc<dyn ClusterGateway>,
    renderer: Arc<dyn TemplateRenderer>,
) -> DispatchOutcome {
    let mut outcome = DispatchOutcome::default();

    // Only an absent namespace means cluster scope. A template that renders
    // to nothing would silently widen the delete, so it fails the action.
    let namespace = match &action.namespace {
        Some(template) => match renderer.render(template, ctx) {
            Ok(rendered) if rendered.is_empty() => {
                outcome.record_error(format!(
                    "Delete action {pos}: namespace template '{template}' rendered to an \
                     empty string"
                ));
                return outcome;
            }
            Ok(rendered) => Some(rendered),
            Err(err) => {
                outcome.record_error(format!("Delete action {pos}: namespace: {err}"));
                return outcome;
            }
        },
        None => None,
    };

    let selector = match action.selector.resolve(renderer.as_ref(), ctx) {
        Ok(selector) => selector,
        Err(err) => {
            outcome.record_error(format!("Delete action {pos}: selector: {err}"));
            return outcome;
        }
    };

    let resources = match gateway
        .list(
            &action.api_version,
            &action.kind,
            namespace.as_deref(),
            &selector,
        )
        .await
    {
        Ok(resources) => resources,
        Err(err) => {
            outcome.record_error(format!(
                "Delete action {pos}: error listing {} {} with selector '{selector}': {err}",
                action.api_version, action.kind
            ));
            return outcome;
        }
    };

    // Safety cap: refuse the whole action before deleting anything when the
    // selector catches more than the configured limit.
    if let Some(limit) = action.limit {
        if resources.len() > limit {
            outcome.record_error(format!(
                "Delete action {pos}: selector '{selector}' matched {} resources, \
                 exceeding the limit of {limit}; nothing was deleted",
                resources.len()
            ));
            return outcome;
        }
    }

    let mut deletes = JoinSet::new();
    for resource in resources {
        let gateway = Arc::clone(&gateway);
        let api_version = action.api_version.clone();
        let kind = action.kind.clone();
        let fallback_namespace = namespace.clone();
        deletes.spawn(async move {
            let namespace = resource.namespace.clone().or(fallback_namespace);
            gateway
                .delete(&api_version, &kind, namespace.as_deref(), &resource.name)
                .await
                .map(|()| resource.name.clone())
                .map_err(|err| {
                    format!(
                        "Error deleting {api_version} {kind} {}: {err}",
                        resource.name
                    )
                })
        });
    }

    // No rollback: a failed delete is recorded while its siblings proceed.
    while let Some(joined) = deletes.join_next().await {
        match joined {
            Ok(Ok(name)) => {
                info!(
                    api_version = action.api_version,
                    kind = action.kind,
                    name, "Deleted resource"
                );
                outcome.deleted += 1;
            }
            Ok(Err(message)) => outcome.record_error(message),
            Err(err) => outcome.record_error(format!("Delete action {pos}: task fault: {err}")),
        }
    }

    outcome
}
