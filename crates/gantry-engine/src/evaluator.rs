//! Rule-set evaluator
//!
//! Iterates the loaded rules in declared order for one event. A matched
//! rule dispatches its actions; a rule with `continue: false` is the last
//! one considered once it matches. A matching error aborts the whole
//! evaluation, since the event can neither be safely fired nor skipped.

use crate::context::template_context;
use crate::dispatcher::Dispatcher;
use crate::error::Result;
use crate::gateway::ClusterGateway;
use crate::matcher;
use crate::outcome::DispatchOutcome;
use gantry_core::template::TemplateRenderer;
use gantry_core::{Event, RuleFile};
use std::sync::Arc;
use tracing::{debug, info};

/// Evaluates events against the loaded rule set.
///
/// The rule set is immutable after startup and shared read-only across
/// concurrently evaluated events; the evaluator itself holds no per-event
/// state.
#[derive(Clone)]
pub struct Evaluator {
    rules: Arc<RuleFile>,
    renderer: Arc<dyn TemplateRenderer>,
    dispatcher: Dispatcher,
}

impl Evaluator {
    /// Create an evaluator over a loaded rule set.
    pub fn new(
        rules: Arc<RuleFile>,
        gateway: Arc<dyn ClusterGateway>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        let dispatcher = Dispatcher::new(gateway, Arc::clone(&renderer));
        Self {
            rules,
            renderer,
            dispatcher,
        }
    }

    /// Evaluate one event against every rule, dispatching matches.
    pub async fn evaluate(&self, event: &Event) -> Result<DispatchOutcome> {
        let mut outcome = DispatchOutcome::default();
        let ctx = template_context(event);

        for (pos, rule) in self.rules.service_hooks.iter().enumerate() {
            if !matcher::matches(rule, event, self.renderer.as_ref())? {
                debug!(pos, event_type = event.event_type, "Rule did not match");
                continue;
            }

            info!(pos, event_type = event.event_type, "Rule matched");
            outcome.matched_rules += 1;

            if rule.actions.is_empty() {
                debug!(pos, "Matched rule defines no actions");
            } else {
                outcome.merge(self.dispatcher.dispatch(&rule.actions, &ctx).await);
            }

            if !rule.continue_matching {
                break;
            }
        }

        if outcome.matched_rules == 0 {
            info!(event_type = event.event_type, "No rule matched the event");
        }

        Ok(outcome)
    }
}
