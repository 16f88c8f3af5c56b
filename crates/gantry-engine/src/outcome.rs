//! Dispatch outcome aggregation

use serde::Serialize;
use std::fmt;

/// The aggregated result of evaluating one event: how many rules matched,
/// what got applied and deleted, and every per-operation failure message.
/// An empty error list means full success. Created fresh per event, never
/// retained.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DispatchOutcome {
    /// Rules that matched the event
    pub matched_rules: usize,

    /// Resources successfully applied
    pub applied: usize,

    /// Resources successfully deleted
    pub deleted: usize,

    /// One entry per failed operation; siblings are unaffected
    pub errors: Vec<String>,
}

impl DispatchOutcome {
    /// Whether every dispatched operation succeeded.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the evaluation performed no remote work at all. Distinct
    /// from failure: an event that matches nothing is still acknowledged.
    pub fn is_noop(&self) -> bool {
        self.applied == 0 && self.deleted == 0 && self.errors.is_empty()
    }

    /// Fold another outcome into this one.
    pub fn merge(&mut self, other: DispatchOutcome) {
        self.matched_rules += other.matched_rules;
        self.applied += other.applied;
        self.deleted += other.deleted;
        self.errors.extend(other.errors);
    }

    /// Record one failed operation.
    pub fn record_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }
}

impl fmt::Display for DispatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} matched, {} applied, {} deleted, {} failed",
            self.matched_rules,
            self.applied,
            self.deleted,
            self.errors.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_noop_success() {
        let outcome = DispatchOutcome::default();
        assert!(outcome.is_success());
        assert!(outcome.is_noop());
    }

    #[test]
    fn test_merge_concatenates_errors() {
        let mut outcome = DispatchOutcome {
            matched_rules: 1,
            applied: 2,
            deleted: 0,
            errors: vec!["first".to_string()],
        };
        outcome.merge(DispatchOutcome {
            matched_rules: 1,
            applied: 0,
            deleted: 3,
            errors: vec!["second".to_string()],
        });

        assert_eq!(outcome.matched_rules, 2);
        assert_eq!(outcome.applied, 2);
        assert_eq!(outcome.deleted, 3);
        assert_eq!(outcome.errors, vec!["first", "second"]);
        assert!(!outcome.is_success());
        assert!(!outcome.is_noop());
    }

    #[test]
    fn test_successful_work_is_not_a_noop() {
        let outcome = DispatchOutcome {
            matched_rules: 1,
            applied: 1,
            deleted: 0,
            errors: Vec::new(),
        };
        assert!(outcome.is_success());
        assert!(!outcome.is_noop());
    }

    #[test]
    fn test_display_summary() {
        let outcome = DispatchOutcome {
            matched_rules: 2,
            applied: 1,
            deleted: 4,
            errors: vec!["boom".to_string()],
        };
        assert_eq!(outcome.to_string(), "2 matched, 1 applied, 4 deleted, 1 failed");
    }
}
