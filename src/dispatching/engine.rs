//! Rule engine for per-tick dispatch.
//!
//! Applies selection rules in sequence, falling through to the next rule
//! only on ties, then settles any remaining tie by arrival and pid.

use std::cmp::Ordering;
use std::sync::Arc;

use super::SelectionRule;
use crate::models::Process;

/// Final tie-break shared by every policy: earlier arrival, then
/// lexicographic pid.
pub fn arrival_then_pid(a: &Process, b: &Process) -> Ordering {
    a.arrival()
        .cmp(&b.arrival())
        .then_with(|| a.pid().cmp(b.pid()))
}

/// A composable rule engine for process selection.
///
/// # Example
/// ```
/// use u_cpusched::dispatching::{RuleEngine, rules};
///
/// let engine = RuleEngine::new()
///     .with_rule(rules::LowestPriorityValue)
///     .with_rule(rules::ShortestRemaining);
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn SelectionRule>>,
}

impl RuleEngine {
    /// Creates an engine with no rules and the arrival-then-pid tie-break.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule; later rules only decide ties of earlier ones.
    pub fn with_rule<R: SelectionRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Compares two processes: rules in order, then [`arrival_then_pid`].
    pub fn compare(&self, a: &Process, b: &Process) -> Ordering {
        for rule in &self.rules {
            let ord = rule.evaluate(a).cmp(&rule.evaluate(b));
            if ord != Ordering::Equal {
                return ord;
            }
        }
        arrival_then_pid(a, b)
    }

    /// Sorts candidates (highest priority first).
    ///
    /// Returns indices into the candidate slice. With no rules this is the
    /// arrival-then-pid order used for display and Round-Robin admission.
    pub fn sort_indices(&self, candidates: &[&Process]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..candidates.len()).collect();
        indices.sort_by(|&a, &b| self.compare(candidates[a], candidates[b]));
        indices
    }

    /// Returns the index of the highest-priority candidate.
    pub fn select_best(&self, candidates: &[&Process]) -> Option<usize> {
        (0..candidates.len()).min_by(|&a, &b| self.compare(candidates[a], candidates[b]))
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}
