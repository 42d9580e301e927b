//! Built-in selection rules.
//!
//! One ordering key per greedy algorithm. All rules return lower scores
//! for processes that should run first; ties are left to the engine.

use super::{RuleScore, SelectionRule};
use crate::models::Process;

/// Earliest arrival first (FCFS).
#[derive(Debug, Clone, Copy)]
pub struct EarliestArrival;

impl SelectionRule for EarliestArrival {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.arrival()
    }

    fn description(&self) -> &'static str {
        "First-Come, First-Served"
    }
}

/// Shortest total burst first (SJF).
///
/// Minimizes average waiting time among non-preemptive policies.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl SelectionRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.burst()
    }

    fn description(&self) -> &'static str {
        "Shortest Job First"
    }
}

/// Shortest remaining work first (SRTF).
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl SelectionRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.remaining()
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time First"
    }
}

/// Lowest priority value first.
#[derive(Debug, Clone, Copy)]
pub struct LowestPriorityValue;

impl SelectionRule for LowestPriorityValue {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &Process) -> RuleScore {
        process.priority() as RuleScore
    }

    fn description(&self) -> &'static str {
        "Static Priority (lower value = more urgent)"
    }
}
