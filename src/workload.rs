//! Workload builders.
//!
//! Ready-made process sets for demonstrations and a seeded random
//! generator for experiments. Random workloads are reproducible: the same
//! parameters and seed always yield the same processes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::ProcessSpec;

/// Three-process demo set.
///
/// | pid | arrival | burst | priority |
/// |-----|---------|-------|----------|
/// | P1 | 0 | 5 | 1 |
/// | P2 | 2 | 3 | 2 |
/// | P3 | 4 | 2 | 1 |
pub fn sample() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new("P1", 0, 5).with_priority(1),
        ProcessSpec::new("P2", 2, 3).with_priority(2),
        ProcessSpec::new("P3", 4, 2).with_priority(1),
    ]
}

/// Five-process set with staggered arrivals and mixed priorities.
pub fn textbook() -> Vec<ProcessSpec> {
    vec![
        ProcessSpec::new("P1", 0, 7).with_priority(2),
        ProcessSpec::new("P2", 1, 4).with_priority(1),
        ProcessSpec::new("P3", 2, 1).with_priority(3),
        ProcessSpec::new("P4", 3, 5).with_priority(2),
        ProcessSpec::new("P5", 4, 2).with_priority(1),
    ]
}

/// Parameters for [`random`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomWorkload {
    /// Number of processes.
    pub count: usize,
    /// Latest arrival tick (inclusive).
    pub max_arrival: i64,
    /// Burst range (inclusive). `min_burst` is raised to 1 if lower.
    pub min_burst: i64,
    pub max_burst: i64,
    /// Priority range (inclusive).
    pub min_priority: i32,
    pub max_priority: i32,
}

impl Default for RandomWorkload {
    fn default() -> Self {
        Self {
            count: 5,
            max_arrival: 10,
            min_burst: 1,
            max_burst: 8,
            min_priority: 0,
            max_priority: 4,
        }
    }
}

impl RandomWorkload {
    /// Creates parameters for `count` processes with default ranges.
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    /// Sets the latest arrival tick.
    pub fn with_max_arrival(mut self, max_arrival: i64) -> Self {
        self.max_arrival = max_arrival;
        self
    }

    /// Sets the burst range.
    pub fn with_burst_range(mut self, min: i64, max: i64) -> Self {
        self.min_burst = min;
        self.max_burst = max;
        self
    }

    /// Sets the priority range.
    pub fn with_priority_range(mut self, min: i32, max: i32) -> Self {
        self.min_priority = min;
        self.max_priority = max;
        self
    }
}

/// Generates a reproducible random workload with pids `P1..Pn`.
///
/// Ranges are normalized so every generated spec is valid: arrivals are
/// clamped to `>= 0`, bursts to `>= 1`, and inverted bounds collapse to
/// the lower one.
pub fn random(params: &RandomWorkload, seed: u64) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);

    let max_arrival = params.max_arrival.max(0);
    let min_burst = params.min_burst.max(1);
    let max_burst = params.max_burst.max(min_burst);
    let min_priority = params.min_priority;
    let max_priority = params.max_priority.max(min_priority);

    (1..=params.count)
        .map(|n| {
            ProcessSpec::new(
                format!("P{n}"),
                rng.random_range(0..=max_arrival),
                rng.random_range(min_burst..=max_burst),
            )
            .with_priority(rng.random_range(min_priority..=max_priority))
        })
        .collect()
}
