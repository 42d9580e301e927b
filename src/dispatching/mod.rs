//! Selection rules and rule engine for per-tick dispatch.
//!
//! Provides the ordering keys used by the greedy policies (FCFS, SJF,
//! SRTF, Priority) and a rule engine that applies them with a
//! deterministic tie-break.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{RuleEngine, rules};
//! use u_cpusched::registry::ProcessRegistry;
//! use u_cpusched::models::ProcessSpec;
//!
//! let registry = ProcessRegistry::from_specs(vec![
//!     ProcessSpec::new("B", 0, 2),
//!     ProcessSpec::new("A", 0, 2),
//! ]).unwrap();
//! let candidates: Vec<_> = registry.processes().iter().collect();
//!
//! let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
//! // Bursts tie, arrivals tie → pid "A" wins
//! assert_eq!(engine.select_best(&candidates), Some(1));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod engine;
pub mod rules;

pub use engine::{arrival_then_pid, RuleEngine};

use crate::models::Process;
use std::fmt::Debug;

/// Score returned by a selection rule.
///
/// Lower scores = dispatched first.
pub type RuleScore = i64;

/// A rule that ranks ready processes.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// processes that should get the CPU first.
pub trait SelectionRule: Send + Sync + Debug {
    /// Rule name (e.g., "SJF").
    fn name(&self) -> &'static str;

    /// Ranks a process. Lower = dispatched first.
    fn evaluate(&self, process: &Process) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
