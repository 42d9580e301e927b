//! Per-algorithm step policies.
//!
//! Each policy picks which ready process (if any) gets the CPU for the
//! current tick. The caller executes the tick and records the timeline,
//! so policies only decide.
//!
//! | Algorithm | Rule | Continuation |
//! |-----------|------|--------------|
//! | FCFS | earliest arrival | none, re-picked every tick |
//! | SJF | shortest burst | keeps the running process until it finishes |
//! | SRTF | shortest remaining | none, re-picked every tick |
//! | Round Robin | queue rotation | quantum-bounded turns |
//! | Priority | lowest priority value | none, re-picked every tick |

use crate::config::Algorithm;
use crate::dispatching::{rules, RuleEngine};
use crate::models::Process;
use crate::registry::ProcessRegistry;

use super::RoundRobinQueue;

/// Inputs a policy needs to choose the next process.
pub(crate) struct StepContext<'a> {
    pub registry: &'a ProcessRegistry,
    /// Registry indices of processes ready at `now`.
    pub ready: &'a [usize],
    /// Pid that held the CPU on the previous tick.
    pub running: Option<&'a str>,
    pub now: i64,
}

impl Algorithm {
    /// Ordering used by the greedy policies. `None` for Round Robin.
    pub fn rule_engine(&self) -> Option<RuleEngine> {
        let engine = RuleEngine::new();
        match self {
            Algorithm::Fcfs => Some(engine.with_rule(rules::EarliestArrival)),
            Algorithm::Sjf => Some(engine.with_rule(rules::ShortestBurst)),
            Algorithm::Srtf => Some(engine.with_rule(rules::ShortestRemaining)),
            Algorithm::Priority => Some(engine.with_rule(rules::LowestPriorityValue)),
            Algorithm::RoundRobin => None,
        }
    }

    /// Chooses the registry index to run this tick, or `None` for idle.
    pub(crate) fn select(&self, ctx: &StepContext<'_>, rr: &mut RoundRobinQueue) -> Option<usize> {
        match self {
            Algorithm::Sjf => continuing(ctx).or_else(|| greedy(self, ctx)),
            Algorithm::RoundRobin => {
                rr.admit(ctx.registry, ctx.now);
                rr.current(ctx.registry)
            }
            Algorithm::Fcfs | Algorithm::Srtf | Algorithm::Priority => greedy(self, ctx),
        }
    }
}

/// The process from the previous tick, if it still has work.
fn continuing(ctx: &StepContext<'_>) -> Option<usize> {
    let pid = ctx.running?;
    let index = ctx.registry.position(pid)?;
    if ctx.registry.by_index(index).is_finished() {
        None
    } else {
        Some(index)
    }
}

fn greedy(algorithm: &Algorithm, ctx: &StepContext<'_>) -> Option<usize> {
    let engine = algorithm.rule_engine()?;
    let candidates: Vec<&Process> = ctx
        .ready
        .iter()
        .map(|&i| ctx.registry.by_index(i))
        .collect();
    engine.select_best(&candidates).map(|best| ctx.ready[best])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessSpec;

    fn registry() -> ProcessRegistry {
        ProcessRegistry::from_specs(vec![
            ProcessSpec::new("A", 0, 6).with_priority(3),
            ProcessSpec::new("B", 1, 2).with_priority(1),
            ProcessSpec::new("C", 1, 4).with_priority(1),
        ])
        .unwrap()
    }

    fn pick(algorithm: Algorithm, reg: &ProcessRegistry, running: Option<&str>) -> Option<String> {
        let ready = reg.ready_indices(1);
        let ctx = StepContext {
            registry: reg,
            ready: &ready,
            running,
            now: 1,
        };
        let mut rr = RoundRobinQueue::new();
        algorithm
            .select(&ctx, &mut rr)
            .map(|i| reg.by_index(i).pid().to_string())
    }

    #[test]
    fn test_fcfs_picks_earliest() {
        assert_eq!(pick(Algorithm::Fcfs, &registry(), None).as_deref(), Some("A"));
    }

    #[test]
    fn test_sjf_picks_shortest_without_marker() {
        assert_eq!(pick(Algorithm::Sjf, &registry(), None).as_deref(), Some("B"));
    }

    #[test]
    fn test_sjf_continues_running_process() {
        assert_eq!(pick(Algorithm::Sjf, &registry(), Some("A")).as_deref(), Some("A"));
    }

    #[test]
    fn test_sjf_ignores_finished_marker() {
        let mut reg = registry();
        let a = reg.position("A").unwrap();
        for t in 0..6 {
            reg.by_index_mut(a).execute_tick(t);
        }
        assert_eq!(pick(Algorithm::Sjf, &reg, Some("A")).as_deref(), Some("B"));
    }

    #[test]
    fn test_srtf_ignores_marker() {
        assert_eq!(pick(Algorithm::Srtf, &registry(), Some("A")).as_deref(), Some("B"));
    }

    #[test]
    fn test_priority_tie_breaks_on_arrival_then_pid() {
        // B and C share priority 1 and arrival 1
        assert_eq!(pick(Algorithm::Priority, &registry(), None).as_deref(), Some("B"));
    }

    #[test]
    fn test_round_robin_starts_at_queue_head() {
        assert_eq!(pick(Algorithm::RoundRobin, &registry(), None).as_deref(), Some("A"));
    }

    #[test]
    fn test_idle_when_nothing_ready() {
        let reg = ProcessRegistry::from_specs(vec![ProcessSpec::new("late", 9, 1)]).unwrap();
        for algo in Algorithm::ALL {
            assert_eq!(pick(algo, &reg, None), None);
        }
    }

    #[test]
    fn test_rule_engine_per_algorithm() {
        assert!(Algorithm::RoundRobin.rule_engine().is_none());
        let engine = Algorithm::Srtf.rule_engine().unwrap();
        assert_eq!(engine.rule_names(), vec!["SRTF"]);
    }
}
