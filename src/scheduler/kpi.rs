//! Simulation performance metrics (KPIs).
//!
//! Computed once every process has finished, from the finished-process
//! records and the Gantt log.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Waiting | (finish - arrival) - burst |
//! | Turnaround | finish - arrival |
//! | Response | start - arrival |
//! | Makespan | max(finish) - min(arrival) |
//! | Throughput | finished / makespan |
//! | CPU Utilization | sum(burst) / makespan |
//!
//! A zero makespan is treated as 1 in the ratios.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{GanttLog, Process};
use crate::registry::ProcessRegistry;

/// Per-process timing record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStats {
    pub pid: String,
    pub arrival: i64,
    pub burst: i64,
    pub priority: i32,
    /// First tick on the CPU.
    pub start: i64,
    /// Completion tick.
    pub finish: i64,
    /// Ticks spent ready but not running.
    pub waiting: i64,
    /// Ticks from arrival to completion.
    pub turnaround: i64,
    /// Ticks from arrival to first run.
    pub response: i64,
}

impl ProcessStats {
    fn from_process(p: &Process) -> Option<Self> {
        let start = p.start()?;
        let finish = p.finish()?;
        let turnaround = finish - p.arrival();
        Some(Self {
            pid: p.pid().to_string(),
            arrival: p.arrival(),
            burst: p.burst(),
            priority: p.priority(),
            start,
            finish,
            waiting: turnaround - p.burst(),
            turnaround,
            response: start - p.arrival(),
        })
    }
}

/// Summary metrics of a finished simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationKpi {
    /// Span from earliest arrival to latest finish (ticks).
    pub makespan: i64,
    /// Mean waiting time (ticks).
    pub avg_wait: f64,
    /// Mean turnaround time (ticks).
    pub avg_turnaround: f64,
    /// Mean response time (ticks).
    pub avg_response: f64,
    /// Finished processes per tick.
    pub throughput: f64,
    /// Fraction of the makespan the CPU was busy (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Idle ticks recorded in the Gantt log.
    pub idle_ticks: i64,
    /// Switches between two different processes.
    pub context_switches: usize,
    /// Per-process records, ordered by arrival then pid.
    pub processes: Vec<ProcessStats>,
}

impl SimulationKpi {
    /// Computes KPIs from a registry and its Gantt log.
    ///
    /// Returns `None` (not ready) if the registry is empty or any process
    /// is unfinished.
    pub fn calculate(registry: &ProcessRegistry, gantt: &GanttLog) -> Option<Self> {
        if registry.is_empty() || !registry.all_finished() {
            return None;
        }

        let processes: Vec<ProcessStats> = registry
            .ordered()
            .into_iter()
            .map(ProcessStats::from_process)
            .collect::<Option<_>>()?;

        let n = processes.len() as f64;
        let total_wait: i64 = processes.iter().map(|s| s.waiting).sum();
        let total_turnaround: i64 = processes.iter().map(|s| s.turnaround).sum();
        let total_response: i64 = processes.iter().map(|s| s.response).sum();
        let busy: i64 = processes.iter().map(|s| s.burst).sum();

        let last_finish = processes.iter().map(|s| s.finish).max()?;
        let first_arrival = registry.processes().iter().map(Process::arrival).min()?;
        let makespan = last_finish - first_arrival;
        let horizon = (if makespan == 0 { 1 } else { makespan }) as f64;

        Some(Self {
            makespan,
            avg_wait: total_wait as f64 / n,
            avg_turnaround: total_turnaround as f64 / n,
            avg_response: total_response as f64 / n,
            throughput: n / horizon,
            cpu_utilization: busy as f64 / horizon,
            idle_ticks: gantt.idle_ticks(),
            context_switches: gantt.context_switches(),
            processes,
        })
    }

    /// Stats for one process.
    pub fn process(&self, pid: &str) -> Option<&ProcessStats> {
        self.processes.iter().find(|s| s.pid == pid)
    }

    /// Largest waiting time of any single process.
    pub fn max_wait(&self) -> i64 {
        self.processes.iter().map(|s| s.waiting).max().unwrap_or(0)
    }
}
