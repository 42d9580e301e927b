//! Tick-driven simulation state and engine.
//!
//! [`Simulation`] is the single owner of everything a run needs: the
//! process registry, the clock, the Gantt log, the waiting history, the
//! running marker and the Round-Robin queue. Every operation goes through
//! it explicitly; there is no ambient state.
//!
//! # Tick
//!
//! Each [`Simulation::advance_tick`] call, in order:
//! 1. Collects the ready set (`arrival <= now`, `remaining > 0`).
//! 2. Samples the waiting count (ready minus the running marker).
//! 3. Lets the active policy pick a process or idle, executes one tick of
//!    it and extends the Gantt log.
//! 4. Advances the clock by one.
//!
//! Ticks are atomic and carry no wall-clock semantics, so a paused run
//! resumes exactly where it stopped, including after a serde round trip.
//! A restored snapshot is rejected unless its parts agree with each other:
//! every process is consistent, the Gantt log and waiting history cover
//! exactly `[0, sim_time)`, and every pid they or the running marker or
//! the Round-Robin queue name is registered.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{Algorithm, SimConfig};
use crate::error::{Result, SimError};
use crate::models::{GanttLog, Process, ProcessSpec, ProcessStatus, WaitingSample};
use crate::registry::ProcessRegistry;
use crate::validation::{ValidationError, ValidationErrorKind};

use super::policy::StepContext;
use super::{RoundRobinQueue, SimulationKpi};

/// What happened during one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick that was executed.
    pub tick: i64,
    /// Pid that held the CPU, `None` when idle.
    pub pid: Option<String>,
    /// Whether that process finished on this tick.
    pub completed: bool,
}

fn inconsistent(message: String) -> SimError {
    ValidationError::new(ValidationErrorKind::InconsistentState, message).into()
}

/// A uniprocessor scheduling simulation.
///
/// # Example
/// ```
/// use u_cpusched::{Algorithm, ProcessSpec, SimConfig, Simulation};
///
/// let mut sim = Simulation::new(SimConfig::new().with_algorithm(Algorithm::Srtf)).unwrap();
/// sim.add_process(ProcessSpec::new("P1", 0, 8)).unwrap();
/// sim.add_process(ProcessSpec::new("P2", 1, 4)).unwrap();
///
/// let kpi = sim.run_to_completion().unwrap();
/// assert_eq!(sim.sim_time(), 12);
/// assert_eq!(kpi.makespan, 12);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SimulationRecord")]
pub struct Simulation {
    config: SimConfig,
    registry: ProcessRegistry,
    clock: i64,
    gantt: GanttLog,
    waiting_history: Vec<WaitingSample>,
    running: Option<String>,
    round_robin: RoundRobinQueue,
}

/// Serialized shape of [`Simulation`], checked before it is resumed.
#[derive(Deserialize)]
struct SimulationRecord {
    config: SimConfig,
    registry: ProcessRegistry,
    clock: i64,
    gantt: GanttLog,
    waiting_history: Vec<WaitingSample>,
    running: Option<String>,
    round_robin: RoundRobinQueue,
}

impl TryFrom<SimulationRecord> for Simulation {
    type Error = SimError;

    fn try_from(record: SimulationRecord) -> Result<Self> {
        let sim = Self {
            config: record.config,
            registry: record.registry,
            clock: record.clock,
            gantt: record.gantt,
            waiting_history: record.waiting_history,
            running: record.running,
            round_robin: record.round_robin,
        };
        sim.config.validate()?;
        sim.check_timeline()?;
        sim.check_references()?;
        Ok(sim)
    }
}

impl Simulation {
    /// Creates an empty simulation.
    ///
    /// # Errors
    /// `IllegalState` if the quantum is zero.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Default::default()
        })
    }

    /// Creates a simulation over an existing registry, rewound to t=0.
    pub fn with_registry(config: SimConfig, mut registry: ProcessRegistry) -> Result<Self> {
        config.validate()?;
        registry.reset();
        Ok(Self {
            config,
            registry,
            ..Default::default()
        })
    }

    /// Creates a simulation from a workload definition.
    ///
    /// # Errors
    /// `InvalidWorkload` listing every invalid spec, or `IllegalState` if
    /// the quantum is zero.
    pub fn from_specs(
        config: SimConfig,
        specs: impl IntoIterator<Item = ProcessSpec>,
    ) -> Result<Self> {
        Self::with_registry(config, ProcessRegistry::from_specs(specs)?)
    }

    // ======================== Configuration ========================

    /// Current configuration.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Switches the algorithm. Round-Robin state is discarded on change.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        if self.config.algorithm != algorithm {
            debug!(from = %self.config.algorithm, to = %algorithm, "algorithm switched");
            self.config.algorithm = algorithm;
            self.round_robin.clear();
        }
    }

    /// Sets the Round-Robin quantum.
    ///
    /// # Errors
    /// `IllegalState` if `quantum` is zero; the old value is kept.
    pub fn set_quantum(&mut self, quantum: u32) -> Result<()> {
        let candidate = self.config.with_quantum(quantum);
        if let Err(e) = candidate.validate() {
            warn!(quantum, "rejected quantum");
            return Err(e);
        }
        self.config = candidate;
        Ok(())
    }

    // ======================== Registry ========================

    /// Registers a process.
    pub fn add_process(&mut self, spec: ProcessSpec) -> Result<&Process> {
        self.registry.add(spec)
    }

    /// Registers a process under the next free `P{n}` pid.
    pub fn add_process_auto(&mut self, arrival: i64, burst: i64, priority: i32) -> Result<&Process> {
        self.registry.add_auto(arrival, burst, priority)
    }

    /// Removes a process.
    ///
    /// # Errors
    /// - `IllegalState` if a run is in progress (clock past zero); reset first.
    /// - `NotFound` if the pid is not registered.
    pub fn remove_process(&mut self, pid: &str) -> Result<Process> {
        if self.clock > 0 {
            warn!(pid, sim_time = self.clock, "rejected removal during a run");
            return Err(SimError::illegal_state(format!(
                "cannot remove '{pid}' at t={}; reset the simulation first",
                self.clock
            )));
        }
        self.registry.remove(pid)
    }

    /// Rewinds to t=0: processes, clock, Gantt log, waiting history,
    /// running marker and Round-Robin queue. Processes are kept.
    pub fn reset(&mut self) {
        self.registry.reset();
        self.clock = 0;
        self.gantt.clear();
        self.waiting_history.clear();
        self.running = None;
        self.round_robin.clear();
        debug!(processes = self.registry.len(), "simulation reset");
    }

    // ======================== Engine ========================

    /// Executes one tick.
    ///
    /// # Errors
    /// `IllegalState` if every process has already finished (or none are
    /// registered), or if the configured quantum is zero.
    pub fn advance_tick(&mut self) -> Result<TickReport> {
        if self.is_finished() {
            warn!(sim_time = self.clock, "tick requested on a finished simulation");
            return Err(SimError::illegal_state(format!(
                "all processes finished at t={}",
                self.clock
            )));
        }
        self.config.validate()?;

        let now = self.clock;
        let ready = self.registry.ready_indices(now);
        let waiting = ready
            .iter()
            .filter(|&&i| Some(self.registry.by_index(i).pid()) != self.running.as_deref())
            .count();
        self.waiting_history.push(WaitingSample { tick: now, waiting });

        let ctx = StepContext {
            registry: &self.registry,
            ready: &ready,
            running: self.running.as_deref(),
            now,
        };
        let selected = self.config.algorithm.select(&ctx, &mut self.round_robin);

        let report = match selected {
            None => {
                self.gantt.record_idle(now);
                self.running = None;
                debug!(tick = now, "idle");
                TickReport {
                    tick: now,
                    pid: None,
                    completed: false,
                }
            }
            Some(index) => {
                let process = self.registry.by_index_mut(index);
                let completed = process.execute_tick(now);
                let pid = process.pid().to_string();
                self.gantt.record(&pid, now);
                if self.config.algorithm == Algorithm::RoundRobin {
                    self.round_robin.after_run(completed, self.config.quantum);
                }
                debug!(tick = now, pid = %pid, "dispatched");
                if completed {
                    info!(pid = %pid, finish = now + 1, "process completed");
                    self.running = None;
                } else {
                    self.running = Some(pid.clone());
                }
                TickReport {
                    tick: now,
                    pid: Some(pid),
                    completed,
                }
            }
        };

        self.clock += 1;
        if self.is_finished() {
            info!(
                sim_time = self.clock,
                algorithm = %self.config.algorithm,
                "simulation finished"
            );
        }
        Ok(report)
    }

    /// Advances ticks back-to-back until every process finishes, then
    /// returns the KPIs.
    ///
    /// # Errors
    /// `IllegalState` if no process is registered.
    pub fn run_to_completion(&mut self) -> Result<SimulationKpi> {
        while !self.is_finished() {
            self.advance_tick()?;
        }
        self.compute_metrics()
            .ok_or_else(|| SimError::illegal_state("no processes to simulate"))
    }

    /// KPIs of the run, or `None` until every process has finished.
    pub fn compute_metrics(&self) -> Option<SimulationKpi> {
        SimulationKpi::calculate(&self.registry, &self.gantt)
    }

    // ======================== Snapshot checks ========================

    /// Gantt log and waiting history must describe exactly `[0, clock)`,
    /// and each process must have run as many ticks as it consumed.
    fn check_timeline(&self) -> Result<()> {
        if self.clock < 0 {
            return Err(inconsistent(format!("negative sim time {}", self.clock)));
        }
        if !self.gantt.is_contiguous() || self.gantt.total_span() != self.clock {
            return Err(inconsistent(format!(
                "Gantt log does not cover [0, {})",
                self.clock
            )));
        }
        if !self.waiting_history.iter().map(|s| s.tick).eq(0..self.clock) {
            return Err(inconsistent(format!(
                "waiting history does not sample every tick of [0, {})",
                self.clock
            )));
        }
        for p in self.registry.processes() {
            let executed = p.burst() - p.remaining();
            if self.gantt.busy_ticks(p.pid()) != executed {
                return Err(inconsistent(format!(
                    "process '{}' executed {executed} ticks but the Gantt log shows {}",
                    p.pid(),
                    self.gantt.busy_ticks(p.pid())
                )));
            }
            if p.finish().is_some_and(|f| f > self.clock) {
                return Err(inconsistent(format!(
                    "process '{}' finishes after t={}",
                    p.pid(),
                    self.clock
                )));
            }
        }
        Ok(())
    }

    /// Every pid named outside the registry must be registered; the running
    /// marker must name an unfinished process.
    fn check_references(&self) -> Result<()> {
        for interval in self.gantt.intervals() {
            if !interval.is_idle() && !self.registry.contains(&interval.pid) {
                return Err(SimError::NotFound(interval.pid.clone()));
            }
        }
        if let Some(pid) = &self.running {
            let process = self.registry.try_get(pid)?;
            if process.is_finished() {
                return Err(inconsistent(format!(
                    "running marker names finished process '{pid}'"
                )));
            }
        }
        let mut queued = HashSet::new();
        for pid in self.round_robin.pids() {
            self.registry.try_get(pid)?;
            if !queued.insert(pid.as_str()) {
                return Err(inconsistent(format!(
                    "Round-Robin queue holds '{pid}' twice"
                )));
            }
        }
        Ok(())
    }

    // ======================== Observers ========================

    /// Whether every process has finished. True for an empty registry.
    pub fn is_finished(&self) -> bool {
        self.registry.all_finished()
    }

    /// Current simulated time (ticks executed so far).
    pub fn sim_time(&self) -> i64 {
        self.clock
    }

    /// The process registry.
    pub fn registry(&self) -> &ProcessRegistry {
        &self.registry
    }

    /// Processes in insertion order.
    pub fn processes(&self) -> &[Process] {
        self.registry.processes()
    }

    /// Execution timeline.
    pub fn gantt(&self) -> &GanttLog {
        &self.gantt
    }

    /// One waiting-count sample per executed tick.
    pub fn waiting_history(&self) -> &[WaitingSample] {
        &self.waiting_history
    }

    /// Pid that held the CPU on the last tick, if it is still unfinished.
    pub fn running_pid(&self) -> Option<&str> {
        self.running.as_deref()
    }

    /// Round-Robin queue state.
    pub fn round_robin(&self) -> &RoundRobinQueue {
        &self.round_robin
    }

    /// Display status of a process at the current time.
    pub fn status_of(&self, pid: &str) -> Result<ProcessStatus> {
        let p = self.registry.try_get(pid)?;
        Ok(self.status(p))
    }

    fn status(&self, p: &Process) -> ProcessStatus {
        if p.is_finished() {
            ProcessStatus::Done
        } else if p.start().is_some() && self.running.as_deref() == Some(p.pid()) {
            ProcessStatus::Running
        } else if p.arrival() <= self.clock {
            ProcessStatus::Ready
        } else {
            ProcessStatus::Waiting
        }
    }

    /// Pids that have arrived, are unfinished and are not marked running,
    /// ordered by arrival then pid.
    pub fn waiting_pids(&self) -> Vec<&str> {
        self.registry
            .ordered()
            .into_iter()
            .filter(|p| p.is_ready_at(self.clock) && self.running.as_deref() != Some(p.pid()))
            .map(Process::pid)
            .collect()
    }
}
