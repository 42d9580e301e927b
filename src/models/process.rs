//! Process model.
//!
//! A process is the unit of CPU work being simulated: it becomes eligible
//! at its arrival tick and needs `burst` ticks of CPU time to complete.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5

use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationError};

/// Pid reserved for ticks on which no process held the CPU.
pub const IDLE_PID: &str = "idle";

/// Definition of a process before it is registered.
///
/// This is the shape a presentation layer collects from its forms (or
/// loads from a file); [`ProcessRegistry`](crate::registry::ProcessRegistry)
/// validates it and turns it into a live [`Process`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Unique process identifier.
    pub pid: String,
    /// Tick at which the process becomes eligible to run.
    pub arrival: i64,
    /// Total CPU ticks required.
    pub burst: i64,
    /// Scheduling priority (lower = more urgent).
    #[serde(default)]
    pub priority: i32,
}

impl ProcessSpec {
    /// Creates a spec with priority 0.
    pub fn new(pid: impl Into<String>, arrival: i64, burst: i64) -> Self {
        Self {
            pid: pid.into(),
            arrival,
            burst,
            priority: 0,
        }
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// A registered process together with its runtime progress.
///
/// `burst`, `arrival` and `priority` are fixed at creation. `remaining`,
/// `start` and `finish` are advanced by the scheduling engine and rewound
/// by [`Process::reset`].
///
/// # Invariants
/// - `0 <= remaining <= burst`
/// - `start` and `finish` are each set at most once per run
/// - once finished, `finish - arrival >= burst`
///
/// Deserialization enforces these through [`validation::validate_process`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProcessRecord")]
pub struct Process {
    pid: String,
    arrival: i64,
    burst: i64,
    remaining: i64,
    priority: i32,
    start: Option<i64>,
    finish: Option<i64>,
}

/// Serialized shape of [`Process`], checked before it becomes one.
#[derive(Deserialize)]
struct ProcessRecord {
    pid: String,
    arrival: i64,
    burst: i64,
    remaining: i64,
    #[serde(default)]
    priority: i32,
    start: Option<i64>,
    finish: Option<i64>,
}

impl TryFrom<ProcessRecord> for Process {
    type Error = ValidationError;

    fn try_from(record: ProcessRecord) -> Result<Self, Self::Error> {
        let process = Self {
            pid: record.pid,
            arrival: record.arrival,
            burst: record.burst,
            remaining: record.remaining,
            priority: record.priority,
            start: record.start,
            finish: record.finish,
        };
        validation::validate_process(&process)?;
        Ok(process)
    }
}

impl Process {
    /// Builds a fresh process from an already-validated spec.
    pub(crate) fn from_spec(spec: ProcessSpec) -> Self {
        Self {
            pid: spec.pid,
            arrival: spec.arrival,
            burst: spec.burst,
            remaining: spec.burst,
            priority: spec.priority,
            start: None,
            finish: None,
        }
    }

    /// Process identifier.
    pub fn pid(&self) -> &str {
        &self.pid
    }

    /// Arrival tick.
    pub fn arrival(&self) -> i64 {
        self.arrival
    }

    /// Total CPU ticks required.
    pub fn burst(&self) -> i64 {
        self.burst
    }

    /// CPU ticks still owed.
    pub fn remaining(&self) -> i64 {
        self.remaining
    }

    /// Scheduling priority (lower = more urgent).
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Tick of first execution, if it has run.
    pub fn start(&self) -> Option<i64> {
        self.start
    }

    /// Completion tick (exclusive end of the last executed tick).
    pub fn finish(&self) -> Option<i64> {
        self.finish
    }

    /// Whether all work is done.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// Whether the process is eligible to run at `now`.
    #[inline]
    pub fn is_ready_at(&self, now: i64) -> bool {
        self.arrival <= now && self.remaining > 0
    }

    /// Fraction of the burst already executed (0.0..=1.0).
    pub fn progress(&self) -> f64 {
        if self.burst <= 0 {
            return 1.0;
        }
        1.0 - self.remaining as f64 / self.burst as f64
    }

    /// Turnaround (`finish - arrival`), once finished.
    pub fn turnaround(&self) -> Option<i64> {
        self.finish.map(|f| f - self.arrival)
    }

    /// Waiting time (`turnaround - burst`), once finished.
    pub fn waiting(&self) -> Option<i64> {
        self.turnaround().map(|t| t - self.burst)
    }

    /// Response time (`start - arrival`), once started.
    pub fn response(&self) -> Option<i64> {
        self.start.map(|s| s - self.arrival)
    }

    /// The spec this process was created from.
    pub fn spec(&self) -> ProcessSpec {
        ProcessSpec {
            pid: self.pid.clone(),
            arrival: self.arrival,
            burst: self.burst,
            priority: self.priority,
        }
    }

    /// Executes one tick starting at `now`.
    ///
    /// Marks `start` on first execution and `finish = now + 1` when the
    /// last owed tick is consumed. Returns `true` if the process finished.
    pub(crate) fn execute_tick(&mut self, now: i64) -> bool {
        debug_assert!(self.remaining > 0, "process {} has no work left", self.pid);
        if self.start.is_none() {
            self.start = Some(now);
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.finish = Some(now + 1);
            true
        } else {
            false
        }
    }

    /// Rewinds runtime progress to the freshly-created state.
    pub(crate) fn reset(&mut self) {
        self.remaining = self.burst;
        self.start = None;
        self.finish = None;
    }
}

/// Display status of a process at the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessStatus {
    /// Not yet arrived.
    Waiting,
    /// Arrived and waiting for the CPU.
    Ready,
    /// Held the CPU on the last executed tick.
    Running,
    /// All work done.
    Done,
}

impl ProcessStatus {
    /// Short label.
    pub fn label(&self) -> &'static str {
        match self {
            ProcessStatus::Waiting => "Waiting",
            ProcessStatus::Ready => "Ready",
            ProcessStatus::Running => "Running",
            ProcessStatus::Done => "Done",
        }
    }
}
