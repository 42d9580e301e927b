//! Simulation configuration.
//!
//! Holds the active algorithm and the Round-Robin quantum. Both are read
//! once per tick, so they may be changed between ticks of a running
//! simulation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SimError};
use crate::validation::{ValidationError, ValidationErrorKind};

/// Quantum used when none is configured.
pub const DEFAULT_QUANTUM: u32 = 2;

/// Scheduling algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First-Come, First-Served.
    #[default]
    Fcfs,
    /// Shortest Job First (non-preemptive).
    Sjf,
    /// Shortest Remaining Time First (preemptive SJF).
    Srtf,
    /// Round Robin with a fixed quantum.
    RoundRobin,
    /// Static priority (lower value = more urgent).
    Priority,
}

impl Algorithm {
    /// Every algorithm, in presentation order.
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Fcfs,
        Algorithm::Sjf,
        Algorithm::Srtf,
        Algorithm::RoundRobin,
        Algorithm::Priority,
    ];

    /// Display name (e.g., "FCFS", "Round Robin").
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::Srtf => "SRTF",
            Algorithm::RoundRobin => "Round Robin",
            Algorithm::Priority => "Priority",
        }
    }

    /// Long description.
    pub fn description(&self) -> &'static str {
        match self {
            Algorithm::Fcfs => "First-Come, First-Served",
            Algorithm::Sjf => "Shortest Job First (non-preemptive)",
            Algorithm::Srtf => "Shortest Remaining Time First",
            Algorithm::RoundRobin => "Round Robin",
            Algorithm::Priority => "Priority (lower value first)",
        }
    }

    /// Whether a later arrival can take the CPU from a running process
    /// before it finishes.
    ///
    /// FCFS re-picks every tick as well, but a later arrival never outranks
    /// the running process on arrival time.
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Algorithm::Srtf | Algorithm::RoundRobin | Algorithm::Priority
        )
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "fcfs" | "fifo" => Ok(Algorithm::Fcfs),
            "sjf" => Ok(Algorithm::Sjf),
            "srtf" => Ok(Algorithm::Srtf),
            "roundrobin" | "rr" => Ok(Algorithm::RoundRobin),
            "priority" => Ok(Algorithm::Priority),
            _ => Err(ValidationError::new(
                ValidationErrorKind::UnknownAlgorithm,
                format!("Unknown scheduling algorithm: {s}"),
            )
            .into()),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Active algorithm.
    pub algorithm: Algorithm,
    /// Maximum consecutive ticks per Round-Robin turn.
    pub quantum: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            quantum: DEFAULT_QUANTUM,
        }
    }
}

impl SimConfig {
    /// Creates the default configuration (FCFS, quantum 2).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the algorithm.
    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Sets the Round-Robin quantum.
    pub fn with_quantum(mut self, quantum: u32) -> Self {
        self.quantum = quantum;
        self
    }

    /// Checks that the quantum is positive.
    pub fn validate(&self) -> Result<()> {
        if self.quantum == 0 {
            return Err(SimError::illegal_state("quantum must be positive"));
        }
        Ok(())
    }
}
