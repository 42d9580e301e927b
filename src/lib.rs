//! Uniprocessor CPU scheduling simulator for the U-Engine ecosystem.
//!
//! Simulates classic scheduling algorithms tick by tick over a synthetic
//! workload and reports the execution timeline and performance metrics.
//! Rendering and pacing are left to the caller: this crate only owns the
//! simulation state and the decisions made on each tick.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Process`, `ProcessSpec`, `GanttLog`,
//!   `GanttInterval`, `WaitingSample`
//! - **`registry`**: The process collection and its lifecycle
//! - **`dispatching`**: Selection rules and the tie-breaking rule engine
//! - **`scheduler`**: The tick engine (`Simulation`), Round-Robin queue and KPIs
//! - **`config`**: Algorithm selection and quantum
//! - **`validation`**: Input integrity checks (duplicate pids, bad bursts)
//! - **`workload`**: Demo and seeded random workloads
//!
//! # Example
//!
//! ```
//! use u_cpusched::{workload, Algorithm, SimConfig, Simulation};
//!
//! let config = SimConfig::new().with_algorithm(Algorithm::Fcfs);
//! let mut sim = Simulation::from_specs(config, workload::sample()).unwrap();
//!
//! while !sim.is_finished() {
//!     sim.advance_tick().unwrap();
//! }
//! let kpi = sim.compute_metrics().unwrap();
//! assert_eq!(kpi.makespan, 10);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod config;
pub mod dispatching;
pub mod error;
pub mod models;
pub mod registry;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use config::{Algorithm, SimConfig};
pub use error::{Result, SimError};
pub use models::{GanttInterval, Process, ProcessSpec, ProcessStatus, IDLE_PID};
pub use registry::ProcessRegistry;
pub use scheduler::{Simulation, SimulationKpi, TickReport};
