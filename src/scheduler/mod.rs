//! Tick-driven scheduling engine and KPI evaluation.
//!
//! # Algorithm
//!
//! [`Simulation`] advances one tick at a time. On every tick the active
//! [`Algorithm`](crate::config::Algorithm) picks a ready process (or idles)
//! using the selection rules in [`dispatching`](crate::dispatching) or, for
//! Round Robin, the rotation kept in [`RoundRobinQueue`].
//!
//! # KPI
//!
//! [`SimulationKpi`] computes waiting, turnaround and response times,
//! makespan, throughput and CPU utilization once every process finished.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod kpi;
mod policy;
mod round_robin;
mod simulation;

pub use kpi::{ProcessStats, SimulationKpi};
pub use round_robin::RoundRobinQueue;
pub use simulation::{Simulation, TickReport};
