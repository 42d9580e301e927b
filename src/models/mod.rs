//! Simulation domain models.
//!
//! Provides the data types shared by the registry, the scheduling engine,
//! and any presentation layer reading simulation state.
//!
//! # Domain Mappings
//!
//! | u-cpusched | Textbook term | Visualization |
//! |------------|---------------|---------------|
//! | Process | Job / PCB | Table row |
//! | GanttInterval | CPU burst slice | Gantt bar |
//! | WaitingSample | Ready-queue length | Queue chart point |

mod gantt;
mod process;

pub use gantt::{GanttInterval, GanttLog, WaitingSample};
pub use process::{Process, ProcessSpec, ProcessStatus, IDLE_PID};
