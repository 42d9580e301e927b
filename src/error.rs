//! Crate-wide error type.
//!
//! Every failure is synchronous and reported straight to the caller; the
//! engine has no I/O and never retries.

use crate::validation::ValidationError;

/// Errors returned by registry, configuration and engine operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SimError {
    /// Invalid process parameters or configuration values.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A workload or snapshot with one or more invalid processes; every
    /// problem found is kept.
    #[error("Invalid workload: {}", join_messages(.0))]
    InvalidWorkload(Vec<ValidationError>),

    /// Lookup or removal of a pid that is not registered.
    #[error("Process not found: {0}")]
    NotFound(String),

    /// Operation not permitted in the current simulation state.
    #[error("Illegal state: {0}")]
    IllegalState(String),
}

impl SimError {
    pub(crate) fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for simulation operations.
pub type Result<T> = std::result::Result<T, SimError>;
