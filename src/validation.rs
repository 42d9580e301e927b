//! Input validation for process definitions.
//!
//! Checks process parameters before they enter the registry. Detects:
//! - Duplicate pids
//! - Empty or reserved pids
//! - Non-positive bursts
//! - Negative arrival ticks
//! - Runtime progress that no run could have produced (restored snapshots)

use crate::models::{Process, ProcessSpec, IDLE_PID};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two processes share the same pid.
    DuplicateId,
    /// The pid is blank.
    EmptyId,
    /// The pid collides with the idle sentinel.
    ReservedId,
    /// Burst is zero or negative.
    NonPositiveBurst,
    /// Arrival tick is negative.
    NegativeArrival,
    /// An algorithm name could not be parsed.
    UnknownAlgorithm,
    /// Restored runtime state contradicts itself.
    InconsistentState,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validates the parameters of a single process, ignoring uniqueness.
///
/// Returns the first problem found.
pub fn validate_spec(spec: &ProcessSpec) -> Result<(), ValidationError> {
    if spec.pid.trim().is_empty() {
        return Err(ValidationError::new(
            ValidationErrorKind::EmptyId,
            "Process ID must not be empty",
        ));
    }
    if spec.pid == IDLE_PID {
        return Err(ValidationError::new(
            ValidationErrorKind::ReservedId,
            format!("Process ID '{IDLE_PID}' is reserved for idle ticks"),
        ));
    }
    if spec.burst <= 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::NonPositiveBurst,
            format!("Process '{}' has non-positive burst {}", spec.pid, spec.burst),
        ));
    }
    if spec.arrival < 0 {
        return Err(ValidationError::new(
            ValidationErrorKind::NegativeArrival,
            format!(
                "Process '{}' has negative arrival {}",
                spec.pid, spec.arrival
            ),
        ));
    }
    Ok(())
}

/// Validates a restored process: its parameters plus its runtime fields.
///
/// Checks:
/// 1. The parameters pass [`validate_spec`]
/// 2. `0 <= remaining <= burst`
/// 3. `start` is set exactly when some work was executed, never before arrival
/// 4. `finish` is set exactly when `remaining == 0`, at least `burst` ticks after `start`
pub fn validate_process(process: &Process) -> Result<(), ValidationError> {
    let pid = process.pid();
    validate_spec(&process.spec())?;

    let inconsistent = |detail: String| {
        Err(ValidationError::new(
            ValidationErrorKind::InconsistentState,
            format!("Process '{pid}' {detail}"),
        ))
    };

    if !(0..=process.burst()).contains(&process.remaining()) {
        return inconsistent(format!(
            "has remaining {} outside [0, {}]",
            process.remaining(),
            process.burst()
        ));
    }
    let executed = process.remaining() < process.burst();
    match process.start() {
        None if executed => return inconsistent("has executed work but no start".into()),
        Some(start) if !executed => {
            return inconsistent(format!("has start {start} but no executed work"))
        }
        Some(start) if start < process.arrival() => {
            return inconsistent(format!(
                "starts at {start} before its arrival {}",
                process.arrival()
            ))
        }
        _ => {}
    }
    match (process.finish(), process.start()) {
        (None, _) if process.is_finished() => inconsistent("has no work left but no finish".into()),
        (Some(finish), _) if !process.is_finished() => {
            inconsistent(format!("finishes at {finish} with work left"))
        }
        (Some(finish), Some(start)) if finish - start < process.burst() => inconsistent(format!(
            "ran {start}..{finish}, shorter than its burst {}",
            process.burst()
        )),
        _ => Ok(()),
    }
}

/// Validates a whole workload.
///
/// Checks:
/// 1. Every spec passes [`validate_spec`]
/// 2. No two specs share a pid
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_workload(specs: &[ProcessSpec]) -> ValidationResult {
    let mut errors = Vec::new();
    let mut pids = HashSet::new();

    for spec in specs {
        if let Err(e) = validate_spec(spec) {
            errors.push(e);
        }
        if !pids.insert(spec.pid.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", spec.pid),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restored(json: &str) -> Result<Process, serde_json::Error> {
        serde_json::from_str(json)
    }

    fn sample_specs() -> Vec<ProcessSpec> {
        vec![
            ProcessSpec::new("P1", 0, 5).with_priority(1),
            ProcessSpec::new("P2", 2, 3).with_priority(2),
            ProcessSpec::new("P3", 4, 2).with_priority(1),
        ]
    }

    #[test]
    fn test_valid_workload() {
        assert!(validate_workload(&sample_specs()).is_ok());
        assert!(validate_workload(&[]).is_ok());
    }

    #[test]
    fn test_duplicate_pid() {
        let specs = vec![ProcessSpec::new("P1", 0, 1), ProcessSpec::new("P1", 3, 2)];
        let errors = validate_workload(&specs).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId));
    }

    #[test]
    fn test_non_positive_burst() {
        let err = validate_spec(&ProcessSpec::new("P1", 0, 0)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NonPositiveBurst);
        let err = validate_spec(&ProcessSpec::new("P1", 0, -3)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NonPositiveBurst);
    }

    #[test]
    fn test_negative_arrival() {
        let err = validate_spec(&ProcessSpec::new("P1", -1, 2)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::NegativeArrival);
    }

    #[test]
    fn test_empty_and_reserved_pid() {
        let err = validate_spec(&ProcessSpec::new("  ", 0, 2)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::EmptyId);
        let err = validate_spec(&ProcessSpec::new(IDLE_PID, 0, 2)).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::ReservedId);
    }

    #[test]
    fn test_multiple_errors() {
        let specs = vec![
            ProcessSpec::new("P1", -4, 1),
            ProcessSpec::new("P2", 0, 0),
            ProcessSpec::new("P2", 0, 1),
        ];
        let errors = validate_workload(&specs).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_process_progress_consistent() {
        let p = restored(
            r#"{"pid":"A","arrival":1,"burst":3,"remaining":1,"priority":0,"start":2,"finish":null}"#,
        )
        .unwrap();
        assert!(validate_process(&p).is_ok());
        let done = restored(
            r#"{"pid":"A","arrival":0,"burst":2,"remaining":0,"priority":0,"start":0,"finish":4}"#,
        )
        .unwrap();
        assert!(validate_process(&done).is_ok());
    }

    #[test]
    fn test_process_remaining_out_of_range() {
        let err = restored(
            r#"{"pid":"A","arrival":0,"burst":1,"remaining":3,"priority":0,"start":null,"finish":null}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("remaining 3 outside [0, 1]"));
        assert!(restored(
            r#"{"pid":"A","arrival":0,"burst":1,"remaining":-1,"priority":0,"start":0,"finish":1}"#,
        )
        .is_err());
    }

    #[test]
    fn test_process_start_and_finish_must_match_progress() {
        // executed work without a start
        assert!(restored(
            r#"{"pid":"A","arrival":0,"burst":2,"remaining":1,"priority":0,"start":null,"finish":null}"#,
        )
        .is_err());
        // started before arrival
        assert!(restored(
            r#"{"pid":"A","arrival":5,"burst":2,"remaining":1,"priority":0,"start":3,"finish":null}"#,
        )
        .is_err());
        // finished with work left
        assert!(restored(
            r#"{"pid":"A","arrival":0,"burst":2,"remaining":1,"priority":0,"start":0,"finish":2}"#,
        )
        .is_err());
        // done but never finished
        assert!(restored(
            r#"{"pid":"A","arrival":0,"burst":2,"remaining":0,"priority":0,"start":0,"finish":null}"#,
        )
        .is_err());
        // finished faster than the burst allows
        assert!(restored(
            r#"{"pid":"A","arrival":0,"burst":3,"remaining":0,"priority":0,"start":0,"finish":2}"#,
        )
        .is_err());
    }

    #[test]
    fn test_process_parameters_checked_on_restore() {
        let err = restored(
            r#"{"pid":"idle","arrival":0,"burst":1,"remaining":1,"priority":0,"start":null,"finish":null}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }
}
