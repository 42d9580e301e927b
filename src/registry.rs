//! Process registry.
//!
//! Owns the set of process definitions and their runtime fields. The
//! scheduling engine mutates the processes it dispatches but never adds
//! or removes entries; that is done only through the registry API.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dispatching::RuleEngine;
use crate::error::{Result, SimError};
use crate::models::{Process, ProcessSpec};
use crate::validation::{self, ValidationError, ValidationErrorKind};

/// Ordered collection of registered processes.
///
/// Insertion order is preserved; [`ProcessRegistry::ordered`] provides
/// the arrival-then-pid view used for display and Round-Robin admission.
/// A restored registry is checked for unique, valid pids like
/// [`ProcessRegistry::from_specs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RegistryRecord")]
pub struct ProcessRegistry {
    processes: Vec<Process>,
}

#[derive(Deserialize)]
struct RegistryRecord {
    processes: Vec<Process>,
}

impl TryFrom<RegistryRecord> for ProcessRegistry {
    type Error = SimError;

    fn try_from(record: RegistryRecord) -> Result<Self> {
        let specs: Vec<ProcessSpec> = record.processes.iter().map(Process::spec).collect();
        validation::validate_workload(&specs).map_err(SimError::InvalidWorkload)?;
        Ok(Self {
            processes: record.processes,
        })
    }
}

impl ProcessRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a workload, rejecting it as a whole if any
    /// spec is invalid.
    ///
    /// # Errors
    /// `InvalidWorkload` carrying every problem found.
    pub fn from_specs(specs: impl IntoIterator<Item = ProcessSpec>) -> Result<Self> {
        let specs: Vec<ProcessSpec> = specs.into_iter().collect();
        validation::validate_workload(&specs).map_err(SimError::InvalidWorkload)?;
        Ok(Self {
            processes: specs.into_iter().map(Process::from_spec).collect(),
        })
    }

    /// Registers a new process with `remaining = burst` and no start/finish.
    ///
    /// # Errors
    /// `Validation` if the pid is empty, reserved or already taken, the
    /// burst is non-positive, or the arrival is negative.
    pub fn add(&mut self, spec: ProcessSpec) -> Result<&Process> {
        validation::validate_spec(&spec)?;
        if self.contains(&spec.pid) {
            return Err(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", spec.pid),
            )
            .into());
        }
        debug!(
            pid = %spec.pid,
            arrival = spec.arrival,
            burst = spec.burst,
            priority = spec.priority,
            "process registered"
        );
        self.processes.push(Process::from_spec(spec));
        let index = self.processes.len() - 1;
        Ok(&self.processes[index])
    }

    /// Registers a process under the next free `P{n}` pid.
    pub fn add_auto(&mut self, arrival: i64, burst: i64, priority: i32) -> Result<&Process> {
        let pid = self.next_pid();
        self.add(ProcessSpec::new(pid, arrival, burst).with_priority(priority))
    }

    /// Suggests a pid for a new process: `P{len + 1}`, bumped until unused.
    pub fn next_pid(&self) -> String {
        let mut n = self.processes.len() + 1;
        loop {
            let pid = format!("P{n}");
            if !self.contains(&pid) {
                return pid;
            }
            n += 1;
        }
    }

    /// Removes a process by pid.
    ///
    /// # Errors
    /// `NotFound` if no process has this pid.
    pub fn remove(&mut self, pid: &str) -> Result<Process> {
        let index = self
            .position(pid)
            .ok_or_else(|| SimError::NotFound(pid.to_string()))?;
        debug!(pid, "process removed");
        Ok(self.processes.remove(index))
    }

    /// Rewinds every process to `remaining = burst`, no start/finish.
    pub fn reset(&mut self) {
        for p in &mut self.processes {
            p.reset();
        }
    }

    /// Looks up a process.
    pub fn get(&self, pid: &str) -> Option<&Process> {
        self.processes.iter().find(|p| p.pid() == pid)
    }

    /// Looks up a process, failing with `NotFound`.
    pub fn try_get(&self, pid: &str) -> Result<&Process> {
        self.get(pid)
            .ok_or_else(|| SimError::NotFound(pid.to_string()))
    }

    /// Whether a pid is registered.
    pub fn contains(&self, pid: &str) -> bool {
        self.position(pid).is_some()
    }

    /// Index of a pid in insertion order.
    pub(crate) fn position(&self, pid: &str) -> Option<usize> {
        self.processes.iter().position(|p| p.pid() == pid)
    }

    pub(crate) fn by_index(&self, index: usize) -> &Process {
        &self.processes[index]
    }

    pub(crate) fn by_index_mut(&mut self, index: usize) -> &mut Process {
        &mut self.processes[index]
    }

    /// Processes in insertion order.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    /// Indices sorted by arrival, then pid.
    pub(crate) fn ordered_indices(&self) -> Vec<usize> {
        let all: Vec<&Process> = self.processes.iter().collect();
        RuleEngine::new().sort_indices(&all)
    }

    /// Processes sorted by arrival, then pid.
    pub fn ordered(&self) -> Vec<&Process> {
        self.ordered_indices()
            .into_iter()
            .map(|i| &self.processes[i])
            .collect()
    }

    /// Indices of processes eligible to run at `now`, in insertion order.
    pub(crate) fn ready_indices(&self, now: i64) -> Vec<usize> {
        self.processes
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_ready_at(now))
            .map(|(i, _)| i)
            .collect()
    }

    /// Whether every process has finished. Vacuously true when empty.
    pub fn all_finished(&self) -> bool {
        self.processes.iter().all(Process::is_finished)
    }

    /// Number of registered processes.
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Current definitions of all processes, in insertion order.
    pub fn specs(&self) -> Vec<ProcessSpec> {
        self.processes.iter().map(Process::spec).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> ProcessRegistry {
        ProcessRegistry::from_specs(vec![
            ProcessSpec::new("P2", 2, 3),
            ProcessSpec::new("P1", 0, 5),
            ProcessSpec::new("P0", 2, 1),
        ])
        .unwrap()
    }

    #[test]
    fn test_add_initializes_runtime_fields() {
        let mut reg = ProcessRegistry::new();
        let p = reg.add(ProcessSpec::new("P1", 1, 4).with_priority(3)).unwrap();
        assert_eq!(p.remaining(), 4);
        assert_eq!(p.priority(), 3);
        assert_eq!(p.start(), None);
        assert_eq!(p.finish(), None);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut reg = sample_registry();
        let err = reg.add(ProcessSpec::new("P1", 0, 1)).unwrap_err();
        match err {
            SimError::Validation(v) => assert_eq!(v.kind, ValidationErrorKind::DuplicateId),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_add_rejects_bad_parameters() {
        let mut reg = ProcessRegistry::new();
        assert!(reg.add(ProcessSpec::new("P1", 0, 0)).is_err());
        assert!(reg.add(ProcessSpec::new("P1", -1, 2)).is_err());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_from_specs_rejects_duplicates() {
        let err = ProcessRegistry::from_specs(vec![
            ProcessSpec::new("A", 0, 1),
            ProcessSpec::new("A", 1, 1),
        ])
        .unwrap_err();
        match err {
            SimError::InvalidWorkload(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateId);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_specs_reports_every_error() {
        let err = ProcessRegistry::from_specs(vec![
            ProcessSpec::new("P1", -1, 2),
            ProcessSpec::new("P2", 0, 0),
            ProcessSpec::new("P1", 0, 1),
        ])
        .unwrap_err();
        let kinds: Vec<ValidationErrorKind> = match err {
            SimError::InvalidWorkload(errors) => errors.into_iter().map(|e| e.kind).collect(),
            other => panic!("unexpected error: {other:?}"),
        };
        assert_eq!(
            kinds,
            vec![
                ValidationErrorKind::NegativeArrival,
                ValidationErrorKind::NonPositiveBurst,
                ValidationErrorKind::DuplicateId,
            ]
        );
    }

    #[test]
    fn test_restore_round_trip() {
        let mut reg = sample_registry();
        let index = reg.position("P1").unwrap();
        reg.by_index_mut(index).execute_tick(0);
        let json = serde_json::to_string(&reg).unwrap();
        let restored: ProcessRegistry = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, reg);
    }

    #[test]
    fn test_restore_rejects_duplicate_pids() {
        let record = |pid: &str| {
            format!(
                r#"{{"pid":"{pid}","arrival":0,"burst":1,"remaining":1,"priority":0,"start":null,"finish":null}}"#
            )
        };
        let json = format!(r#"{{"processes":[{},{}]}}"#, record("A"), record("A"));
        let err = serde_json::from_str::<ProcessRegistry>(&json).unwrap_err();
        assert!(err.to_string().contains("Duplicate process ID: A"));
    }

    #[test]
    fn test_remove() {
        let mut reg = sample_registry();
        let removed = reg.remove("P2").unwrap();
        assert_eq!(removed.pid(), "P2");
        assert!(!reg.contains("P2"));
        assert_eq!(reg.remove("P2"), Err(SimError::NotFound("P2".into())));
    }

    #[test]
    fn test_ordered_by_arrival_then_pid() {
        let reg = sample_registry();
        let pids: Vec<&str> = reg.ordered().iter().map(|p| p.pid()).collect();
        assert_eq!(pids, vec!["P1", "P0", "P2"]);
    }

    #[test]
    fn test_next_pid_skips_taken() {
        let mut reg = ProcessRegistry::new();
        assert_eq!(reg.next_pid(), "P1");
        reg.add(ProcessSpec::new("P2", 0, 1)).unwrap();
        // len 1 → P2 is taken → P3
        assert_eq!(reg.next_pid(), "P3");
        let p = reg.add_auto(4, 2, 1).unwrap();
        assert_eq!(p.pid(), "P3");
        assert_eq!(p.arrival(), 4);
    }

    #[test]
    fn test_ready_indices_and_all_finished() {
        let reg = sample_registry();
        assert_eq!(reg.ready_indices(0), vec![1]);
        assert_eq!(reg.ready_indices(2), vec![0, 1, 2]);
        assert!(!reg.all_finished());
        assert!(ProcessRegistry::new().all_finished());
    }

    #[test]
    fn test_reset_rewinds_progress() {
        let mut reg = sample_registry();
        reg.by_index_mut(2).execute_tick(2);
        assert!(reg.get("P0").unwrap().is_finished());
        reg.reset();
        let p0 = reg.get("P0").unwrap();
        assert_eq!(p0.remaining(), 1);
        assert_eq!(p0.finish(), None);
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_try_get() {
        let reg = sample_registry();
        assert_eq!(reg.try_get("P1").unwrap().burst(), 5);
        assert!(matches!(reg.try_get("nope"), Err(SimError::NotFound(_))));
    }
}
