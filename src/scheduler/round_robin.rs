//! Round-Robin ready queue.
//!
//! The queue holds pids (not process copies) so the registry stays the
//! single owner of process state. A cursor marks the process whose turn
//! it is and `used` counts the ticks it has consumed in that turn.

use serde::{Deserialize, Serialize};

use crate::registry::ProcessRegistry;

/// Transient Round-Robin bookkeeping.
///
/// Discarded on reset and whenever the algorithm changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRobinQueue {
    queue: Vec<String>,
    cursor: usize,
    used: u32,
}

impl RoundRobinQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends newly eligible processes to the tail.
    ///
    /// Arrivals are admitted in arrival-then-pid order, after every pid
    /// already queued.
    pub(crate) fn admit(&mut self, registry: &ProcessRegistry, now: i64) {
        for index in registry.ordered_indices() {
            let p = registry.by_index(index);
            if p.is_ready_at(now) && !self.contains(p.pid()) {
                self.queue.push(p.pid().to_string());
            }
        }
    }

    /// Registry index of the process whose turn it is.
    ///
    /// Drops stale entries (finished or no longer registered) found at the
    /// cursor. Returns `None` when the queue is empty.
    pub(crate) fn current(&mut self, registry: &ProcessRegistry) -> Option<usize> {
        loop {
            if self.queue.is_empty() {
                return None;
            }
            if self.cursor >= self.queue.len() {
                self.cursor = 0;
            }
            match registry.position(&self.queue[self.cursor]) {
                Some(index) if !registry.by_index(index).is_finished() => return Some(index),
                _ => {
                    self.queue.remove(self.cursor);
                    self.used = 0;
                    if !self.queue.is_empty() {
                        self.cursor %= self.queue.len();
                    }
                }
            }
        }
    }

    /// Updates the turn after the process at the cursor ran one tick.
    ///
    /// A finished process leaves the queue immediately; otherwise the
    /// cursor rotates once `quantum` ticks have been used.
    pub(crate) fn after_run(&mut self, finished: bool, quantum: u32) {
        if self.queue.is_empty() {
            return;
        }
        self.used += 1;
        if finished {
            self.queue.remove(self.cursor);
            self.used = 0;
            if self.cursor >= self.queue.len() {
                self.cursor = 0;
            }
        } else if self.used >= quantum {
            self.cursor = (self.cursor + 1) % self.queue.len();
            self.used = 0;
        }
    }

    /// Whether a pid holds a queue slot.
    pub fn contains(&self, pid: &str) -> bool {
        self.queue.iter().any(|q| q == pid)
    }

    /// Queued pids in rotation order.
    pub fn pids(&self) -> &[String] {
        &self.queue
    }

    /// Index of the process whose turn it is.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Ticks used by the current turn.
    pub fn used(&self) -> u32 {
        self.used
    }

    /// Number of queued pids.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no pid is queued.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.queue.clear();
        self.cursor = 0;
        self.used = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessSpec;

    fn registry() -> ProcessRegistry {
        ProcessRegistry::from_specs(vec![
            ProcessSpec::new("P3", 1, 2),
            ProcessSpec::new("P2", 0, 3),
            ProcessSpec::new("P1", 0, 1),
        ])
        .unwrap()
    }

    #[test]
    fn test_admit_in_arrival_then_pid_order() {
        let reg = registry();
        let mut rr = RoundRobinQueue::new();
        rr.admit(&reg, 0);
        assert_eq!(rr.pids(), &["P1".to_string(), "P2".to_string()]);
        rr.admit(&reg, 1);
        assert_eq!(rr.pids().len(), 3);
        assert_eq!(rr.pids()[2], "P3");
        // Re-admitting is a no-op
        rr.admit(&reg, 5);
        assert_eq!(rr.len(), 3);
    }

    #[test]
    fn test_rotation_after_quantum() {
        let reg = registry();
        let mut rr = RoundRobinQueue::new();
        rr.admit(&reg, 0);
        assert_eq!(rr.current(&reg), reg.position("P1"));
        rr.after_run(false, 2);
        assert_eq!(rr.cursor(), 0);
        assert_eq!(rr.used(), 1);
        rr.after_run(false, 2);
        assert_eq!(rr.cursor(), 1);
        assert_eq!(rr.used(), 0);
    }

    #[test]
    fn test_finished_process_leaves_queue() {
        let reg = registry();
        let mut rr = RoundRobinQueue::new();
        rr.admit(&reg, 0);
        rr.current(&reg);
        rr.after_run(true, 5);
        assert_eq!(rr.pids(), &["P2".to_string()]);
        assert_eq!(rr.cursor(), 0);
        assert_eq!(rr.used(), 0);
    }

    #[test]
    fn test_cursor_wraps_when_last_finishes() {
        let reg = registry();
        let mut rr = RoundRobinQueue::new();
        rr.admit(&reg, 1);
        rr.after_run(false, 1); // P1 → P2
        rr.after_run(false, 1); // P2 → P3
        assert_eq!(rr.cursor(), 2);
        rr.after_run(true, 1); // P3 done
        assert_eq!(rr.cursor(), 0);
        assert_eq!(rr.len(), 2);
    }

    #[test]
    fn test_current_drops_stale_entries() {
        let mut reg = registry();
        let mut rr = RoundRobinQueue::new();
        rr.admit(&reg, 0);
        let p1 = reg.position("P1").unwrap();
        reg.by_index_mut(p1).execute_tick(0);
        assert_eq!(rr.current(&reg), reg.position("P2"));
        assert_eq!(rr.len(), 1);
    }

    #[test]
    fn test_empty_queue() {
        let reg = ProcessRegistry::new();
        let mut rr = RoundRobinQueue::new();
        rr.admit(&reg, 0);
        assert_eq!(rr.current(&reg), None);
        rr.after_run(false, 2);
        assert!(rr.is_empty());
    }
}
