//! Execution timeline (Gantt log) and waiting-queue history.
//!
//! The Gantt log is append-only during a run: consecutive ticks given to
//! the same pid extend the last interval instead of starting a new one.
//! Ticks with no runnable process are recorded under [`IDLE_PID`].

use serde::{Deserialize, Serialize};

use super::IDLE_PID;

/// A half-open span `[start, end)` during which one pid held the CPU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttInterval {
    /// Process id, or [`IDLE_PID`].
    pub pid: String,
    /// First tick (inclusive).
    pub start: i64,
    /// Last tick (exclusive).
    pub end: i64,
}

impl GanttInterval {
    /// Creates an interval.
    pub fn new(pid: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            pid: pid.into(),
            start,
            end,
        }
    }

    /// Number of ticks covered.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Whether this is an idle span.
    #[inline]
    pub fn is_idle(&self) -> bool {
        self.pid == IDLE_PID
    }
}

/// Ordered, merged record of which pid ran on each tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttLog {
    intervals: Vec<GanttInterval>,
}

impl GanttLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `pid` held the CPU for tick `[now, now + 1)`.
    ///
    /// Extends the last interval when it belongs to the same pid,
    /// otherwise appends a new one.
    pub fn record(&mut self, pid: &str, now: i64) {
        match self.intervals.last_mut() {
            Some(last) if last.pid == pid => last.end = now + 1,
            _ => self.intervals.push(GanttInterval::new(pid, now, now + 1)),
        }
    }

    /// Records an idle tick.
    pub fn record_idle(&mut self, now: i64) {
        self.record(IDLE_PID, now);
    }

    /// All intervals in time order.
    pub fn intervals(&self) -> &[GanttInterval] {
        &self.intervals
    }

    /// Intervals belonging to `pid`.
    pub fn intervals_for(&self, pid: &str) -> Vec<&GanttInterval> {
        self.intervals.iter().filter(|i| i.pid == pid).collect()
    }

    /// Total ticks `pid` held the CPU.
    pub fn busy_ticks(&self, pid: &str) -> i64 {
        self.intervals
            .iter()
            .filter(|i| i.pid == pid)
            .map(GanttInterval::duration)
            .sum()
    }

    /// Total idle ticks.
    pub fn idle_ticks(&self) -> i64 {
        self.busy_ticks(IDLE_PID)
    }

    /// Ticks covered from the first interval start to the last interval end.
    pub fn total_span(&self) -> i64 {
        match (self.intervals.first(), self.intervals.last()) {
            (Some(first), Some(last)) => last.end - first.start,
            _ => 0,
        }
    }

    /// Number of switches between two different processes.
    ///
    /// Only boundaries where neither side is idle are counted.
    pub fn context_switches(&self) -> usize {
        self.intervals
            .windows(2)
            .filter(|w| !w[0].is_idle() && !w[1].is_idle() && w[0].pid != w[1].pid)
            .count()
    }

    /// Whether the intervals tile `[0, end)` with no gaps or overlaps.
    pub fn is_contiguous(&self) -> bool {
        let mut cursor = 0;
        for interval in &self.intervals {
            if interval.start != cursor || interval.end <= interval.start {
                return false;
            }
            cursor = interval.end;
        }
        true
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.intervals.clear();
    }
}

/// Number of processes waiting for the CPU at one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingSample {
    /// Tick the sample was taken at (before dispatch).
    pub tick: i64,
    /// Ready processes other than the one marked running.
    pub waiting: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_log() -> GanttLog {
        let mut log = GanttLog::new();
        log.record_idle(0);
        log.record("P1", 1);
        log.record("P1", 2);
        log.record("P2", 3);
        log.record("P1", 4);
        log
    }

    #[test]
    fn test_record_merges_same_pid() {
        let log = sample_log();
        assert_eq!(
            log.intervals(),
            &[
                GanttInterval::new(IDLE_PID, 0, 1),
                GanttInterval::new("P1", 1, 3),
                GanttInterval::new("P2", 3, 4),
                GanttInterval::new("P1", 4, 5),
            ]
        );
    }

    #[test]
    fn test_busy_and_idle_ticks() {
        let log = sample_log();
        assert_eq!(log.busy_ticks("P1"), 3);
        assert_eq!(log.busy_ticks("P2"), 1);
        assert_eq!(log.busy_ticks("P9"), 0);
        assert_eq!(log.idle_ticks(), 1);
        assert_eq!(log.intervals_for("P1").len(), 2);
    }

    #[test]
    fn test_span_and_contiguity() {
        let log = sample_log();
        assert_eq!(log.total_span(), 5);
        assert!(log.is_contiguous());

        let mut gapped = GanttLog::new();
        gapped.record("P1", 0);
        gapped.record("P2", 2);
        assert!(!gapped.is_contiguous());
    }

    #[test]
    fn test_context_switches() {
        let log = sample_log();
        // P1→P2, P2→P1; idle→P1 is not a switch
        assert_eq!(log.context_switches(), 2);
    }

    #[test]
    fn test_empty_log() {
        let log = GanttLog::new();
        assert!(log.is_empty());
        assert_eq!(log.total_span(), 0);
        assert!(log.is_contiguous());
        assert_eq!(log.context_switches(), 0);
    }

    #[test]
    fn test_interval_idle_flag() {
        assert!(GanttInterval::new(IDLE_PID, 0, 1).is_idle());
        assert!(!GanttInterval::new("P1", 0, 1).is_idle());
        assert_eq!(GanttInterval::new("P1", 2, 7).duration(), 5);
    }
}
