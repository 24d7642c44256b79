//! Cancellable real-time timers owned by the run
//!
//! Delays that are measured in wall-clock time rather than frames (immunity
//! window, slide auto-release) live here as plain data. Nothing fires outside
//! of [`Timers::take_due`], so clearing the queue on reset is enough to
//! guarantee no expiry from a previous run touches the new one.

use serde::Serialize;

/// What a timer does when it expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimerKind {
    /// Release an active slide
    SlideRelease,
    /// End the post-hit immunity window
    ImmunityEnd,
}

#[derive(Debug, Clone, Serialize)]
struct Timer {
    /// Scheduling sequence number, never reused; breaks deadline ties
    seq: u64,
    kind: TimerKind,
    due_ms: f64,
}

/// Pending timers, in scheduling order
#[derive(Debug, Clone, Serialize)]
pub struct Timers {
    pending: Vec<Timer>,
    next_seq: u64,
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}

impl Timers {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_seq: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `kind` to fire at `due_ms`
    pub fn schedule(&mut self, kind: TimerKind, due_ms: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(Timer { seq, kind, due_ms });
    }

    /// Replace any pending timer of the same kind
    pub fn rearm(&mut self, kind: TimerKind, due_ms: f64) {
        self.cancel_kind(kind);
        self.schedule(kind, due_ms);
    }

    /// Cancel every pending timer of a kind
    pub fn cancel_kind(&mut self, kind: TimerKind) -> usize {
        let before = self.pending.len();
        self.pending.retain(|t| t.kind != kind);
        before - self.pending.len()
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.iter().any(|t| t.kind == kind)
    }

    /// Remove and return every timer due at `now_ms`, earliest first
    pub fn take_due(&mut self, now_ms: f64) -> Vec<TimerKind> {
        let mut due: Vec<Timer> = Vec::new();
        self.pending.retain(|t| {
            if t.due_ms <= now_ms {
                due.push(t.clone());
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| {
            a.due_ms
                .partial_cmp(&b.due_ms)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.seq.cmp(&b.seq))
        });
        due.into_iter().map(|t| t.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::ImmunityEnd, 100.0);
        assert!(timers.take_due(99.0).is_empty());
        assert_eq!(timers.take_due(100.0), vec![TimerKind::ImmunityEnd]);
        assert!(timers.take_due(500.0).is_empty());
    }

    #[test]
    fn test_due_in_deadline_order() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::ImmunityEnd, 300.0);
        timers.schedule(TimerKind::SlideRelease, 200.0);
        assert_eq!(
            timers.take_due(1000.0),
            vec![TimerKind::SlideRelease, TimerKind::ImmunityEnd]
        );
    }

    #[test]
    fn test_rearm_replaces() {
        let mut timers = Timers::new();
        timers.rearm(TimerKind::SlideRelease, 100.0);
        timers.rearm(TimerKind::SlideRelease, 250.0);
        assert_eq!(timers.len(), 1);
        assert!(timers.take_due(200.0).is_empty());
        assert_eq!(timers.take_due(250.0), vec![TimerKind::SlideRelease]);
    }

    #[test]
    fn test_cancel_kind() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::ImmunityEnd, 100.0);
        timers.schedule(TimerKind::SlideRelease, 100.0);
        assert_eq!(timers.cancel_kind(TimerKind::ImmunityEnd), 1);
        assert_eq!(timers.cancel_kind(TimerKind::ImmunityEnd), 0);
        assert!(timers.is_pending(TimerKind::SlideRelease));
        assert!(!timers.is_pending(TimerKind::ImmunityEnd));
    }

    #[test]
    fn test_equal_deadlines_fire_in_schedule_order() {
        let mut timers = Timers::new();
        timers.schedule(TimerKind::ImmunityEnd, 100.0);
        timers.cancel_all();
        timers.schedule(TimerKind::SlideRelease, 100.0);
        timers.schedule(TimerKind::ImmunityEnd, 100.0);
        assert_eq!(
            timers.take_due(100.0),
            vec![TimerKind::SlideRelease, TimerKind::ImmunityEnd]
        );
    }
}
