//! Cancel-and-reschedule timers over a virtual clock.
//!
//! Each [`TimerKind`] has at most one live entry.  Scheduling a kind again
//! supersedes the previous entry; superseded and cancelled entries stay in
//! the heap but are skipped when they surface, so a stale timer can never
//! fire.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Named timers the controller schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// Deferred first positioning after layout settles.
    Init,
    /// Scroll-end debounce that triggers the continuity correction.
    Quiescence,
    /// Wheel-end debounce that re-enables snap.
    WheelQuiescence,
    /// Fixed-delay stand-in for "smooth scroll finished".
    Settle,
    /// Recurring auto-advance.
    AutoAdvance,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Entry {
    at: Duration,
    seq: u64,
    kind: TimerKind,
}

#[derive(Debug, Default)]
pub struct TimerQueue {
    heap: BinaryHeap<Reverse<Entry>>,
    /// kind → sequence number of its live entry.
    live: HashMap<TimerKind, u64>,
    seq: u64,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `kind` to fire at `at`, replacing any pending entry.
    pub fn schedule(&mut self, kind: TimerKind, at: Duration) {
        self.seq += 1;
        self.live.insert(kind, self.seq);
        self.heap.push(Reverse(Entry {
            at,
            seq: self.seq,
            kind,
        }));
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        self.live.remove(&kind);
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.live.contains_key(&kind)
    }

    /// Pop the earliest live timer due at or before `now`.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, TimerKind)> {
        self.purge_stale();
        match self.heap.peek() {
            Some(Reverse(e)) if e.at <= now => {}
            _ => return None,
        }
        let Reverse(entry) = self.heap.pop()?;
        self.live.remove(&entry.kind);
        Some((entry.at, entry.kind))
    }

    fn purge_stale(&mut self) {
        while let Some(Reverse(top)) = self.heap.peek() {
            if self.live.get(&top.kind) == Some(&top.seq) {
                break;
            }
            self.heap.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKind::Settle, ms(800));
        q.schedule(TimerKind::Quiescence, ms(60));
        q.schedule(TimerKind::AutoAdvance, ms(5000));

        assert_eq!(q.pop_due(ms(1000)), Some((ms(60), TimerKind::Quiescence)));
        assert_eq!(q.pop_due(ms(1000)), Some((ms(800), TimerKind::Settle)));
        assert_eq!(q.pop_due(ms(1000)), None);
        assert_eq!(q.pop_due(ms(5000)), Some((ms(5000), TimerKind::AutoAdvance)));
    }

    #[test]
    fn rescheduling_supersedes_previous_entry() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKind::Quiescence, ms(60));
        q.schedule(TimerKind::Quiescence, ms(100));
        assert_eq!(q.pop_due(ms(80)), None);
        assert_eq!(q.pop_due(ms(100)), Some((ms(100), TimerKind::Quiescence)));
        assert_eq!(q.pop_due(ms(1000)), None);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKind::WheelQuiescence, ms(150));
        assert!(q.is_pending(TimerKind::WheelQuiescence));
        q.cancel(TimerKind::WheelQuiescence);
        assert!(!q.is_pending(TimerKind::WheelQuiescence));
        assert_eq!(q.pop_due(ms(1000)), None);
    }

    #[test]
    fn popped_timer_is_no_longer_pending() {
        let mut q = TimerQueue::new();
        q.schedule(TimerKind::Init, ms(10));
        assert_eq!(q.pop_due(ms(10)), Some((ms(10), TimerKind::Init)));
        assert!(!q.is_pending(TimerKind::Init));
    }
}
