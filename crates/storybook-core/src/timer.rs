//! Scoped timers.
//!
//! A [`TimerScope`] is the only place a component may park work for later.
//! Deadlines are absolute session times. [`TimerScope::cancel_all`] drops
//! every pending timer and starts a new generation, so a [`TimerId`] handed
//! out before the cancel can never touch a timer scheduled after it.

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    generation: u64,
    deadline: Duration,
    seq: u64,
}

impl TimerId {
    /// Session time at which the timer fires.
    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Generation of the scope when the timer was scheduled.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A timer that came due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<E> {
    /// The deadline the timer was scheduled for (not the time it was polled).
    pub at: Duration,
    pub event: E,
}

/// Pending timers owned by one component activation.
#[derive(Debug, Clone)]
pub struct TimerScope<E> {
    generation: u64,
    next_seq: u64,
    pending: BTreeMap<(Duration, u64), E>,
}

impl<E> Default for TimerScope<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> TimerScope<E> {
    pub fn new() -> Self {
        Self {
            generation: 0,
            next_seq: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current generation. Bumped by every [`cancel_all`](Self::cancel_all).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Schedule `event` to fire at the absolute session time `deadline`.
    pub fn schedule_at(&mut self, deadline: Duration, event: E) -> TimerId {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert((deadline, seq), event);
        TimerId {
            generation: self.generation,
            deadline,
            seq,
        }
    }

    /// Schedule `event` to fire `delay` after `now`.
    pub fn schedule_after(&mut self, now: Duration, delay: Duration, event: E) -> TimerId {
        self.schedule_at(now.saturating_add(delay), event)
    }

    /// Cancel one timer. Returns `false` if it already fired, was already
    /// cancelled, or belongs to an earlier generation.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        if id.generation != self.generation {
            return false;
        }
        self.pending.remove(&(id.deadline, id.seq)).is_some()
    }

    /// Cancel every pending timer and start a new generation.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
        self.generation += 1;
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Pop the earliest timer whose deadline is at or before `now`.
    ///
    /// Timers with equal deadlines come out in scheduling order.
    pub fn pop_due(&mut self, now: Duration) -> Option<Fired<E>> {
        let key = *self.pending.keys().next()?;
        if key.0 > now {
            return None;
        }
        self.pending.remove(&key).map(|event| Fired { at: key.0, event })
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
