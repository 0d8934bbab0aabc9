//! Session clocks.
//!
//! The state machines take `now` as an argument; a [`Clock`] is how a host
//! produces it. Session time is the [`Duration`] elapsed since the clock's
//! origin.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of session time.
pub trait Clock {
    /// Time elapsed since the session origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]; the origin is the moment of creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock for deterministic tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move time forward by `delta` and return the new time.
    pub fn advance(&self, delta: Duration) -> Duration {
        let next = self.now.get().saturating_add(delta);
        self.now.set(next);
        next
    }

    /// Jump to `now`. Time never moves backwards; earlier values are ignored.
    pub fn set(&self, now: Duration) {
        if now > self.now.get() {
            self.now.set(now);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_moves_forward_only() {
        let clock = ManualClock::new();
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.advance(Duration::from_millis(250)), Duration::from_millis(250));

        clock.set(Duration::from_millis(100));
        assert_eq!(clock.now(), Duration::from_millis(250));

        clock.set(Duration::from_secs(1));
        assert_eq!(clock.now(), Duration::from_secs(1));
    }

    #[test]
    fn test_monotonic_clock_is_non_decreasing() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
