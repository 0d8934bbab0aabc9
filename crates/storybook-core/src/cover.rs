//! Cover page.
//!
//! Shows the story's title block with a single start control. Pressing it
//! plays the exit animation; when that finishes the cover reports
//! [`CoverEvent::Start`]. Presses after the first are ignored.

use std::time::Duration;

use crate::timer::TimerScope;

/// Entrance stagger for the cover elements, in render order: ornament,
/// main title, subtitle, author line, divider, start button.
pub const ENTRANCE_DELAYS: [Duration; 6] = [
    Duration::from_millis(200),
    Duration::from_millis(500),
    Duration::from_millis(900),
    Duration::from_millis(1200),
    Duration::from_millis(1500),
    Duration::from_millis(1800),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoverPhase {
    /// Waiting for the reader.
    Idle,
    /// Exit animation playing.
    Exiting,
    /// Start was reported.
    Started,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverEvent {
    /// The start control was pressed and the exit animation began.
    ExitStarted,
    /// The exit animation finished.
    Start,
}

#[derive(Debug, Clone)]
pub struct CoverPage {
    phase: CoverPhase,
    exit_duration: Duration,
    timers: TimerScope<CoverEvent>,
}

impl CoverPage {
    pub fn new(exit_duration: Duration) -> Self {
        Self {
            phase: CoverPhase::Idle,
            exit_duration,
            timers: TimerScope::new(),
        }
    }

    /// Handle the start control. Only the first press counts.
    pub fn press_start(&mut self, now: Duration) -> Option<CoverEvent> {
        if self.phase != CoverPhase::Idle {
            tracing::debug!("Start pressed again, ignoring");
            return None;
        }
        self.phase = CoverPhase::Exiting;
        self.timers
            .schedule_after(now, self.exit_duration, CoverEvent::Start);
        Some(CoverEvent::ExitStarted)
    }

    pub fn advance(&mut self, now: Duration) -> Vec<CoverEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            if self.phase == CoverPhase::Exiting {
                self.phase = CoverPhase::Started;
                events.push(fired.event);
            }
        }
        events
    }

    /// Back to idle with nothing pending.
    pub fn reset(&mut self) {
        self.timers.cancel_all();
        self.phase = CoverPhase::Idle;
    }

    pub fn phase(&self) -> CoverPhase {
        self.phase
    }

    pub fn is_exiting(&self) -> bool {
        self.phase == CoverPhase::Exiting
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_start_fires_after_exit() {
        let mut cover = CoverPage::new(ms(800));
        assert!(cover.advance(ms(10_000)).is_empty());

        assert_eq!(cover.press_start(ms(1000)), Some(CoverEvent::ExitStarted));
        assert!(cover.is_exiting());
        assert!(cover.advance(ms(1799)).is_empty());
        assert_eq!(cover.advance(ms(1800)), vec![CoverEvent::Start]);
        assert_eq!(cover.phase(), CoverPhase::Started);
    }

    #[test]
    fn test_repeated_presses_fire_once() {
        let mut cover = CoverPage::new(ms(800));
        cover.press_start(ms(0));
        assert_eq!(cover.press_start(ms(100)), None);
        assert_eq!(cover.press_start(ms(700)), None);
        assert_eq!(cover.advance(ms(5000)), vec![CoverEvent::Start]);
        assert_eq!(cover.press_start(ms(6000)), None);
        assert!(cover.advance(ms(10_000)).is_empty());
    }

    #[test]
    fn test_reset_cancels_exit() {
        let mut cover = CoverPage::new(ms(800));
        cover.press_start(ms(0));
        cover.reset();
        assert_eq!(cover.phase(), CoverPhase::Idle);
        assert_eq!(cover.next_deadline(), None);
        assert!(cover.advance(ms(5000)).is_empty());
    }

    #[test]
    fn test_entrance_delays_increase() {
        assert!(ENTRANCE_DELAYS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_author_line_enters_before_divider() {
        let [_, _, _, author, divider, button] = ENTRANCE_DELAYS;
        assert_eq!(author, ms(1200));
        assert_eq!(divider, ms(1500));
        assert_eq!(button, ms(1800));
    }
}
