//! Session driver.
//!
//! A [`Session`] pairs the [`Storybook`] with a [`Clock`] so UI handlers can
//! forward input without tracking time themselves. The app keeps one session
//! in a signal and runs a single loop:
//!
//! ```ignore
//! loop {
//!     if session.peek().is_due() {
//!         session.write().tick();
//!     }
//!     tokio::time::sleep(session.peek().sleep_hint()).await;
//! }
//! ```

use std::time::Duration;

use storybook_core::{
    Clock, MonotonicClock, PointerKind, StoryEvent, Storybook, SwipeDirection,
};

/// Longest sleep while a timer is pending, so reveals render promptly.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Sleep while nothing is pending (cover idle, ending).
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub struct Session<C: Clock = MonotonicClock> {
    book: Storybook,
    clock: C,
}

impl Session<MonotonicClock> {
    /// A session whose clock starts now.
    pub fn start_now(book: Storybook) -> Self {
        Self::new(book, MonotonicClock::new())
    }
}

impl<C: Clock> Session<C> {
    pub fn new(book: Storybook, clock: C) -> Self {
        Self { book, clock }
    }

    pub fn book(&self) -> &Storybook {
        &self.book
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Whether a timer is due.
    pub fn is_due(&self) -> bool {
        self.book
            .next_deadline()
            .is_some_and(|deadline| deadline <= self.now())
    }

    /// Process everything due by now.
    pub fn tick(&mut self) -> Vec<StoryEvent> {
        let now = self.now();
        let events = self.book.advance(now);
        log_events(&events);
        events
    }

    /// How long the driver loop may sleep before the next check.
    pub fn sleep_hint(&self) -> Duration {
        match self.book.next_deadline() {
            Some(deadline) => deadline.saturating_sub(self.now()).min(FRAME_INTERVAL),
            None => IDLE_POLL_INTERVAL,
        }
    }

    /// The cover's start control.
    pub fn start(&mut self) -> Vec<StoryEvent> {
        let now = self.now();
        let events = self.book.start(now);
        log_events(&events);
        events
    }

    pub fn pointer_start(&mut self, kind: PointerKind, x: f64) {
        self.book.pointer_start(kind, x);
    }

    pub fn pointer_move(&mut self, x: f64) {
        self.book.pointer_move(x);
    }

    pub fn pointer_end(&mut self, x: Option<f64>) -> Vec<StoryEvent> {
        let now = self.now();
        let events = self.book.pointer_end(x, now);
        log_events(&events);
        events
    }

    pub fn pointer_cancel(&mut self) {
        self.book.pointer_cancel();
    }

    pub fn navigate(&mut self, direction: SwipeDirection) -> Vec<StoryEvent> {
        let now = self.now();
        let events = self.book.navigate(direction, now);
        log_events(&events);
        events
    }
}

fn log_events(events: &[StoryEvent]) {
    for event in events {
        tracing::debug!(%event, "Story event");
    }
}
