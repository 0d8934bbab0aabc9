//! Image interlude carousel.
//!
//! Shows the images of one [`Interlude`] in order. Each image stays current
//! for its own duration, measured from the moment it became current, and
//! then advances on its own. A swipe moves forward or back early. Moving
//! between images plays a slide-out first; moving past the last image plays
//! the exit fade and then reports completion.
//!
//! ```text
//! Entering ─► Showing ─(auto/swipe)─► Sliding ─► Showing ─ … ─► Exiting ─► Done
//! ```

use std::fmt;
use std::time::Duration;

use crate::content::{Interlude, InterludeImage};
use crate::gesture::{PointerGesture, PointerKind, SwipeDirection};
use crate::timer::{TimerId, TimerScope};
use crate::timings::Timings;

/// Overlay stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterludePhase {
    Hidden,
    /// Overlay fading in; the first image is already current.
    Entering,
    Showing,
    /// Current image sliding out toward the swipe direction.
    Sliding(SwipeDirection),
    /// Overlay fading out after the last image.
    Exiting,
    Done,
}

impl fmt::Display for InterludePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterludePhase::Hidden => f.write_str("hidden"),
            InterludePhase::Entering => f.write_str("entering"),
            InterludePhase::Showing => f.write_str("showing"),
            InterludePhase::Sliding(direction) => write!(f, "sliding-{direction}"),
            InterludePhase::Exiting => f.write_str("exiting"),
            InterludePhase::Done => f.write_str("done"),
        }
    }
}

/// What an [`InterludeCarousel`] reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterludeEvent {
    /// The fade-in finished.
    Visible,
    /// A slide finished and this image index is now current.
    ImageChanged(usize),
    /// The exit fade started.
    Exiting,
    /// The exit fade finished. Fires once per activation.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    Reveal,
    AutoAdvance,
    SlideDone(SwipeDirection),
    ExitDone,
}

/// Plays one interlude at a time.
#[derive(Debug, Clone)]
pub struct InterludeCarousel {
    interlude: Option<Interlude>,
    index: usize,
    phase: InterludePhase,
    image_since: Duration,
    enter_fade: Duration,
    slide_out: Duration,
    exit_fade: Duration,
    gesture: PointerGesture,
    timers: TimerScope<Cue>,
    auto_advance: Option<TimerId>,
    completion_sent: bool,
}

impl InterludeCarousel {
    pub fn new(timings: &Timings) -> Self {
        Self {
            interlude: None,
            index: 0,
            phase: InterludePhase::Hidden,
            image_since: Duration::ZERO,
            enter_fade: timings.interlude_enter,
            slide_out: timings.slide_out,
            exit_fade: timings.interlude_exit,
            gesture: PointerGesture::new(timings.swipe_threshold_px),
            timers: TimerScope::new(),
            auto_advance: None,
            completion_sent: false,
        }
    }

    /// Show `interlude` from its first image, abandoning any interlude in
    /// progress.
    pub fn activate(&mut self, interlude: &Interlude, now: Duration) {
        self.deactivate();
        debug_assert!(!interlude.is_empty(), "interludes are validated non-empty");
        if interlude.is_empty() {
            return;
        }
        tracing::debug!(images = interlude.len(), "Interlude activated");
        self.interlude = Some(interlude.clone());
        self.phase = InterludePhase::Entering;
        self.timers.schedule_after(now, self.enter_fade, Cue::Reveal);
        self.make_current(0, now);
    }

    /// Cancel every pending timer, drop any drag and hide.
    pub fn deactivate(&mut self) {
        self.timers.cancel_all();
        self.gesture.cancel();
        self.interlude = None;
        self.index = 0;
        self.phase = InterludePhase::Hidden;
        self.image_since = Duration::ZERO;
        self.auto_advance = None;
        self.completion_sent = false;
    }

    /// Process every timer due at or before `now`.
    pub fn advance(&mut self, now: Duration) -> Vec<InterludeEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            let at = fired.at;
            match fired.event {
                Cue::Reveal => {
                    if self.phase == InterludePhase::Entering {
                        self.phase = InterludePhase::Showing;
                        events.push(InterludeEvent::Visible);
                    }
                }
                Cue::AutoAdvance => {
                    self.auto_advance = None;
                    self.go(SwipeDirection::Next, at, &mut events);
                }
                Cue::SlideDone(direction) => {
                    let next = match direction {
                        SwipeDirection::Next => self.index + 1,
                        SwipeDirection::Previous => self.index.saturating_sub(1),
                    };
                    self.phase = InterludePhase::Showing;
                    self.make_current(next, at);
                    events.push(InterludeEvent::ImageChanged(next));
                }
                Cue::ExitDone => {
                    self.phase = InterludePhase::Done;
                    if !self.completion_sent {
                        self.completion_sent = true;
                        tracing::debug!("Interlude completed");
                        events.push(InterludeEvent::Completed);
                    }
                }
            }
        }
        events
    }

    /// Manual navigation (swipe, arrow, dot). Callers must have advanced the
    /// carousel to `now` first.
    pub fn navigate(&mut self, direction: SwipeDirection, now: Duration) -> Vec<InterludeEvent> {
        let mut events = Vec::new();
        self.go(direction, now, &mut events);
        events
    }

    fn go(&mut self, direction: SwipeDirection, at: Duration, events: &mut Vec<InterludeEvent>) {
        if !matches!(self.phase, InterludePhase::Entering | InterludePhase::Showing) {
            tracing::debug!(phase = %self.phase, %direction, "Interlude navigation ignored");
            return;
        }
        match direction {
            SwipeDirection::Next if self.is_last() => self.begin_exit(at, events),
            SwipeDirection::Previous if self.index == 0 => {}
            _ => self.begin_slide(direction, at),
        }
    }

    fn begin_slide(&mut self, direction: SwipeDirection, at: Duration) {
        self.cancel_auto_advance();
        self.phase = InterludePhase::Sliding(direction);
        self.timers
            .schedule_after(at, self.slide_out, Cue::SlideDone(direction));
    }

    fn begin_exit(&mut self, at: Duration, events: &mut Vec<InterludeEvent>) {
        self.cancel_auto_advance();
        self.phase = InterludePhase::Exiting;
        events.push(InterludeEvent::Exiting);
        self.timers.schedule_after(at, self.exit_fade, Cue::ExitDone);
    }

    /// Make `index` current and restart its dwell timer from `at`.
    fn make_current(&mut self, index: usize, at: Duration) {
        self.cancel_auto_advance();
        self.index = index;
        self.image_since = at;
        if let Some(duration) = self.current_image().map(|image| image.duration) {
            self.auto_advance = Some(self.timers.schedule_after(at, duration, Cue::AutoAdvance));
        }
    }

    fn cancel_auto_advance(&mut self) {
        if let Some(id) = self.auto_advance.take() {
            self.timers.cancel(id);
        }
    }

    pub fn pointer_start(&mut self, kind: PointerKind, x: f64) {
        if self.is_active() {
            self.gesture.start(kind, x);
        }
    }

    pub fn pointer_move(&mut self, x: f64) {
        self.gesture.move_to(x);
    }

    /// Release the pointer; a swipe navigates.
    pub fn pointer_end(&mut self, x: Option<f64>, now: Duration) -> Vec<InterludeEvent> {
        match self.gesture.end(x) {
            Some(direction) => self.navigate(direction, now),
            None => Vec::new(),
        }
    }

    pub fn pointer_cancel(&mut self) {
        self.gesture.cancel();
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn phase(&self) -> InterludePhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.interlude.is_some()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn image_count(&self) -> usize {
        self.interlude.as_ref().map(Interlude::len).unwrap_or(0)
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.image_count()
    }

    pub fn current_image(&self) -> Option<&InterludeImage> {
        self.interlude.as_ref()?.images.get(self.index)
    }

    /// One flag per image; `true` marks the current one.
    pub fn dots(&self) -> Vec<bool> {
        (0..self.image_count()).map(|i| i == self.index).collect()
    }

    /// How long the current image has been current.
    pub fn image_elapsed(&self, now: Duration) -> Duration {
        now.saturating_sub(self.image_since)
    }

    /// Fill fraction of the per-image progress bar, in [0, 1].
    pub fn image_progress(&self, now: Duration) -> f64 {
        let Some(image) = self.current_image() else {
            return 0.0;
        };
        if image.duration.is_zero() {
            return 1.0;
        }
        (self.image_elapsed(now).as_secs_f64() / image.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Direction of the slide in flight, if any.
    pub fn slide_direction(&self) -> Option<SwipeDirection> {
        match self.phase {
            InterludePhase::Sliding(direction) => Some(direction),
            _ => None,
        }
    }

    pub fn gesture(&self) -> &PointerGesture {
        &self.gesture
    }
}
