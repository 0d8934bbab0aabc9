//! Typewriter reveal.
//!
//! A [`Typewriter`] reveals its text one character per tick after an
//! optional initial delay. The reveal is a prefix that only grows; it is
//! reset to empty whenever the text changes. Completion is reported once per
//! text, the instant the prefix reaches full length.

use std::time::Duration;

use crate::timer::TimerScope;

/// Reveal pacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypewriterConfig {
    /// Delay between two revealed characters.
    pub char_delay: Duration,
    /// Delay before the first tick after the text is set.
    pub initial_delay: Duration,
}

impl TypewriterConfig {
    pub fn new(char_delay: Duration) -> Self {
        Self {
            char_delay,
            initial_delay: Duration::ZERO,
        }
    }

    pub fn with_initial_delay(mut self, initial_delay: Duration) -> Self {
        self.initial_delay = initial_delay;
        self
    }
}

impl Default for TypewriterConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(50))
    }
}

/// What a [`Typewriter`] reports from [`Typewriter::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypewriterEvent {
    /// The initial delay elapsed; the (empty) prefix is now displayed.
    Started,
    /// The prefix grew to this many characters.
    Revealed(usize),
    /// The prefix reached full length.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tick {
    Start,
    Reveal,
}

/// Character-by-character text reveal.
#[derive(Debug, Clone)]
pub struct Typewriter {
    config: TypewriterConfig,
    text: String,
    char_count: usize,
    revealed: usize,
    /// Byte offset of the end of the revealed prefix.
    prefix_end: usize,
    active: bool,
    started: bool,
    completed: bool,
    timers: TimerScope<Tick>,
}

impl Typewriter {
    /// An inert typewriter; nothing happens until [`start`](Self::start).
    pub fn new(config: TypewriterConfig) -> Self {
        Self {
            config,
            text: String::new(),
            char_count: 0,
            revealed: 0,
            prefix_end: 0,
            active: false,
            started: false,
            completed: false,
            timers: TimerScope::new(),
        }
    }

    /// Begin revealing `text` from empty, discarding any reveal in progress.
    pub fn start(&mut self, text: impl Into<String>, now: Duration) {
        self.stop();
        self.text = text.into();
        self.char_count = self.text.chars().count();
        self.active = true;
        self.timers
            .schedule_after(now, self.config.initial_delay, Tick::Start);
        tracing::trace!(chars = self.char_count, "Typewriter started");
    }

    /// Change the target text.
    ///
    /// A different text restarts the delay-then-reveal cycle from empty and
    /// rearms completion. Setting the same text again is a no-op.
    pub fn set_text(&mut self, text: impl Into<String>, now: Duration) {
        let text = text.into();
        if self.active && text == self.text {
            return;
        }
        self.start(text, now);
    }

    /// Cancel every pending tick and clear the reveal.
    pub fn stop(&mut self) {
        self.timers.cancel_all();
        self.text.clear();
        self.char_count = 0;
        self.revealed = 0;
        self.prefix_end = 0;
        self.active = false;
        self.started = false;
        self.completed = false;
    }

    /// Process every tick due at or before `now`.
    pub fn advance(&mut self, now: Duration) -> Vec<TypewriterEvent> {
        let mut events = Vec::new();
        while let Some(fired) = self.timers.pop_due(now) {
            match fired.event {
                Tick::Start => {
                    self.started = true;
                    events.push(TypewriterEvent::Started);
                }
                Tick::Reveal => {
                    self.reveal_next();
                    events.push(TypewriterEvent::Revealed(self.revealed));
                }
            }
            if self.revealed < self.char_count {
                self.timers
                    .schedule_after(fired.at, self.config.char_delay, Tick::Reveal);
            } else if !self.completed {
                self.completed = true;
                events.push(TypewriterEvent::Completed);
            }
        }
        events
    }

    fn reveal_next(&mut self) {
        if let Some(c) = self.text[self.prefix_end..].chars().next() {
            self.prefix_end += c.len_utf8();
            self.revealed += 1;
        }
    }

    /// The currently displayed prefix (empty before the initial delay).
    pub fn displayed(&self) -> &str {
        &self.text[..self.prefix_end]
    }

    /// The full target text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Revealed length in characters.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Full length in characters.
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    pub fn config(&self) -> TypewriterConfig {
        self.config
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the initial delay has elapsed.
    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Whether the blinking caret should follow the prefix.
    pub fn shows_caret(&self) -> bool {
        self.started && self.revealed < self.char_count
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(TypewriterConfig::default())
    }
}
