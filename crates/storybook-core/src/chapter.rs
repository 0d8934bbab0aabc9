//! Chapter sequencing.
//!
//! A chapter plays as: title label (immediately) → subtitle typewriter →
//! pause → body typewriter → (pause → quote typewriter) → dwell → completed.
//! The sequencer owns three [`Typewriter`]s and its own [`TimerScope`] for
//! the pauses; [`ChapterSequencer::advance`] interleaves all four in
//! deadline order.

use std::fmt;
use std::time::Duration;

use crate::content::Chapter;
use crate::timer::TimerScope;
use crate::timings::Timings;
use crate::typewriter::{Typewriter, TypewriterConfig, TypewriterEvent};

/// Visible stage of a chapter. Later stages include everything shown by
/// earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChapterPhase {
    /// Inactive; nothing is rendered.
    Hidden,
    /// Title label shown, subtitle revealing.
    Title,
    /// Divider, image and body revealing.
    Content,
    /// Quote revealing.
    Quote,
    /// Everything revealed; dwelling before completion.
    Complete,
}

impl fmt::Display for ChapterPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChapterPhase::Hidden => "hidden",
            ChapterPhase::Title => "title",
            ChapterPhase::Content => "content",
            ChapterPhase::Quote => "quote",
            ChapterPhase::Complete => "complete",
        };
        f.write_str(name)
    }
}

/// What a [`ChapterSequencer`] reports from [`ChapterSequencer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterEvent {
    PhaseChanged(ChapterPhase),
    /// The dwell after the last reveal elapsed. Fires once per activation.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cue {
    ShowContent,
    ShowQuote,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Source {
    Cue,
    Subtitle,
    Body,
    Quote,
}

/// Plays one chapter at a time.
#[derive(Debug, Clone)]
pub struct ChapterSequencer {
    chapter: Option<Chapter>,
    phase: ChapterPhase,
    title_pause: Duration,
    quote_pause: Duration,
    dwell_after_body: Duration,
    dwell_after_quote: Duration,
    subtitle: Typewriter,
    body: Typewriter,
    quote: Typewriter,
    timers: TimerScope<Cue>,
    completion_sent: bool,
}

impl ChapterSequencer {
    pub fn new(timings: &Timings) -> Self {
        Self {
            chapter: None,
            phase: ChapterPhase::Hidden,
            title_pause: timings.title_pause,
            quote_pause: timings.quote_pause,
            dwell_after_body: timings.dwell_after_body,
            dwell_after_quote: timings.dwell_after_quote,
            subtitle: Typewriter::new(TypewriterConfig::new(timings.subtitle_char_delay)),
            body: Typewriter::new(TypewriterConfig::new(timings.body_char_delay)),
            quote: Typewriter::new(TypewriterConfig::new(timings.quote_char_delay)),
            timers: TimerScope::new(),
            completion_sent: false,
        }
    }

    /// Start playing `chapter` from the title, abandoning any chapter in
    /// progress.
    pub fn activate(&mut self, chapter: &Chapter, now: Duration) {
        self.deactivate();
        tracing::debug!(chapter = %chapter.id, "Chapter activated");
        self.chapter = Some(chapter.clone());
        self.phase = ChapterPhase::Title;
        self.subtitle.start(chapter.subtitle.as_str(), now);
    }

    /// Cancel every pending timer (own and typewriters') and hide.
    pub fn deactivate(&mut self) {
        self.timers.cancel_all();
        self.subtitle.stop();
        self.body.stop();
        self.quote.stop();
        self.chapter = None;
        self.phase = ChapterPhase::Hidden;
        self.completion_sent = false;
    }

    /// Process everything due at or before `now`, in deadline order.
    pub fn advance(&mut self, now: Duration) -> Vec<ChapterEvent> {
        let mut events = Vec::new();
        while let Some((at, source)) = self.next_due(now) {
            match source {
                Source::Cue => {
                    if let Some(fired) = self.timers.pop_due(at) {
                        self.on_cue(fired.event, fired.at, &mut events);
                    }
                }
                Source::Subtitle => {
                    if self.subtitle.advance(at).contains(&TypewriterEvent::Completed) {
                        self.timers.schedule_after(at, self.title_pause, Cue::ShowContent);
                    }
                }
                Source::Body => {
                    if self.body.advance(at).contains(&TypewriterEvent::Completed) {
                        self.on_body_complete(at, &mut events);
                    }
                }
                Source::Quote => {
                    if self.quote.advance(at).contains(&TypewriterEvent::Completed) {
                        self.enter(ChapterPhase::Complete, &mut events);
                        self.timers.schedule_after(at, self.dwell_after_quote, Cue::Finish);
                    }
                }
            }
        }
        events
    }

    /// Earliest deadline at or before `now` across the four timer owners.
    /// Typewriters win ties against cues.
    fn next_due(&self, now: Duration) -> Option<(Duration, Source)> {
        [
            (self.subtitle.next_deadline(), Source::Subtitle),
            (self.body.next_deadline(), Source::Body),
            (self.quote.next_deadline(), Source::Quote),
            (self.timers.next_deadline(), Source::Cue),
        ]
        .into_iter()
        .filter_map(|(deadline, source)| deadline.map(|d| (d, source)))
        .filter(|(deadline, _)| *deadline <= now)
        .min_by_key(|(deadline, _)| *deadline)
    }

    fn on_body_complete(&mut self, at: Duration, events: &mut Vec<ChapterEvent>) {
        let has_quote = self.chapter.as_ref().and_then(Chapter::quote).is_some();
        if has_quote {
            self.timers.schedule_after(at, self.quote_pause, Cue::ShowQuote);
        } else {
            self.enter(ChapterPhase::Complete, events);
            self.timers.schedule_after(at, self.dwell_after_body, Cue::Finish);
        }
    }

    fn on_cue(&mut self, cue: Cue, at: Duration, events: &mut Vec<ChapterEvent>) {
        let Some(chapter) = self.chapter.as_ref() else {
            return;
        };
        match cue {
            Cue::ShowContent => {
                let content = chapter.content.clone();
                self.enter(ChapterPhase::Content, events);
                self.body.start(content, at);
            }
            Cue::ShowQuote => {
                let quote = chapter.quote().unwrap_or_default().to_string();
                self.enter(ChapterPhase::Quote, events);
                self.quote.start(quote, at);
            }
            Cue::Finish => {
                if !self.completion_sent {
                    self.completion_sent = true;
                    tracing::debug!(chapter = %chapter.id, "Chapter completed");
                    events.push(ChapterEvent::Completed);
                }
            }
        }
    }

    fn enter(&mut self, phase: ChapterPhase, events: &mut Vec<ChapterEvent>) {
        tracing::trace!(from = %self.phase, to = %phase, "Chapter phase");
        self.phase = phase;
        events.push(ChapterEvent::PhaseChanged(phase));
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        [
            self.subtitle.next_deadline(),
            self.body.next_deadline(),
            self.quote.next_deadline(),
            self.timers.next_deadline(),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    pub fn phase(&self) -> ChapterPhase {
        self.phase
    }

    pub fn chapter(&self) -> Option<&Chapter> {
        self.chapter.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.chapter.is_some()
    }

    /// Divider, image and body are visible from the content stage onward.
    pub fn shows_content(&self) -> bool {
        self.phase >= ChapterPhase::Content
    }

    pub fn shows_quote(&self) -> bool {
        self.phase >= ChapterPhase::Quote && self.quote.is_active()
    }

    pub fn subtitle(&self) -> &Typewriter {
        &self.subtitle
    }

    pub fn body(&self) -> &Typewriter {
        &self.body
    }

    pub fn quote(&self) -> &Typewriter {
        &self.quote
    }
}
