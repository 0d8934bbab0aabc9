//! Top-level phase machine.
//!
//! [`Storybook`] owns the story, one instance of each page component and the
//! current [`Phase`]. Exactly one component is active at a time; it runs its
//! own timers and reports completion through returned events, and the
//! storybook moves to the phase given by [`next_phase`].

use std::fmt;
use std::time::Duration;

use crate::chapter::{ChapterEvent, ChapterPhase, ChapterSequencer};
use crate::content::Story;
use crate::cover::{CoverEvent, CoverPage};
use crate::ending::EndingPage;
use crate::gesture::{PointerKind, SwipeDirection};
use crate::interlude::{InterludeCarousel, InterludeEvent};

/// Which page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Cover,
    /// Chapter by index.
    Chapter(usize),
    /// Interlude registered after the given chapter index.
    Interlude(usize),
    Ending,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Ending)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Cover => f.write_str("cover"),
            Phase::Chapter(index) => write!(f, "chapter {index}"),
            Phase::Interlude(after) => write!(f, "interlude after chapter {after}"),
            Phase::Ending => f.write_str("ending"),
        }
    }
}

/// The phase that follows `current` once its component completes.
pub fn next_phase(current: Phase, story: &Story) -> Phase {
    match current {
        Phase::Cover => Phase::Chapter(0),
        Phase::Chapter(index) if story.interlude_after(index).is_some() => {
            Phase::Interlude(index)
        }
        Phase::Chapter(index) | Phase::Interlude(index) => {
            if story.is_last_chapter(index) {
                Phase::Ending
            } else {
                Phase::Chapter(index + 1)
            }
        }
        Phase::Ending => Phase::Ending,
    }
}

/// What the storybook reports to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryEvent {
    /// The cover's start control was accepted; its exit animation plays.
    CoverExiting,
    PhaseChanged(Phase),
    ChapterPhaseChanged { index: usize, phase: ChapterPhase },
    /// An interlude's fade-in finished.
    InterludeVisible { after_chapter: usize },
    ImageChanged { after_chapter: usize, index: usize },
    InterludeExiting { after_chapter: usize },
    /// The ending became visible. Fires once per traversal.
    Finished,
}

impl fmt::Display for StoryEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoryEvent::CoverExiting => f.write_str("cover exiting"),
            StoryEvent::PhaseChanged(phase) => write!(f, "phase -> {phase}"),
            StoryEvent::ChapterPhaseChanged { index, phase } => {
                write!(f, "chapter {index} -> {phase}")
            }
            StoryEvent::InterludeVisible { after_chapter } => {
                write!(f, "interlude after chapter {after_chapter} visible")
            }
            StoryEvent::ImageChanged {
                after_chapter,
                index,
            } => write!(f, "interlude after chapter {after_chapter} -> image {index}"),
            StoryEvent::InterludeExiting { after_chapter } => {
                write!(f, "interlude after chapter {after_chapter} exiting")
            }
            StoryEvent::Finished => f.write_str("finished"),
        }
    }
}

/// The whole storybook: one story, one active page.
#[derive(Debug, Clone)]
pub struct Storybook {
    story: Story,
    phase: Phase,
    current_chapter: usize,
    cover: CoverPage,
    chapter: ChapterSequencer,
    interlude: InterludeCarousel,
    ending: EndingPage,
}

impl Storybook {
    /// A storybook on its cover. Component pacing comes from
    /// [`Story::timings`].
    pub fn new(story: Story) -> Self {
        let timings = story.timings().clone();
        Self {
            cover: CoverPage::new(timings.cover_exit),
            chapter: ChapterSequencer::new(&timings),
            interlude: InterludeCarousel::new(&timings),
            ending: EndingPage::new(),
            story,
            phase: Phase::Cover,
            current_chapter: 0,
        }
    }

    /// The reader pressed the cover's start control.
    pub fn start(&mut self, now: Duration) -> Vec<StoryEvent> {
        let mut events = self.advance(now);
        if self.phase != Phase::Cover {
            tracing::warn!(phase = %self.phase, "Start ignored outside the cover");
            return events;
        }
        self.current_chapter = 0;
        if let Some(CoverEvent::ExitStarted) = self.cover.press_start(now) {
            tracing::debug!("Cover exit started");
            events.push(StoryEvent::CoverExiting);
        }
        events
    }

    /// Deactivate everything and go back to the cover.
    pub fn reset(&mut self) {
        self.deactivate_all();
        self.phase = Phase::Cover;
        self.current_chapter = 0;
        tracing::info!("Storybook reset to cover");
    }

    /// Process every timer due at or before `now`, across phase changes.
    ///
    /// Each timer is handled at its own deadline, so calling this once with
    /// a late `now` yields the same events as calling it at every deadline.
    pub fn advance(&mut self, now: Duration) -> Vec<StoryEvent> {
        let mut events = Vec::new();
        while let Some(at) = self.next_deadline().filter(|deadline| *deadline <= now) {
            self.step(at, &mut events);
        }
        events
    }

    fn step(&mut self, at: Duration, events: &mut Vec<StoryEvent>) {
        match self.phase {
            Phase::Cover => {
                if self.cover.advance(at).contains(&CoverEvent::Start) {
                    self.transition(at, events);
                }
            }
            Phase::Chapter(index) => {
                let mut completed = false;
                for event in self.chapter.advance(at) {
                    match event {
                        ChapterEvent::PhaseChanged(phase) => {
                            events.push(StoryEvent::ChapterPhaseChanged { index, phase })
                        }
                        ChapterEvent::Completed => completed = true,
                    }
                }
                if completed {
                    self.transition(at, events);
                }
            }
            Phase::Interlude(after_chapter) => {
                let interlude_events = self.interlude.advance(at);
                self.on_interlude_events(after_chapter, interlude_events, at, events);
            }
            Phase::Ending => {}
        }
    }

    fn on_interlude_events(
        &mut self,
        after_chapter: usize,
        interlude_events: Vec<InterludeEvent>,
        at: Duration,
        events: &mut Vec<StoryEvent>,
    ) {
        let mut completed = false;
        for event in interlude_events {
            match event {
                InterludeEvent::Visible => {
                    events.push(StoryEvent::InterludeVisible { after_chapter })
                }
                InterludeEvent::ImageChanged(index) => events.push(StoryEvent::ImageChanged {
                    after_chapter,
                    index,
                }),
                InterludeEvent::Exiting => {
                    events.push(StoryEvent::InterludeExiting { after_chapter })
                }
                InterludeEvent::Completed => completed = true,
            }
        }
        if completed {
            self.transition(at, events);
        }
    }

    fn transition(&mut self, at: Duration, events: &mut Vec<StoryEvent>) {
        let next = next_phase(self.phase, &self.story);
        if next == self.phase {
            return;
        }
        tracing::info!(from = %self.phase, to = %next, "Phase changed");
        self.deactivate_all();
        self.phase = next;
        events.push(StoryEvent::PhaseChanged(next));

        match next {
            Phase::Cover => {}
            Phase::Chapter(index) => {
                debug_assert!(index >= self.current_chapter || index == 0);
                self.current_chapter = index;
                if let Some(chapter) = self.story.chapter(index) {
                    self.chapter.activate(chapter, at);
                    events.push(StoryEvent::ChapterPhaseChanged {
                        index,
                        phase: self.chapter.phase(),
                    });
                }
            }
            Phase::Interlude(after_chapter) => {
                if let Some(interlude) = self.story.interlude_after(after_chapter) {
                    self.interlude.activate(interlude, at);
                }
            }
            Phase::Ending => {
                self.ending.activate(at);
                events.push(StoryEvent::Finished);
            }
        }
    }

    fn deactivate_all(&mut self) {
        self.cover.reset();
        self.chapter.deactivate();
        self.interlude.deactivate();
        self.ending.deactivate();
    }

    /// Earliest pending timer of the active component.
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.phase {
            Phase::Cover => self.cover.next_deadline(),
            Phase::Chapter(_) => self.chapter.next_deadline(),
            Phase::Interlude(_) => self.interlude.next_deadline(),
            Phase::Ending => None,
        }
    }

    pub fn pointer_start(&mut self, kind: PointerKind, x: f64) {
        if let Phase::Interlude(_) = self.phase {
            self.interlude.pointer_start(kind, x);
        }
    }

    pub fn pointer_move(&mut self, x: f64) {
        if let Phase::Interlude(_) = self.phase {
            self.interlude.pointer_move(x);
        }
    }

    /// Release the pointer at session time `now`. Pending timers up to `now`
    /// are processed first.
    pub fn pointer_end(&mut self, x: Option<f64>, now: Duration) -> Vec<StoryEvent> {
        let mut events = self.advance(now);
        if let Phase::Interlude(after_chapter) = self.phase {
            let interlude_events = self.interlude.pointer_end(x, now);
            self.on_interlude_events(after_chapter, interlude_events, now, &mut events);
        }
        events
    }

    pub fn pointer_cancel(&mut self) {
        self.interlude.pointer_cancel();
    }

    /// Step the interlude carousel without a drag (arrow keys, dots).
    pub fn navigate(&mut self, direction: SwipeDirection, now: Duration) -> Vec<StoryEvent> {
        let mut events = self.advance(now);
        match self.phase {
            Phase::Interlude(after_chapter) => {
                let interlude_events = self.interlude.navigate(direction, now);
                self.on_interlude_events(after_chapter, interlude_events, now, &mut events);
            }
            phase => tracing::warn!(%phase, %direction, "Navigation ignored outside an interlude"),
        }
        events
    }

    /// Fraction of the traversal reached, counting the current step.
    /// `None` on the cover and the ending.
    pub fn progress(&self) -> Option<f64> {
        let total = self.story.total_steps();
        let completed = match self.phase {
            Phase::Chapter(index) => index + self.story.interludes_before(index),
            Phase::Interlude(after) => after + 1 + self.story.interludes_before(after),
            Phase::Cover | Phase::Ending => return None,
        };
        if total == 0 {
            return None;
        }
        Some((completed + 1) as f64 / total as f64)
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_chapter(&self) -> usize {
        self.current_chapter
    }

    pub fn cover(&self) -> &CoverPage {
        &self.cover
    }

    pub fn chapter(&self) -> &ChapterSequencer {
        &self.chapter
    }

    pub fn interlude(&self) -> &InterludeCarousel {
        &self.interlude
    }

    pub fn ending(&self) -> &EndingPage {
        &self.ending
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::tests::{chapter, document};

    fn story(chapters: usize, interludes: Vec<(usize, usize)>) -> Story {
        let chapters = (0..chapters)
            .map(|i| chapter(&format!("c{i}"), "body", None))
            .collect();
        Story::new(document(chapters, interludes)).unwrap()
    }

    /// Drive until the phase changes, returning the new phase.
    fn run_to_next_phase(book: &mut Storybook) -> Phase {
        let before = book.phase();
        while let Some(at) = book.next_deadline() {
            book.advance(at);
            if book.phase() != before {
                return book.phase();
            }
        }
        book.phase()
    }

    #[test]
    fn test_next_phase_table() {
        let s = story(3, vec![(0, 1), (2, 1)]);
        assert_eq!(next_phase(Phase::Cover, &s), Phase::Chapter(0));
        assert_eq!(next_phase(Phase::Chapter(0), &s), Phase::Interlude(0));
        assert_eq!(next_phase(Phase::Interlude(0), &s), Phase::Chapter(1));
        assert_eq!(next_phase(Phase::Chapter(1), &s), Phase::Chapter(2));
        assert_eq!(next_phase(Phase::Chapter(2), &s), Phase::Interlude(2));
        assert_eq!(next_phase(Phase::Interlude(2), &s), Phase::Ending);
        assert_eq!(next_phase(Phase::Ending, &s), Phase::Ending);
    }

    #[test]
    fn test_single_chapter_goes_to_ending() {
        let s = story(1, vec![]);
        assert_eq!(next_phase(Phase::Chapter(0), &s), Phase::Ending);
    }

    #[test]
    fn test_start_waits_for_cover_exit() {
        let mut book = Storybook::new(story(2, vec![]));
        assert_eq!(book.phase(), Phase::Cover);
        assert_eq!(book.progress(), None);

        let events = book.start(Duration::from_millis(100));
        assert_eq!(events, vec![StoryEvent::CoverExiting]);
        assert_eq!(book.phase(), Phase::Cover);

        let events = book.advance(Duration::from_millis(900));
        assert_eq!(events[0], StoryEvent::PhaseChanged(Phase::Chapter(0)));
        assert_eq!(
            events[1],
            StoryEvent::ChapterPhaseChanged {
                index: 0,
                phase: ChapterPhase::Title
            }
        );
        assert_eq!(book.phase(), Phase::Chapter(0));
        assert!(book.chapter().is_active());
    }

    #[test]
    fn test_second_start_ignored() {
        let mut book = Storybook::new(story(1, vec![]));
        book.start(Duration::ZERO);
        assert!(book.start(Duration::from_millis(10)).is_empty());
        let events = book.advance(Duration::from_millis(800));
        let changes = events
            .iter()
            .filter(|e| matches!(e, StoryEvent::PhaseChanged(_)))
            .count();
        assert_eq!(changes, 1);
    }

    #[test]
    fn test_progress_follows_traversal_order() {
        let mut book = Storybook::new(story(3, vec![(0, 1), (1, 1)]));
        book.start(Duration::ZERO);
        let mut seen = Vec::new();
        while !book.is_finished() {
            let phase = run_to_next_phase(&mut book);
            seen.push((phase, book.progress()));
        }
        assert_eq!(
            seen,
            vec![
                (Phase::Chapter(0), Some(1.0 / 5.0)),
                (Phase::Interlude(0), Some(2.0 / 5.0)),
                (Phase::Chapter(1), Some(3.0 / 5.0)),
                (Phase::Interlude(1), Some(4.0 / 5.0)),
                (Phase::Chapter(2), Some(5.0 / 5.0)),
                (Phase::Ending, None),
            ]
        );
    }

    #[test]
    fn test_only_one_component_active() {
        let mut book = Storybook::new(story(2, vec![(0, 2)]));
        book.start(Duration::ZERO);
        while !book.is_finished() {
            run_to_next_phase(&mut book);
            let active = [
                book.cover().is_exiting(),
                book.chapter().is_active(),
                book.interlude().is_active(),
                book.ending().is_active(),
            ];
            assert_eq!(active.iter().filter(|a| **a).count(), 1, "{:?}", book.phase());
        }
        assert_eq!(book.next_deadline(), None);
    }

    #[test]
    fn test_pointer_ignored_outside_interlude() {
        let mut book = Storybook::new(story(2, vec![(0, 2)]));
        book.start(Duration::ZERO);
        run_to_next_phase(&mut book);
        book.pointer_start(PointerKind::Touch, 300.0);
        book.pointer_move(0.0);
        assert!(!book.interlude().gesture().is_tracking());
        let now = Duration::from_millis(900);
        assert!(book.pointer_end(None, now).iter().all(|e| !matches!(
            e,
            StoryEvent::ImageChanged { .. }
        )));
    }

    #[test]
    fn test_swipe_through_interlude() {
        let mut book = Storybook::new(story(2, vec![(0, 2)]));
        book.start(Duration::ZERO);
        run_to_next_phase(&mut book);
        assert_eq!(run_to_next_phase(&mut book), Phase::Interlude(0));
        let entered = book.interlude().next_deadline().unwrap() - book.story().timings().interlude_enter;

        let now = entered + Duration::from_millis(1000);
        book.pointer_start(PointerKind::Mouse, 500.0);
        book.pointer_move(300.0);
        assert!(book.pointer_end(Some(300.0), now).contains(&StoryEvent::InterludeVisible {
            after_chapter: 0
        }));
        let events = book.advance(now + Duration::from_millis(300));
        assert_eq!(
            events,
            vec![StoryEvent::ImageChanged {
                after_chapter: 0,
                index: 1
            }]
        );

        let now = now + Duration::from_millis(400);
        assert_eq!(
            book.navigate(SwipeDirection::Next, now),
            vec![StoryEvent::InterludeExiting { after_chapter: 0 }]
        );
        let events = book.advance(now + Duration::from_millis(700));
        assert_eq!(events[0], StoryEvent::PhaseChanged(Phase::Chapter(1)));
        assert_eq!(book.current_chapter(), 1);
    }

    #[test]
    fn test_reset_returns_to_cover() {
        let mut book = Storybook::new(story(2, vec![]));
        book.start(Duration::ZERO);
        run_to_next_phase(&mut book);
        book.reset();
        assert_eq!(book.phase(), Phase::Cover);
        assert!(!book.chapter().is_active());
        assert_eq!(book.next_deadline(), None);
        assert_eq!(book.start(Duration::from_secs(60)), vec![StoryEvent::CoverExiting]);
    }
}
