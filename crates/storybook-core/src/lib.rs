//! Presentation core for the storybook.
//!
//! This crate holds every piece of sequencing logic in the storybook and
//! nothing that renders. A host (the Dioxus app, or a test) owns a
//! [`Storybook`] and drives it with two kinds of calls:
//!
//! - input: [`Storybook::start`], [`Storybook::pointer_start`],
//!   [`Storybook::pointer_move`], [`Storybook::pointer_end`]
//! - time: [`Storybook::advance`] with the current session time
//!
//! The core never sleeps and never reads a clock. Every timer lives in a
//! [`TimerScope`] owned by the component that scheduled it, so deactivating
//! a component cancels everything it had pending.
//!
//! ```ignore
//! use std::time::Duration;
//! use storybook_core::{Story, Storybook};
//!
//! let mut book = Storybook::new(Story::sample()?);
//! book.start(Duration::ZERO);
//!
//! let mut now = Duration::ZERO;
//! while !book.is_finished() {
//!     now = book.next_deadline().unwrap_or(now);
//!     for event in book.advance(now) {
//!         println!("{event}");
//!     }
//! }
//! ```

pub mod chapter;
pub mod clock;
pub mod content;
pub mod cover;
pub mod ending;
pub mod error;
pub mod gesture;
pub mod interlude;
pub mod orchestrator;
pub mod timer;
pub mod timings;
pub mod typewriter;

pub use chapter::{ChapterEvent, ChapterPhase, ChapterSequencer};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use content::{
    Chapter, ChapterImage, CoverContent, EndingContent, Interlude, InterludeEntry, InterludeImage,
    Story, StoryDocument,
};
pub use cover::{CoverEvent, CoverPage, CoverPhase};
pub use ending::EndingPage;
pub use error::{ContentError, StoryError, StoryResult};
pub use gesture::{PointerGesture, PointerKind, SwipeDirection};
pub use interlude::{InterludeCarousel, InterludeEvent, InterludePhase};
pub use orchestrator::{Phase, StoryEvent, Storybook, next_phase};
pub use timer::{Fired, TimerId, TimerScope};
pub use timings::Timings;
pub use typewriter::{Typewriter, TypewriterConfig, TypewriterEvent};
