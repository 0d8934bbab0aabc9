//! Error types for the storybook core

use thiserror::Error;

/// Top-level error type for loading a story
#[derive(Debug, Error)]
pub enum StoryError {
    #[error("Story I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Story parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid story content: {0}")]
    Content(#[from] ContentError),
}

/// Story content that can never be presented correctly.
///
/// Raised at configuration time so the presentation state machines only ever
/// see content they can traverse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("Story has no chapters")]
    NoChapters,

    #[error("Duplicate chapter id: {0}")]
    DuplicateChapterId(String),

    #[error("Interlude after chapter {after_chapter} has no images")]
    EmptyInterlude { after_chapter: usize },

    #[error("Interlude after chapter {after_chapter} is out of range: story has {chapter_count} chapters")]
    InterludeOutOfRange {
        after_chapter: usize,
        chapter_count: usize,
    },

    #[error("More than one interlude registered after chapter {0}")]
    DuplicateInterlude(usize),

    #[error("Image {image} of the interlude after chapter {after_chapter} has a zero display duration")]
    ZeroImageDuration { after_chapter: usize, image: usize },
}

/// Result type for story loading
pub type StoryResult<T> = Result<T, StoryError>;
