//! Story content model.
//!
//! Content is read-only for the whole session. [`StoryDocument`] is the
//! serialized shape (what a JSON story file contains); [`Story`] is the
//! validated form the state machines consume. Conversion goes through
//! [`Story::new`], which rejects anything the presentation could not traverse.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ContentError, StoryResult};
use crate::timings::{DEFAULT_IMAGE_DURATION, Timings, scale_duration};

const SAMPLE_STORY_JSON: &str = include_str!("../assets/sample_story.json");

/// Text shown on the cover page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverContent {
    pub main_title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub author_line: String,
    #[serde(default = "default_button_text")]
    pub button_text: String,
}

fn default_button_text() -> String {
    "Open the book".to_string()
}

/// Text shown on the ending page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndingContent {
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub signature: String,
    #[serde(default)]
    pub final_quote: String,
}

/// Illustration shown alongside a chapter body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// One text chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    /// Short label shown above the subtitle ("Chapter One").
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(default)]
    pub image: Option<ChapterImage>,
}

impl Chapter {
    /// The quote, if there is a non-empty one.
    pub fn quote(&self) -> Option<&str> {
        self.quote.as_deref().filter(|q| !q.is_empty())
    }
}

/// One image in an interlude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterludeImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(
        rename = "duration_ms",
        default = "default_image_duration",
        with = "crate::timings::millis"
    )]
    pub duration: Duration,
}

fn default_image_duration() -> Duration {
    DEFAULT_IMAGE_DURATION
}

impl InterludeImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            alt: String::new(),
            caption: None,
            duration: DEFAULT_IMAGE_DURATION,
        }
    }

    pub fn with_alt(mut self, alt: impl Into<String>) -> Self {
        self.alt = alt.into();
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// The caption, if there is a non-empty one.
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref().filter(|c| !c.is_empty())
    }
}

/// A full-screen image sequence shown between two chapters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interlude {
    pub images: Vec<InterludeImage>,
}

impl Interlude {
    pub fn new(images: Vec<InterludeImage>) -> Self {
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Serialized form of an interlude: the images plus the chapter it follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterludeEntry {
    pub after_chapter: usize,
    #[serde(flatten)]
    pub interlude: Interlude,
}

/// Serialized story, as found in a story file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDocument {
    pub cover: CoverContent,
    pub chapters: Vec<Chapter>,
    #[serde(default)]
    pub interludes: Vec<InterludeEntry>,
    pub ending: EndingContent,
    #[serde(default)]
    pub timings: Timings,
}

/// Validated story content.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    cover: CoverContent,
    chapters: Vec<Chapter>,
    interludes: BTreeMap<usize, Interlude>,
    ending: EndingContent,
    timings: Timings,
}

impl Story {
    /// Validate a document into a story.
    pub fn new(document: StoryDocument) -> Result<Self, ContentError> {
        let StoryDocument {
            cover,
            chapters,
            interludes: entries,
            ending,
            timings,
        } = document;

        if chapters.is_empty() {
            return Err(ContentError::NoChapters);
        }

        let mut ids = HashSet::new();
        for chapter in &chapters {
            if !ids.insert(chapter.id.as_str()) {
                return Err(ContentError::DuplicateChapterId(chapter.id.clone()));
            }
        }

        let mut interludes = BTreeMap::new();
        for entry in entries {
            let after_chapter = entry.after_chapter;
            if after_chapter >= chapters.len() {
                return Err(ContentError::InterludeOutOfRange {
                    after_chapter,
                    chapter_count: chapters.len(),
                });
            }
            if entry.interlude.is_empty() {
                return Err(ContentError::EmptyInterlude { after_chapter });
            }
            if let Some(image) = entry
                .interlude
                .images
                .iter()
                .position(|image| image.duration.is_zero())
            {
                return Err(ContentError::ZeroImageDuration {
                    after_chapter,
                    image,
                });
            }
            if interludes.insert(after_chapter, entry.interlude).is_some() {
                return Err(ContentError::DuplicateInterlude(after_chapter));
            }
        }

        Ok(Self {
            cover,
            chapters,
            interludes,
            ending,
            timings,
        })
    }

    /// Parse and validate a JSON story.
    pub fn from_json(json: &str) -> StoryResult<Self> {
        let document: StoryDocument = serde_json::from_str(json)?;
        Ok(Self::new(document)?)
    }

    /// Read, parse and validate a JSON story file.
    pub fn load(path: impl AsRef<Path>) -> StoryResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let story = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            chapters = story.chapter_count(),
            interludes = story.interlude_count(),
            "Loaded story"
        );
        Ok(story)
    }

    /// The story bundled with the crate.
    pub fn sample() -> StoryResult<Self> {
        Self::from_json(SAMPLE_STORY_JSON)
    }

    /// Play the story `speed` times faster: every choreography timing and
    /// every per-image duration is divided by `speed`.
    ///
    /// Non-finite or non-positive speeds leave the story unchanged. Image
    /// durations never scale below one millisecond.
    pub fn scaled(mut self, speed: f32) -> Self {
        if !speed.is_finite() || speed <= 0.0 {
            return self;
        }
        self.timings = self.timings.scaled(speed);
        for image in self
            .interludes
            .values_mut()
            .flat_map(|interlude| interlude.images.iter_mut())
        {
            image.duration = scale_duration(image.duration, speed).max(Duration::from_millis(1));
        }
        self
    }

    pub fn cover(&self) -> &CoverContent {
        &self.cover
    }

    pub fn ending(&self) -> &EndingContent {
        &self.ending
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapter(&self, index: usize) -> Option<&Chapter> {
        self.chapters.get(index)
    }

    pub fn chapter_count(&self) -> usize {
        self.chapters.len()
    }

    /// The interlude registered after chapter `index`, if any.
    pub fn interlude_after(&self, index: usize) -> Option<&Interlude> {
        self.interludes.get(&index)
    }

    pub fn interlude_count(&self) -> usize {
        self.interludes.len()
    }

    /// Interludes registered after chapters strictly before `index`.
    pub fn interludes_before(&self, index: usize) -> usize {
        self.interludes.range(..index).count()
    }

    /// Chapters plus interludes: the number of steps in one traversal.
    pub fn total_steps(&self) -> usize {
        self.chapter_count() + self.interlude_count()
    }

    pub fn is_last_chapter(&self, index: usize) -> bool {
        index + 1 >= self.chapters.len()
    }

    /// Back to the serialized form.
    pub fn to_document(&self) -> StoryDocument {
        StoryDocument {
            cover: self.cover.clone(),
            chapters: self.chapters.clone(),
            interludes: self
                .interludes
                .iter()
                .map(|(after_chapter, interlude)| InterludeEntry {
                    after_chapter: *after_chapter,
                    interlude: interlude.clone(),
                })
                .collect(),
            ending: self.ending.clone(),
            timings: self.timings.clone(),
        }
    }
}

impl TryFrom<StoryDocument> for Story {
    type Error = ContentError;

    fn try_from(document: StoryDocument) -> Result<Self, Self::Error> {
        Self::new(document)
    }
}
