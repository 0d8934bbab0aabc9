//! UI components for the storybook.

mod app;
mod chapter;
mod cover;
mod ending;
mod interlude;
mod progress;
mod typewriter;

pub use app::App;
pub use chapter::ChapterView;
pub use cover::CoverView;
pub use ending::EndingView;
pub use interlude::InterludeView;
pub use progress::{ImageProgress, ProgressIndicator};
pub use typewriter::TypewriterText;
