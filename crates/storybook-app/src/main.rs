//! Entry point for the storybook.

use std::process::ExitCode;
use std::sync::OnceLock;

use clap::Parser;
use dioxus::desktop::{Config, LogicalSize, WindowBuilder};
use dioxus::prelude::*;

use storybook_app::STYLES_CSS;
use storybook_app::cli::Args;
use storybook_app::components::App;
use storybook_core::Story;
use storybook_logging::StorybookSubscriberBuilder;

/// The story to present, loaded before launch.
static STORY: OnceLock<Story> = OnceLock::new();

fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = match StorybookSubscriberBuilder::new()
        .with_config(args.log_config())
        .try_init()
    {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    let story = match args.load_story() {
        Ok(story) => story,
        Err(e) => {
            tracing::error!(error = %e, path = ?args.story, "Failed to load story");
            return ExitCode::FAILURE;
        }
    };

    let window_title = story.cover().main_title.clone();
    tracing::info!(
        title = %window_title,
        chapters = story.chapter_count(),
        interludes = story.interlude_count(),
        speed = args.speed,
        "Starting storybook"
    );
    STORY.set(story).ok();

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            Config::new()
                .with_window(
                    WindowBuilder::new()
                        .with_title(window_title)
                        .with_inner_size(LogicalSize::new(900.0, 760.0))
                        .with_maximized(false),
                )
                .with_custom_head(format!(
                    r#"
                    <link rel="preconnect" href="https://fonts.googleapis.com">
                    <link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
                    <link href="https://fonts.googleapis.com/css2?family=Cormorant+Garamond:ital,wght@0,400;0,500;0,600;1,400&display=swap" rel="stylesheet">
                    <style>{}</style>
                    "#,
                    STYLES_CSS
                )),
        )
        .launch(RootApp);

    ExitCode::SUCCESS
}

/// Root component that hands the loaded story to the app.
#[component]
fn RootApp() -> Element {
    match STORY.get() {
        Some(story) => rsx! { App { story: story.clone() } },
        None => rsx! {
            div { class: "load-error", "No story loaded" }
        },
    }
}
