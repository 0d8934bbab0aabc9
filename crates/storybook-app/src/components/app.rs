//! Root application component with phase routing.

use dioxus::prelude::*;
use storybook_core::{Phase, Story, Storybook, SwipeDirection};

use crate::driver::Session;
use crate::theme::{CURRENT_THEME, Theme, ThemedRoot};

use super::chapter::ChapterView;
use super::cover::CoverView;
use super::ending::EndingView;
use super::interlude::InterludeView;
use super::progress::ProgressIndicator;

/// Root application component. Mounts exactly one view for the current phase.
#[component]
pub fn App(story: Story) -> Element {
    // Set theme inside component where Dioxus runtime is available
    use_hook(|| {
        *CURRENT_THEME.write() = Theme::Parchment;
    });

    let mut session = use_signal(|| Session::start_now(Storybook::new(story.clone())));

    // Driver loop: advance when a timer is due, then sleep until the next one
    let _driver = use_future(move || async move {
        loop {
            if session.peek().is_due() {
                session.write().tick();
            }
            let delay = session.peek().sleep_hint();
            tokio::time::sleep(delay).await;
        }
    });

    use_drop(|| {
        tracing::info!("Storybook closed");
    });

    let (phase, progress) = {
        let session = session.read();
        (session.book().phase(), session.book().progress())
    };

    let on_keydown = move |evt: KeyboardEvent| match (phase, evt.key()) {
        (Phase::Cover, Key::Enter) => {
            session.write().start();
        }
        (Phase::Interlude(_), Key::ArrowRight) => {
            session.write().navigate(SwipeDirection::Next);
        }
        (Phase::Interlude(_), Key::ArrowLeft) => {
            session.write().navigate(SwipeDirection::Previous);
        }
        _ => {}
    };

    rsx! {
        ThemedRoot {
            div {
                class: "storybook",
                tabindex: "0",
                onkeydown: on_keydown,
                onmounted: move |evt: MountedEvent| async move {
                    let _ = evt.set_focus(true).await;
                },

                if let Some(fraction) = progress {
                    ProgressIndicator { fraction }
                }

                {match phase {
                    Phase::Cover => rsx! { CoverView { session } },
                    Phase::Chapter(_) => rsx! { ChapterView { session } },
                    Phase::Interlude(_) => rsx! { InterludeView { session } },
                    Phase::Ending => rsx! { EndingView { session } },
                }}
            }
        }
    }
}
