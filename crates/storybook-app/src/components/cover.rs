//! Cover page.

use dioxus::prelude::*;
use storybook_core::cover::ENTRANCE_DELAYS;

use crate::driver::Session;

fn stagger(slot: usize) -> String {
    format!("animation-delay: {}ms;", ENTRANCE_DELAYS[slot].as_millis())
}

#[component]
pub fn CoverView(mut session: Signal<Session>) -> Element {
    let (cover, exiting) = {
        let session = session.read();
        (
            session.book().story().cover().clone(),
            session.book().cover().is_exiting(),
        )
    };
    let class = if exiting { "cover cover-exiting" } else { "cover" };

    rsx! {
        section {
            class: "{class}",

            div { class: "cover-ornament stagger", style: stagger(0), "✦" }
            h1 { class: "cover-title stagger", style: stagger(1), "{cover.main_title}" }
            if !cover.subtitle.is_empty() {
                p { class: "cover-subtitle stagger", style: stagger(2), "{cover.subtitle}" }
            }
            if !cover.author_line.is_empty() {
                p { class: "cover-author stagger", style: stagger(3), "{cover.author_line}" }
            }
            div { class: "cover-divider stagger", style: stagger(4) }

            button {
                class: "cover-start stagger",
                style: stagger(5),
                disabled: exiting,
                onclick: move |_| {
                    session.write().start();
                },
                "{cover.button_text}"
            }
        }
    }
}
