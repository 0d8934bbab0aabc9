//! Typed text with a caret.

use dioxus::prelude::*;

/// Revealed prefix of a typewriter, with a blinking caret while revealing.
#[component]
pub fn TypewriterText(
    #[props(into)] text: String,
    caret: bool,
    #[props(into)] class: String,
) -> Element {
    rsx! {
        span {
            class: "typewriter {class}",
            "{text}"
            if caret {
                span { class: "typewriter-caret", "aria-hidden": "true", "|" }
            }
        }
    }
}
