//! Ending page.

use dioxus::prelude::*;
use storybook_core::ending::ENTRANCE_DELAYS;

use crate::driver::Session;

fn stagger(slot: usize) -> String {
    format!("animation-delay: {}ms;", ENTRANCE_DELAYS[slot].as_millis())
}

#[component]
pub fn EndingView(session: Signal<Session>) -> Element {
    let ending = {
        let session = session.read();
        if !session.book().ending().is_active() {
            return rsx! {};
        }
        session.book().story().ending().clone()
    };

    rsx! {
        section {
            class: "ending",
            h1 { class: "ending-title stagger", style: stagger(0), "{ending.title}" }
            if !ending.message.is_empty() {
                p { class: "ending-message stagger", style: stagger(1), "{ending.message}" }
            }
            div { class: "ending-divider stagger", style: stagger(2) }
            if !ending.signature.is_empty() {
                p { class: "ending-signature stagger", style: stagger(3), "{ending.signature}" }
            }
            if !ending.final_quote.is_empty() {
                p { class: "ending-quote stagger", style: stagger(4), "{ending.final_quote}" }
            }
        }
    }
}
