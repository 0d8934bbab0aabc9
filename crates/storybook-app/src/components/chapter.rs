//! Chapter page: label, typed subtitle, optional image, typed body and quote.

use dioxus::prelude::*;

use crate::driver::Session;

use super::typewriter::TypewriterText;

#[component]
pub fn ChapterView(session: Signal<Session>) -> Element {
    let session = session.read();
    let sequencer = session.book().chapter();
    let Some(chapter) = sequencer.chapter() else {
        return rsx! {};
    };

    let phase = sequencer.phase();
    // Consecutive chapters reuse the element; alternate the entrance animation.
    let parity = session.book().current_chapter() % 2;
    let title = chapter.title.clone();
    let image = chapter.image.clone();
    let subtitle = sequencer.subtitle().displayed().to_string();
    let subtitle_caret = sequencer.subtitle().shows_caret();
    let shows_content = sequencer.shows_content();
    let body = sequencer.body().displayed().to_string();
    let body_caret = sequencer.body().shows_caret();
    let shows_quote = sequencer.shows_quote();
    let quote = sequencer.quote().displayed().to_string();
    let quote_caret = sequencer.quote().shows_caret();

    rsx! {
        article {
            class: "chapter chapter-{phase} enter-{parity}",

            header {
                class: "chapter-header",
                p { class: "chapter-label", "{title}" }
                h2 {
                    class: "chapter-subtitle",
                    TypewriterText { text: subtitle, caret: subtitle_caret, class: "subtitle" }
                }
            }

            if shows_content {
                div { class: "chapter-divider" }
                if let Some(image) = image {
                    figure {
                        class: "chapter-figure",
                        img { src: "{image.url}", alt: "{image.alt}" }
                    }
                }
                p {
                    class: "chapter-body",
                    TypewriterText { text: body, caret: body_caret, class: "body" }
                }
            }

            if shows_quote {
                blockquote {
                    class: "chapter-quote",
                    TypewriterText { text: quote, caret: quote_caret, class: "quote" }
                }
            }
        }
    }
}
