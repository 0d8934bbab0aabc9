//! Full-screen image interlude.
//!
//! Touch, pen and mouse drags all arrive as pointer events and go to the
//! core's gesture detector; the view only renders the carousel state.

use dioxus::prelude::*;
use storybook_core::{InterludePhase, PointerKind, SwipeDirection};

use crate::driver::Session;

use super::progress::ImageProgress;

/// Fraction of the drag distance the image follows while dragging.
const DRAG_FOLLOW: f64 = 0.4;

#[component]
pub fn InterludeView(mut session: Signal<Session>) -> Element {
    let (image, index, phase, dots, drag, tracking) = {
        let session = session.read();
        let carousel = session.book().interlude();
        let Some(image) = carousel.current_image().cloned() else {
            return rsx! {};
        };
        (
            image,
            carousel.index(),
            carousel.phase(),
            carousel.dots(),
            carousel.gesture().displacement(),
            carousel.gesture().is_tracking(),
        )
    };

    let overlay_class = match phase {
        InterludePhase::Entering => "interlude interlude-entering",
        InterludePhase::Exiting | InterludePhase::Done => "interlude interlude-exiting",
        _ => "interlude",
    };
    let image_class = match phase {
        InterludePhase::Sliding(SwipeDirection::Next) => "interlude-image slide-out-next",
        InterludePhase::Sliding(SwipeDirection::Previous) => "interlude-image slide-out-previous",
        _ => "interlude-image",
    };
    let drag_style = if tracking && drag != 0.0 {
        format!("transform: translateX({:.1}px);", drag * DRAG_FOLLOW)
    } else {
        String::new()
    };
    let duration_ms = image.duration.as_millis() as u64;
    // Alternating animation names restart the CSS animations on every change.
    let parity = index % 2;

    rsx! {
        div {
            class: "{overlay_class}",
            onpointerdown: move |evt: PointerEvent| {
                let kind = PointerKind::from_dom(&evt.pointer_type());
                session.write().pointer_start(kind, evt.client_coordinates().x);
            },
            onpointermove: move |evt: PointerEvent| {
                if session.peek().book().interlude().gesture().is_tracking() {
                    session.write().pointer_move(evt.client_coordinates().x);
                }
            },
            onpointerup: move |evt: PointerEvent| {
                session.write().pointer_end(Some(evt.client_coordinates().x));
            },
            // Dragged off the overlay: classify from the last position.
            onpointerleave: move |_| {
                if session.peek().book().interlude().gesture().is_tracking() {
                    session.write().pointer_end(None);
                }
            },
            onpointercancel: move |_| {
                session.write().pointer_cancel();
            },

            figure {
                class: "{image_class} enter-{parity}",
                style: "{drag_style}",
                img { src: "{image.url}", alt: "{image.alt}", draggable: "false" }
                if let Some(caption) = image.caption() {
                    figcaption { class: "interlude-caption", "{caption}" }
                }
            }

            ImageProgress { duration_ms, cycle: index }

            nav {
                class: "interlude-dots",
                for (i, current) in dots.into_iter().enumerate() {
                    span {
                        key: "{i}",
                        class: if current { "interlude-dot current" } else { "interlude-dot" },
                    }
                }
            }

            p { class: "interlude-hint", "Swipe or drag to turn the page" }
        }
    }
}
