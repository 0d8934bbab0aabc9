//! Progress bars.

use dioxus::prelude::*;

/// Story progress across chapters and interludes; `fraction` is in [0, 1].
#[component]
pub fn ProgressIndicator(fraction: f64) -> Element {
    let percent = (fraction * 100.0).clamp(0.0, 100.0);

    rsx! {
        div {
            class: "story-progress",
            role: "progressbar",
            "aria-valuemin": "0",
            "aria-valuemax": "100",
            "aria-valuenow": "{percent:.0}",
            div { class: "story-progress-fill", style: "width: {percent:.2}%;" }
        }
    }
}

/// Per-image fill. `cycle` changes on every image change, which swaps the
/// animation name and restarts the fill; it reaches 100% exactly when the
/// image's time is up.
#[component]
pub fn ImageProgress(duration_ms: u64, cycle: usize) -> Element {
    let parity = cycle % 2;

    rsx! {
        div {
            class: "image-progress",
            div {
                class: "image-progress-fill",
                style: "animation-name: image-fill-{parity}; animation-duration: {duration_ms}ms;",
            }
        }
    }
}
