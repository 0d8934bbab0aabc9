//! Desktop storybook
//!
//! A Dioxus desktop application that presents a [`storybook_core::Story`]:
//! cover, typewriter chapters, swipeable image interludes and an ending.
//! All sequencing lives in `storybook-core`; this crate renders the active
//! page and drives the core from a single timer loop.

pub mod cli;
pub mod components;
pub mod driver;
pub mod theme;

/// CSS styles embedded at compile time.
pub const STYLES_CSS: &str = include_str!("../assets/styles.css");
