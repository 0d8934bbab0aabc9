//! Choreography timings.
//!
//! Every delay the storybook uses lives in [`Timings`]. The defaults match
//! the pacing the story was written for; a story document may override any
//! of them under `"timings"` (values in milliseconds).

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default display time for one interlude image.
pub const DEFAULT_IMAGE_DURATION: Duration = Duration::from_secs(5);

/// Timing configuration for the whole storybook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Per-character delay for the chapter subtitle
    #[serde(rename = "subtitle_char_delay_ms", with = "millis")]
    pub subtitle_char_delay: Duration,
    /// Per-character delay for the chapter body
    #[serde(rename = "body_char_delay_ms", with = "millis")]
    pub body_char_delay: Duration,
    /// Per-character delay for the chapter quote
    #[serde(rename = "quote_char_delay_ms", with = "millis")]
    pub quote_char_delay: Duration,
    /// Pause between the subtitle finishing and the body starting
    #[serde(rename = "title_pause_ms", with = "millis")]
    pub title_pause: Duration,
    /// Pause between the body finishing and the quote starting
    #[serde(rename = "quote_pause_ms", with = "millis")]
    pub quote_pause: Duration,
    /// Dwell before leaving a chapter that has no quote
    #[serde(rename = "dwell_after_body_ms", with = "millis")]
    pub dwell_after_body: Duration,
    /// Dwell before leaving a chapter that ended on a quote
    #[serde(rename = "dwell_after_quote_ms", with = "millis")]
    pub dwell_after_quote: Duration,
    /// Cover exit animation; the start signal fires when it ends
    #[serde(rename = "cover_exit_ms", with = "millis")]
    pub cover_exit: Duration,
    /// Interlude overlay fade-in
    #[serde(rename = "interlude_enter_ms", with = "millis")]
    pub interlude_enter: Duration,
    /// Slide-out animation between two interlude images
    #[serde(rename = "slide_out_ms", with = "millis")]
    pub slide_out: Duration,
    /// Interlude overlay fade-out after the last image
    #[serde(rename = "interlude_exit_ms", with = "millis")]
    pub interlude_exit: Duration,
    /// Horizontal drag distance (logical pixels) that counts as a swipe
    pub swipe_threshold_px: f64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            subtitle_char_delay: Duration::from_millis(80),
            body_char_delay: Duration::from_millis(35),
            quote_char_delay: Duration::from_millis(40),
            title_pause: Duration::from_millis(400),
            quote_pause: Duration::from_millis(600),
            dwell_after_body: Duration::from_millis(2000),
            dwell_after_quote: Duration::from_millis(3000),
            cover_exit: Duration::from_millis(800),
            interlude_enter: Duration::from_millis(800),
            slide_out: Duration::from_millis(300),
            interlude_exit: Duration::from_millis(700),
            swipe_threshold_px: 60.0,
        }
    }
}

impl Timings {
    /// Scale every delay by `1 / speed` (2.0 plays twice as fast).
    ///
    /// Non-finite or non-positive speeds leave the timings unchanged. The
    /// swipe threshold is a distance and is never scaled.
    pub fn scaled(&self, speed: f32) -> Self {
        if !speed.is_finite() || speed <= 0.0 {
            return self.clone();
        }
        let scale = |d: Duration| scale_duration(d, speed);
        Self {
            subtitle_char_delay: scale(self.subtitle_char_delay),
            body_char_delay: scale(self.body_char_delay),
            quote_char_delay: scale(self.quote_char_delay),
            title_pause: scale(self.title_pause),
            quote_pause: scale(self.quote_pause),
            dwell_after_body: scale(self.dwell_after_body),
            dwell_after_quote: scale(self.dwell_after_quote),
            cover_exit: scale(self.cover_exit),
            interlude_enter: scale(self.interlude_enter),
            slide_out: scale(self.slide_out),
            interlude_exit: scale(self.interlude_exit),
            swipe_threshold_px: self.swipe_threshold_px,
        }
    }
}

/// `duration / speed`, rounded to the nanosecond. `speed` must be finite and
/// positive.
pub(crate) fn scale_duration(duration: Duration, speed: f32) -> Duration {
    Duration::from_nanos((duration.as_nanos() as f64 / f64::from(speed)).round() as u64)
}

/// Serde adapter storing a [`Duration`] as whole milliseconds.
pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timings() {
        let timings = Timings::default();
        assert_eq!(timings.cover_exit, Duration::from_millis(800));
        assert_eq!(timings.slide_out, Duration::from_millis(300));
        assert_eq!(timings.swipe_threshold_px, 60.0);
        assert!(timings.dwell_after_quote > timings.dwell_after_body);
        assert!(timings.quote_pause > timings.title_pause);
    }

    #[test]
    fn test_scaled_speeds_up() {
        let timings = Timings::default().scaled(2.0);
        assert_eq!(timings.cover_exit, Duration::from_millis(400));
        assert_eq!(timings.body_char_delay, Duration::from_micros(17_500));
        assert_eq!(timings.swipe_threshold_px, 60.0);
    }

    #[test]
    fn test_scaled_ignores_bad_speed() {
        let timings = Timings::default();
        assert_eq!(timings.scaled(0.0), timings);
        assert_eq!(timings.scaled(-1.0), timings);
        assert_eq!(timings.scaled(f32::NAN), timings);
    }

    #[test]
    fn test_partial_override_from_json() {
        let json = r#"{"cover_exit_ms": 100, "swipe_threshold_px": 40.0}"#;
        let timings: Timings = serde_json::from_str(json).unwrap();
        assert_eq!(timings.cover_exit, Duration::from_millis(100));
        assert_eq!(timings.swipe_threshold_px, 40.0);
        assert_eq!(timings.slide_out, Timings::default().slide_out);
    }
}
