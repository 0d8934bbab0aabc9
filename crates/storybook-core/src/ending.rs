//! Ending page. Terminal and purely presentational.

use std::time::Duration;

/// Entrance stagger for the ending elements, in render order: title,
/// message, divider, signature, final quote.
pub const ENTRANCE_DELAYS: [Duration; 5] = [
    Duration::from_millis(300),
    Duration::from_millis(800),
    Duration::from_millis(1200),
    Duration::from_millis(1500),
    Duration::from_millis(2000),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndingPage {
    shown_at: Option<Duration>,
}

impl EndingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, now: Duration) {
        tracing::debug!("Ending shown");
        self.shown_at = Some(now);
    }

    pub fn deactivate(&mut self) {
        self.shown_at = None;
    }

    pub fn is_active(&self) -> bool {
        self.shown_at.is_some()
    }

    /// Session time the ending became visible.
    pub fn shown_at(&self) -> Option<Duration> {
        self.shown_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_and_deactivate() {
        let mut ending = EndingPage::new();
        assert!(!ending.is_active());
        ending.activate(Duration::from_secs(3));
        assert!(ending.is_active());
        assert_eq!(ending.shown_at(), Some(Duration::from_secs(3)));
        ending.deactivate();
        assert!(!ending.is_active());
    }
}
