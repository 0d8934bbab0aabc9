//! Horizontal swipe detection.
//!
//! Touch drags and mouse drags go through the same [`PointerGesture`]:
//! `start` on press, `move_to` while dragging, `end` on release. A release
//! whose horizontal displacement exceeds the threshold is a swipe.

use std::fmt;

/// Input modality that produced a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Touch,
    Mouse,
    Pen,
}

impl PointerKind {
    /// Map a DOM `pointerType` string ("touch", "mouse", "pen").
    pub fn from_dom(pointer_type: &str) -> Self {
        match pointer_type {
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Mouse,
        }
    }
}

/// Navigation direction produced by a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Dragged right-to-left.
    Next,
    /// Dragged left-to-right.
    Previous,
}

impl fmt::Display for SwipeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwipeDirection::Next => f.write_str("next"),
            SwipeDirection::Previous => f.write_str("previous"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    kind: PointerKind,
    start_x: f64,
    last_x: f64,
}

/// Tracks one drag at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerGesture {
    threshold: f64,
    drag: Option<Drag>,
}

impl PointerGesture {
    /// `threshold` is the displacement, in logical pixels, a drag must
    /// exceed to count as a swipe.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.abs(),
            drag: None,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Begin tracking a drag. A drag already in progress is replaced.
    pub fn start(&mut self, kind: PointerKind, x: f64) {
        self.drag = Some(Drag {
            kind,
            start_x: x,
            last_x: x,
        });
    }

    /// Record the latest pointer position. Ignored when not tracking.
    pub fn move_to(&mut self, x: f64) {
        if let Some(drag) = self.drag.as_mut() {
            drag.last_x = x;
        }
    }

    /// Finish the drag and classify it.
    ///
    /// `x` is the release position when the platform reports one (touch end
    /// events usually do not); otherwise the last moved position is used.
    /// A pointer that leaves the surface mid-drag ends here with `None`.
    pub fn end(&mut self, x: Option<f64>) -> Option<SwipeDirection> {
        let drag = self.drag.take()?;
        let end_x = x.unwrap_or(drag.last_x);
        let dx = end_x - drag.start_x;
        if dx.abs() <= self.threshold {
            return None;
        }
        let direction = if dx < 0.0 {
            SwipeDirection::Next
        } else {
            SwipeDirection::Previous
        };
        tracing::trace!(kind = ?drag.kind, dx, %direction, "Swipe detected");
        Some(direction)
    }

    /// Abandon the drag without classifying it (the platform cancelled the
    /// pointer).
    pub fn cancel(&mut self) {
        self.drag = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.drag.is_some()
    }

    /// Current horizontal displacement, or 0 when not tracking.
    pub fn displacement(&self) -> f64 {
        self.drag.map(|d| d.last_x - d.start_x).unwrap_or(0.0)
    }

    pub fn kind(&self) -> Option<PointerKind> {
        self.drag.map(|d| d.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_drag_is_next() {
        let mut g = PointerGesture::new(60.0);
        g.start(PointerKind::Touch, 300.0);
        g.move_to(250.0);
        g.move_to(200.0);
        assert_eq!(g.displacement(), -100.0);
        assert_eq!(g.end(None), Some(SwipeDirection::Next));
        assert!(!g.is_tracking());
    }

    #[test]
    fn test_right_drag_is_previous() {
        let mut g = PointerGesture::new(60.0);
        g.start(PointerKind::Mouse, 100.0);
        assert_eq!(g.end(Some(161.0)), Some(SwipeDirection::Previous));
    }

    #[test]
    fn test_threshold_must_be_exceeded() {
        let mut g = PointerGesture::new(60.0);
        g.start(PointerKind::Mouse, 100.0);
        assert_eq!(g.end(Some(160.0)), None);
        g.start(PointerKind::Mouse, 100.0);
        assert_eq!(g.end(Some(40.0)), None);
    }

    #[test]
    fn test_end_without_start() {
        let mut g = PointerGesture::new(60.0);
        g.move_to(500.0);
        assert_eq!(g.end(Some(0.0)), None);
    }

    #[test]
    fn test_cancel_discards_drag() {
        let mut g = PointerGesture::new(60.0);
        g.start(PointerKind::Touch, 0.0);
        g.move_to(-200.0);
        g.cancel();
        assert_eq!(g.end(None), None);
        assert_eq!(g.displacement(), 0.0);
    }

    #[test]
    fn test_release_without_position_uses_last_move() {
        let mut g = PointerGesture::new(60.0);
        g.start(PointerKind::Mouse, 400.0);
        g.move_to(200.0);
        assert_eq!(g.end(None), Some(SwipeDirection::Next));

        // No movement recorded: the drag ends where it started.
        g.start(PointerKind::Mouse, 400.0);
        assert_eq!(g.end(None), None);
    }

    #[test]
    fn test_pointer_kind_from_dom() {
        assert_eq!(PointerKind::from_dom("touch"), PointerKind::Touch);
        assert_eq!(PointerKind::from_dom("pen"), PointerKind::Pen);
        assert_eq!(PointerKind::from_dom("mouse"), PointerKind::Mouse);
        assert_eq!(PointerKind::from_dom(""), PointerKind::Mouse);
    }
}
