#![forbid(unsafe_code)]

//! Pointer/touch drag bookkeeping.
//!
//! A drag is one press → move* → release lifecycle scoped to the pressed
//! slide. Touch input is projected onto the same horizontal coordinate as
//! mouse input before it reaches this module; the only difference between the
//! two sources is the release threshold.

use crate::config::{MOUSE_DRAG_THRESHOLD_PX, TOUCH_DRAG_THRESHOLD_PX};

/// Input device that started a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Mouse,
    Touch,
}

impl PointerSource {
    /// Net movement that must be exceeded for a release to change slide.
    #[must_use]
    pub const fn threshold(self) -> f64 {
        match self {
            Self::Mouse => MOUSE_DRAG_THRESHOLD_PX,
            Self::Touch => TOUCH_DRAG_THRESHOLD_PX,
        }
    }

    /// DOM event type delivering moves for this source.
    #[must_use]
    pub const fn move_event(self) -> &'static str {
        match self {
            Self::Mouse => "mousemove",
            Self::Touch => "touchmove",
        }
    }
}

/// What a release commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseDecision {
    Advance,
    Retreat,
    SnapBack,
}

impl ReleaseDecision {
    /// Classify accumulated `movement` against the source threshold.
    ///
    /// Dragging left (negative movement) reveals the next slide.
    #[must_use]
    pub fn classify(movement: f64, source: PointerSource) -> Self {
        let threshold = source.threshold();
        if movement < -threshold {
            Self::Advance
        } else if movement > threshold {
            Self::Retreat
        } else {
            Self::SnapBack
        }
    }
}

/// In-progress drag: which slide was pressed and by what.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    pub slide: usize,
    pub source: PointerSource,
}
