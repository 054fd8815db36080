#![forbid(unsafe_code)]

//! Pure rendering of the navigation state.
//!
//! After every dispatch the host applies one [`RenderFrame`]: transition
//! first, then transform, then the active control. Hosts may skip properties
//! that did not change since the last applied frame.

use crate::config::{NO_TRANSITION, SLIDE_TRANSITION};
use crate::controller::NavigationState;

/// Styles and classes the host must reflect for one navigation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderFrame {
    /// Horizontal strip offset in CSS pixels.
    pub offset: f64,
    /// Whether the next transform change animates.
    pub animate: bool,
    /// Pagination control carrying the active class.
    pub active_control: Option<usize>,
}

impl RenderFrame {
    #[must_use]
    pub fn from_state(state: &NavigationState) -> Self {
        Self {
            offset: state.saved_position,
            animate: state.animate,
            active_control: state.active_control,
        }
    }

    /// Value for the list's `transform` style.
    #[must_use]
    pub fn transform_css(&self) -> String {
        transform_css(self.offset)
    }

    /// Value for the list's `transition` style.
    #[must_use]
    pub const fn transition_css(&self) -> &'static str {
        transition_css(self.animate)
    }
}

#[must_use]
pub fn transform_css(offset: f64) -> String {
    format!("translateX({offset}px)")
}

#[must_use]
pub const fn transition_css(animate: bool) -> &'static str {
    if animate { SLIDE_TRANSITION } else { NO_TRANSITION }
}
