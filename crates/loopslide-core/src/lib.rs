#![forbid(unsafe_code)]

//! `loopslide-core` is the host-independent half of the loopslide carousel.
//!
//! Design goals:
//! - **Host-driven I/O**: the embedding environment (JS) pushes triggers
//!   (clicks, pointer events, timer callbacks, transition-end) and measures
//!   layout on request through [`SlideMetrics`].
//! - **One choke point**: every position change goes through
//!   [`Carousel::set_visible`], which keeps the current index, committed offset
//!   and active pagination control consistent.
//! - **Pure rendering**: the styles a host must apply after a dispatch are a
//!   function of [`NavigationState`] alone ([`RenderFrame::from_state`]).
//! - **No blocking / no threads**: timers are requested as [`HostCommand`]s and
//!   delivered back as triggers, tagged with a [`TimerId`] generation so stale
//!   callbacks are ignored.
//!
//! This crate does not bind to `wasm-bindgen`. `loopslide-web` wraps it with a
//! DOM-facing API; [`sim::SimulatedHost`] drives it deterministically in tests.

pub mod config;
pub mod controller;
pub mod drag;
pub mod geometry;
pub mod markup;
pub mod render;
pub mod sequence;
pub mod sim;
pub mod timer;
pub mod trigger;

pub use config::CarouselConfig;
pub use controller::{Carousel, Dispatch, HostCommand, NavigationState};
pub use drag::PointerSource;
pub use geometry::{FixedMetrics, SlideMetrics, center_offset};
pub use markup::SlideRole;
pub use render::RenderFrame;
pub use sequence::{ClonePlacement, ExtendedSequence, StripEdge};
pub use timer::TimerId;
pub use trigger::{TRIGGER_TABLE, Trigger, TriggerBinding, TriggerKind};

/// Carousel configuration and construction error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CarouselError {
    /// Boundary cloning needs at least two original slides.
    TooFewSlides { found: usize },
    /// `startAtIndex` does not name an original slide.
    StartIndexOutOfRange { start: usize, slides: usize },
    /// Auto-play was enabled with a zero-length interval.
    ZeroInterval,
    /// A required host element is absent from the page.
    MissingElement(SlideRole),
    /// Start-up options could not be decoded.
    InvalidConfig(String),
}

impl core::fmt::Display for CarouselError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooFewSlides { found } => {
                write!(f, "carousel needs at least 2 slides, found {found}")
            }
            Self::StartIndexOutOfRange { start, slides } => {
                write!(f, "startAtIndex {start} is out of range for {slides} slides")
            }
            Self::ZeroInterval => write!(f, "timeInterval must be positive when autoPlay is on"),
            Self::MissingElement(role) => {
                write!(f, "missing required element {}", role.selector())
            }
            Self::InvalidConfig(msg) => write!(f, "invalid carousel options: {msg}"),
        }
    }
}

impl std::error::Error for CarouselError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn error_messages_name_the_problem() {
        assert_eq!(
            CarouselError::TooFewSlides { found: 1 }.to_string(),
            "carousel needs at least 2 slides, found 1"
        );
        assert_eq!(
            CarouselError::MissingElement(SlideRole::List).to_string(),
            "missing required element [data-slide=\"list\"]"
        );
        assert_eq!(
            CarouselError::StartIndexOutOfRange {
                start: 7,
                slides: 5
            }
            .to_string(),
            "startAtIndex 7 is out of range for 5 slides"
        );
    }
}
