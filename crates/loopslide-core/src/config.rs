#![forbid(unsafe_code)]

//! Start-up options and fixed behavior constants.
//!
//! The only configuration surface is the three options accepted by
//! `initSlider`: `startAtIndex`, `autoPlay` and `timeInterval`. Everything else
//! (drag thresholds, debounce window, transition style) is a constant of the
//! interaction model.

use core::time::Duration;

use serde::Deserialize;

use crate::CarouselError;

/// Default auto-advance period in milliseconds.
pub const DEFAULT_TIME_INTERVAL_MS: u32 = 3000;

/// Quiet period after the last window resize before re-centering.
pub const RESIZE_DEBOUNCE: Duration = Duration::from_millis(1000);

/// Net horizontal movement a mouse drag must exceed to change slide.
pub const MOUSE_DRAG_THRESHOLD_PX: f64 = 150.0;

/// Net horizontal movement a touch swipe must exceed to change slide.
pub const TOUCH_DRAG_THRESHOLD_PX: f64 = 50.0;

/// CSS `transition` value used for animated navigation.
pub const SLIDE_TRANSITION: &str = "transform .5s";

/// CSS `transition` value used for drags and wraparound correction.
pub const NO_TRANSITION: &str = "none";

/// Carousel start-up options.
///
/// Deserializes from the JS options object shape (`camelCase`, every field
/// optional).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarouselConfig {
    /// Original-slide index shown first.
    pub start_at_index: usize,
    /// Whether the auto-advance timer runs.
    pub auto_play: bool,
    /// Auto-advance period in milliseconds.
    pub time_interval: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            start_at_index: 0,
            auto_play: true,
            time_interval: DEFAULT_TIME_INTERVAL_MS,
        }
    }
}

impl CarouselConfig {
    /// Decode options from JSON. Empty input, `null` and `undefined` yield
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, CarouselError> {
        let trimmed = json.trim();
        if trimmed.is_empty() || trimmed == "null" || trimmed == "undefined" {
            return Ok(Self::default());
        }
        serde_json::from_str(trimmed).map_err(|err| CarouselError::InvalidConfig(err.to_string()))
    }

    /// Check the options against the number of original slides.
    pub fn validate(&self, slide_count: usize) -> Result<(), CarouselError> {
        if slide_count < 2 {
            return Err(CarouselError::TooFewSlides { found: slide_count });
        }
        if self.start_at_index >= slide_count {
            return Err(CarouselError::StartIndexOutOfRange {
                start: self.start_at_index,
                slides: slide_count,
            });
        }
        if self.auto_play && self.time_interval == 0 {
            return Err(CarouselError::ZeroInterval);
        }
        Ok(())
    }

    /// Auto-advance period.
    #[must_use]
    pub fn interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.time_interval))
    }
}
