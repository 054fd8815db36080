#![forbid(unsafe_code)]

//! Browser frontend for the loopslide carousel.
//!
//! [`Slider`] binds [`loopslide_core::Carousel`] to a page marked up with
//! `data-slide` roles: it builds the boundary clones and pagination buttons,
//! wires DOM events and timers to carousel triggers, and writes each frame to
//! the list's inline style.
//!
//! From JavaScript:
//!
//! ```text
//! import init, { initSlider, initLogging } from "./loopslide_web.js";
//! await init();
//! initLogging("info");
//! const slider = initSlider({ startAtIndex: 0, autoPlay: true, timeInterval: 3000 });
//! ```

use tracing::Level;

#[cfg(target_arch = "wasm32")]
mod console;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use console::{ConsoleMakeWriter, init_logging};
#[cfg(target_arch = "wasm32")]
pub use wasm::{Slider, init_slider};

/// Map a level name from the page to a `tracing` level.
///
/// Unknown names fall back to `info`.
#[must_use]
pub fn log_level(name: &str) -> Level {
    name.trim().parse().unwrap_or(Level::INFO)
}
