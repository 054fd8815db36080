#![forbid(unsafe_code)]

//! Centering math and the layout measurement seam.

/// Layout measurements the controller needs to center a slide.
///
/// The web host reads `document.body.clientWidth` and the target slide's
/// `clientWidth`; tests use [`FixedMetrics`].
pub trait SlideMetrics {
    /// Width of the visible viewport in CSS pixels.
    fn viewport_width(&self) -> f64;

    /// Rendered width of the slide at extended index `index`.
    fn slide_width(&self, index: usize) -> f64;
}

/// Constant measurements (uniform slide width).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    pub viewport_width: f64,
    pub slide_width: f64,
}

impl FixedMetrics {
    #[must_use]
    pub const fn new(viewport_width: f64, slide_width: f64) -> Self {
        Self {
            viewport_width,
            slide_width,
        }
    }
}

impl SlideMetrics for FixedMetrics {
    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    fn slide_width(&self, _index: usize) -> f64 {
        self.slide_width
    }
}

impl<M: SlideMetrics + ?Sized> SlideMetrics for &M {
    fn viewport_width(&self) -> f64 {
        (**self).viewport_width()
    }

    fn slide_width(&self, index: usize) -> f64 {
        (**self).slide_width(index)
    }
}

/// Strip translation that centers slide `index` in the viewport.
///
/// `(viewport - slide) / 2` is the centering margin; `index * slide` moves the
/// target to the left edge. Assumes every slide has the same width.
#[must_use]
pub fn center_offset(index: usize, slide_width: f64, viewport_width: f64) -> f64 {
    let margin = (viewport_width - slide_width) / 2.0;
    margin - index as f64 * slide_width
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn offset_formula() {
        assert_eq!(center_offset(2, 600.0, 1000.0), 200.0 - 1200.0);
        assert_eq!(center_offset(0, 1000.0, 1000.0), 0.0);
    }

    #[test]
    fn translated_slide_center_lands_on_viewport_center() {
        let (w, viewport) = (320.0, 1280.0);
        for index in 0..12 {
            let offset = center_offset(index, w, viewport);
            let left = index as f64 * w + offset;
            assert_eq!(left + w / 2.0, viewport / 2.0, "slide {index}");
        }
    }

    #[test]
    fn slides_wider_than_viewport_still_center() {
        let offset = center_offset(3, 900.0, 600.0);
        assert_eq!(3.0 * 900.0 + offset + 450.0, 300.0);
    }
}
