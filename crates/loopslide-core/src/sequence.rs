#![forbid(unsafe_code)]

//! Extended slide sequence: originals plus four boundary clones.
//!
//! Layout for `n` originals (extended length `n + 4`):
//!
//! ```text
//! ext:      0      1      2 ..... n+1    n+2    n+3
//! ordinal: -2     -1      0 ..... n-1     n     n+1
//! source:  n-2    n-1     0 ..... n-1     0      1
//!         guard  clone   originals      clone  guard
//! ```
//!
//! The ordinal is what the host stores in `data-index`; it is always
//! `ext - 2`. Extended indices 0 and `n + 3` are guard slides and never stay
//! current once a navigation settles.

/// Offset between original-slide space and extended-sequence space.
pub const LEADING_CLONES: usize = 2;

/// Which end of the strip a clone is inserted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StripEdge {
    Front,
    Back,
}

/// One clone the host must create during initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClonePlacement {
    /// Original slide to deep-clone.
    pub source: usize,
    /// Synthetic ordinal written to the clone's `data-index`.
    pub ordinal: i64,
    /// `Back` appends to the list, `Front` prepends.
    pub edge: StripEdge,
}

/// Index arithmetic for a carousel of `original_count` slides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtendedSequence {
    original_count: usize,
}

impl ExtendedSequence {
    /// Build the index space. Callers validate `original_count >= 2`.
    #[must_use]
    pub const fn new(original_count: usize) -> Self {
        Self { original_count }
    }

    /// Number of original slides (and pagination controls).
    #[must_use]
    pub const fn original_count(&self) -> usize {
        self.original_count
    }

    /// Length of the extended sequence.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.original_count + 2 * LEADING_CLONES
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.original_count == 0
    }

    /// Extended index of the real first slide.
    #[must_use]
    pub const fn first_real(&self) -> usize {
        LEADING_CLONES
    }

    /// Extended index of the real last slide.
    #[must_use]
    pub const fn last_real(&self) -> usize {
        self.len() - 1 - LEADING_CLONES
    }

    /// Map an original-slide index into extended space.
    #[must_use]
    pub fn to_extended(&self, original: usize) -> usize {
        debug_assert!(
            original < self.original_count,
            "original index {original} out of range for {} slides",
            self.original_count
        );
        original + LEADING_CLONES
    }

    /// Map an extended index to the original slide it shows (clones included).
    #[must_use]
    pub fn to_original(&self, ext: usize) -> usize {
        let n = self.original_count as i64;
        self.ordinal(ext).rem_euclid(n) as usize
    }

    /// `data-index` ordinal of the slide at `ext`.
    #[must_use]
    pub const fn ordinal(&self, ext: usize) -> i64 {
        ext as i64 - LEADING_CLONES as i64
    }

    /// Pagination control matching the slide at `ext`, by its stored ordinal.
    ///
    /// Clones carry ordinals outside `0..n` and have no control.
    #[must_use]
    pub fn control_for(&self, ext: usize) -> Option<usize> {
        let ordinal = self.ordinal(ext);
        (0..self.original_count as i64)
            .contains(&ordinal)
            .then_some(ordinal as usize)
    }

    #[must_use]
    pub const fn is_clone(&self, ext: usize) -> bool {
        ext < LEADING_CLONES || ext > self.last_real()
    }

    #[must_use]
    pub const fn is_guard(&self, ext: usize) -> bool {
        ext == 0 || ext + 1 >= self.len()
    }

    /// Real slide a resting clone must be silently swapped for, if any.
    ///
    /// Trailing clones (positive ordinal beyond the real range) resolve to the
    /// real first slide; leading clones (negative ordinal) to the real last.
    #[must_use]
    pub fn wraparound_target(&self, ext: usize) -> Option<usize> {
        if !self.is_clone(ext) {
            return None;
        }
        if self.ordinal(ext) > 0 {
            Some(self.first_real())
        } else {
            Some(self.last_real())
        }
    }

    /// Clones to create, in insertion order.
    ///
    /// Appends happen before prepends so the front clones end up as
    /// `[source n-2, source n-1]` ahead of the first original.
    #[must_use]
    pub fn clone_plan(&self) -> [ClonePlacement; 4] {
        let n = self.original_count;
        [
            ClonePlacement {
                source: 0,
                ordinal: n as i64,
                edge: StripEdge::Back,
            },
            ClonePlacement {
                source: 1,
                ordinal: n as i64 + 1,
                edge: StripEdge::Back,
            },
            ClonePlacement {
                source: n - 1,
                ordinal: -1,
                edge: StripEdge::Front,
            },
            ClonePlacement {
                source: n - 2,
                ordinal: -2,
                edge: StripEdge::Front,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn five_slide_layout() {
        let seq = ExtendedSequence::new(5);
        assert_eq!(seq.len(), 9);
        assert_eq!(seq.first_real(), 2);
        assert_eq!(seq.last_real(), 6);
        let ordinals: Vec<i64> = (0..seq.len()).map(|i| seq.ordinal(i)).collect();
        assert_eq!(ordinals, vec![-2, -1, 0, 1, 2, 3, 4, 5, 6]);
        let shown: Vec<usize> = (0..seq.len()).map(|i| seq.to_original(i)).collect();
        assert_eq!(shown, vec![3, 4, 0, 1, 2, 3, 4, 0, 1]);
    }

    #[test]
    fn conversions_round_trip_on_real_slides() {
        let seq = ExtendedSequence::new(4);
        for original in 0..4 {
            let ext = seq.to_extended(original);
            assert_eq!(seq.to_original(ext), original);
            assert_eq!(seq.control_for(ext), Some(original));
            assert!(!seq.is_clone(ext));
        }
    }

    #[test]
    fn clones_have_no_control() {
        let seq = ExtendedSequence::new(3);
        assert_eq!(seq.control_for(0), None);
        assert_eq!(seq.control_for(1), None);
        assert_eq!(seq.control_for(5), None);
        assert_eq!(seq.control_for(6), None);
    }

    #[test]
    fn guards_are_the_two_extremes() {
        let seq = ExtendedSequence::new(5);
        let guards: Vec<usize> = (0..seq.len()).filter(|&i| seq.is_guard(i)).collect();
        assert_eq!(guards, vec![0, 8]);
        assert!(seq.is_guard(9), "past-the-end requests are treated as guards");
    }

    #[test]
    fn wraparound_targets() {
        let seq = ExtendedSequence::new(5);
        assert_eq!(seq.wraparound_target(7), Some(2));
        assert_eq!(seq.wraparound_target(1), Some(6));
        assert_eq!(seq.wraparound_target(4), None);
    }

    #[test]
    fn clone_plan_matches_layout() {
        let seq = ExtendedSequence::new(5);
        let plan = seq.clone_plan();
        let mut strip: Vec<(usize, i64)> = (0..5).map(|i| (i, i as i64)).collect();
        for placement in plan {
            let entry = (placement.source, placement.ordinal);
            match placement.edge {
                StripEdge::Back => strip.push(entry),
                StripEdge::Front => strip.insert(0, entry),
            }
        }
        let expected: Vec<(usize, i64)> = (0..seq.len())
            .map(|i| (seq.to_original(i), seq.ordinal(i)))
            .collect();
        assert_eq!(strip, expected);
    }

    #[test]
    fn two_slides_clone_each_other() {
        let seq = ExtendedSequence::new(2);
        let sources: Vec<usize> = seq.clone_plan().iter().map(|p| p.source).collect();
        assert_eq!(sources, vec![0, 1, 1, 0]);
        assert_eq!(seq.last_real(), 3);
    }
}
