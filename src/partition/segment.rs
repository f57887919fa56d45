//! Contiguous run of support points
//!
//! Segment = [start, start + width) along the supported row
//! Children via floor-half split:
//!   Left:  [start, start + ⌊W/2⌋)
//!   Right: [start + ⌊W/2⌋, start + W)

use std::fmt;

/// Contiguous run of points (implicit - just an offset and a width)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    /// Index of the first point (0-based)
    pub start: u64,

    /// Number of points
    pub width: u64,
}

impl Segment {
    /// Create segment covering `[start, start + width)`
    pub fn new(start: u64, width: u64) -> Self {
        Self { start, width }
    }

    /// Segment covering a whole span of `width` points
    pub fn whole(width: u64) -> Self {
        Self { start: 0, width }
    }

    /// One past the last point
    #[inline]
    pub fn end(&self) -> u64 {
        self.start + self.width
    }

    /// Whether a single n-tree of the given bound covers this segment
    #[inline]
    pub fn fits(&self, max_width: u64) -> bool {
        self.width <= max_width
    }

    /// Split into halves: left gets ⌊W/2⌋ points, right the rest
    ///
    /// Shrinkage: width(child) ≤ ⌈width(parent) / 2⌉
    pub fn halves(&self) -> (Segment, Segment) {
        debug_assert!(self.width >= 2, "cannot halve a single point");

        let left = self.width / 2;
        (
            Segment::new(self.start, left),
            Segment::new(self.start + left, self.width - left),
        )
    }

    /// Number of halvings until the wider branch fits within `max_width`
    ///
    /// Bounds the recursion depth of the recursive partitioner: O(log W).
    pub fn depth_to_fit(&self, max_width: u64) -> usize {
        let max_width = max_width.max(1);
        let mut segment = *self;
        let mut depth = 0;

        while !segment.fits(max_width) {
            // right half is never narrower than the left
            let (_, right) = segment.halves();
            segment = right;
            depth += 1;
        }

        depth
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end())
    }
}
