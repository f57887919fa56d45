//! Support span on the 45° grid
//!
//! Span = (W, H) in grid points
//!   W: number of points to support along the row
//!   H: number of grid levels from the build plate to the supported row
//!
//! A single n-tree of height H efficiently supports at most 2H − 3 points.

use std::fmt;

use crate::SupportError;

/// Largest height whose `2H − 3` still fits in a `u64`.
const MAX_HEIGHT: u64 = u64::MAX / 2;

/// Most n-trees a partition may hold; every tree width is kept in memory.
pub const MAX_TREES: u64 = 1 << 24;

/// Width and height of a region to be supported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Span {
    /// Width in grid points
    pub width: u64,

    /// Height in grid points
    pub height: u64,
}

impl Span {
    /// Create a validated span
    ///
    /// Rejects W = 0 and H ≤ 1 (a single level cannot hold a tree).
    pub fn new(width: u64, height: u64) -> Result<Self, SupportError> {
        if width == 0 {
            return Err(SupportError::InvalidWidth(width));
        }
        validate_height(height)?;
        Ok(Self { width, height })
    }

    /// Efficiency bound for this span's height
    #[inline]
    pub fn max_width(&self) -> u64 {
        2 * self.height - 3
    }

    /// Whether a single n-tree covers the whole span
    #[inline]
    pub fn fits_single_tree(&self) -> bool {
        self.width <= self.max_width()
    }

    /// Upper bound on the tree count of either partition strategy
    ///
    /// Every recursive piece is at least `⌊(maxWidth + 1)/2⌋` wide, and the
    /// arithmetic strategy never emits more trees than that.
    pub fn tree_count_bound(&self) -> u64 {
        if self.fits_single_tree() {
            return 1;
        }
        self.width / ((self.max_width() + 1) / 2)
    }

    /// Reject spans whose partition would exceed [`MAX_TREES`]
    pub fn check_tree_count(&self) -> Result<(), SupportError> {
        if self.tree_count_bound() > MAX_TREES {
            return Err(SupportError::TooManyTrees {
                width: self.width,
                height: self.height,
                limit: MAX_TREES,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Check that a height can carry a tree and that `2H − 3` is representable.
pub(crate) fn validate_height(height: u64) -> Result<(), SupportError> {
    if height <= 1 || height > MAX_HEIGHT {
        return Err(SupportError::InvalidHeight(height));
    }
    Ok(())
}

/// `maxWidth = 2H − 3`: widest n-tree a height of H supports efficiently
pub fn max_width(height: u64) -> Result<u64, SupportError> {
    validate_height(height)?;
    Ok(2 * height - 3)
}

/// Height in grid points spanned by the full grouping of a width-W tree
///
/// `⌊W/2⌋ + 1`: each halving of the point row costs one level.
#[inline]
pub fn full_group_height(width: u64) -> u64 {
    width / 2 + 1
}

/// Stem height in grid points for a width-W tree standing H points tall
///
/// The stem and the full grouping share one point, so this is one more
/// than the stem's length in vertical units.
pub fn stem_height(width: u64, height: u64) -> Result<u64, SupportError> {
    let required = full_group_height(width);
    if height < required {
        return Err(SupportError::HeightTooSmall {
            width,
            height,
            required,
        });
    }
    Ok(height - width / 2)
}
