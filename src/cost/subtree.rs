//! Recursive full-grouping cost
//!
//! A full grouping of W ≥ 5 points is two child groupings joined to the
//! parent branch point by diagonal connectors (the "leftover"):
//!
//!   cost(W) = cost(left) + cost(right) + leftover(W, ⌊W/2⌋ + 1, left, right)
//!
//! bottoming out at the closed-form base groups (W < 5).

use std::f64::consts::SQRT_2;

use super::group::group_cost;
use crate::{span::full_group_height, SupportError};

/// Widths of the two child subtrees of a full grouping
///
/// Never (even, even): odd/odd and odd/even pairs bridge with less material
/// on this lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubtreePair {
    /// Left subtree width
    pub left: u64,

    /// Right subtree width
    pub right: u64,
}

impl SubtreePair {
    /// Split W into ⌊W/2⌋ and the rest, shifting one point right if both
    /// halves are even
    ///
    /// `None` for W < 2 (nothing to split).
    pub fn split(width: u64) -> Option<Self> {
        if width < 2 {
            return None;
        }

        let mut left = width / 2;
        let mut right = width - left;

        if left % 2 == 0 && right % 2 == 0 {
            left -= 1;
            right = width - left;
        }

        Some(Self { left, right })
    }

    /// Combined width
    #[inline]
    pub fn width(&self) -> u64 {
        self.left + self.right
    }

    /// True if both sides are even (never produced by [`SubtreePair::split`])
    #[inline]
    pub fn is_even_even(&self) -> bool {
        self.left % 2 == 0 && self.right % 2 == 0
    }
}

/// Length of the diagonal connectors joining a pair of child groupings to
/// the parent branch point at height H (in grid points)
///
/// Each child's grouping tops out at `⌊w/2⌋ + 1`; its diagonal rises the
/// rest of the way. An even parent puts a cant on one side: one diagonal
/// member is traded for a vertical one.
pub fn leftover_cost(width: u64, height: u64, pair: SubtreePair) -> Result<f64, SupportError> {
    if pair.left == 0 || pair.right == 0 || pair.width() != width {
        return Err(SupportError::InvalidSubtreePair {
            width,
            left: pair.left,
            right: pair.right,
        });
    }

    let left_group_height = full_group_height(pair.left);
    let right_group_height = full_group_height(pair.right);
    let required = left_group_height.max(right_group_height);
    if height < required {
        return Err(SupportError::HeightTooSmall {
            width,
            height,
            required,
        });
    }

    let left_diagonal_height = height - left_group_height;
    let right_diagonal_height = height - right_group_height;
    let combined_height = left_diagonal_height + right_diagonal_height;

    if width % 2 == 0 {
        if combined_height == 0 {
            return Err(SupportError::HeightTooSmall {
                width,
                height,
                required: height + 1,
            });
        }
        Ok((combined_height - 1) as f64 * SQRT_2 + 1.0)
    } else {
        Ok(combined_height as f64 * SQRT_2)
    }
}

/// Cost of the full grouping of a width-W subtree with H points of headroom
///
/// The grouping always occupies its natural height `⌊W/2⌋ + 1`; H only has
/// to reach it. Plain recursion, one call per node of the subtree; see
/// [`super::CostEvaluator`] for the memoized and parallel variants.
pub fn subtree_cost(width: u64, height: u64) -> Result<f64, SupportError> {
    check_headroom(width, height)?;
    grouping_cost(width)
}

/// Reject W = 0 and headroom below the grouping's natural height
pub(crate) fn check_headroom(width: u64, height: u64) -> Result<(), SupportError> {
    if width == 0 {
        return Err(SupportError::InvalidWidth(width));
    }
    let required = full_group_height(width);
    if height < required {
        return Err(SupportError::HeightTooSmall {
            width,
            height,
            required,
        });
    }
    Ok(())
}

/// Split a W ≥ 5 grouping: child pair plus the height children hang from
pub(crate) fn split_grouping(width: u64) -> Result<(SubtreePair, u64), SupportError> {
    let pair = SubtreePair::split(width).ok_or(SupportError::InvalidWidth(width))?;
    Ok((pair, full_group_height(width)))
}

fn grouping_cost(width: u64) -> Result<f64, SupportError> {
    if let Some(cost) = group_cost(width) {
        return Ok(cost);
    }

    let (pair, group_height) = split_grouping(width)?;
    let left = grouping_cost(pair.left)?;
    let right = grouping_cost(pair.right)?;
    let leftover = leftover_cost(width, group_height, pair)?;

    Ok(left + right + leftover)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_split_avoids_even_even() {
        assert_eq!(SubtreePair::split(5), Some(SubtreePair { left: 2, right: 3 }));
        assert_eq!(SubtreePair::split(8), Some(SubtreePair { left: 3, right: 5 }));
        assert_eq!(SubtreePair::split(12), Some(SubtreePair { left: 5, right: 7 }));
        assert_eq!(SubtreePair::split(13), Some(SubtreePair { left: 6, right: 7 }));
        assert_eq!(SubtreePair::split(1), None);

        for width in 5..500 {
            let pair = SubtreePair::split(width).unwrap();
            assert!(!pair.is_even_even(), "even/even split for {width}");
            assert_eq!(pair.width(), width);
        }
    }

    #[test]
    fn test_leftover_odd_parent() {
        // W = 5 -> (2, 3) at height 3: diagonals rise 1 each
        let pair = SubtreePair::split(5).unwrap();
        let cost = leftover_cost(5, 3, pair).unwrap();
        assert!((cost - 2.0 * SQRT_2).abs() < EPS);
    }

    #[test]
    fn test_leftover_even_parent_has_cant() {
        // W = 6 -> (3, 3) at height 4: combined rise 4, one diagonal traded
        let pair = SubtreePair::split(6).unwrap();
        let cost = leftover_cost(6, 4, pair).unwrap();
        assert!((cost - (3.0 * SQRT_2 + 1.0)).abs() < EPS);
    }

    #[test]
    fn test_leftover_rejects_bad_pairs() {
        let pair = SubtreePair { left: 2, right: 2 };
        assert!(leftover_cost(5, 3, pair).is_err());
        let pair = SubtreePair { left: 0, right: 5 };
        assert!(leftover_cost(5, 3, pair).is_err());
        let pair = SubtreePair::split(9).unwrap();
        assert!(leftover_cost(9, 2, pair).is_err());
    }

    #[test]
    fn test_subtree_cost_base_and_recursive() {
        assert!((subtree_cost(3, 2).unwrap() - (2.0 * SQRT_2 + 1.0)).abs() < EPS);

        // 5 = (2, 3) + 2√2
        let expected = (SQRT_2 + 1.0) + (2.0 * SQRT_2 + 1.0) + 2.0 * SQRT_2;
        assert!((subtree_cost(5, 3).unwrap() - expected).abs() < EPS);
    }

    #[test]
    fn test_subtree_cost_ignores_extra_headroom() {
        let natural = subtree_cost(21, 11).unwrap();
        assert!((subtree_cost(21, 50).unwrap() - natural).abs() < EPS);
    }

    #[test]
    fn test_subtree_cost_rejects_low_headroom() {
        assert!(subtree_cost(21, 10).is_err());
        assert!(subtree_cost(0, 10).is_err());
    }
}
