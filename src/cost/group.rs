//! Indivisible base groups
//!
//! Full groupings of 1 to 4 points cannot be split further; their cost is
//! closed-form (vertical unit = 1, diagonal unit = √2):
//!
//! | W | cost     |
//! |---|----------|
//! | 1 | 1        |
//! | 2 | √2 + 1   |
//! | 3 | 2√2 + 1  |
//! | 4 | 3√2 + 3  |

use std::f64::consts::SQRT_2;
use std::fmt;

/// Widths at or above this are recursively split into subtrees
pub const SPLIT_THRESHOLD: u64 = 5;

/// Full grouping of fewer than [`SPLIT_THRESHOLD`] points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum BaseGroup {
    /// Single point, one vertical member
    One,
    /// Two points
    Two,
    /// Three points
    Three,
    /// Four points
    Four,
}

impl BaseGroup {
    /// Base group for a width, `None` unless 1 ≤ W ≤ 4
    pub fn from_width(width: u64) -> Option<Self> {
        match width {
            1 => Some(BaseGroup::One),
            2 => Some(BaseGroup::Two),
            3 => Some(BaseGroup::Three),
            4 => Some(BaseGroup::Four),
            _ => None,
        }
    }

    /// Number of supported points
    #[inline]
    pub fn width(self) -> u64 {
        match self {
            BaseGroup::One => 1,
            BaseGroup::Two => 2,
            BaseGroup::Three => 3,
            BaseGroup::Four => 4,
        }
    }

    /// Member length of the full grouping
    #[inline]
    pub fn cost(self) -> f64 {
        match self {
            BaseGroup::One => 1.0,
            BaseGroup::Two => SQRT_2 + 1.0,
            BaseGroup::Three => 2.0 * SQRT_2 + 1.0,
            BaseGroup::Four => 3.0 * SQRT_2 + 3.0,
        }
    }
}

impl fmt::Display for BaseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.width())
    }
}

/// Closed-form full-grouping cost for W in 1..=4
///
/// Returns `None` for widths that must be split into subtrees.
pub fn group_cost(width: u64) -> Option<f64> {
    BaseGroup::from_width(width).map(BaseGroup::cost)
}
