//! Tree cost evaluator
//!
//! Cost = total member length of an n-tree:
//! - Stem: vertical members from the build plate to the full grouping
//! - Full grouping: branching structure reaching all W points
//!
//! Vertical members are 1 unit, 45° diagonals √2.

mod evaluator;
mod group;
mod subtree;

pub use evaluator::{CostEvaluator, EvaluationMode};
pub use group::{group_cost, BaseGroup, SPLIT_THRESHOLD};
pub use subtree::{leftover_cost, subtree_cost, SubtreePair};

use crate::SupportError;

/// Cost of a single n-tree of width W standing H points tall
///
/// Fails with an invalid-input error for W = 0, H ≤ 1, or H below the
/// grouping height `⌊W/2⌋ + 1` (the stem would have negative length).
pub fn tree_cost(width: u64, height: u64) -> Result<f64, SupportError> {
    CostEvaluator::memoized().tree_cost(width, height)
}

/// Total cost of trees of the given widths, all standing H points tall
pub fn list_cost(widths: &[u64], height: u64) -> Result<f64, SupportError> {
    CostEvaluator::memoized().list_cost(widths.iter().copied(), height)
}
