//! Strategy comparison
//!
//! The recursive partitioner is not cost-optimal for every (W, H), and the
//! arithmetic one is not either. These helpers measure the gap.

use std::ops::RangeInclusive;

use tracing::{debug, info};

use crate::cost::CostEvaluator;
use crate::partition::Strategy;
use crate::span::Span;
use crate::SupportError;

/// Both strategies evaluated on one span
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct StrategyComparison {
    /// Span compared
    pub span: Span,
    /// Total cost with the recursive partition
    pub recursive_cost: f64,
    /// Total cost with the arithmetic partition
    pub arithmetic_cost: f64,
    /// Tree count of the recursive partition
    pub recursive_trees: usize,
    /// Tree count of the arithmetic partition
    pub arithmetic_trees: usize,
}

impl StrategyComparison {
    /// recursive / arithmetic; above 1 means the recursive partition is worse
    pub fn ratio(&self) -> f64 {
        self.recursive_cost / self.arithmetic_cost
    }

    /// Cheaper strategy; ties go to arithmetic (never more trees)
    pub fn preferred(&self) -> Strategy {
        if self.recursive_cost < self.arithmetic_cost {
            Strategy::Recursive
        } else {
            Strategy::Arithmetic
        }
    }
}

/// Evaluate both strategies on a span
pub fn compare_strategies(width: u64, height: u64) -> Result<StrategyComparison, SupportError> {
    let mut evaluator = CostEvaluator::memoized();
    compare_with(&mut evaluator, Span::new(width, height)?)
}

fn compare_with(
    evaluator: &mut CostEvaluator,
    span: Span,
) -> Result<StrategyComparison, SupportError> {
    let recursive = Strategy::Recursive.partition(span.width, span.height)?;
    let arithmetic = Strategy::Arithmetic.partition(span.width, span.height)?;

    let comparison = StrategyComparison {
        span,
        recursive_cost: evaluator.list_cost(recursive.iter(), span.height)?,
        arithmetic_cost: evaluator.list_cost(arithmetic.iter(), span.height)?,
        recursive_trees: recursive.len(),
        arithmetic_trees: arithmetic.len(),
    };

    debug!(
        span = %span,
        ratio = comparison.ratio(),
        "compared partition strategies"
    );

    Ok(comparison)
}

/// Comparisons for one width across a range of heights
#[derive(Debug, Clone)]
pub struct HeightSweep {
    /// Swept width
    pub width: u64,
    /// One entry per height, ascending
    pub entries: Vec<StrategyComparison>,
}

impl HeightSweep {
    /// Smallest ratio and the height it occurs at
    pub fn min_ratio(&self) -> Option<(u64, f64)> {
        self.entries
            .iter()
            .map(|entry| (entry.span.height, entry.ratio()))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Largest ratio and the height it occurs at
    pub fn max_ratio(&self) -> Option<(u64, f64)> {
        self.entries
            .iter()
            .map(|entry| (entry.span.height, entry.ratio()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Heights at which the recursive partition costs more
    pub fn recursive_worse_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.ratio() > 1.0).count()
    }
}

/// Compare strategies for a fixed width at every height in the range
///
/// Heights below 2 are skipped. The subtree cache is shared across heights.
pub fn sweep_heights(
    width: u64,
    heights: RangeInclusive<u64>,
) -> Result<HeightSweep, SupportError> {
    if width == 0 {
        return Err(SupportError::InvalidWidth(width));
    }

    let mut evaluator = CostEvaluator::memoized();
    let start = (*heights.start()).max(2);
    let mut entries = Vec::new();

    for height in start..=*heights.end() {
        entries.push(compare_with(&mut evaluator, Span::new(width, height)?)?);
    }

    let sweep = HeightSweep { width, entries };
    info!(
        width,
        heights = sweep.entries.len(),
        recursive_worse = sweep.recursive_worse_count(),
        "height sweep complete"
    );

    Ok(sweep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_partitions_tie() {
        // H = 2 forces unit trees in both strategies
        let comparison = compare_strategies(100, 2).unwrap();
        assert_eq!(comparison.recursive_trees, 100);
        assert_eq!(comparison.arithmetic_trees, 100);
        assert!((comparison.ratio() - 1.0).abs() < 1e-12);
        assert_eq!(comparison.preferred(), Strategy::Arithmetic);
    }

    #[test]
    fn test_recursive_wins_at_moderate_height() {
        let comparison = compare_strategies(100, 4).unwrap();
        assert!(comparison.ratio() < 1.0);
        assert_eq!(comparison.preferred(), Strategy::Recursive);
    }

    #[test]
    fn test_arithmetic_wins_at_minimal_height() {
        let comparison = compare_strategies(2000, 3).unwrap();
        assert!(comparison.ratio() > 1.0);
        assert_eq!(comparison.preferred(), Strategy::Arithmetic);
    }

    #[test]
    fn test_sweep_skips_degenerate_heights() {
        let sweep = sweep_heights(60, 0..=6).unwrap();
        assert_eq!(sweep.entries.len(), 5);
        assert_eq!(sweep.entries[0].span.height, 2);

        let (_, min) = sweep.min_ratio().unwrap();
        let (_, max) = sweep.max_ratio().unwrap();
        assert!(min <= max);
    }

    #[test]
    fn test_sweep_rejects_zero_width() {
        assert!(sweep_heights(0, 2..=4).is_err());
    }
}
