//! # Tree Support Lattice Cost Model
//!
//! This library computes the minimum material needed to support a row of
//! W points at height H with tree-shaped supports on a 45°-constrained
//! 2D grid.
//!
//! ## Core Algorithm
//!
//! 1. **Partition**: split W into independent n-trees no wider than
//!    `2H − 3` (recursive halving or direct group-count arithmetic)
//! 2. **Stem**: each tree stands on a vertical stem up to its full grouping
//! 3. **Full grouping**: recursively split into (odd, odd) / (odd, even)
//!    subtree pairs joined by diagonal connectors, down to closed-form
//!    base groups of 1 to 4 points
//!
//! Cost is length: vertical members are 1 unit, diagonals √2.
//! Recursion depth is O(log W); every function is pure.
//!
//! ## Usage Example
//!
//! ```
//! use support_lattice::{divide_and_cost, tree_cost};
//!
//! let single = tree_cost(5, 4)?;
//! let total = divide_and_cost(10, 4)?;
//! assert!((total - 2.0 * single).abs() < 1e-9);
//! # Ok::<(), support_lattice::SupportError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

// Core modules
pub mod span;       // Span validation and grid heights
pub mod partition;  // n-tree partitioning strategies
pub mod cost;       // Tree cost evaluator
pub mod decompose;  // Base-group decomposition
pub mod compare;    // Strategy comparison

// Re-exports for convenience
pub use span::{max_width, Span};
pub use partition::{partition_arithmetic, partition_recursive, Partition, Strategy};
pub use cost::{tree_cost, BaseGroup, CostEvaluator, EvaluationMode, SubtreePair};
pub use compare::{compare_strategies, sweep_heights, StrategyComparison};

use thiserror::Error;
use tracing::{debug, info};

/// Errors raised for geometrically impossible inputs
///
/// Every variant is an invalid-input error; nothing is partially computed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SupportError {
    /// Width must be at least one point
    #[error("invalid width {0}: at least one point is required")]
    InvalidWidth(u64),

    /// Height must be at least two points (and small enough for 2H − 3)
    #[error("invalid height {0}: a tree needs at least 2 grid levels")]
    InvalidHeight(u64),

    /// Height cannot reach the branching structure of the given width
    #[error("height {height} too small for width {width}: at least {required} points required")]
    HeightTooSmall {
        /// Width of the tree or subtree
        width: u64,
        /// Height provided
        height: u64,
        /// Minimum height for this width
        required: u64,
    },

    /// Span would need more n-trees than a partition can hold
    #[error("span {width}x{height} needs more than {limit} trees")]
    TooManyTrees {
        /// Span width
        width: u64,
        /// Span height
        height: u64,
        /// Largest supported tree count
        limit: u64,
    },

    /// Subtree pair does not partition its parent
    #[error("subtree pair ({left}, {right}) does not split width {width}")]
    InvalidSubtreePair {
        /// Parent width
        width: u64,
        /// Left subtree width
        left: u64,
        /// Right subtree width
        right: u64,
    },
}

impl SupportError {
    /// Whether the error is caused by out-of-domain input
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SupportError::InvalidWidth(_)
                | SupportError::InvalidHeight(_)
                | SupportError::HeightTooSmall { .. }
                | SupportError::TooManyTrees { .. }
                | SupportError::InvalidSubtreePair { .. }
        )
    }
}

/// Total cost of supporting W points at height H, recursive partition
pub fn divide_and_cost(width: u64, height: u64) -> Result<f64, SupportError> {
    let partition = partition_recursive(width, height)?;
    CostEvaluator::memoized().list_cost(partition.iter(), height)
}

/// Total cost of supporting W points at height H, arithmetic partition
pub fn divide_and_cost_alt(width: u64, height: u64) -> Result<f64, SupportError> {
    let partition = partition_arithmetic(width, height)?;
    CostEvaluator::memoized().list_cost(partition.iter(), height)
}

/// Configuration parameters for planning
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Partitioning strategy
    pub strategy: Strategy,

    /// Cache subtree costs by width
    pub memoize: bool,

    /// Evaluate subtrees at least this wide in parallel (ignored when memoizing)
    pub parallel_threshold: Option<u64>,

    /// Log a summary of every plan
    pub verbose: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Recursive,
            memoize: true,
            parallel_threshold: None,
            verbose: false,
        }
    }
}

impl PlannerConfig {
    /// Set the partitioning strategy
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Enable or disable the subtree cache
    pub fn with_memoization(mut self, enabled: bool) -> Self {
        self.memoize = enabled;
        self
    }

    /// Set the parallel evaluation threshold
    pub fn with_parallel_threshold(mut self, threshold: Option<u64>) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Enable summary logging
    pub fn with_verbose(mut self, enabled: bool) -> Self {
        self.verbose = enabled;
        self
    }

    /// Evaluation mode implied by the cache and parallel settings
    pub fn evaluation_mode(&self) -> EvaluationMode {
        match (self.memoize, self.parallel_threshold) {
            (true, _) => EvaluationMode::Memoized,
            (false, Some(threshold)) => EvaluationMode::Parallel {
                threshold: threshold.max(cost::SPLIT_THRESHOLD),
            },
            (false, None) => EvaluationMode::Direct,
        }
    }
}

/// Partitioned and costed support structure for one span
#[derive(Debug, Clone)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct SupportPlan {
    /// Supported span
    pub span: Span,
    /// Strategy that produced the partition
    pub strategy: Strategy,
    /// n-tree widths
    pub partition: Partition,
    /// Cost of each n-tree, in partition order
    pub tree_costs: Vec<f64>,
    /// Sum of `tree_costs`
    pub total_cost: f64,
}

impl SupportPlan {
    /// Number of n-trees
    pub fn tree_count(&self) -> usize {
        self.partition.len()
    }

    /// Stem height in grid points for every tree
    pub fn stem_heights(&self) -> Vec<u64> {
        self.partition
            .iter()
            .map(|width| self.span.height - width / 2)
            .collect()
    }

    /// Human-readable summary
    pub fn report(&self) -> String {
        format!(
            "Height: {} pts\nWidth: {} pts\nStrategy: {}\nn-Trees: {}\nNumber of trees: {}\nStems: {}\nTotal cost: {:.6}",
            self.span.height,
            self.span.width,
            self.strategy,
            self.partition,
            self.tree_count(),
            decompose::format_widths(self.stem_heights()),
            self.total_cost
        )
    }
}

/// Planning orchestrator
///
/// Partitions a span, then costs every tree through one shared evaluator.
/// The evaluator's width cache lives as long as the planner; call
/// [`SupportPlanner::clear_cache`] to release it.
#[derive(Debug)]
pub struct SupportPlanner {
    config: PlannerConfig,
    evaluator: CostEvaluator,
}

impl SupportPlanner {
    /// Create new planner
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            evaluator: CostEvaluator::new(config.evaluation_mode()),
            config,
        }
    }

    /// Planner configuration
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Distinct subtree widths currently cached
    pub fn cache_len(&self) -> usize {
        self.evaluator.cache_len()
    }

    /// Drop cached subtree costs
    pub fn clear_cache(&mut self) {
        self.evaluator.clear_cache();
    }

    /// Partition and cost a span
    pub fn plan(&mut self, width: u64, height: u64) -> Result<SupportPlan, SupportError> {
        let span = Span::new(width, height)?;
        let partition = partition::partition(span, self.config.strategy)?;

        let mut tree_costs = Vec::with_capacity(partition.len());
        let mut total_cost = 0.0;
        for tree_width in partition.iter() {
            let cost = self.evaluator.tree_cost(tree_width, height)?;
            total_cost += cost;
            tree_costs.push(cost);
        }

        debug!(span = %span, trees = partition.len(), total_cost, "planned support");
        if self.config.verbose {
            info!(
                span = %span,
                strategy = %self.config.strategy,
                trees = partition.len(),
                total_cost = format!("{:.6}", total_cost),
                "support plan complete"
            );
        }

        Ok(SupportPlan {
            span,
            strategy: self.config.strategy,
            partition,
            tree_costs,
            total_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_divide_and_cost_even_split() {
        let total = divide_and_cost(10, 4).unwrap();
        let single = tree_cost(5, 4).unwrap();
        assert!((total - 2.0 * single).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(divide_and_cost(0, 4).unwrap_err().is_invalid_input());
        assert!(divide_and_cost_alt(10, 1).unwrap_err().is_invalid_input());
    }

    #[test]
    fn test_planner_cache_can_be_cleared() {
        let mut planner = SupportPlanner::new(PlannerConfig::default());
        planner.plan(5000, 900).unwrap();
        assert!(planner.cache_len() > 0);

        planner.clear_cache();
        assert_eq!(planner.cache_len(), 0);

        let replanned = planner.plan(5000, 900).unwrap();
        assert_eq!(replanned.total_cost, divide_and_cost(5000, 900).unwrap());
    }

    #[test]
    fn test_oversized_span_is_rejected() {
        let err = divide_and_cost_alt(u64::MAX, 2).unwrap_err();
        assert!(err.is_invalid_input());
        assert!(matches!(err, SupportError::TooManyTrees { .. }));
        assert!(divide_and_cost(u64::MAX, 2).is_err());
        assert!(SupportPlanner::new(PlannerConfig::default()).plan(u64::MAX, 2).is_err());
    }

    #[test]
    fn test_config_evaluation_mode() {
        let config = PlannerConfig::default();
        assert_eq!(config.evaluation_mode(), EvaluationMode::Memoized);

        let config = config.with_memoization(false);
        assert_eq!(config.evaluation_mode(), EvaluationMode::Direct);

        let config = config.with_parallel_threshold(Some(2));
        assert_eq!(config.evaluation_mode(), EvaluationMode::Parallel { threshold: 5 });
    }

    #[test]
    fn test_plan_matches_free_functions() {
        for strategy in Strategy::ALL {
            let mut planner = SupportPlanner::new(PlannerConfig::default().with_strategy(strategy));
            let plan = planner.plan(60, 4).unwrap();
            let expected = match strategy {
                Strategy::Recursive => divide_and_cost(60, 4).unwrap(),
                Strategy::Arithmetic => divide_and_cost_alt(60, 4).unwrap(),
            };
            assert_eq!(plan.total_cost, expected);
            assert_eq!(plan.tree_costs.len(), plan.tree_count());
        }
    }
}
