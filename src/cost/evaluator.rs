//! Tree cost evaluation with selectable recursion strategy
//!
//! A subtree's full-grouping cost depends only on its width, so a width-keyed
//! cache reduces the O(W) call tree to O(log W) distinct widths. Every mode
//! adds the same terms in the same order, so results are bit-identical.

use std::collections::HashMap;

use tracing::trace;

use super::group::{group_cost, BaseGroup};
use super::subtree::{check_headroom, leftover_cost, split_grouping, subtree_cost};
use crate::{
    span::{full_group_height, validate_height},
    SupportError,
};

/// How full groupings are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaluationMode {
    /// Plain recursion, one call per subtree
    Direct,

    /// Width-keyed cache shared across every tree the evaluator sees
    #[default]
    Memoized,

    /// Children of subtrees at least `threshold` wide are evaluated with
    /// `rayon::join`
    Parallel {
        /// Minimum width evaluated in parallel
        threshold: u64,
    },
}

/// Cost evaluator for n-trees
#[derive(Debug, Default)]
pub struct CostEvaluator {
    mode: EvaluationMode,
    cache: HashMap<u64, f64>,
    hits: u64,
    misses: u64,
}

impl CostEvaluator {
    /// Create evaluator with the given mode
    pub fn new(mode: EvaluationMode) -> Self {
        Self {
            mode,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Plain recursive evaluator
    pub fn direct() -> Self {
        Self::new(EvaluationMode::Direct)
    }

    /// Caching evaluator
    pub fn memoized() -> Self {
        Self::new(EvaluationMode::Memoized)
    }

    /// Parallel evaluator; thresholds below the split width are raised to it
    pub fn parallel(threshold: u64) -> Self {
        Self::new(EvaluationMode::Parallel {
            threshold: threshold.max(super::group::SPLIT_THRESHOLD),
        })
    }

    /// Evaluation mode
    pub fn mode(&self) -> EvaluationMode {
        self.mode
    }

    /// Cost of a single n-tree: stem plus full grouping
    ///
    /// W = 1 is a bare stem of H − 1 vertical members. Otherwise the grouping
    /// spans `⌊W/2⌋ + 1` points and the stem covers the rest of H.
    pub fn tree_cost(&mut self, width: u64, height: u64) -> Result<f64, SupportError> {
        if width == 0 {
            return Err(SupportError::InvalidWidth(width));
        }
        validate_height(height)?;

        if width == 1 {
            let stem = (height - 2) as f64;
            return Ok(stem + BaseGroup::One.cost());
        }

        let points_full_group = full_group_height(width);
        if height < points_full_group {
            return Err(SupportError::HeightTooSmall {
                width,
                height,
                required: points_full_group,
            });
        }

        let stem = (height - points_full_group) as f64;
        let full_group = match group_cost(width) {
            Some(cost) => cost,
            None => self.grouping_cost(width)?,
        };

        Ok(stem + full_group)
    }

    /// Full-grouping cost of a width-W subtree with H points of headroom
    pub fn subtree_cost(&mut self, width: u64, height: u64) -> Result<f64, SupportError> {
        check_headroom(width, height)?;
        self.grouping_cost(width)
    }

    /// Sum of tree costs over a list of widths sharing one height
    pub fn list_cost<I>(&mut self, widths: I, height: u64) -> Result<f64, SupportError>
    where
        I: IntoIterator<Item = u64>,
    {
        let mut total = 0.0;
        for width in widths {
            total += self.tree_cost(width, height)?;
        }
        Ok(total)
    }

    /// Distinct widths currently cached
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// (hits, misses) since construction or the last [`Self::clear_cache`]
    pub fn cache_stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    /// Drop cached subtree costs
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    fn grouping_cost(&mut self, width: u64) -> Result<f64, SupportError> {
        match self.mode {
            EvaluationMode::Direct => subtree_cost(width, full_group_height(width)),
            EvaluationMode::Memoized => self.memoized_cost(width),
            EvaluationMode::Parallel { threshold } => parallel_cost(width, threshold),
        }
    }

    fn memoized_cost(&mut self, width: u64) -> Result<f64, SupportError> {
        if let Some(cost) = group_cost(width) {
            return Ok(cost);
        }
        if let Some(&cost) = self.cache.get(&width) {
            self.hits += 1;
            return Ok(cost);
        }

        self.misses += 1;
        trace!(width, "subtree cache miss");

        let (pair, group_height) = split_grouping(width)?;
        let left = self.memoized_cost(pair.left)?;
        let right = self.memoized_cost(pair.right)?;
        let leftover = leftover_cost(width, group_height, pair)?;
        let cost = left + right + leftover;

        self.cache.insert(width, cost);
        Ok(cost)
    }
}

fn parallel_cost(width: u64, threshold: u64) -> Result<f64, SupportError> {
    if width < threshold {
        return subtree_cost(width, full_group_height(width));
    }

    let (pair, group_height) = split_grouping(width)?;
    let (left, right) = rayon::join(
        || parallel_cost(pair.left, threshold),
        || parallel_cost(pair.right, threshold),
    );
    let leftover = leftover_cost(width, group_height, pair)?;

    Ok(left? + right? + leftover)
}
