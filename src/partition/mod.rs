//! Tree partitioner
//!
//! Splits a span of W points into independent n-trees, each no wider than
//! `maxWidth = 2H − 3`. Two interchangeable strategies:
//! - Recursive: floor-half split until every piece fits
//! - Arithmetic: as many maxWidth trees as possible, remainder halved
//!
//! Neither strategy dominates on cost for every (W, H); both are kept so
//! they can be compared (see [`crate::compare`]).

mod arithmetic;
mod recursive;
mod segment;

pub use arithmetic::partition_arithmetic;
pub use recursive::partition_recursive;
pub use segment::Segment;

use std::fmt;
use std::str::FromStr;

use crate::{decompose::format_widths, span::Span, SupportError};

/// Partitioning strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum Strategy {
    /// Recursive halving
    #[default]
    Recursive,

    /// Direct group-count arithmetic
    Arithmetic,
}

impl Strategy {
    /// Both strategies, recursive first
    pub const ALL: [Strategy; 2] = [Strategy::Recursive, Strategy::Arithmetic];

    /// Partition a span with this strategy
    pub fn partition(self, width: u64, height: u64) -> Result<Partition, SupportError> {
        match self {
            Strategy::Recursive => partition_recursive(width, height),
            Strategy::Arithmetic => partition_arithmetic(width, height),
        }
    }

    /// Lowercase name, as accepted by [`FromStr`]
    pub fn name(self) -> &'static str {
        match self {
            Strategy::Recursive => "recursive",
            Strategy::Arithmetic => "arithmetic",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "recursive" | "rec" => Ok(Strategy::Recursive),
            "arithmetic" | "alt" => Ok(Strategy::Arithmetic),
            other => Err(format!("unknown strategy '{other}'")),
        }
    }
}

/// Partition a validated span with the given strategy
pub fn partition(span: Span, strategy: Strategy) -> Result<Partition, SupportError> {
    strategy.partition(span.width, span.height)
}

/// Ordered widths of the n-trees covering a span
///
/// Invariants (upheld by both partitioners):
/// - widths sum to the span width
/// - every width is ≥ 1
/// - every width is ≤ `max_width` unless the span is a single tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct Partition {
    widths: Vec<u64>,
    max_width: u64,
}

impl Partition {
    pub(crate) fn new(widths: Vec<u64>, max_width: u64) -> Self {
        debug_assert!(widths.iter().all(|&w| w >= 1), "empty n-tree in partition");
        Self { widths, max_width }
    }

    /// Tree widths in order
    pub fn widths(&self) -> &[u64] {
        &self.widths
    }

    /// Efficiency bound the partition was built against
    pub fn max_width(&self) -> u64 {
        self.max_width
    }

    /// Number of n-trees
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// True only for a partition of nothing (never produced by the partitioners)
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    /// Total number of supported points
    pub fn total_width(&self) -> u64 {
        self.widths.iter().sum()
    }

    /// Iterate tree widths
    pub fn iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.widths.iter().copied()
    }

    /// Position of every tree along the row
    pub fn segments(&self) -> Vec<Segment> {
        let mut start = 0;
        self.widths
            .iter()
            .map(|&width| {
                let segment = Segment::new(start, width);
                start += width;
                segment
            })
            .collect()
    }

    /// Check every partition invariant against the span it should cover
    pub fn is_valid_for(&self, span: &Span) -> bool {
        if self.total_width() != span.width || self.widths.iter().any(|&w| w == 0) {
            return false;
        }
        if span.fits_single_tree() {
            return self.widths == [span.width];
        }
        self.widths.iter().all(|&w| w <= span.max_width())
    }

    /// Consume into the raw widths
    pub fn into_widths(self) -> Vec<u64> {
        self.widths
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_widths(&self.widths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_parse() {
        assert_eq!("recursive".parse::<Strategy>().unwrap(), Strategy::Recursive);
        assert_eq!("Arithmetic".parse::<Strategy>().unwrap(), Strategy::Arithmetic);
        assert_eq!("alt".parse::<Strategy>().unwrap(), Strategy::Arithmetic);
        assert!("greedy".parse::<Strategy>().is_err());
        assert_eq!(Strategy::default(), Strategy::Recursive);
    }

    #[test]
    fn test_segments_are_contiguous() {
        let partition = partition_arithmetic(12, 4).unwrap();
        let segments = partition.segments();

        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], Segment::new(0, 3));
        assert_eq!(segments[1], Segment::new(3, 4));
        assert_eq!(segments[2], Segment::new(7, 5));
    }

    #[test]
    fn test_display_matches_group_listing() {
        let partition = partition_arithmetic(12, 4).unwrap();
        assert_eq!(partition.to_string(), "{3,4,5}");
    }

    #[test]
    fn test_validity_check() {
        let span = Span::new(12, 4).unwrap();
        for strategy in Strategy::ALL {
            let partition = partition(span, strategy).unwrap();
            assert!(partition.is_valid_for(&span), "{strategy} produced {partition}");
        }

        let wrong = Partition::new(vec![6, 6], 5);
        assert!(!wrong.is_valid_for(&span));
    }
}
