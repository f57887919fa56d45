//! Recursive halving partitioner
//!
//! Split the span at ⌊W/2⌋ until every piece fits under `2H − 3`.
//! Recursion depth: O(log W), see [`Segment::depth_to_fit`].

use tracing::debug;

use super::{Partition, Segment};
use crate::{span::Span, SupportError};

/// Recursively subdivide W points into n-trees for height H
///
/// Left half always gets ⌊W/2⌋ points; the left partition precedes the right
/// one in the result. Always valid, not always cost-optimal.
pub fn partition_recursive(width: u64, height: u64) -> Result<Partition, SupportError> {
    let span = Span::new(width, height)?;
    span.check_tree_count()?;
    let max_width = span.max_width();

    let mut widths = Vec::new();
    collect(Segment::whole(width), max_width, &mut widths);

    debug!(
        width,
        height,
        max_width,
        trees = widths.len(),
        "recursive partition"
    );

    Ok(Partition::new(widths, max_width))
}

fn collect(segment: Segment, max_width: u64, widths: &mut Vec<u64>) {
    if segment.fits(max_width) {
        widths.push(segment.width);
        return;
    }

    let (left, right) = segment.halves();
    collect(left, max_width, widths);
    collect(right, max_width, widths);
}
