//! Group-count partitioner
//!
//! groups = ⌊W / maxWidth⌋
//! - maxWidth | W: `groups` trees of maxWidth
//! - otherwise:    the last maxWidth tree absorbs the remainder and that
//!                 `extra` run is halved into two smaller trees, emitted first

use tracing::debug;

use super::Partition;
use crate::{span::Span, SupportError};

/// Subdivide W points into n-trees for height H without recursion
///
/// Order: `[extraLeft, extraRight, maxWidth × (groups − 1)]`, or
/// `[maxWidth × groups]` when maxWidth divides W.
pub fn partition_arithmetic(width: u64, height: u64) -> Result<Partition, SupportError> {
    let span = Span::new(width, height)?;
    span.check_tree_count()?;
    let max_width = span.max_width();

    if span.fits_single_tree() {
        return Ok(Partition::new(vec![width], max_width));
    }

    // width > max_width, so groups >= 1
    let groups = width / max_width;

    let widths = if width % max_width == 0 {
        vec![max_width; groups as usize]
    } else {
        let full = groups - 1;
        let extra = width - max_width * full;
        let extra_left = extra / 2;
        let extra_right = extra - extra_left;

        let mut widths = Vec::with_capacity(full as usize + 2);
        widths.push(extra_left);
        widths.push(extra_right);
        // zero iterations when groups == 1
        widths.extend(std::iter::repeat(max_width).take(full as usize));
        widths
    };

    debug!(
        width,
        height,
        max_width,
        groups,
        trees = widths.len(),
        "arithmetic partition"
    );

    Ok(Partition::new(widths, max_width))
}
