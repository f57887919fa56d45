//! Base-group decomposition
//!
//! Shows what an n-tree is made of: the leaves of the odd/even subtree
//! recursion, and the level-by-level subdivision that reaches them.

use crate::cost::{BaseGroup, SubtreePair, SPLIT_THRESHOLD};
use crate::SupportError;

/// Leaves of the full grouping of a width-W tree, left to right
pub fn base_groups(width: u64) -> Result<Vec<BaseGroup>, SupportError> {
    if width == 0 {
        return Err(SupportError::InvalidWidth(width));
    }

    let mut groups = Vec::new();
    collect_base_groups(width, &mut groups);
    Ok(groups)
}

fn collect_base_groups(width: u64, groups: &mut Vec<BaseGroup>) {
    if let Some(group) = BaseGroup::from_width(width) {
        groups.push(group);
        return;
    }

    // width >= 5 here, so the split always exists
    if let Some(pair) = SubtreePair::split(width) {
        collect_base_groups(pair.left, groups);
        collect_base_groups(pair.right, groups);
    }
}

/// Leaves of a plain floor-half split, without the odd/even adjustment
///
/// Only useful for comparing against [`base_groups`].
pub fn balanced_groups(width: u64) -> Result<Vec<u64>, SupportError> {
    if width == 0 {
        return Err(SupportError::InvalidWidth(width));
    }

    let mut groups = Vec::new();
    let mut pending = vec![width];
    while let Some(w) = pending.pop() {
        if w < SPLIT_THRESHOLD {
            groups.push(w);
        } else {
            let left = w / 2;
            // right first so the left half is popped first
            pending.push(w - left);
            pending.push(left);
        }
    }
    Ok(groups)
}

/// Level-by-level subdivision trace
///
/// Level 0 is `widths` itself. Each following level splits every element
/// wider than 4 once (odd/even rule), until nothing is left to split.
pub fn subdivision_levels(widths: &[u64]) -> Result<Vec<Vec<u64>>, SupportError> {
    if let Some(&width) = widths.iter().find(|&&w| w == 0) {
        return Err(SupportError::InvalidWidth(width));
    }

    let mut levels = vec![widths.to_vec()];
    loop {
        let current = &levels[levels.len() - 1];
        if current.iter().all(|&w| w < SPLIT_THRESHOLD) {
            break;
        }

        let mut next = Vec::with_capacity(current.len() * 2);
        for &width in current {
            match SubtreePair::split(width) {
                Some(pair) if width >= SPLIT_THRESHOLD => {
                    next.push(pair.left);
                    next.push(pair.right);
                }
                _ => next.push(width),
            }
        }
        levels.push(next);
    }

    Ok(levels)
}

/// Render a list of widths as `{a,b,c}`
pub fn format_widths<I>(widths: I) -> String
where
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    let parts: Vec<String> = widths.into_iter().map(|w| w.to_string()).collect();
    format!("{{{}}}", parts.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_groups_of_small_widths() {
        assert_eq!(base_groups(4).unwrap(), vec![BaseGroup::Four]);
        assert_eq!(base_groups(5).unwrap(), vec![BaseGroup::Two, BaseGroup::Three]);
    }

    #[test]
    fn test_base_groups_avoid_even_pairs() {
        // 8 -> (3, 5) -> 3, (2, 3)
        assert_eq!(
            base_groups(8).unwrap(),
            vec![BaseGroup::Three, BaseGroup::Two, BaseGroup::Three]
        );
        // plain halving keeps 4 + 4
        assert_eq!(balanced_groups(8).unwrap(), vec![4, 4]);
    }

    #[test]
    fn test_base_groups_cover_width() {
        for width in 1..300 {
            let total: u64 = base_groups(width).unwrap().iter().map(|g| g.width()).sum();
            assert_eq!(total, width);
            let balanced: u64 = balanced_groups(width).unwrap().iter().sum();
            assert_eq!(balanced, width);
        }
    }

    #[test]
    fn test_subdivision_levels() {
        let levels = subdivision_levels(&[5, 12]).unwrap();
        assert_eq!(
            levels,
            vec![vec![5, 12], vec![2, 3, 5, 7], vec![2, 3, 2, 3, 3, 4]]
        );
    }

    #[test]
    fn test_subdivision_ends_at_base_groups() {
        let levels = subdivision_levels(&[37]).unwrap();
        let last: Vec<u64> = levels.last().unwrap().clone();
        let leaves: Vec<u64> = base_groups(37).unwrap().iter().map(|g| g.width()).collect();
        assert_eq!(last, leaves);
        assert!(levels.iter().all(|level| level.iter().sum::<u64>() == 37));
    }

    #[test]
    fn test_rejects_zero_width() {
        assert!(base_groups(0).is_err());
        assert!(subdivision_levels(&[3, 0]).is_err());
    }

    #[test]
    fn test_format_widths() {
        assert_eq!(format_widths([3u64, 4, 5]), "{3,4,5}");
        assert_eq!(format_widths(Vec::<u64>::new()), "{}");
    }
}
