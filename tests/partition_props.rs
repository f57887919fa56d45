use proptest::prelude::*;
use support_lattice::{
    partition_arithmetic, partition_recursive, tree_cost, CostEvaluator, Span, SubtreePair,
};

fn span_strategy() -> impl Strategy<Value = (u64, u64)> {
    (1u64..20_000, 2u64..400)
}

proptest! {
    #[test]
    fn partitions_are_valid((width, height) in span_strategy()) {
        let span = Span::new(width, height).expect("valid span");

        for partition in [
            partition_recursive(width, height).expect("recursive partition"),
            partition_arithmetic(width, height).expect("arithmetic partition"),
        ] {
            prop_assert_eq!(partition.total_width(), width, "widths must sum to W");
            prop_assert!(partition.iter().all(|w| w >= 1), "empty tree in {}", partition);
            if width > span.max_width() {
                prop_assert!(
                    partition.iter().all(|w| w <= span.max_width()),
                    "tree wider than 2H - 3 in {}",
                    partition
                );
            } else {
                prop_assert_eq!(partition.widths(), &[width][..]);
            }
            prop_assert!(partition.is_valid_for(&span));
        }
    }

    #[test]
    fn arithmetic_partition_is_mostly_max_width((width, height) in span_strategy()) {
        let partition = partition_arithmetic(width, height).expect("arithmetic partition");
        let max_width = 2 * height - 3;
        let off_size = partition.iter().filter(|&w| w != max_width).count();
        prop_assert!(off_size <= 2, "{} has {} non-max trees", partition, off_size);
    }

    #[test]
    fn subtree_pairs_are_never_even_even(width in 5u64..1_000_000) {
        let pair = SubtreePair::split(width).expect("splittable");
        prop_assert_eq!(pair.left + pair.right, width);
        prop_assert!(pair.left % 2 == 1 || pair.right % 2 == 1);
        prop_assert!(pair.left >= 1);
    }

    #[test]
    fn tree_cost_is_monotonic_in_width(height in 2u64..3000, offset in 0u64..6000) {
        let width = 1 + offset % (2 * height - 3);
        let next = width + 1;
        prop_assume!(next / 2 + 1 <= height);

        let a = tree_cost(width, height).expect("valid tree");
        let b = tree_cost(next, height).expect("valid tree");
        prop_assert!(b >= a - 1e-9, "cost({}) = {} > cost({}) = {}", width, a, next, b);
    }

    #[test]
    fn tree_cost_is_monotonic_in_height(width in 1u64..5000, extra in 0u64..100) {
        let height = (width / 2 + 1).max(2) + extra;
        let a = tree_cost(width, height).expect("valid tree");
        let b = tree_cost(width, height + 1).expect("valid tree");
        prop_assert!(b >= a - 1e-9);
    }

    #[test]
    fn evaluation_modes_agree(width in 1u64..5000, extra in 0u64..10) {
        let height = (width / 2 + 1).max(2) + extra;
        let direct = CostEvaluator::direct().tree_cost(width, height).expect("direct");
        let memoized = CostEvaluator::memoized().tree_cost(width, height).expect("memoized");
        let parallel = CostEvaluator::parallel(256).tree_cost(width, height).expect("parallel");
        prop_assert!((direct - memoized).abs() < 1e-9);
        prop_assert!((direct - parallel).abs() < 1e-9);
    }
}
