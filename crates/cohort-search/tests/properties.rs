//! Property tests for enumeration order, size, and pruning.

use std::collections::BTreeSet;

use cohort_model::{DimensionSubset, Value};
use cohort_search::{PredicateOracle, Unconditional, enumerate, search_space_size};
use proptest::prelude::{ProptestConfig, Strategy, prop, proptest};

/// Domain `d` holds `d * 10 + j` for `j < width`, so values never collide.
fn domains_from_widths(widths: &[usize]) -> Vec<Vec<Value>> {
    widths
        .iter()
        .enumerate()
        .map(|(dimension, &width)| {
            (0..width)
                .map(|j| Value::Integer((dimension * 10 + j) as i64))
                .collect()
        })
        .collect()
}

fn widths() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(1usize..=3, 1..=4)
}

/// Forbidden `(dimension, value)` sets; any candidate containing one fails.
fn forbidden() -> impl Strategy<Value = Vec<BTreeSet<(usize, i64)>>> {
    prop::collection::vec(
        prop::collection::btree_set((0usize..4, 0usize..3), 1..=2).prop_map(|pairs| {
            pairs
                .into_iter()
                .map(|(dimension, j)| (dimension, (dimension * 10 + j) as i64))
                .collect::<BTreeSet<_>>()
        }),
        0..4,
    )
}

fn tagged(values: &[Value], dimensions: &DimensionSubset) -> BTreeSet<(usize, i64)> {
    dimensions
        .iter()
        .copied()
        .zip(values.iter().map(|value| match value {
            Value::Integer(v) => *v,
            other => panic!("unexpected value {other}"),
        }))
        .collect()
}

fn passes(rules: &[BTreeSet<(usize, i64)>], values: &[Value], dimensions: &DimensionSubset) -> bool {
    let set = tagged(values, dimensions);
    !rules.iter().any(|rule| rule.is_subset(&set))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn unconditional_length_equals_space(widths in widths()) {
        let domains = domains_from_widths(&widths);
        let result = enumerate(&domains, &mut Unconditional).unwrap();
        assert_eq!(Some(result.len() as u128), search_space_size(&domains));
        for candidate in result.candidates() {
            assert_eq!(candidate.values().len(), candidate.dimensions().len());
        }
    }

    #[test]
    fn sizes_never_decrease(widths in widths(), rules in forbidden()) {
        let domains = domains_from_widths(&widths);
        let mut oracle = PredicateOracle::new(|values: &[Value], dims: &DimensionSubset| {
            passes(&rules, values, dims)
        });
        let result = enumerate(&domains, &mut oracle).unwrap();
        let sizes: Vec<usize> = result.candidates().map(|c| c.size()).collect();
        assert!(sizes.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn pruned_search_matches_brute_force(widths in widths(), rules in forbidden()) {
        let domains = domains_from_widths(&widths);

        let mut oracle = PredicateOracle::new(|values: &[Value], dims: &DimensionSubset| {
            passes(&rules, values, dims)
        });
        let pruned = enumerate(&domains, &mut oracle).unwrap();

        let expected: Vec<_> = enumerate(&domains, &mut Unconditional)
            .unwrap()
            .candidates()
            .filter(|c| passes(&rules, c.values(), c.dimensions()))
            .cloned()
            .collect();
        let actual: Vec<_> = pruned.candidates().cloned().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn no_superset_of_a_rejection_reaches_the_oracle(widths in widths(), rules in forbidden()) {
        let domains = domains_from_widths(&widths);
        let mut rejected: Vec<BTreeSet<(usize, i64)>> = Vec::new();
        let mut oracle = PredicateOracle::new(|values: &[Value], dims: &DimensionSubset| {
            let set = tagged(values, dims);
            assert!(
                !rejected.iter().any(|earlier| earlier.is_subset(&set)),
                "oracle called with superset {set:?} of a rejected set"
            );
            let ok = passes(&rules, values, dims);
            if !ok {
                rejected.push(set);
            }
            ok
        });
        enumerate(&domains, &mut oracle).unwrap();
    }

    #[test]
    fn repeated_runs_agree(widths in widths(), rules in forbidden()) {
        let domains = domains_from_widths(&widths);
        let run = || {
            let mut oracle = PredicateOracle::new(|values: &[Value], dims: &DimensionSubset| {
                passes(&rules, values, dims)
            });
            enumerate(&domains, &mut oracle).unwrap().into_accepted()
        };
        assert_eq!(run(), run());
    }
}
