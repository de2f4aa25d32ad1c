//! Property tests for the ordering engine.

use std::cmp::Ordering;

use depsort_core::graph::{CallGraph, Condensation};
use depsort_core::{
    Collation, DeclKind, Declaration, DeclarationComparator, OrderingConfig, OtherPlacement,
    compute_order,
};
use proptest::prelude::*;

const NAMES: &[&str] = &["a", "b", "c", "Ab", "run", "step"];
const TYPES: &[&str] = &["u8", "& str", "Vec < u8 >", "Self"];

fn batch() -> impl Strategy<Value = Vec<Declaration>> {
    let raw = (
        prop::sample::select(NAMES),
        0u32..3,
        prop::collection::vec(prop::sample::select(TYPES), 0..3),
        prop::collection::vec(prop::sample::select(NAMES), 0..3),
        0u8..10,
    );
    prop::collection::vec(raw, 0..12)
        .prop_flat_map(|raw| {
            let n = raw.len();
            (Just(raw), Just((0..n).collect::<Vec<usize>>()).prop_shuffle())
        })
        .prop_map(|(raw, positions)| {
            raw.into_iter()
                .zip(positions)
                .enumerate()
                .map(|(id, ((name, vis, params, calls, kind), pos))| match kind {
                    0 => Declaration::other(id, name, pos),
                    1 => Declaration::method(id, name, pos)
                        .with_kind(DeclKind::Constructor)
                        .with_visibility(vis)
                        .with_params(params)
                        .with_calls(calls),
                    _ => Declaration::method(id, name, pos)
                        .with_visibility(vis)
                        .with_params(params)
                        .with_calls(calls),
                })
                .collect()
        })
}

fn config() -> impl Strategy<Value = OrderingConfig> {
    (
        any::<bool>(),
        prop_oneof![Just(Collation::Natural), Just(Collation::Ordinal)],
        prop_oneof![Just(OtherPlacement::Leading), Just(OtherPlacement::Trailing)],
    )
        .prop_map(|(honor, collation, others)| {
            OrderingConfig::default()
                .with_visibility_grouping(honor)
                .with_collation(collation)
                .with_other_members(others)
        })
}

fn positions(order: &[usize]) -> Vec<usize> {
    let mut pos = vec![0; order.len()];
    for (k, &idx) in order.iter().enumerate() {
        pos[idx] = k;
    }
    pos
}

fn without_calls(decls: &[Declaration]) -> Vec<Declaration> {
    decls
        .iter()
        .cloned()
        .map(|mut d| {
            d.local_call_names.clear();
            d
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_output_is_a_permutation(decls in batch(), config in config()) {
        let order = compute_order(&decls, &config).unwrap();
        prop_assert_eq!(order.len(), decls.len());
        let mut sorted = order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..decls.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_callees_precede_callers_across_components(decls in batch(), config in config()) {
        let order = compute_order(&decls, &config).unwrap();
        let pos = positions(&order);
        let graph = CallGraph::build(&decls, None).unwrap();
        let condensation = Condensation::of(&graph);
        for edge in graph.edges() {
            if condensation.component_of(edge.caller) != condensation.component_of(edge.callee) {
                prop_assert!(pos[edge.callee] < pos[edge.caller]);
            }
        }
    }

    #[test]
    fn prop_components_are_contiguous(decls in batch(), config in config()) {
        let order = compute_order(&decls, &config).unwrap();
        let pos = positions(&order);
        let graph = CallGraph::build(&decls, None).unwrap();
        let condensation = Condensation::of(&graph);
        for c in 0..condensation.len() {
            let members = condensation.members(c);
            let first = members.iter().map(|&m| pos[m]).min().unwrap();
            let last = members.iter().map(|&m| pos[m]).max().unwrap();
            prop_assert_eq!(last - first + 1, members.len());
        }
    }

    #[test]
    fn prop_no_edges_means_comparator_sort(decls in batch(), config in config()) {
        let decls = without_calls(&decls);
        let order = compute_order(&decls, &config).unwrap();
        let expected = DeclarationComparator::new(&config).sorted_indices(&decls);
        prop_assert_eq!(&order, &expected);

        // Feeding the sorted batch back in is a fixed point.
        let resorted: Vec<Declaration> = order.iter().map(|&i| decls[i].clone()).collect();
        let again = compute_order(&resorted, &config).unwrap();
        prop_assert_eq!(again, (0..decls.len()).collect::<Vec<_>>());
    }

    #[test]
    fn prop_result_independent_of_input_order(decls in batch(), config in config()) {
        let mut reversed = decls.clone();
        reversed.reverse();
        let ids = |batch: &[Declaration]| -> Vec<_> {
            compute_order(batch, &config)
                .unwrap()
                .into_iter()
                .map(|i| batch[i].id)
                .collect()
        };
        prop_assert_eq!(ids(&decls), ids(&reversed));
    }

    #[test]
    fn prop_comparator_is_strict_total_order(decls in batch(), config in config()) {
        let cmp = DeclarationComparator::new(&config);
        for a in &decls {
            for b in &decls {
                let ab = cmp.compare(a, b);
                prop_assert_eq!(ab, cmp.compare(b, a).reverse());
                prop_assert_eq!(ab == Ordering::Equal, a.id == b.id);
                for c in &decls {
                    if ab == Ordering::Less && cmp.compare(b, c) == Ordering::Less {
                        prop_assert_eq!(cmp.compare(a, c), Ordering::Less);
                    }
                }
            }
        }
    }
}
