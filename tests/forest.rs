mod util;

use graph_frontier::algs::forest::{components, connected_components, is_forest, spanning_forest};
use graph_frontier::algs::DisjointSet;
use graph_frontier::topology::{AdjacencyList, AdjacencyStore, Edge};
use proptest::prelude::*;
use util::*;

#[test]
fn isolated_nodes_are_their_own_components() {
    let g = AdjacencyList::with_nodes(4);
    assert_eq!(connected_components(&g).unwrap(), vec![0, 1, 2, 3]);
    assert!(is_forest(&g).unwrap());
    assert!(spanning_forest(&g).unwrap().is_empty());
}

#[test]
fn self_loop_is_a_cycle() {
    let g = AdjacencyList::from_edges(2, [Edge::new(1, 1)]).unwrap();
    assert!(!is_forest(&g).unwrap());
    assert!(spanning_forest(&g).unwrap().is_empty());
}

#[test]
fn directed_edges_connect_both_ways() {
    let g = chain(4);
    assert_eq!(connected_components(&g).unwrap(), vec![0; 4]);
    assert_eq!(components(&g).unwrap(), vec![vec![0, 1, 2, 3]]);
}

#[test]
fn incremental_union_find() {
    let mut ds = DisjointSet::new(6);
    for v in [0, 2, 4] {
        ds.make_set(v).unwrap();
    }
    assert_eq!(ds.set_count(), 3);
    ds.union_set(0, 4).unwrap();
    assert!(ds.same_set(4, 0).unwrap());
    assert!(ds.find_set(1).is_err());
    ds.make_set(1).unwrap();
    ds.union_set(1, 2).unwrap();
    assert_eq!(ds.set_count(), 2);
}

proptest! {
    #[test]
    fn prop_spanning_forest_matches_components(
        n in 1usize..40,
        edge_prob in 0.0f64..0.3,
        seed in any::<u64>(),
    ) {
        let g = random_undirected(n, edge_prob, seed);
        let labels = connected_components(&g).unwrap();
        let k = labels.iter().copied().max().map_or(0, |m| m + 1);
        let forest = spanning_forest(&g).unwrap();
        prop_assert_eq!(forest.len(), n - k);
        for e in &forest {
            prop_assert_eq!(labels[e.source], labels[e.target]);
        }
        let tree = AdjacencyList::from_edges(n, forest.iter().copied()).unwrap();
        prop_assert!(is_forest(&tree).unwrap());
        prop_assert_eq!(connected_components(&tree).unwrap(), labels);
        // the full graph is a forest exactly when it needs every edge
        prop_assert_eq!(is_forest(&g).unwrap(), g.edge_count() / 2 == n - k);
    }
}
