//! Forest and component detection built on [`DisjointSet`].
//!
//! All routines treat the store as undirected: an edge `u -> v` connects `u`
//! and `v` regardless of whether the mirror edge is present.

use hashbrown::HashMap;
use itertools::Itertools;

use crate::algs::disjoint_set::DisjointSet;
use crate::graph_error::GraphError;
use crate::topology::{AdjacencyStore, Edge, NodeId};

fn node_sets<G: AdjacencyStore>(store: &G) -> DisjointSet {
    DisjointSet::singletons(store.node_count())
}

/// Component label of every node.
///
/// Labels are dense and assigned in order of each component's smallest node
/// id, so node 0 is always in component 0.
pub fn connected_components<G: AdjacencyStore>(store: &G) -> Result<Vec<usize>, GraphError> {
    let n = store.node_count();
    let mut ds = node_sets(store);
    for u in 0..n {
        for v in store.neighbors(u) {
            ds.union_set(u, v)?;
        }
    }
    let mut label_of_root = vec![usize::MAX; n];
    let mut labels = Vec::with_capacity(n);
    let mut next = 0usize;
    for v in 0..n {
        let root = ds.find_set(v)?;
        if label_of_root[root] == usize::MAX {
            label_of_root[root] = next;
            next += 1;
        }
        labels.push(label_of_root[root]);
    }
    log::debug!("connected components: {next} over {n} node(s)");
    Ok(labels)
}

/// Nodes of every component, grouped by label, each list ascending.
pub fn components<G: AdjacencyStore>(store: &G) -> Result<Vec<Vec<NodeId>>, GraphError> {
    let labels = connected_components(store)?;
    let groups = labels
        .iter()
        .enumerate()
        .map(|(v, &c)| (c, v))
        .into_group_map();
    Ok(groups
        .into_iter()
        .sorted_by_key(|(c, _)| *c)
        .map(|(_, nodes)| nodes)
        .collect())
}

/// Edges of a spanning forest (Kruskal).
///
/// Edges are considered in construction order; if every edge carries a
/// weight they are considered by ascending weight instead (stable, so equal
/// weights keep construction order). Self loops never join a forest.
pub fn spanning_forest<G: AdjacencyStore>(store: &G) -> Result<Vec<Edge>, GraphError> {
    let n = store.node_count();
    let mut edges: Vec<Edge> = (0..n).flat_map(|u| store.edges(u).iter().copied()).collect();
    if !edges.is_empty() && edges.iter().all(|e| e.weight.is_some()) {
        edges.sort_by(|a, b| a.weight.unwrap_or(0.0).total_cmp(&b.weight.unwrap_or(0.0)));
    }
    let mut ds = node_sets(store);
    let mut forest = Vec::with_capacity(n.saturating_sub(1));
    for e in edges {
        if ds.union_set(e.source, e.target)? {
            forest.push(e);
        }
    }
    Ok(forest)
}

/// True if the store, read as an undirected graph, has no cycle.
///
/// Mirror pairs `u -> v`, `v -> u` count as a single undirected edge; any
/// further parallel edge or a self loop is a cycle.
pub fn is_forest<G: AdjacencyStore>(store: &G) -> Result<bool, GraphError> {
    let n = store.node_count();
    let mut ds = node_sets(store);
    let mut pending_mirrors: HashMap<(NodeId, NodeId), usize> = HashMap::new();
    for u in 0..n {
        for e in store.edges(u) {
            if e.is_loop() {
                return Ok(false);
            }
            let key = (e.source.min(e.target), e.source.max(e.target));
            // a mirror of an edge already merged is not a new connection
            if let Some(count) = pending_mirrors.get_mut(&(e.target, e.source)) {
                if *count > 0 {
                    *count -= 1;
                    continue;
                }
            }
            if !ds.union_set(key.0, key.1)? {
                return Ok(false);
            }
            *pending_mirrors.entry((e.source, e.target)).or_insert(0) += 1;
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::AdjacencyList;

    #[test]
    fn components_are_labelled_by_first_node() {
        let g = AdjacencyList::from_undirected_edges(6, [(4, 5), (0, 2), (1, 3)]).unwrap();
        assert_eq!(connected_components(&g).unwrap(), vec![0, 1, 0, 1, 2, 2]);
        assert_eq!(
            components(&g).unwrap(),
            vec![vec![0, 2], vec![1, 3], vec![4, 5]]
        );
    }

    #[test]
    fn tree_and_cycle_detection() {
        let tree = AdjacencyList::from_undirected_edges(4, [(0, 1), (1, 2), (1, 3)]).unwrap();
        assert!(is_forest(&tree).unwrap());
        let cyc = AdjacencyList::from_undirected_edges(3, [(0, 1), (1, 2), (2, 0)]).unwrap();
        assert!(!is_forest(&cyc).unwrap());
        let directed_tree =
            AdjacencyList::from_edges(3, [Edge::new(0, 1), Edge::new(0, 2)]).unwrap();
        assert!(is_forest(&directed_tree).unwrap());
        let doubled = AdjacencyList::from_edges(2, [Edge::new(0, 1), Edge::new(0, 1)]).unwrap();
        assert!(!is_forest(&doubled).unwrap());
    }

    #[test]
    fn spanning_forest_prefers_light_edges() {
        let g = AdjacencyList::from_edges(
            3,
            [
                Edge::new(0, 1).with_weight(5.0),
                Edge::new(1, 2).with_weight(1.0),
                Edge::new(0, 2).with_weight(2.0),
            ],
        )
        .unwrap();
        let f = spanning_forest(&g).unwrap();
        let pairs: Vec<_> = f.iter().map(|e| (e.source, e.target)).collect();
        assert_eq!(pairs, vec![(1, 2), (0, 2)]);
    }

    #[test]
    fn spanning_forest_of_disconnected_graph() {
        let g =
            AdjacencyList::from_undirected_edges(5, [(0, 1), (1, 2), (2, 0), (3, 4)]).unwrap();
        assert_eq!(spanning_forest(&g).unwrap().len(), 3);
    }
}
