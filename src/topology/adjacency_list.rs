//! Mutable adjacency-list store.
//!
//! `AdjacencyList` is the graph-construction layer: nodes are appended with
//! ids equal to their storage index, edges are appended to their source's
//! list in insertion order. Once built it is handed (by shared reference) to
//! a [`Propagator`](crate::algs::propagation::Propagator) or
//! [`IndependentSetSolver`](crate::algs::independent_set::IndependentSetSolver),
//! or frozen into a [`FrozenCsr`].
//!
//! ### Performance Characteristics
//! | Operation | Complexity |
//! |-----------|------------|
//! | `add_node` | O(1) amortized |
//! | `add_edge` | O(1) amortized |
//! | `remove_edge` | O(out-degree) |
//! | `edges` | O(1) |

use super::adjacency::AdjacencyStore;
use super::edge::{Edge, NodeId};
use super::frozen_csr::FrozenCsr;
use crate::debug_invariants::DebugInvariants;
use crate::graph_error::GraphError;

/// Growable directed graph stored as one edge vector per node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdjacencyList {
    adjacency: Vec<Vec<Edge>>,
}

impl AdjacencyList {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with nodes `0..node_count` and no edges.
    pub fn with_nodes(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    /// Builds a store with `node_count` nodes from directed edges.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut g = Self::with_nodes(node_count);
        for e in edges {
            g.add_edge(e)?;
        }
        Ok(g)
    }

    /// Builds a store with `node_count` nodes, inserting both directions of
    /// every `(a, b)` pair.
    pub fn from_undirected_edges<I>(node_count: usize, pairs: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
    {
        let mut g = Self::with_nodes(node_count);
        for (a, b) in pairs {
            g.add_undirected_edge(Edge::new(a, b))?;
        }
        Ok(g)
    }

    /// Appends the node `id`.
    ///
    /// Node ids double as storage indices, so `id` must equal the current
    /// node count.
    pub fn add_node(&mut self, id: NodeId) -> Result<NodeId, GraphError> {
        let expected = self.adjacency.len();
        if id != expected {
            return Err(GraphError::NodeIdMismatch { expected, got: id });
        }
        self.adjacency.push(Vec::new());
        Ok(id)
    }

    /// Appends a fresh node and returns its id.
    pub fn push_node(&mut self) -> NodeId {
        self.adjacency.push(Vec::new());
        self.adjacency.len() - 1
    }

    fn check(&self, node: NodeId) -> Result<(), GraphError> {
        if node < self.adjacency.len() {
            Ok(())
        } else {
            Err(GraphError::NodeOutOfRange {
                node,
                node_count: self.adjacency.len(),
            })
        }
    }

    /// Appends a directed edge to its source's list.
    ///
    /// Parallel edges are kept; callers that want a simple graph dedupe
    /// before inserting.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.check(edge.source)?;
        self.check(edge.target)?;
        self.adjacency[edge.source].push(edge);
        Ok(())
    }

    /// Inserts `edge` and its mirror together. A self loop is inserted once.
    pub fn add_undirected_edge(&mut self, edge: Edge) -> Result<(), GraphError> {
        self.add_edge(edge)?;
        if !edge.is_loop() {
            self.adjacency[edge.target].push(edge.reversed());
        }
        Ok(())
    }

    /// Removes every directed edge `source -> target`; returns `true` if any
    /// was present.
    pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> Result<bool, GraphError> {
        self.check(source)?;
        self.check(target)?;
        let list = &mut self.adjacency[source];
        let before = list.len();
        list.retain(|e| e.target != target);
        Ok(before != list.len())
    }

    /// Removes both directions between `a` and `b`.
    pub fn remove_undirected_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool, GraphError> {
        let fwd = self.remove_edge(a, b)?;
        let back = self.remove_edge(b, a)?;
        Ok(fwd || back)
    }

    /// True if a directed edge `source -> target` exists.
    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.adjacency
            .get(source)
            .is_some_and(|list| list.iter().any(|e| e.target == target))
    }

    /// Converts into an immutable CSR store, keeping construction order.
    pub fn freeze(&self) -> FrozenCsr {
        FrozenCsr::from_store(self)
    }
}

impl AdjacencyStore for AdjacencyList {
    #[inline]
    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[inline]
    fn edges(&self, node: NodeId) -> &[Edge] {
        &self.adjacency[node]
    }
}

impl DebugInvariants for AdjacencyList {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "AdjacencyList");
    }

    fn validate_invariants(&self) -> Result<(), GraphError> {
        let n = self.adjacency.len();
        for (u, list) in self.adjacency.iter().enumerate() {
            for e in list {
                if e.source != u {
                    return Err(GraphError::InvariantViolation(format!(
                        "edge {e} stored under node {u}"
                    )));
                }
                if e.target >= n {
                    return Err(GraphError::NodeOutOfRange {
                        node: e.target,
                        node_count: n,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_node_rejects_mismatched_id() {
        let mut g = AdjacencyList::new();
        assert_eq!(g.add_node(0), Ok(0));
        assert_eq!(g.add_node(1), Ok(1));
        assert_eq!(
            g.add_node(3),
            Err(GraphError::NodeIdMismatch {
                expected: 2,
                got: 3
            })
        );
        assert_eq!(g.node_count(), 2);
    }

    #[test]
    fn edges_keep_construction_order() {
        let g = AdjacencyList::from_edges(
            4,
            [Edge::new(0, 3), Edge::new(0, 1), Edge::new(0, 2)],
        )
        .unwrap();
        let ns: Vec<_> = g.neighbors(0).collect();
        assert_eq!(ns, vec![3, 1, 2]);
        assert_eq!(g.max_node_id(), Some(3));
    }

    #[test]
    fn undirected_inserts_both_directions() {
        let mut g = AdjacencyList::with_nodes(3);
        g.add_undirected_edge(Edge::new(0, 2).with_color(5)).unwrap();
        assert!(g.has_edge(0, 2));
        assert!(g.has_edge(2, 0));
        assert_eq!(g.edges(2)[0].color, Some(5));
        assert_eq!(g.edge_count(), 2);
        assert!(g.remove_undirected_edge(2, 0).unwrap());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn self_loop_inserted_once() {
        let mut g = AdjacencyList::with_nodes(1);
        g.add_undirected_edge(Edge::new(0, 0)).unwrap();
        assert_eq!(g.degree(0), 1);
    }

    #[test]
    fn out_of_range_edge_is_rejected() {
        let mut g = AdjacencyList::with_nodes(2);
        let err = g.add_edge(Edge::new(0, 2)).unwrap_err();
        assert_eq!(
            err,
            GraphError::NodeOutOfRange {
                node: 2,
                node_count: 2
            }
        );
        assert!(g.validate_invariants().is_ok());
    }

    #[test]
    fn empty_store_has_no_max_id() {
        let g = AdjacencyList::new();
        assert!(g.is_empty());
        assert_eq!(g.max_node_id(), None);
    }
}
