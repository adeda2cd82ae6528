// Adjacency query abstraction consumed by the propagator and solvers.
use super::edge::{Edge, NodeId};

/// Read-only mapping from node id to its outgoing edges.
///
/// All methods are read-only and safe to call from many threads at once.
/// Implementors must keep the edge lists stable for as long as a borrow of
/// the store is alive: the propagator and the independent-set solver hold a
/// shared borrow for the whole run, so mutating a store mid-run is rejected
/// by the borrow checker rather than detected at runtime.
///
/// Node ids are dense: every id in `0..node_count()` is a valid node and
/// `max_node_id() == node_count() - 1` for a non-empty store.
pub trait AdjacencyStore: Sync {
    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Outgoing edges of `node` in construction order.
    ///
    /// # Panics
    /// May panic if `node >= node_count()`.
    fn edges(&self, node: NodeId) -> &[Edge];

    /// Largest valid node id, or `None` for an empty store.
    fn max_node_id(&self) -> Option<NodeId> {
        self.node_count().checked_sub(1)
    }

    /// Target ids of the outgoing edges of `node`.
    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.edges(node).iter().map(|e| e.target)
    }

    /// Out-degree of `node`.
    fn degree(&self, node: NodeId) -> usize {
        self.edges(node).len()
    }

    /// True if `node` is a valid id in this store.
    fn contains(&self, node: NodeId) -> bool {
        node < self.node_count()
    }

    /// Total number of directed edges.
    fn edge_count(&self) -> usize {
        (0..self.node_count()).map(|v| self.degree(v)).sum()
    }

    /// True if the store has no nodes.
    fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}

impl<T: AdjacencyStore + ?Sized> AdjacencyStore for &T {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }
    fn edges(&self, node: NodeId) -> &[Edge] {
        (**self).edges(node)
    }
}
