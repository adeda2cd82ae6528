//! Frozen CSR (Compressed Sparse Row) adjacency store.
//!
//! Immutable, cache-friendly adjacency structure. Unlike a sorted CSR the
//! neighbor slices keep the construction order of the source store, so a
//! propagation over a frozen store calls `select` in exactly the same order
//! as over the original [`AdjacencyList`](super::AdjacencyList).
//! Intended for read-only traversal workloads shared across threads.

use std::sync::Arc;

use super::adjacency::AdjacencyStore;
use super::edge::{Edge, NodeId};
use crate::debug_invariants::DebugInvariants;
use crate::graph_error::GraphError;

/// Immutable store backed by one offsets array and one edge array.
///
/// Cloning is cheap: both arrays are reference counted.
#[derive(Clone, Debug)]
pub struct FrozenCsr {
    /// `offsets[v]..offsets[v + 1]` indexes the edges of node `v`.
    offsets: Arc<[usize]>,
    edges: Arc<[Edge]>,
}

impl Default for FrozenCsr {
    fn default() -> Self {
        Self {
            offsets: Arc::from([0usize]),
            edges: Arc::from([]),
        }
    }
}

impl FrozenCsr {
    /// Build from any [`AdjacencyStore`], preserving per-node edge order.
    pub fn from_store<S: AdjacencyStore + ?Sized>(store: &S) -> Self {
        let n = store.node_count();
        let mut offsets = Vec::with_capacity(n + 1);
        let mut edges = Vec::with_capacity(store.edge_count());
        offsets.push(0usize);
        let mut loops = 0usize;
        for v in 0..n {
            for e in store.edges(v) {
                if e.is_loop() {
                    loops += 1;
                }
                edges.push(*e);
            }
            offsets.push(edges.len());
        }
        if loops > 0 {
            log::warn!("freezing adjacency with {loops} self loop(s)");
        }
        log::debug!("froze adjacency: {} nodes, {} edges", n, edges.len());
        let csr = Self {
            offsets: offsets.into(),
            edges: edges.into(),
        };
        csr.debug_assert_invariants();
        csr
    }

    /// All edges, grouped by source in node-id order.
    pub fn all_edges(&self) -> &[Edge] {
        &self.edges
    }
}

impl AdjacencyStore for FrozenCsr {
    #[inline]
    fn node_count(&self) -> usize {
        self.offsets.len() - 1
    }

    #[inline]
    fn edges(&self, node: NodeId) -> &[Edge] {
        let lo = self.offsets[node];
        let hi = self.offsets[node + 1];
        &self.edges[lo..hi]
    }

    #[inline]
    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl DebugInvariants for FrozenCsr {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "FrozenCsr");
    }

    fn validate_invariants(&self) -> Result<(), GraphError> {
        if self.offsets.first() != Some(&0) {
            return Err(GraphError::InvariantViolation(
                "CSR offsets must start at 0".into(),
            ));
        }
        if let Some(w) = self.offsets.windows(2).find(|w| w[0] > w[1]) {
            return Err(GraphError::InvariantViolation(format!(
                "CSR offsets not monotone: {} > {}",
                w[0], w[1]
            )));
        }
        if self.offsets.last() != Some(&self.edges.len()) {
            return Err(GraphError::InvariantViolation(
                "CSR last offset must equal edge count".into(),
            ));
        }
        let n = self.node_count();
        for v in 0..n {
            for e in self.edges(v) {
                if e.source != v {
                    return Err(GraphError::InvariantViolation(format!(
                        "edge {e} stored under node {v}"
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
