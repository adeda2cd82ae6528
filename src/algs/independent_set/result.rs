//! Result of a greedy independent-set run.

use super::{ADDED, AROUND_ADDED, FORBIDDEN};
use crate::data::scratch_pool::RentedBuffer;
use crate::debug_invariants::DebugInvariants;
use crate::graph_error::GraphError;
use crate::topology::{AdjacencyStore, NodeId};

/// Final classification of a node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Membership {
    /// Selected into the independent set.
    Added,
    /// Excluded because a neighbor was selected.
    AroundAdded,
    /// Excluded by the inclusion condition.
    Forbidden,
}

/// Membership data produced by
/// [`IndependentSetSolver::find`](super::IndependentSetSolver::find).
///
/// Holds the solver's pooled state array so membership can be queried after
/// the solver is gone. The array returns to its pool on [`release`] or drop;
/// queries after `release` fail with [`GraphError::BufferReleased`].
///
/// [`release`]: IndependentSetResult::release
#[derive(Debug)]
pub struct IndependentSetResult {
    state: Option<RentedBuffer<u8>>,
    nodes: Vec<NodeId>,
}

impl IndependentSetResult {
    pub(super) fn new(state: RentedBuffer<u8>, nodes: Vec<NodeId>) -> Self {
        Self {
            state: Some(state),
            nodes,
        }
    }

    fn state(&self) -> Result<&[u8], GraphError> {
        self.state.as_deref().ok_or(GraphError::BufferReleased)
    }

    fn byte(&self, node: NodeId) -> Result<u8, GraphError> {
        let state = self.state()?;
        state.get(node).copied().ok_or(GraphError::NodeOutOfRange {
            node,
            node_count: state.len(),
        })
    }

    /// True if `node` was selected.
    pub fn is_added(&self, node: NodeId) -> Result<bool, GraphError> {
        Ok(self.byte(node)? & ADDED != 0)
    }

    /// Classification of `node`.
    ///
    /// `find` leaves every node classified, so a node with no state bit
    /// is reported as [`GraphError::InvariantViolation`].
    pub fn membership(&self, node: NodeId) -> Result<Membership, GraphError> {
        let s = self.byte(node)?;
        Ok(if s & ADDED != 0 {
            Membership::Added
        } else if s & FORBIDDEN != 0 {
            Membership::Forbidden
        } else if s & AROUND_ADDED != 0 {
            Membership::AroundAdded
        } else {
            return Err(GraphError::InvariantViolation(format!(
                "node {node} was never classified"
            )));
        })
    }

    /// Selected nodes in ascending id order.
    pub fn nodes(&self) -> Result<&[NodeId], GraphError> {
        self.state()?;
        Ok(&self.nodes)
    }

    /// Iterates the selected nodes in ascending id order.
    pub fn iter(&self) -> Result<impl Iterator<Item = NodeId> + '_, GraphError> {
        Ok(self.nodes()?.iter().copied())
    }

    /// Number of selected nodes.
    pub fn len(&self) -> Result<usize, GraphError> {
        Ok(self.nodes()?.len())
    }

    /// True if nothing is selected.
    pub fn is_empty(&self) -> Result<bool, GraphError> {
        Ok(self.nodes()?.is_empty())
    }

    /// Returns the state array to its pool.
    pub fn release(&mut self) -> Result<(), GraphError> {
        let state = self.state.take().ok_or(GraphError::BufferReleased)?;
        state.release();
        self.nodes.clear();
        Ok(())
    }

    /// True once [`release`](Self::release) has been called.
    pub fn is_released(&self) -> bool {
        self.state.is_none()
    }

    /// Checks the result against the store it was computed on.
    ///
    /// - validity: no edge joins two selected nodes;
    /// - maximality: every node that is neither selected nor forbidden has a
    ///   selected neighbor;
    /// - exclusion: no forbidden node is selected.
    pub fn verify<G: AdjacencyStore>(&self, store: &G) -> Result<(), GraphError> {
        self.validate_invariants()?;
        let state = self.state()?;
        if state.len() != store.node_count() {
            return Err(GraphError::InvariantViolation(format!(
                "result covers {} nodes, store has {}",
                state.len(),
                store.node_count()
            )));
        }
        for u in 0..store.node_count() {
            let added = state[u] & ADDED != 0;
            for v in store.neighbors(u) {
                if added && v != u && state[v] & ADDED != 0 {
                    return Err(GraphError::InvariantViolation(format!(
                        "adjacent nodes {u} and {v} are both selected"
                    )));
                }
            }
            if !added
                && state[u] & FORBIDDEN == 0
                && !store.neighbors(u).any(|v| state[v] & ADDED != 0)
            {
                return Err(GraphError::InvariantViolation(format!(
                    "node {u} could still be added (not maximal)"
                )));
            }
        }
        Ok(())
    }
}

impl DebugInvariants for IndependentSetResult {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "IndependentSetResult");
    }

    fn validate_invariants(&self) -> Result<(), GraphError> {
        let Some(state) = self.state.as_deref() else {
            return Ok(());
        };
        if let Some(v) = state
            .iter()
            .position(|&s| s & ADDED != 0 && s & FORBIDDEN != 0)
        {
            return Err(GraphError::InvariantViolation(format!(
                "forbidden node {v} is selected"
            )));
        }
        if let Some(v) = state.iter().position(|&s| s == 0) {
            return Err(GraphError::InvariantViolation(format!(
                "node {v} was never classified"
            )));
        }
        let expected = state
            .iter()
            .enumerate()
            .filter(|(_, s)| **s & ADDED != 0)
            .map(|(v, _)| v);
        if !expected.eq(self.nodes.iter().copied()) {
            return Err(GraphError::InvariantViolation(
                "selected list does not match state array".into(),
            ));
        }
        Ok(())
    }
}
