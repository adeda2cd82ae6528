//! Greedy maximal independent set.
//!
//! [`IndependentSetSolver`] selects a set of pairwise non-adjacent nodes that
//! cannot be extended, among nodes accepted by an optional condition. It is a
//! heuristic: the set is maximal, not necessarily maximum.
//!
//! ## Algorithm
//! Per node the solver keeps a state byte (`ADDED`, `AROUND_ADDED`,
//! `FORBIDDEN`) and three counters: `free` (neighbors not yet touched,
//! starting at the degree), `forbidden` (forbidden neighbors) and `colored`.
//!
//! 1. Nodes failing the condition become `FORBIDDEN`; their neighbors'
//!    `forbidden` counters are incremented.
//! 2. The first candidate is the eligible node of maximum degree.
//! 3. Repeatedly: the candidate becomes `ADDED`; each neighbor gets
//!    `colored -= 1` and, if it was untouched, becomes `AROUND_ADDED` and
//!    decrements `free` on each of its own neighbors. The next candidate is
//!    the untouched node with the smallest `(free, forbidden, colored)`,
//!    compared lexicographically, lowest id first on full ties.
//! 4. The loop ends when no untouched node is left.
//!
//! The next candidate is found with a full scan per step. The scan order and
//! the strict lexicographic comparison fix which of the many valid maximal
//! sets is returned, so any faster structure must reproduce the same choice.
//!
//! Edges are followed in their stored direction; validity and maximality
//! hold for stores that insert undirected connections in both directions.

pub mod result;

use crate::data::scratch_pool::{self, ScratchPool};
use crate::debug_invariants::DebugInvariants;
use crate::graph_error::GraphError;
use crate::topology::{AdjacencyStore, NodeId};

pub use result::{IndependentSetResult, Membership};

/// State bit: node is in the set.
pub const ADDED: u8 = 1;
/// State bit: node has a neighbor in the set.
pub const AROUND_ADDED: u8 = 2;
/// State bit: node fails the inclusion condition.
pub const FORBIDDEN: u8 = 4;

fn accept_all(_: NodeId) -> bool {
    true
}

/// One-shot greedy solver over a borrowed store.
pub struct IndependentSetSolver<'g, G, C = fn(NodeId) -> bool> {
    store: &'g G,
    condition: C,
    state_pool: ScratchPool<u8>,
    counter_pool: ScratchPool<i32>,
}

impl<'g, G: AdjacencyStore> IndependentSetSolver<'g, G> {
    /// Solver where every node is eligible.
    pub fn new(store: &'g G) -> Self {
        Self {
            store,
            condition: accept_all,
            state_pool: scratch_pool::state_pool(),
            counter_pool: scratch_pool::counter_pool(),
        }
    }
}

impl<'g, G, C> IndependentSetSolver<'g, G, C>
where
    G: AdjacencyStore,
    C: Fn(NodeId) -> bool,
{
    /// Only nodes for which `condition` holds may be selected.
    pub fn with_condition<C2>(self, condition: C2) -> IndependentSetSolver<'g, G, C2>
    where
        C2: Fn(NodeId) -> bool,
    {
        IndependentSetSolver {
            store: self.store,
            condition,
            state_pool: self.state_pool,
            counter_pool: self.counter_pool,
        }
    }

    /// Rents scratch arrays from the given pools instead of the process-wide ones.
    pub fn with_pools(mut self, state: ScratchPool<u8>, counters: ScratchPool<i32>) -> Self {
        self.state_pool = state;
        self.counter_pool = counters;
        self
    }

    /// Runs the selection.
    ///
    /// Fails with [`GraphError::EmptyGraph`] on a store without nodes and
    /// with [`GraphError::NoEligibleNode`] when the condition rejects every
    /// node.
    pub fn find(self) -> Result<IndependentSetResult, GraphError> {
        let store = self.store;
        let n = store.max_node_id().map_or(0, |max| max + 1);
        if n == 0 {
            return Err(GraphError::EmptyGraph);
        }

        let mut state = self.state_pool.rent(n);
        let mut free = self.counter_pool.rent(n);
        let mut forbidden = self.counter_pool.rent(n);
        let mut colored = self.counter_pool.rent(n);

        for v in 0..n {
            free[v] = i32::try_from(store.degree(v)).unwrap_or(i32::MAX);
        }

        let mut n_forbidden = 0usize;
        for v in 0..n {
            if !(self.condition)(v) {
                state[v] = FORBIDDEN;
                n_forbidden += 1;
                for w in store.neighbors(v) {
                    forbidden[w] += 1;
                }
            }
        }

        let mut seed: Option<(NodeId, usize)> = None;
        for v in (0..n).filter(|&v| state[v] & FORBIDDEN == 0) {
            let d = store.degree(v);
            if seed.is_none_or(|(_, best)| d > best) {
                seed = Some((v, d));
            }
        }
        let Some((mut candidate, _)) = seed else {
            log::debug!("independent set: all {n} node(s) forbidden");
            return Err(GraphError::NoEligibleNode);
        };
        log::debug!(
            "independent set: {n} node(s), {n_forbidden} forbidden, seed {candidate}"
        );

        loop {
            if state[candidate] & ADDED != 0 {
                break;
            }
            state[candidate] |= ADDED;
            for y in store.neighbors(candidate) {
                colored[y] -= 1;
                if state[y] == 0 {
                    state[y] = AROUND_ADDED;
                    for z in store.neighbors(y) {
                        free[z] -= 1;
                    }
                }
            }
            match next_candidate(&state, &free, &forbidden, &colored) {
                Some(next) => {
                    log::trace!(
                        "independent set: next {next} (free={}, forbidden={}, colored={})",
                        free[next],
                        forbidden[next],
                        colored[next]
                    );
                    candidate = next;
                }
                None => break,
            }
        }

        let nodes: Vec<NodeId> = (0..n).filter(|&v| state[v] & ADDED != 0).collect();
        log::debug!("independent set: selected {} node(s)", nodes.len());
        let result = IndependentSetResult::new(state, nodes);
        result.debug_assert_invariants();
        Ok(result)
    }
}

/// Untouched node with the lexicographically smallest
/// `(free, forbidden, colored)`; lowest id wins ties.
fn next_candidate(
    state: &[u8],
    free: &[i32],
    forbidden: &[i32],
    colored: &[i32],
) -> Option<NodeId> {
    let mut best: Option<(NodeId, (i32, i32, i32))> = None;
    for (v, _) in state.iter().enumerate().filter(|(_, s)| **s == 0) {
        let key = (free[v], forbidden[v], colored[v]);
        if best.is_none_or(|(_, k)| key < k) {
            best = Some((v, key));
        }
    }
    best.map(|(v, _)| v)
}
