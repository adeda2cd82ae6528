//! Generation-synchronized propagation over an [`AdjacencyStore`].
//!
//! A [`Propagator`] owns one flag byte per node (see [`state`]) and a
//! [`Visitor`]. After binding a store with [`Propagator::set_nodes`] and
//! seeding it with [`Propagator::set_position`], every call to
//! [`Propagator::propagate`] advances exactly one breadth-first generation:
//!
//! 1. **expand**: for every `TO_VISIT` node, every outgoing edge accepted by
//!    [`Visitor::select`] flags its target `VISITED`;
//! 2. **visit**: [`Visitor::visit`] is called once per `VISITED` node;
//! 3. **end**: [`Visitor::end_visit`] is called once;
//! 4. **swap**: `VISITED` nodes become the next `TO_VISIT` set, every other
//!    node is cleared.
//!
//! Seeds form generation 0 and are not delivered to the visitor; the first
//! `propagate` reports the nodes one accepted edge away from them.
//!
//! The propagator never decides to stop. Callers bound the number of calls or
//! watch [`Propagator::frontier_len`] drop to zero.
//!
//! ## Parallel execution
//! With the `parallel` feature and [`Execution::Parallel`], phases 1 and 2
//! are rayon fork-join loops over all node ids. Completion of each loop is
//! the barrier between phases. Concurrent flagging of a shared target in
//! phase 1 is idempotent (see [`state`]), so the resulting flags are the same
//! as in a sequential run. If a visitor callback panics the flag state is
//! undefined; call `set_position` again before the next `propagate`.

pub mod state;
pub mod visitor;

use std::sync::atomic::AtomicU8;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::data::scratch_pool::{self, RentedBuffer, ScratchPool};
use crate::graph_error::GraphError;
use crate::topology::{AdjacencyStore, NodeId};

pub use visitor::{GenerationRecorder, Visitor};

/// How the expand and visit phases are scheduled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Execution {
    /// Plain loops over node ids in ascending order.
    #[default]
    Sequential,
    /// Rayon fork-join loops with no ordering between nodes.
    #[cfg(feature = "parallel")]
    Parallel,
}

/// Propagator configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PropagatorConfig {
    /// Phase scheduling.
    pub execution: Execution,
    /// Minimum node-range length handed to one rayon task.
    pub min_parallel_len: usize,
}

impl Default for PropagatorConfig {
    fn default() -> Self {
        Self {
            execution: Execution::Sequential,
            min_parallel_len: 1024,
        }
    }
}

impl PropagatorConfig {
    /// Parallel scheduling with default task granularity.
    #[cfg(feature = "parallel")]
    pub fn parallel() -> Self {
        Self {
            execution: Execution::Parallel,
            ..Self::default()
        }
    }
}

/// Drives a [`Visitor`] across an adjacency store one generation at a time.
pub struct Propagator<'g, G, V> {
    visitor: V,
    nodes: Option<&'g G>,
    flags: Option<RentedBuffer<AtomicU8>>,
    pool: ScratchPool<AtomicU8>,
    config: PropagatorConfig,
    generation: u64,
    frontier_len: usize,
    released: bool,
}

impl<'g, G, V> Propagator<'g, G, V>
where
    G: AdjacencyStore,
    V: Visitor,
{
    /// Creates an unbound propagator with default configuration.
    pub fn new(visitor: V) -> Self {
        Self::with_config(visitor, PropagatorConfig::default())
    }

    /// Creates an unbound propagator.
    pub fn with_config(visitor: V, config: PropagatorConfig) -> Self {
        Self {
            visitor,
            nodes: None,
            flags: None,
            pool: scratch_pool::node_flag_pool(),
            config,
            generation: 0,
            frontier_len: 0,
            released: false,
        }
    }

    /// Rents flag storage from `pool` instead of the process-wide pool.
    ///
    /// Takes effect on the next [`set_nodes`](Self::set_nodes).
    pub fn with_pool(mut self, pool: ScratchPool<AtomicU8>) -> Self {
        self.pool = pool;
        self
    }

    /// Binds the store to propagate over and allocates one flag per node.
    ///
    /// Rebinding returns the previous flag buffer to the pool and clears the
    /// position.
    pub fn set_nodes(&mut self, store: &'g G) -> Result<(), GraphError> {
        if self.released {
            return Err(GraphError::BufferReleased);
        }
        let len = store.max_node_id().map_or(0, |max| max + 1);
        // return the old buffer before renting so it can be reused
        self.flags = None;
        self.flags = Some(self.pool.rent(len));
        self.nodes = Some(store);
        self.generation = 0;
        self.frontier_len = 0;
        log::debug!("propagator bound to {len} node(s)");
        Ok(())
    }

    /// Clears all flags and makes `ids` (each taken modulo the node count)
    /// the generation-0 frontier.
    pub fn set_position<I>(&mut self, ids: I) -> Result<(), GraphError>
    where
        I: IntoIterator<Item = NodeId>,
    {
        if self.released {
            return Err(GraphError::BufferReleased);
        }
        let flags = self.flags.as_mut().ok_or(GraphError::NodesNotBound)?;
        let n = flags.len();
        if n == 0 {
            return Err(GraphError::EmptyGraph);
        }
        for f in flags.iter_mut() {
            *f.get_mut() = state::NONE;
        }
        let mut seeded = 0usize;
        for id in ids {
            *flags[id % n].get_mut() |= state::VISITED;
            seeded += 1;
        }
        if seeded == 0 {
            log::warn!("set_position called with no seed nodes");
        }
        self.frontier_len = swap_generation(flags);
        self.generation = 0;
        log::debug!("positioned {} distinct seed(s)", self.frontier_len);
        Ok(())
    }

    /// Advances one generation.
    pub fn propagate(&mut self) -> Result<(), GraphError> {
        if self.released {
            return Err(GraphError::BufferReleased);
        }
        let Self {
            visitor,
            nodes,
            flags,
            config,
            ..
        } = self;
        let store = (*nodes).ok_or(GraphError::NodesNotBound)?;
        let flags = flags.as_mut().ok_or(GraphError::NodesNotBound)?;

        let frontier = match config.execution {
            Execution::Sequential => run_sequential(store, flags, visitor),
            #[cfg(feature = "parallel")]
            Execution::Parallel => run_parallel(store, flags, visitor, config.min_parallel_len),
        };

        self.frontier_len = frontier;
        self.generation += 1;
        log::debug!(
            "generation {} complete: {} node(s) in next frontier",
            self.generation,
            frontier
        );
        Ok(())
    }

    /// Number of `propagate` calls since the last `set_position`.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Size of the set that the next `propagate` will expand.
    ///
    /// Equals the number of nodes visited by the last `propagate` (or the
    /// number of distinct seeds right after `set_position`).
    pub fn frontier_len(&self) -> Result<usize, GraphError> {
        if self.released {
            return Err(GraphError::BufferReleased);
        }
        Ok(self.frontier_len)
    }

    /// Nodes the next `propagate` will expand, ascending. Empty while no
    /// store is bound.
    pub fn frontier(&self) -> Result<Vec<NodeId>, GraphError> {
        if self.released {
            return Err(GraphError::BufferReleased);
        }
        Ok(self
            .flags
            .as_ref()
            .map(|flags| {
                flags
                    .iter()
                    .enumerate()
                    .filter(|(_, f)| state::is_to_visit(f))
                    .map(|(v, _)| v)
                    .collect()
            })
            .unwrap_or_default())
    }

    /// The wired visitor.
    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    /// The wired visitor, mutably.
    pub fn visitor_mut(&mut self) -> &mut V {
        &mut self.visitor
    }

    /// Consumes the propagator, returning the visitor. Flags go back to the pool.
    pub fn into_visitor(self) -> V {
        self.visitor
    }

    /// Active configuration.
    pub fn config(&self) -> &PropagatorConfig {
        &self.config
    }

    /// Returns the flag buffer to the pool. The propagator is unusable afterwards.
    pub fn release(&mut self) -> Result<(), GraphError> {
        if self.released {
            return Err(GraphError::BufferReleased);
        }
        self.released = true;
        self.flags = None;
        self.nodes = None;
        self.frontier_len = 0;
        Ok(())
    }

    /// True once [`release`](Self::release) has been called.
    pub fn is_released(&self) -> bool {
        self.released
    }
}

/// Applies the swap step to every flag; returns the next frontier size.
fn swap_generation(flags: &mut [AtomicU8]) -> usize {
    let mut next = 0usize;
    for f in flags.iter_mut() {
        let s = f.get_mut();
        *s = state::next_generation(*s);
        next += usize::from(*s == state::TO_VISIT);
    }
    next
}

fn run_sequential<G, V>(store: &G, flags: &mut [AtomicU8], visitor: &mut V) -> usize
where
    G: AdjacencyStore,
    V: Visitor,
{
    for u in 0..flags.len() {
        if !state::is_to_visit(&flags[u]) {
            continue;
        }
        for e in store.edges(u) {
            if visitor.select(e) {
                state::mark_visited(&flags[e.target]);
            }
        }
    }
    for (u, f) in flags.iter().enumerate() {
        if state::is_visited(f) {
            visitor.visit(u);
        }
    }
    visitor.end_visit();
    swap_generation(flags)
}

#[cfg(feature = "parallel")]
fn run_parallel<G, V>(
    store: &G,
    flags: &mut [AtomicU8],
    visitor: &mut V,
    min_len: usize,
) -> usize
where
    G: AdjacencyStore,
    V: Visitor,
{
    let min_len = min_len.max(1);
    {
        let shared: &[AtomicU8] = flags;
        let v: &V = visitor;
        shared
            .par_iter()
            .enumerate()
            .with_min_len(min_len)
            .filter(|(_, f)| state::is_to_visit(f))
            .for_each(|(u, _)| {
                for e in store.edges(u) {
                    if v.select(e) {
                        state::mark_visited(&shared[e.target]);
                    }
                }
            });
        // phase barrier: the loop above has joined
        shared
            .par_iter()
            .enumerate()
            .with_min_len(min_len)
            .filter(|(_, f)| state::is_visited(f))
            .for_each(|(u, _)| v.visit(u));
    }
    visitor.end_visit();
    flags
        .par_iter_mut()
        .with_min_len(min_len)
        .map(|f| {
            let s = f.get_mut();
            *s = state::next_generation(*s);
            usize::from(*s == state::TO_VISIT)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::{AdjacencyList, Edge};

    fn chain(n: usize) -> AdjacencyList {
        AdjacencyList::from_edges(n, (0..n - 1).map(|i| Edge::new(i, i + 1))).unwrap()
    }

    #[test]
    fn position_before_nodes_is_rejected() {
        let mut p: Propagator<'_, AdjacencyList, _> = Propagator::new(GenerationRecorder::flood());
        assert_eq!(p.set_position([0]), Err(GraphError::NodesNotBound));
        assert_eq!(p.propagate(), Err(GraphError::NodesNotBound));
    }

    #[test]
    fn seeds_are_the_first_frontier() {
        let g = chain(5);
        let mut p = Propagator::new(GenerationRecorder::flood());
        p.set_nodes(&g).unwrap();
        p.set_position([7, 2]).unwrap();
        assert_eq!(p.frontier().unwrap(), vec![2]);
        assert_eq!(p.frontier_len(), Ok(1));
        p.propagate().unwrap();
        assert_eq!(p.visitor().last(), Some(&[3][..]));
    }

    #[test]
    fn end_visit_runs_every_generation() {
        let g = chain(2);
        let mut p = Propagator::new(GenerationRecorder::flood());
        p.set_nodes(&g).unwrap();
        p.set_position([0]).unwrap();
        for _ in 0..4 {
            p.propagate().unwrap();
        }
        assert_eq!(p.generation(), 4);
        let gens = p.into_visitor().generations().to_vec();
        assert_eq!(gens, vec![vec![1], vec![], vec![], vec![]]);
    }

    #[test]
    fn empty_store_cannot_be_positioned() {
        let g = AdjacencyList::new();
        let mut p = Propagator::new(GenerationRecorder::flood());
        p.set_nodes(&g).unwrap();
        assert_eq!(p.set_position([0]), Err(GraphError::EmptyGraph));
    }

    #[test]
    fn release_is_reported_once() {
        let g = chain(3);
        let mut p = Propagator::new(GenerationRecorder::flood());
        p.set_nodes(&g).unwrap();
        p.set_position([0]).unwrap();
        assert_eq!(p.frontier_len(), Ok(1));
        p.release().unwrap();
        assert!(p.is_released());
        assert_eq!(p.frontier_len(), Err(GraphError::BufferReleased));
        assert_eq!(p.frontier(), Err(GraphError::BufferReleased));
        assert_eq!(p.release(), Err(GraphError::BufferReleased));
        assert_eq!(p.propagate(), Err(GraphError::BufferReleased));
        assert_eq!(p.set_nodes(&g), Err(GraphError::BufferReleased));
    }

    #[test]
    fn rejected_edges_are_not_followed() {
        let g = AdjacencyList::from_edges(
            3,
            [Edge::new(0, 1).with_color(1), Edge::new(0, 2).with_color(2)],
        )
        .unwrap();
        let mut p = Propagator::new(GenerationRecorder::with_filter(|e: &Edge| e.color == Some(2)));
        p.set_nodes(&g).unwrap();
        p.set_position([0]).unwrap();
        p.propagate().unwrap();
        assert_eq!(p.visitor().last(), Some(&[2][..]));
    }
}
