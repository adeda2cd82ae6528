#![cfg_attr(docsrs, feature(doc_cfg))]
//! # graph-frontier
//!
//! graph-frontier is a small library of frontier-driven graph algorithms over
//! integer-indexed adjacency stores. It provides generation-by-generation
//! propagation with pluggable visitors, a greedy maximal independent set
//! solver, and union-find based forest utilities, all sharing pooled scratch
//! storage.
//!
//! ## Features
//! - [`AdjacencyStore`](topology::AdjacencyStore) trait with a mutable
//!   [`AdjacencyList`](topology::AdjacencyList) and an immutable
//!   [`FrozenCsr`](topology::FrozenCsr)
//! - [`Propagator`](algs::Propagator): one breadth-first generation per call,
//!   sequential or rayon-parallel (`parallel` feature, on by default)
//! - [`IndependentSetSolver`](algs::IndependentSetSolver): greedy maximal
//!   independent set with an inclusion condition
//! - [`DisjointSet`](algs::DisjointSet) and forest/component helpers
//! - [`ScratchPool`](data::ScratchPool): reusable per-node scratch arrays
//!
//! ## Determinism
//!
//! Sequential propagation and the independent set solver are fully
//! deterministic. Parallel propagation produces the same flags and the same
//! set of visited nodes per generation as a sequential run; only the order of
//! `visit` calls within a generation varies.
//!
//! ## Usage
//!
//! ```
//! use graph_frontier::prelude::*;
//!
//! let g = AdjacencyList::from_edges(3, [Edge::new(0, 1), Edge::new(1, 2)]).unwrap();
//! let mut p = Propagator::new(GenerationRecorder::flood());
//! p.set_nodes(&g).unwrap();
//! p.set_position([0]).unwrap();
//! p.propagate().unwrap();
//! p.propagate().unwrap();
//! assert_eq!(p.visitor().generations(), &[vec![1], vec![2]]);
//! ```

// Re-export our major subsystems:
pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod graph_error;
pub mod topology;

pub use debug_invariants::DebugInvariants;
pub use graph_error::GraphError;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::disjoint_set::DisjointSet;
    pub use crate::algs::forest::{connected_components, is_forest, spanning_forest};
    pub use crate::algs::independent_set::{
        IndependentSetResult, IndependentSetSolver, Membership,
    };
    pub use crate::algs::propagation::{
        Execution, GenerationRecorder, Propagator, PropagatorConfig, Visitor,
    };
    pub use crate::data::scratch_pool::{ScratchPool, ScratchPoolConfig};
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::graph_error::GraphError;
    pub use crate::topology::{AdjacencyList, AdjacencyStore, Edge, FrozenCsr, NodeId};
}
