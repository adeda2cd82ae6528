//! Graph topology: node/edge identity and adjacency stores.
//!
//! The algorithms in [`crate::algs`] consume only the [`AdjacencyStore`]
//! trait. Two stores ship with the crate:
//! - [`AdjacencyList`]: mutable, used to build graphs,
//! - [`FrozenCsr`]: immutable, compact, cheap to clone and share.

pub mod adjacency;
pub mod adjacency_list;
pub mod edge;
pub mod frozen_csr;

pub use adjacency::AdjacencyStore;
pub use adjacency_list::AdjacencyList;
pub use edge::{Edge, NodeId};
pub use frozen_csr::FrozenCsr;
