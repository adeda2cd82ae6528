//! GraphError: unified error type for graph-frontier public APIs
//!
//! Every fallible operation in the crate returns `Result<_, GraphError>`.
//! Variants fall into three groups: precondition violations, algorithmic
//! impossibility, and misuse of pooled scratch memory.

use thiserror::Error;

/// Unified error type for graph-frontier operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A propagator was asked to position or propagate before `set_nodes`.
    #[error("Precondition violated: no adjacency store bound (call set_nodes first)")]
    NodesNotBound,
    /// A node was inserted with an id that differs from its storage index.
    #[error("Node id {got} does not match its storage index {expected}")]
    NodeIdMismatch { expected: usize, got: usize },
    /// A node id outside `0..node_count` was referenced.
    #[error("Node {node} out of range for a store of {node_count} nodes")]
    NodeOutOfRange { node: usize, node_count: usize },
    /// A disjoint-set query touched an element never passed to `make_set`.
    #[error("Element {0} is not a member of any set (call make_set first)")]
    NotASet(usize),
    /// The adjacency store has no nodes.
    #[error("Graph is empty: at least one node is required")]
    EmptyGraph,
    /// Every node was rejected by the inclusion predicate.
    #[error("No eligible node: every node is forbidden by the inclusion condition")]
    NoEligibleNode,
    /// Pooled scratch memory was used or released after it was already released.
    #[error("Scratch buffer already released")]
    BufferReleased,
    /// A structural invariant check failed (see [`crate::DebugInvariants`]).
    #[error("Invariant violated: {0}")]
    InvariantViolation(String),
}
