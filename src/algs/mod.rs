//! Re-export public algorithms.

pub mod disjoint_set;
pub mod forest;
pub mod independent_set;
pub mod propagation;

pub use disjoint_set::DisjointSet;
pub use forest::{components, connected_components, is_forest, spanning_forest};
pub use independent_set::{IndependentSetResult, IndependentSetSolver, Membership};
pub use propagation::{Execution, Propagator, PropagatorConfig, Visitor};
