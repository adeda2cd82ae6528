//! Data management: pooled scratch storage shared by the graph algorithms.

pub mod scratch_pool;

pub use scratch_pool::{PoolStats, RentedBuffer, ScratchPool, ScratchPoolConfig};
