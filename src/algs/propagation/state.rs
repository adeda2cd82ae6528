//! Per-node propagation flags.
//!
//! One byte per node, bitmask over [`TO_VISIT`] and [`VISITED`]. Flags live
//! in a `[AtomicU8]` so the parallel expansion phase can mark targets from
//! many threads at once.
//!
//! ## Concurrent marking
//! During expansion the only write is [`mark_visited`], which sets the
//! `VISITED` bit and leaves every other bit as it was. No other write to the
//! flag array happens until the phase barrier, so every concurrent writer of
//! a node stores the same byte (`old | VISITED`, where `old` cannot change in
//! between except by another writer storing that same byte). The result is
//! independent of scheduling. The writes are a Relaxed load followed by a
//! Relaxed store, not a locked read-modify-write: the array is atomic only so
//! that overlapping plain stores are defined behavior.

use std::sync::atomic::{AtomicU8, Ordering};

use static_assertions::assert_eq_size;

/// Node is inactive this generation.
pub const NONE: u8 = 0;
/// Node is expanded this generation.
pub const TO_VISIT: u8 = 1;
/// Node was reached this generation and is delivered to the visitor.
pub const VISITED: u8 = 2;

assert_eq_size!(AtomicU8, u8);

#[inline(always)]
pub(crate) fn load(flag: &AtomicU8) -> u8 {
    flag.load(Ordering::Relaxed)
}

#[inline(always)]
pub(crate) fn is_to_visit(flag: &AtomicU8) -> bool {
    load(flag) & TO_VISIT != 0
}

#[inline(always)]
pub(crate) fn is_visited(flag: &AtomicU8) -> bool {
    load(flag) & VISITED != 0
}

/// Sets `VISITED`, keeping the other bits.
#[inline(always)]
pub(crate) fn mark_visited(flag: &AtomicU8) {
    let old = flag.load(Ordering::Relaxed);
    if old & VISITED == 0 {
        flag.store(old | VISITED, Ordering::Relaxed);
    }
}

/// State of a node in the next generation given its state in this one.
#[inline(always)]
pub(crate) const fn next_generation(state: u8) -> u8 {
    if state & VISITED != 0 { TO_VISIT } else { NONE }
}
