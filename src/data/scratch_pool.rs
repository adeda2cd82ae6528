//! Reusable scratch buffers keyed by size class.
//!
//! Graph algorithms in this crate need flat per-node arrays (flags, counters)
//! sized `max_node_id + 1` for every run. [`ScratchPool`] keeps returned
//! arrays around so repeated runs over graphs of similar size do not
//! allocate.
//!
//! A buffer is checked out with [`ScratchPool::rent`] and comes back as a
//! [`RentedBuffer`] guard. The guard derefs to `[T]`; dropping it (or calling
//! [`RentedBuffer::release`]) returns the storage to the pool it came from.
//! Ownership of the guard can be moved (e.g. from a solver into its result),
//! but the storage is never shared between two owners.
//!
//! Size classes are powers of two. Each class retains at most
//! [`ScratchPoolConfig::max_buffers_per_class`] buffers; surplus returns are
//! dropped.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

/// Pool tuning knobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScratchPoolConfig {
    /// Buffers retained per size class once returned.
    pub max_buffers_per_class: usize,
}

impl Default for ScratchPoolConfig {
    fn default() -> Self {
        Self {
            max_buffers_per_class: 8,
        }
    }
}

/// Snapshot of pool activity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Buffers handed out.
    pub rented: u64,
    /// Rents served from a retained buffer instead of a fresh allocation.
    pub reused: u64,
    /// Buffers given back and retained.
    pub returned: u64,
    /// Buffers given back but dropped because their class was full.
    pub discarded: u64,
}

#[derive(Default)]
struct Counters {
    rented: AtomicU64,
    reused: AtomicU64,
    returned: AtomicU64,
    discarded: AtomicU64,
}

struct PoolInner<T> {
    config: ScratchPoolConfig,
    classes: Mutex<HashMap<u32, Vec<Vec<T>>>>,
    counters: Counters,
}

/// A shareable pool of `Vec<T>` scratch arrays.
///
/// Cloning a pool yields another handle to the same storage.
pub struct ScratchPool<T> {
    inner: Arc<PoolInner<T>>,
}

impl<T> Clone for ScratchPool<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> std::fmt::Debug for ScratchPool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScratchPool")
            .field("config", &self.inner.config)
            .field("stats", &self.stats())
            .finish()
    }
}

#[inline]
fn size_class(len: usize) -> u32 {
    len.max(1).next_power_of_two().trailing_zeros()
}

impl<T: Default + Send> Default for ScratchPool<T> {
    fn default() -> Self {
        Self::with_config(ScratchPoolConfig::default())
    }
}

impl<T> ScratchPool<T> {
    /// Current activity counters.
    pub fn stats(&self) -> PoolStats {
        let c = &self.inner.counters;
        PoolStats {
            rented: c.rented.load(Ordering::Relaxed),
            reused: c.reused.load(Ordering::Relaxed),
            returned: c.returned.load(Ordering::Relaxed),
            discarded: c.discarded.load(Ordering::Relaxed),
        }
    }

    /// Number of buffers currently retained across all classes.
    pub fn retained(&self) -> usize {
        self.inner.classes.lock().values().map(Vec::len).sum()
    }

    /// Drops every retained buffer.
    pub fn clear(&self) {
        self.inner.classes.lock().clear();
    }
}

impl<T: Default + Send> ScratchPool<T> {
    /// Creates an empty pool with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty pool.
    pub fn with_config(config: ScratchPoolConfig) -> Self {
        Self {
            inner: Arc::new(PoolInner {
                config,
                classes: Mutex::new(HashMap::new()),
                counters: Counters::default(),
            }),
        }
    }

    /// Checks out a buffer of exactly `len` elements, all `T::default()`.
    pub fn rent(&self, len: usize) -> RentedBuffer<T> {
        let class = size_class(len);
        let recycled = self
            .inner
            .classes
            .lock()
            .get_mut(&class)
            .and_then(Vec::pop);
        let counters = &self.inner.counters;
        counters.rented.fetch_add(1, Ordering::Relaxed);
        let mut buf = match recycled {
            Some(buf) => {
                counters.reused.fetch_add(1, Ordering::Relaxed);
                buf
            }
            None => Vec::with_capacity(1usize << class),
        };
        buf.clear();
        buf.resize_with(len, T::default);
        log::trace!("rented scratch buffer: len={len} class={class}");
        RentedBuffer {
            buf,
            class,
            pool: Arc::clone(&self.inner),
        }
    }
}

impl<T> PoolInner<T> {
    fn give_back(&self, buf: Vec<T>, class: u32) {
        let mut classes = self.classes.lock();
        let slot = classes.entry(class).or_default();
        if slot.len() < self.config.max_buffers_per_class {
            slot.push(buf);
            self.counters.returned.fetch_add(1, Ordering::Relaxed);
        } else {
            self.counters.discarded.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// A scratch array checked out of a [`ScratchPool`].
///
/// Returned to its pool on drop.
pub struct RentedBuffer<T> {
    buf: Vec<T>,
    class: u32,
    pool: Arc<PoolInner<T>>,
}

impl<T> RentedBuffer<T> {
    /// Returns the buffer to its pool now.
    pub fn release(self) {
        drop(self);
    }
}

impl<T> Deref for RentedBuffer<T> {
    type Target = [T];
    #[inline]
    fn deref(&self) -> &[T] {
        &self.buf
    }
}

impl<T> DerefMut for RentedBuffer<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RentedBuffer<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RentedBuffer")
            .field("len", &self.buf.len())
            .field("class", &self.class)
            .finish()
    }
}

impl<T> Drop for RentedBuffer<T> {
    fn drop(&mut self) {
        let buf = std::mem::take(&mut self.buf);
        self.pool.give_back(buf, self.class);
    }
}

static NODE_FLAG_POOL: Lazy<ScratchPool<AtomicU8>> = Lazy::new(ScratchPool::new);
static STATE_POOL: Lazy<ScratchPool<u8>> = Lazy::new(ScratchPool::new);
static COUNTER_POOL: Lazy<ScratchPool<i32>> = Lazy::new(ScratchPool::new);

/// Process-wide pool for propagation flags.
pub fn node_flag_pool() -> ScratchPool<AtomicU8> {
    NODE_FLAG_POOL.clone()
}

/// Process-wide pool for independent-set state bytes.
pub fn state_pool() -> ScratchPool<u8> {
    STATE_POOL.clone()
}

/// Process-wide pool for per-node integer counters.
pub fn counter_pool() -> ScratchPool<i32> {
    COUNTER_POOL.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rent_is_zeroed_and_exact_length() {
        let pool = ScratchPool::<i32>::new();
        let mut b = pool.rent(5);
        assert_eq!(b.len(), 5);
        b.iter_mut().for_each(|x| *x = 9);
        drop(b);
        let b = pool.rent(7);
        assert_eq!(&*b, &[0; 7]);
        assert_eq!(pool.stats().reused, 1);
    }

    #[test]
    fn classes_are_separate() {
        let pool = ScratchPool::<u8>::new();
        pool.rent(3).release();
        let _big = pool.rent(100);
        let s = pool.stats();
        assert_eq!(s.rented, 2);
        assert_eq!(s.reused, 0);
        assert_eq!(pool.retained(), 1);
    }

    #[test]
    fn class_capacity_is_bounded() {
        let pool = ScratchPool::<u8>::with_config(ScratchPoolConfig {
            max_buffers_per_class: 1,
        });
        let a = pool.rent(4);
        let b = pool.rent(4);
        drop(a);
        drop(b);
        let s = pool.stats();
        assert_eq!(s.returned, 1);
        assert_eq!(s.discarded, 1);
        assert_eq!(pool.retained(), 1);
        pool.clear();
        assert_eq!(pool.retained(), 0);
    }

    #[test]
    fn zero_length_rent() {
        let pool = ScratchPool::<u8>::new();
        let b = pool.rent(0);
        assert!(b.is_empty());
    }
}
