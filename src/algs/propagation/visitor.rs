//! Visitor callbacks driven by the [`Propagator`](super::Propagator).

use parking_lot::Mutex;

use crate::topology::{Edge, NodeId};

/// User logic plugged into a propagation run.
///
/// `select` and `visit` take `&self` because the parallel propagator may
/// call them from several worker threads at once; implementations that
/// record state use their own synchronization. `end_visit` runs exactly once
/// per generation after all visits have completed, on the calling thread.
pub trait Visitor: Sync {
    /// Decides whether the propagation follows `edge` this generation.
    fn select(&self, edge: &Edge) -> bool;

    /// Called once for every node reached in the current generation.
    fn visit(&self, node: NodeId);

    /// Called once at the end of every generation.
    fn end_visit(&mut self) {}
}

fn accept_all(_: &Edge) -> bool {
    true
}

/// Visitor that records the nodes reached in every generation.
///
/// Each generation's node list is sorted on `end_visit`, so recordings from
/// sequential and parallel runs compare equal.
pub struct GenerationRecorder<F = fn(&Edge) -> bool> {
    filter: F,
    current: Mutex<Vec<NodeId>>,
    generations: Vec<Vec<NodeId>>,
}

impl GenerationRecorder {
    /// Follows every edge.
    pub fn flood() -> Self {
        Self::with_filter(accept_all)
    }
}

impl<F> GenerationRecorder<F>
where
    F: Fn(&Edge) -> bool + Sync,
{
    /// Follows only edges accepted by `filter`.
    pub fn with_filter(filter: F) -> Self {
        Self {
            filter,
            current: Mutex::new(Vec::new()),
            generations: Vec::new(),
        }
    }

    /// Visited nodes of every completed generation, oldest first.
    pub fn generations(&self) -> &[Vec<NodeId>] {
        &self.generations
    }

    /// Visited nodes of the most recent generation.
    pub fn last(&self) -> Option<&[NodeId]> {
        self.generations.last().map(Vec::as_slice)
    }
}

impl<F> Visitor for GenerationRecorder<F>
where
    F: Fn(&Edge) -> bool + Sync,
{
    fn select(&self, edge: &Edge) -> bool {
        (self.filter)(edge)
    }

    fn visit(&self, node: NodeId) {
        self.current.lock().push(node);
    }

    fn end_visit(&mut self) {
        let mut done = std::mem::take(self.current.get_mut());
        done.sort_unstable();
        self.generations.push(done);
    }
}
