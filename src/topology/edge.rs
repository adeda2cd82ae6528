//! Node and edge identity.
//!
//! A node is identified by a dense `usize` that doubles as its storage index
//! in every flat per-node array of the crate. An [`Edge`] is a directed
//! `(source, target)` pair carrying an optional weight and color; undirected
//! connections are stored as two mirrored edges.

use std::fmt;

/// Dense node identifier; equal to the node's storage index.
pub type NodeId = usize;

/// A directed edge with optional weight/color payload.
#[derive(Copy, Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Edge {
    /// Node the edge leaves.
    pub source: NodeId,
    /// Node the edge enters.
    pub target: NodeId,
    /// Optional scalar weight (used for ordering by forest algorithms).
    pub weight: Option<f64>,
    /// Optional color tag, free for visitors to interpret.
    pub color: Option<u32>,
}

impl Edge {
    /// Creates an edge without payload.
    #[inline]
    pub const fn new(source: NodeId, target: NodeId) -> Self {
        Self {
            source,
            target,
            weight: None,
            color: None,
        }
    }

    /// Returns a copy of this edge with `weight` attached.
    #[inline]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Returns a copy of this edge with `color` attached.
    #[inline]
    pub const fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    /// The same edge traversed in the opposite direction, payload preserved.
    #[inline]
    pub const fn reversed(self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            weight: self.weight,
            color: self.color,
        }
    }

    /// True if source and target coincide.
    #[inline]
    pub const fn is_loop(&self) -> bool {
        self.source == self.target
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.source, self.target)?;
        if let Some(w) = self.weight {
            write!(f, " w={w}")?;
        }
        if let Some(c) = self.color {
            write!(f, " c={c}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_keeps_payload() {
        let e = Edge::new(1, 4).with_weight(2.5).with_color(7);
        let r = e.reversed();
        assert_eq!((r.source, r.target), (4, 1));
        assert_eq!(r.weight, Some(2.5));
        assert_eq!(r.color, Some(7));
    }

    #[test]
    fn display_includes_payload() {
        assert_eq!(Edge::new(0, 1).to_string(), "0->1");
        assert_eq!(Edge::new(0, 1).with_color(3).to_string(), "0->1 c=3");
    }
}
