//! Disjoint-set (union-find) over a fixed integer domain.
//!
//! [`DisjointSet`] tracks a partition of `0..capacity`. Elements join the
//! structure through [`DisjointSet::make_set`]; [`DisjointSet::find_set`]
//! compresses paths and [`DisjointSet::union_set`] links by rank, so
//! sequences of operations run in near-constant amortized time.

use crate::graph_error::GraphError;

const UNSET: usize = usize::MAX;

/// Union-find with path compression and union by rank.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl DisjointSet {
    /// Domain `0..capacity`, no element in any set yet.
    pub fn new(capacity: usize) -> Self {
        Self {
            parent: vec![UNSET; capacity],
            rank: vec![0; capacity],
            sets: 0,
        }
    }

    /// Domain `0..capacity` with every element in its own singleton set.
    pub fn singletons(capacity: usize) -> Self {
        Self {
            parent: (0..capacity).collect(),
            rank: vec![0; capacity],
            sets: capacity,
        }
    }

    /// Size of the domain.
    pub fn capacity(&self) -> usize {
        self.parent.len()
    }

    /// Number of disjoint sets currently tracked.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    fn check(&self, v: usize) -> Result<(), GraphError> {
        match self.parent.get(v) {
            None => Err(GraphError::NodeOutOfRange {
                node: v,
                node_count: self.parent.len(),
            }),
            Some(&UNSET) => Err(GraphError::NotASet(v)),
            Some(_) => Ok(()),
        }
    }

    /// Puts `v` into a fresh singleton set.
    ///
    /// Re-making an element that is already a singleton root is a no-op;
    /// re-making an element that belongs to a larger set is an error, since
    /// it would orphan the elements linked through it.
    pub fn make_set(&mut self, v: usize) -> Result<(), GraphError> {
        match self.parent.get(v) {
            None => Err(GraphError::NodeOutOfRange {
                node: v,
                node_count: self.parent.len(),
            }),
            Some(&UNSET) => {
                self.parent[v] = v;
                self.rank[v] = 0;
                self.sets += 1;
                Ok(())
            }
            Some(&p) if p == v && self.rank[v] == 0 => Ok(()),
            Some(_) => Err(GraphError::InvariantViolation(format!(
                "make_set({v}) on an element of a non-singleton set"
            ))),
        }
    }

    /// Representative of the set containing `v`.
    pub fn find_set(&mut self, v: usize) -> Result<usize, GraphError> {
        self.check(v)?;
        let mut root = v;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        // path compression
        let mut cur = v;
        while cur != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        Ok(root)
    }

    /// Merges the sets containing `a` and `b`.
    ///
    /// Returns `true` if they were distinct. The root of lower rank is
    /// attached under the other; on equal ranks `b`'s root goes under `a`'s
    /// and `a`'s rank grows by one.
    pub fn union_set(&mut self, a: usize, b: usize) -> Result<bool, GraphError> {
        let ra = self.find_set(a)?;
        let rb = self.find_set(b)?;
        if ra == rb {
            return Ok(false);
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        self.sets -= 1;
        Ok(true)
    }

    /// True if `a` and `b` are in the same set.
    pub fn same_set(&mut self, a: usize, b: usize) -> Result<bool, GraphError> {
        Ok(self.find_set(a)? == self.find_set(b)?)
    }
}
