#![allow(dead_code)]
use graph_frontier::topology::{AdjacencyList, Edge, NodeId};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Directed chain 0 -> 1 -> ... -> n-1.
pub fn chain(n: usize) -> AdjacencyList {
    AdjacencyList::from_edges(n, (1..n).map(|i| Edge::new(i - 1, i))).unwrap()
}

/// Undirected cycle of length n.
pub fn cycle(n: usize) -> AdjacencyList {
    AdjacencyList::from_undirected_edges(n, (0..n).map(|i| (i, (i + 1) % n))).unwrap()
}

/// Undirected star with the given center over n nodes.
pub fn star(n: usize, center: NodeId) -> AdjacencyList {
    AdjacencyList::from_undirected_edges(n, (0..n).filter(|&v| v != center).map(|v| (center, v)))
        .unwrap()
}

/// Random simple undirected graph (G(n, p)) from a fixed seed.
pub fn random_undirected(n: usize, edge_prob: f64, seed: u64) -> AdjacencyList {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut pairs = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen_bool(edge_prob) {
                pairs.push((u, v));
            }
        }
    }
    AdjacencyList::from_undirected_edges(n, pairs).unwrap()
}

/// Random directed graph with `m` edges (parallel edges and loops allowed).
pub fn random_directed(n: usize, m: usize, seed: u64) -> AdjacencyList {
    let mut rng = SmallRng::seed_from_u64(seed);
    let edges: Vec<Edge> = (0..m)
        .map(|_| {
            let (u, v) = (rng.gen_range(0..n), rng.gen_range(0..n));
            Edge::new(u, v).with_color(rng.gen_range(0..3))
        })
        .collect();
    AdjacencyList::from_edges(n, edges).unwrap()
}

/// Plain BFS distances from `seeds`; `None` for unreachable nodes.
pub fn bfs_distances(g: &AdjacencyList, seeds: &[NodeId]) -> Vec<Option<usize>> {
    use graph_frontier::topology::AdjacencyStore;
    let mut dist = vec![None; g.node_count()];
    let mut queue = VecDeque::new();
    for &s in seeds {
        if dist[s].is_none() {
            dist[s] = Some(0);
            queue.push_back(s);
        }
    }
    while let Some(u) = queue.pop_front() {
        let d = dist[u].unwrap();
        for v in g.neighbors(u) {
            if dist[v].is_none() {
                dist[v] = Some(d + 1);
                queue.push_back(v);
            }
        }
    }
    dist
}
