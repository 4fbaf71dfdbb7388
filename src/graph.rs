//! Undirected contact graph.
//!
//! Nodes are labelled `0..N`. Edges are stored as sorted adjacency sets so
//! that iteration order is stable, which keeps seeded runs reproducible.

use std::collections::{BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};

/// Undirected, unweighted graph without self-loops or parallel edges
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    adjacency: Vec<BTreeSet<usize>>,
    edge_count: usize,
}

impl Graph {
    /// Create a graph with `node_count` nodes and no edges
    pub fn empty(node_count: usize) -> Self {
        Self {
            adjacency: vec![BTreeSet::new(); node_count],
            edge_count: 0,
        }
    }

    /// Complete graph on `node_count` nodes
    pub fn complete(node_count: usize) -> Self {
        let mut graph = Self::empty(node_count);
        for u in 0..node_count {
            for v in (u + 1)..node_count {
                graph.add_edge(u, v);
            }
        }
        graph
    }

    /// Add the edge `u-v`.
    ///
    /// Returns `false` when the edge already exists, is a self-loop, or
    /// references a node outside the graph.
    pub fn add_edge(&mut self, u: usize, v: usize) -> bool {
        if u == v || u >= self.node_count() || v >= self.node_count() {
            return false;
        }
        if !self.adjacency[u].insert(v) {
            return false;
        }
        self.adjacency[v].insert(u);
        self.edge_count += 1;
        true
    }

    /// Remove the edge `u-v`, returning whether it was present
    pub fn remove_edge(&mut self, u: usize, v: usize) -> bool {
        if u >= self.node_count() || v >= self.node_count() {
            return false;
        }
        if !self.adjacency[u].remove(&v) {
            return false;
        }
        self.adjacency[v].remove(&u);
        self.edge_count -= 1;
        true
    }

    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency
            .get(u)
            .map_or(false, |neighbors| neighbors.contains(&v))
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    /// Neighbors of `node` in ascending order
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        self.adjacency[node].iter().copied()
    }

    /// All edges as `(u, v)` with `u < v`, in ascending order
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = Vec::with_capacity(self.edge_count);
        for (u, neighbors) in self.adjacency.iter().enumerate() {
            for &v in neighbors.range((u + 1)..) {
                edges.push((u, v));
            }
        }
        edges
    }

    /// Breadth-first hop distances from `source`; `None` for unreachable nodes
    pub fn bfs_distances(&self, source: usize) -> Vec<Option<usize>> {
        let mut distances = vec![None; self.node_count()];
        let mut queue = VecDeque::new();
        distances[source] = Some(0);
        queue.push_back(source);

        while let Some(node) = queue.pop_front() {
            let next = distances[node].unwrap_or(0) + 1;
            for neighbor in self.neighbors(node) {
                if distances[neighbor].is_none() {
                    distances[neighbor] = Some(next);
                    queue.push_back(neighbor);
                }
            }
        }

        distances
    }

    /// Connected component label for every node
    pub fn component_labels(&self) -> Vec<usize> {
        let mut labels = vec![usize::MAX; self.node_count()];
        let mut next_label = 0;

        for start in 0..self.node_count() {
            if labels[start] != usize::MAX {
                continue;
            }
            let mut stack = vec![start];
            labels[start] = next_label;
            while let Some(node) = stack.pop() {
                for neighbor in self.neighbors(node) {
                    if labels[neighbor] == usize::MAX {
                        labels[neighbor] = next_label;
                        stack.push(neighbor);
                    }
                }
            }
            next_label += 1;
        }

        labels
    }

    /// True when every node is reachable from node 0.
    ///
    /// A graph without nodes is not considered connected.
    pub fn is_connected(&self) -> bool {
        if self.node_count() == 0 {
            return false;
        }
        self.bfs_distances(0).iter().all(Option::is_some)
    }
}
