//! Static network-structure metrics.
//!
//! Provides the structural summary of a generated contact graph:
//! - Size, degree and density
//! - Average clustering coefficient
//! - Average shortest path length (connected graphs only)
//! - Average local node connectivity
//! - Isolated nodes

use std::collections::VecDeque;

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::MetricRow;
use crate::graph::Graph;

/// Structural summary of a contact graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkMetrics {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub avg_degree: f64,
    pub clustering_coeff: f64,
    /// `None` when the graph is disconnected
    pub avg_path_length: Option<f64>,
    pub avg_node_conn: f64,
    pub num_isolates: usize,
    pub network_density: f64,
}

impl NetworkMetrics {
    /// Compute every structural metric of `graph`
    pub fn compute(graph: &Graph) -> Self {
        let num_nodes = graph.node_count();
        let num_edges = graph.edge_count();

        let avg_path_length = average_shortest_path_length(graph);
        if avg_path_length.is_none() {
            warn!("Graph is disconnected; average shortest path length is undefined");
        }

        let metrics = Self {
            num_nodes,
            num_edges,
            avg_degree: average_degree(graph),
            clustering_coeff: average_clustering(graph),
            avg_path_length,
            avg_node_conn: average_node_connectivity(graph),
            num_isolates: (0..num_nodes).filter(|&node| graph.degree(node) == 0).count(),
            network_density: density(graph),
        };
        debug!("Network metrics: {:?}", metrics);
        metrics
    }

    /// Two-column (measure, value) table
    pub fn rows(&self) -> Vec<MetricRow> {
        vec![
            MetricRow::new("num_nodes", Some(self.num_nodes as f64)),
            MetricRow::new("num_edges", Some(self.num_edges as f64)),
            MetricRow::new("avg_degree", Some(self.avg_degree)),
            MetricRow::new("clustering_coeff", Some(self.clustering_coeff)),
            MetricRow::new("avg_path_length", self.avg_path_length),
            MetricRow::new("avg_node_conn", Some(self.avg_node_conn)),
            MetricRow::new("num_isolates", Some(self.num_isolates as f64)),
            MetricRow::new("network_density", Some(self.network_density)),
        ]
    }
}

/// `2 * edges / nodes`
pub fn average_degree(graph: &Graph) -> f64 {
    if graph.node_count() == 0 {
        return 0.0;
    }
    2.0 * graph.edge_count() as f64 / graph.node_count() as f64
}

/// Share of possible edges that are present
pub fn density(graph: &Graph) -> f64 {
    let n = graph.node_count();
    if n < 2 {
        return 0.0;
    }
    2.0 * graph.edge_count() as f64 / (n * (n - 1)) as f64
}

/// Fraction of neighbor pairs of `node` that are themselves linked
pub fn local_clustering(graph: &Graph, node: usize) -> f64 {
    let neighbors: Vec<usize> = graph.neighbors(node).collect();
    let degree = neighbors.len();
    if degree < 2 {
        return 0.0;
    }

    let mut links = 0usize;
    for (i, &a) in neighbors.iter().enumerate() {
        for &b in &neighbors[i + 1..] {
            if graph.has_edge(a, b) {
                links += 1;
            }
        }
    }

    2.0 * links as f64 / (degree * (degree - 1)) as f64
}

/// Mean local clustering over all nodes; nodes of degree < 2 count as 0
pub fn average_clustering(graph: &Graph) -> f64 {
    let n = graph.node_count();
    if n == 0 {
        return 0.0;
    }
    (0..n).map(|node| local_clustering(graph, node)).sum::<f64>() / n as f64
}

/// Mean hop distance over all ordered pairs of distinct nodes
///
/// Returns `None` when the graph is disconnected.
pub fn average_shortest_path_length(graph: &Graph) -> Option<f64> {
    let n = graph.node_count();
    if !graph.is_connected() {
        return None;
    }
    if n < 2 {
        return Some(0.0);
    }

    let total: usize = (0..n)
        .into_par_iter()
        .map(|source| graph.bfs_distances(source).iter().flatten().sum::<usize>())
        .sum();

    Some(total as f64 / (n * (n - 1)) as f64)
}

/// Mean local node connectivity over all unordered pairs of nodes
pub fn average_node_connectivity(graph: &Graph) -> f64 {
    let n = graph.node_count();
    if n < 2 {
        return 0.0;
    }

    let network = FlowNetwork::split_nodes(graph);
    let components = graph.component_labels();

    let total: usize = (0..n)
        .into_par_iter()
        .map(|u| {
            ((u + 1)..n)
                .filter(|&v| components[u] == components[v])
                .map(|v| network.local_connectivity(u, v, graph.degree(u).min(graph.degree(v))))
                .sum::<usize>()
        })
        .sum();

    let pairs = n * (n - 1) / 2;
    total as f64 / pairs as f64
}

/// Number of internally vertex-disjoint paths between `u` and `v`.
///
/// A direct `u-v` edge counts as one path.
pub fn local_node_connectivity(graph: &Graph, u: usize, v: usize) -> usize {
    let bound = graph.degree(u).min(graph.degree(v));
    FlowNetwork::split_nodes(graph).local_connectivity(u, v, bound)
}

/// Unit-capacity flow network with every node split into an in/out pair.
///
/// Node `x` becomes `2x` (in) and `2x + 1` (out) joined by a unit arc, so a
/// unit of flow can pass through each original node at most once. Arcs are
/// stored in pairs; arc `e ^ 1` is the residual reverse of arc `e`.
struct FlowNetwork {
    arcs_from: Vec<Vec<usize>>,
    head: Vec<usize>,
    capacity: Vec<u8>,
}

impl FlowNetwork {
    fn split_nodes(graph: &Graph) -> Self {
        let vertex_count = 2 * graph.node_count();
        let mut network = Self {
            arcs_from: vec![Vec::new(); vertex_count],
            head: Vec::new(),
            capacity: Vec::new(),
        };

        for node in 0..graph.node_count() {
            network.add_arc(2 * node, 2 * node + 1);
        }
        for (u, v) in graph.edges() {
            network.add_arc(2 * u + 1, 2 * v);
            network.add_arc(2 * v + 1, 2 * u);
        }

        network
    }

    fn add_arc(&mut self, from: usize, to: usize) {
        let arc = self.head.len();
        self.head.push(to);
        self.capacity.push(1);
        self.arcs_from[from].push(arc);

        self.head.push(from);
        self.capacity.push(0);
        self.arcs_from[to].push(arc + 1);
    }

    /// Max flow from `u`'s out-vertex to `v`'s in-vertex, stopping at `bound`
    fn local_connectivity(&self, u: usize, v: usize, bound: usize) -> usize {
        let source = 2 * u + 1;
        let sink = 2 * v;
        let vertex_count = self.arcs_from.len();

        let mut residual = self.capacity.clone();
        let mut parent_arc = vec![usize::MAX; vertex_count];
        let mut visited = vec![false; vertex_count];
        let mut queue = VecDeque::new();
        let mut flow = 0;

        while flow < bound {
            visited.iter_mut().for_each(|seen| *seen = false);
            queue.clear();
            visited[source] = true;
            queue.push_back(source);

            'search: while let Some(vertex) = queue.pop_front() {
                for &arc in &self.arcs_from[vertex] {
                    let next = self.head[arc];
                    if residual[arc] == 0 || visited[next] {
                        continue;
                    }
                    visited[next] = true;
                    parent_arc[next] = arc;
                    if next == sink {
                        break 'search;
                    }
                    queue.push_back(next);
                }
            }

            if !visited[sink] {
                break;
            }

            let mut vertex = sink;
            while vertex != source {
                let arc = parent_arc[vertex];
                residual[arc] -= 1;
                residual[arc ^ 1] += 1;
                vertex = self.head[arc ^ 1];
            }
            flow += 1;
        }

        flow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::generators::{cycle, lollipop};

    fn path(n: usize) -> Graph {
        let mut graph = Graph::empty(n);
        for u in 0..n.saturating_sub(1) {
            graph.add_edge(u, u + 1);
        }
        graph
    }

    #[test]
    fn test_complete_graph_metrics() {
        let metrics = NetworkMetrics::compute(&Graph::complete(10));
        assert_eq!(metrics.num_nodes, 10);
        assert_eq!(metrics.num_edges, 45);
        assert!((metrics.avg_degree - 9.0).abs() < 1e-12);
        assert!((metrics.clustering_coeff - 1.0).abs() < 1e-12);
        assert_eq!(metrics.avg_path_length, Some(1.0));
        assert!((metrics.avg_node_conn - 9.0).abs() < 1e-12);
        assert_eq!(metrics.num_isolates, 0);
        assert!((metrics.network_density - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_cycle_metrics() {
        let metrics = NetworkMetrics::compute(&cycle(6));
        assert_eq!(metrics.num_edges, 6);
        assert_eq!(metrics.clustering_coeff, 0.0);
        // Distances from any node: 1, 1, 2, 2, 3
        assert!((metrics.avg_path_length.unwrap() - 9.0 / 5.0).abs() < 1e-12);
        assert!((metrics.avg_node_conn - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_path_metrics() {
        let graph = path(4);
        // Ordered-pair distances sum to 2 * (1+2+3+1+2+1) = 20 over 12 pairs
        assert!((average_shortest_path_length(&graph).unwrap() - 20.0 / 12.0).abs() < 1e-12);
        assert!((average_node_connectivity(&graph) - 1.0).abs() < 1e-12);
        assert!((density(&graph) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_disconnected_graph_has_no_path_length() {
        let mut graph = Graph::empty(5);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(0, 2);

        let metrics = NetworkMetrics::compute(&graph);
        assert_eq!(metrics.avg_path_length, None);
        assert_eq!(metrics.num_isolates, 2);
        // Only the three triangle pairs contribute 2 each, over 10 pairs
        assert!((metrics.avg_node_conn - 0.6).abs() < 1e-12);

        let rows = metrics.rows();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[4].measure, "avg_path_length");
        assert_eq!(rows[4].value, None);
    }

    #[test]
    fn test_local_node_connectivity() {
        let graph = lollipop(4, 2);
        // Clique pairs: direct edge plus two detours
        assert_eq!(local_node_connectivity(&graph, 0, 1), 3);
        // Everything past the bridge hangs off a cut vertex
        assert_eq!(local_node_connectivity(&graph, 0, 5), 1);
        assert_eq!(local_node_connectivity(&graph, 3, 4), 1);
    }

    #[test]
    fn test_local_clustering() {
        let graph = lollipop(4, 2);
        assert!((local_clustering(&graph, 0) - 1.0).abs() < 1e-12);
        // Node 3 has clique neighbors 0,1,2 (all linked) plus the bridge to 4
        assert!((local_clustering(&graph, 3) - 0.5).abs() < 1e-12);
        assert_eq!(local_clustering(&graph, 5), 0.0);
    }

    #[test]
    fn test_average_degree_matches_edges() {
        let graph = lollipop(8, 2);
        let metrics = NetworkMetrics::compute(&graph);
        let expected = 2.0 * metrics.num_edges as f64 / metrics.num_nodes as f64;
        assert!((metrics.avg_degree - expected).abs() < 1e-12);
    }
}
