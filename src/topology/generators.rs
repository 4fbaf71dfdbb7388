//! Contact graph generation.
//!
//! One constructor per topology family. Every random choice is drawn from
//! the caller's RNG so a seeded run always produces the same graph.

use log::debug;
use rand::Rng;

use crate::graph::Graph;
use crate::topology::types::Topology;

/// Ring lattice degree for small-world graphs
pub const SMALL_WORLD_DEGREE: usize = 4;
/// Rewiring probability for small-world graphs
pub const SMALL_WORLD_REWIRE_PROBABILITY: f64 = 0.2;
/// Edges attached per new node in scale-free graphs
pub const SCALE_FREE_ATTACHMENTS: usize = 2;
/// Independent edge probability for random graphs
pub const RANDOM_EDGE_PROBABILITY: f64 = 0.1;
/// Share of the nodes placed in the lollipop clique
pub const LOLLIPOP_CLIQUE_FRACTION: f64 = 0.8;

/// Generate a contact graph of `node_count` nodes for the given topology
///
/// # Arguments
/// * `topology` - The graph family to build
/// * `node_count` - Number of nodes, labelled `0..node_count`
/// * `rng` - Source of randomness for the stochastic families
pub fn generate<R: Rng + ?Sized>(topology: Topology, node_count: usize, rng: &mut R) -> Graph {
    let graph = match topology {
        Topology::SmallWorld => small_world(
            node_count,
            SMALL_WORLD_DEGREE,
            SMALL_WORLD_REWIRE_PROBABILITY,
            rng,
        ),
        Topology::ScaleFree => scale_free(node_count, SCALE_FREE_ATTACHMENTS, rng),
        Topology::Random => random(node_count, RANDOM_EDGE_PROBABILITY, rng),
        Topology::Complete => Graph::complete(node_count),
        Topology::Cycle => cycle(node_count),
        Topology::Lollipop => {
            let clique_size = lollipop_clique_size(node_count);
            lollipop(clique_size, node_count - clique_size)
        }
    };

    debug!(
        "Generated {} graph with {} nodes and {} edges",
        topology,
        graph.node_count(),
        graph.edge_count()
    );
    graph
}

/// Ring lattice where each node links to its `degree / 2` nearest neighbors
/// on each side, then each lattice edge is rewired with probability
/// `rewire_probability` to a uniformly chosen new endpoint.
///
/// When the lattice degree is not smaller than the node count the lattice
/// is already complete and is returned as such.
pub fn small_world<R: Rng + ?Sized>(
    node_count: usize,
    degree: usize,
    rewire_probability: f64,
    rng: &mut R,
) -> Graph {
    if degree >= node_count {
        return Graph::complete(node_count);
    }

    let half = degree / 2;
    let mut graph = Graph::empty(node_count);
    for offset in 1..=half {
        for u in 0..node_count {
            graph.add_edge(u, (u + offset) % node_count);
        }
    }

    for offset in 1..=half {
        for u in 0..node_count {
            let v = (u + offset) % node_count;
            if rng.gen::<f64>() >= rewire_probability {
                continue;
            }
            // Already linked to everyone, nothing to rewire to
            if graph.degree(u) >= node_count - 1 {
                continue;
            }
            let w = loop {
                let candidate = rng.gen_range(0..node_count);
                if candidate != u && !graph.has_edge(u, candidate) {
                    break candidate;
                }
            };
            graph.remove_edge(u, v);
            graph.add_edge(u, w);
        }
    }

    graph
}

/// Preferential attachment growth.
///
/// Starts from a star on `attachments + 1` nodes; every further node links
/// to `attachments` distinct existing nodes chosen with probability
/// proportional to their degree.
pub fn scale_free<R: Rng + ?Sized>(node_count: usize, attachments: usize, rng: &mut R) -> Graph {
    if attachments == 0 || node_count <= attachments {
        return Graph::complete(node_count);
    }

    let mut graph = Graph::empty(node_count);
    // One entry per edge endpoint, so sampling it is degree-weighted
    let mut repeated_nodes: Vec<usize> = Vec::with_capacity(2 * attachments * node_count);
    for leaf in 1..=attachments {
        graph.add_edge(0, leaf);
        repeated_nodes.push(0);
        repeated_nodes.push(leaf);
    }

    let mut targets: Vec<usize> = Vec::with_capacity(attachments);
    for source in (attachments + 1)..node_count {
        targets.clear();
        while targets.len() < attachments {
            let candidate = repeated_nodes[rng.gen_range(0..repeated_nodes.len())];
            if !targets.contains(&candidate) {
                targets.push(candidate);
            }
        }
        for &target in &targets {
            graph.add_edge(source, target);
            repeated_nodes.push(target);
            repeated_nodes.push(source);
        }
    }

    graph
}

/// Erdős–Rényi graph: each unordered pair linked with probability `edge_probability`
pub fn random<R: Rng + ?Sized>(node_count: usize, edge_probability: f64, rng: &mut R) -> Graph {
    let mut graph = Graph::empty(node_count);
    for u in 0..node_count {
        for v in (u + 1)..node_count {
            if rng.gen::<f64>() < edge_probability {
                graph.add_edge(u, v);
            }
        }
    }
    graph
}

/// Single ring `0-1-...-(n-1)-0`
pub fn cycle(node_count: usize) -> Graph {
    let mut graph = Graph::empty(node_count);
    if node_count < 2 {
        return graph;
    }
    for u in 0..node_count {
        graph.add_edge(u, (u + 1) % node_count);
    }
    graph
}

/// Clique on nodes `0..clique_size` with a path of `path_length` nodes
/// hanging off the last clique vertex.
pub fn lollipop(clique_size: usize, path_length: usize) -> Graph {
    let node_count = clique_size + path_length;
    let mut graph = Graph::empty(node_count);
    for u in 0..clique_size {
        for v in (u + 1)..clique_size {
            graph.add_edge(u, v);
        }
    }
    if clique_size > 0 {
        for u in (clique_size - 1)..node_count.saturating_sub(1) {
            graph.add_edge(u, u + 1);
        }
    }
    graph
}

/// Clique size for a lollipop graph of `node_count` nodes
pub fn lollipop_clique_size(node_count: usize) -> usize {
    let size = (LOLLIPOP_CLIQUE_FRACTION * node_count as f64).round() as usize;
    size.min(node_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_complete_edge_count() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in [2, 5, 10, 40] {
            let graph = generate(Topology::Complete, n, &mut rng);
            assert_eq!(graph.edge_count(), n * (n - 1) / 2);
        }
    }

    #[test]
    fn test_cycle_edge_count() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in [3, 10, 20, 150] {
            let graph = generate(Topology::Cycle, n, &mut rng);
            assert_eq!(graph.edge_count(), n);
            assert!((0..n).all(|node| graph.degree(node) == 2));
        }
        // Two nodes collapse to a single edge
        assert_eq!(cycle(2).edge_count(), 1);
    }

    #[test]
    fn test_small_world_preserves_edge_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let graph = small_world(40, 4, 0.2, &mut rng);
        // Rewiring moves edges, it never adds or drops them
        assert_eq!(graph.edge_count(), 80);

        let lattice = small_world(40, 4, 0.0, &mut rng);
        assert!((0..40).all(|node| lattice.degree(node) == 4));
        assert!(lattice.has_edge(0, 39));
        assert!(lattice.has_edge(0, 38));
    }

    #[test]
    fn test_small_world_tiny_is_complete() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(small_world(4, 4, 0.2, &mut rng).edge_count(), 6);
        assert_eq!(small_world(2, 4, 0.2, &mut rng).edge_count(), 1);
    }

    #[test]
    fn test_scale_free_edge_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let n = 50;
        let graph = scale_free(n, 2, &mut rng);
        // Seed star contributes 2 edges, every later node adds 2
        assert_eq!(graph.edge_count(), 2 + 2 * (n - 3));
        assert!(graph.is_connected());
        assert!((3..n).all(|node| graph.degree(node) >= 2));
    }

    #[test]
    fn test_scale_free_tiny() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(scale_free(2, 2, &mut rng).edge_count(), 1);
        assert_eq!(scale_free(3, 2, &mut rng).edge_count(), 2);
    }

    #[test]
    fn test_random_extremes() {
        let mut rng = StdRng::seed_from_u64(11);
        assert_eq!(random(30, 0.0, &mut rng).edge_count(), 0);
        assert_eq!(random(30, 1.0, &mut rng).edge_count(), 435);
    }

    #[test]
    fn test_lollipop_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let graph = generate(Topology::Lollipop, 10, &mut rng);
        assert_eq!(lollipop_clique_size(10), 8);
        // 8-clique (28 edges) plus bridge and one path edge
        assert_eq!(graph.edge_count(), 28 + 2);
        assert!(graph.has_edge(7, 8));
        assert!(graph.has_edge(8, 9));
        assert_eq!(graph.degree(9), 1);
        assert!(graph.is_connected());
    }

    #[test]
    fn test_lollipop_without_tail() {
        let graph = lollipop(2, 0);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        for topology in Topology::ALL {
            let a = generate(topology, 60, &mut StdRng::seed_from_u64(42));
            let b = generate(topology, 60, &mut StdRng::seed_from_u64(42));
            assert_eq!(a, b, "{} differs between identical seeds", topology);
            assert_eq!(a.node_count(), 60);
        }
    }
}
