//! Simulation orchestrator.
//!
//! This module coordinates a full run, from a validated parameter record
//! through graph generation and the SEAIR engine to the metrics tables.
//! Every run owns its graph, node states and RNG, so replicates can run
//! concurrently without sharing mutable state.

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::{ConfigError, SimulationConfig};
use crate::graph::Graph;
use crate::metrics::{compartment_counts, BatchSummary, CompartmentCounts, NetworkMetrics, OutcomeMetrics};
use crate::simulation::{self, SimParams, StateHistory};
use crate::topology::{generate, Topology};

/// Everything a single run hands back to its caller
#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub topology: Topology,
    pub params: SimParams,
    /// Seed the run's RNG was built from, if any
    pub seed: Option<u64>,
    pub graph: Graph,
    pub history: StateHistory,
    pub counts: Vec<CompartmentCounts>,
    pub network_metrics: NetworkMetrics,
    pub outcome_metrics: OutcomeMetrics,
}

/// Results of a batch of independent replicates
#[derive(Debug, Clone)]
pub struct BatchOutput {
    pub runs: Vec<SimulationOutput>,
    pub summary: BatchSummary,
}

/// Build the RNG for a run: seeded when a seed is given, entropy otherwise
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Generate a graph and run the engine over it with a caller-supplied RNG
///
/// `params` must already be validated.
pub fn simulate<R: Rng + ?Sized>(
    topology: Topology,
    node_count: usize,
    params: &SimParams,
    rng: &mut R,
) -> (Graph, StateHistory) {
    let graph = generate(topology, node_count, rng);
    let history = simulation::run(&graph, params, rng);
    (graph, history)
}

/// Validate `config`, then run one simulation and compute every table
///
/// Configuration errors are returned before any graph is generated.
pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationOutput, ConfigError> {
    config.validate()?;
    let topology = config.topology()?;
    Ok(run_validated(config, topology, config.seed))
}

/// Validate `config`, then run `config.runs` independent replicates in parallel
///
/// Replicate `i` is seeded with `seed + i` when a base seed is configured.
pub fn run_batch(config: &SimulationConfig) -> Result<BatchOutput, ConfigError> {
    config.validate()?;
    let topology = config.topology()?;
    let run_count = config.run_count();

    info!("Running {} replicates of {} with N={}", run_count, topology, config.nodes);

    let runs: Vec<SimulationOutput> = (0..run_count)
        .into_par_iter()
        .map(|i| {
            let seed = config.seed.map(|base| base.wrapping_add(i as u64));
            run_validated(config, topology, seed)
        })
        .collect();

    let outcomes: Vec<OutcomeMetrics> = runs.iter().map(|run| run.outcome_metrics.clone()).collect();
    let summary = BatchSummary::from_outcomes(&outcomes);

    info!(
        "Batch complete: mean attack rate {:.1}%, mean peak infections {:.1}",
        summary.final_attack_rate.mean, summary.peak_infections.mean
    );

    Ok(BatchOutput { runs, summary })
}

fn run_validated(config: &SimulationConfig, topology: Topology, seed: Option<u64>) -> SimulationOutput {
    let params = config.sim_params();
    let mut rng = make_rng(seed);

    let (graph, history) = simulate(topology, config.nodes, &params, &mut rng);
    info!(
        "Generated {} network: {} nodes, {} edges",
        topology,
        graph.node_count(),
        graph.edge_count()
    );

    let counts = compartment_counts(&history);
    let network_metrics = NetworkMetrics::compute(&graph);
    let outcome_metrics = OutcomeMetrics::compute(&counts, graph.node_count());

    info!(
        "Run finished: peak infections {}, attack rate {:.1}%",
        outcome_metrics.peak_infections, outcome_metrics.final_attack_rate
    );

    SimulationOutput {
        topology,
        params,
        seed,
        graph,
        history,
        counts,
        network_metrics,
        outcome_metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SimulationConfig {
        SimulationConfig {
            network_type: "small-world".to_string(),
            nodes: 30,
            timesteps: 25,
            seed: Some(2024),
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_run_simulation_tables() {
        let output = run_simulation(&config()).unwrap();
        assert_eq!(output.topology, Topology::SmallWorld);
        assert_eq!(output.counts.len(), 25);
        assert_eq!(output.history.len(), 25);
        assert_eq!(output.network_metrics.num_nodes, 30);
        assert!(output.counts.iter().all(|row| row.total() == 30));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let a = run_simulation(&config()).unwrap();
        let b = run_simulation(&config()).unwrap();
        assert_eq!(a.graph, b.graph);
        assert_eq!(a.history, b.history);
        assert_eq!(a.outcome_metrics, b.outcome_metrics);
    }

    #[test]
    fn test_configuration_error_before_generation() {
        let bad = SimulationConfig { network_type: "mesh".to_string(), ..config() };
        assert!(matches!(run_simulation(&bad), Err(ConfigError::UnknownTopology(_))));
        assert!(run_batch(&bad).is_err());
    }

    #[test]
    fn test_batch_replicates_use_derived_seeds() {
        let batch_config = SimulationConfig { runs: Some(4), ..config() };
        let batch = run_batch(&batch_config).unwrap();
        assert_eq!(batch.runs.len(), 4);
        assert_eq!(batch.summary.runs, 4);

        let seeds: Vec<_> = batch.runs.iter().map(|run| run.seed).collect();
        assert_eq!(seeds, vec![Some(2024), Some(2025), Some(2026), Some(2027)]);

        // Replicate 0 matches a standalone run with the same seed
        let single = run_simulation(&config()).unwrap();
        assert_eq!(batch.runs[0].history, single.history);
    }
}
