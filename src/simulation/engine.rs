//! Discrete-time SEAIR engine.
//!
//! Updates are synchronous: every node's transition at timestep `t` is
//! decided from the frozen snapshot of `t - 1`. Per-node timers live in a
//! [`NodeState`] array that is mutated in place and dropped after the run.

use log::{debug, info};
use rand::Rng;

use crate::graph::Graph;
use crate::simulation::history::StateHistory;
use crate::simulation::types::{Compartment, NodeState, SimParams};

/// Probability that a susceptible node with `infectious_contacts` infectious
/// neighbors becomes exposed within one timestep
pub fn exposure_probability(p_transmission: f64, infectious_contacts: usize) -> f64 {
    let exponent = i32::try_from(infectious_contacts).unwrap_or(i32::MAX);
    1.0 - (1.0 - p_transmission).powi(exponent)
}

/// Run the SEAIR automaton over `graph`
///
/// One node, chosen uniformly, starts Exposed; everyone else starts
/// Susceptible. The returned history holds `params.timesteps` snapshots
/// (at least one). `params` are expected to be validated.
///
/// # Arguments
/// * `graph` - Contact network; connectivity is not required
/// * `params` - Transmission and timing parameters
/// * `rng` - Source of every random draw of the run
pub fn run<R: Rng + ?Sized>(graph: &Graph, params: &SimParams, rng: &mut R) -> StateHistory {
    let node_count = graph.node_count();
    let timesteps = params.timesteps.max(1);
    let mut history = StateHistory::with_capacity(timesteps);

    let mut nodes = vec![NodeState::susceptible(); node_count];
    if node_count > 0 {
        let index_case = rng.gen_range(0..node_count);
        nodes[index_case] = NodeState::entering(Compartment::Exposed);
        info!("Index case: node {} starts Exposed", index_case);
    }
    history.push(snapshot(&nodes));

    for t in 1..timesteps {
        let next = {
            let previous = history.snapshot(t - 1).unwrap_or_default();
            for node in 0..node_count {
                step_node(graph, params, previous, node, &mut nodes[node], rng);
            }
            snapshot(&nodes)
        };
        debug!(
            "t={} infectious={} recovered={}",
            t,
            next.iter().filter(|c| c.is_infectious()).count(),
            next.iter().filter(|&&c| c == Compartment::Recovered).count()
        );
        history.push(next);
    }

    history
}

/// Advance one node by one timestep, reading neighbors from `previous`
fn step_node<R: Rng + ?Sized>(
    graph: &Graph,
    params: &SimParams,
    previous: &[Compartment],
    node: usize,
    state: &mut NodeState,
    rng: &mut R,
) {
    match previous[node] {
        Compartment::Susceptible => {
            let infectious_contacts = graph
                .neighbors(node)
                .filter(|&neighbor| previous[neighbor].is_infectious())
                .count();
            if infectious_contacts > 0 {
                let chance = exposure_probability(params.p_transmission, infectious_contacts);
                if rng.gen::<f64>() < chance {
                    *state = NodeState::entering(Compartment::Exposed);
                }
            }
        }
        Compartment::Exposed => {
            state.timer += 1;
            if state.timer >= params.incubation_period {
                let outcome = if rng.gen::<f64>() < params.p_asymptomatic {
                    Compartment::Asymptomatic
                } else {
                    Compartment::Infected
                };
                // Timer now counts infectious duration
                *state = NodeState::entering(outcome);
            }
        }
        Compartment::Asymptomatic | Compartment::Infected => {
            state.timer += 1;
            if state.timer >= params.recovery_time {
                *state = NodeState::entering(Compartment::Recovered);
            }
        }
        Compartment::Recovered => {}
    }
}

fn snapshot(nodes: &[NodeState]) -> Vec<Compartment> {
    nodes.iter().map(|state| state.compartment).collect()
}
