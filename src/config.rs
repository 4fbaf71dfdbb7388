//! Simulation parameter record.
//!
//! Field names follow the parameter contract used by front ends
//! (`network_type`, `N`, `timesteps`, ...), so the same YAML document can be
//! produced by a form layer or written by hand.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::simulation::SimParams;
use crate::topology::Topology;

/// Practical node-count range offered by interactive front ends
pub const PRACTICAL_NODES: (usize, usize) = (10, 150);
/// Practical timestep range offered by interactive front ends
pub const PRACTICAL_TIMESTEPS: (usize, usize) = (20, 80);
/// Practical range for incubation period and recovery time
pub const PRACTICAL_PERIOD: (usize, usize) = (1, 10);

/// Configuration errors, raised before any graph is generated
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown network type '{0}' (expected one of: small-world, scale-free, random, complete, cycle, lollipop)")]
    UnknownTopology(String),
    #[error("Population must contain at least 2 nodes, got {0}")]
    TooFewNodes(usize),
    #[error("Simulation must run for at least 1 timestep, got {0}")]
    InvalidTimesteps(usize),
    #[error("{name} must be at least 1, got {value}")]
    InvalidPeriod { name: &'static str, value: usize },
    #[error("{name} must lie within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("Batch must contain at least 1 run, got {0}")]
    InvalidRuns(usize),
}

/// Parameters of one simulation (or one batch of replicates)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Topology identifier, e.g. "small-world"
    pub network_type: String,
    /// Population size
    #[serde(rename = "N")]
    pub nodes: usize,
    pub timesteps: usize,
    pub incubation_period: usize,
    pub recovery_time: usize,
    pub p_asymptomatic: f64,
    pub p_transmission: f64,
    /// Base RNG seed; runs are unseeded when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Number of independent replicates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runs: Option<usize>,
}

impl SimulationConfig {
    /// Validate the configuration
    ///
    /// Hard limits fail with a [`ConfigError`]; values that are legal but
    /// outside the ranges interactive front ends offer only log a warning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.topology()?;

        if self.nodes < 2 {
            return Err(ConfigError::TooFewNodes(self.nodes));
        }
        self.sim_params().validate()?;

        if let Some(runs) = self.runs {
            if runs < 1 {
                return Err(ConfigError::InvalidRuns(runs));
            }
        }

        self.warn_outside_practical_ranges();
        Ok(())
    }

    fn warn_outside_practical_ranges(&self) {
        let checks = [
            ("N", self.nodes, PRACTICAL_NODES),
            ("timesteps", self.timesteps, PRACTICAL_TIMESTEPS),
            ("incubation_period", self.incubation_period, PRACTICAL_PERIOD),
            ("recovery_time", self.recovery_time, PRACTICAL_PERIOD),
        ];
        for (name, value, (min, max)) in checks {
            if value < min || value > max {
                warn!(
                    "{} = {} is outside the practical range {}-{}; results may be slow or uninformative",
                    name, value, min, max
                );
            }
        }
    }

    /// Resolve the topology identifier
    pub fn topology(&self) -> Result<Topology, ConfigError> {
        self.network_type.parse()
    }

    /// Engine parameters for this configuration
    pub fn sim_params(&self) -> SimParams {
        SimParams {
            timesteps: self.timesteps,
            p_transmission: self.p_transmission,
            p_asymptomatic: self.p_asymptomatic,
            incubation_period: self.incubation_period,
            recovery_time: self.recovery_time,
        }
    }

    /// Number of replicates to run
    pub fn run_count(&self) -> usize {
        self.runs.unwrap_or(1)
    }
}

/// Default implementations
impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            network_type: Topology::SmallWorld.to_string(),
            nodes: 40,
            timesteps: 40,
            incubation_period: 3,
            recovery_time: 7,
            p_asymptomatic: 0.3,
            p_transmission: 0.3,
            seed: None,
            runs: None,
        }
    }
}
