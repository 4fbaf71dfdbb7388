use crate::config::SimulationConfig;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<SimulationConfig> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open configuration '{}'", config_path.display()))?;

    let config: SimulationConfig = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse configuration '{}'", config_path.display()))?;

    config.validate()?;

    Ok(config)
}

/// CLI arguments that can override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub network_type: Option<String>,
    pub nodes: Option<usize>,
    pub timesteps: Option<usize>,
    pub incubation_period: Option<usize>,
    pub recovery_time: Option<usize>,
    pub p_asymptomatic: Option<f64>,
    pub p_transmission: Option<f64>,
    pub seed: Option<u64>,
    pub runs: Option<usize>,
}

impl CliOverrides {
    pub fn is_empty(&self) -> bool {
        self.network_type.is_none()
            && self.nodes.is_none()
            && self.timesteps.is_none()
            && self.incubation_period.is_none()
            && self.recovery_time.is_none()
            && self.p_asymptomatic.is_none()
            && self.p_transmission.is_none()
            && self.seed.is_none()
            && self.runs.is_none()
    }
}

/// Apply CLI overrides to a configuration, then re-validate it
pub fn apply_overrides(config: &mut SimulationConfig, overrides: &CliOverrides) -> Result<()> {
    if let Some(network_type) = &overrides.network_type {
        info!("Overriding network_type: {} -> {}", config.network_type, network_type);
        config.network_type = network_type.clone();
    }
    if let Some(nodes) = overrides.nodes {
        info!("Overriding N: {} -> {}", config.nodes, nodes);
        config.nodes = nodes;
    }
    if let Some(timesteps) = overrides.timesteps {
        config.timesteps = timesteps;
    }
    if let Some(incubation_period) = overrides.incubation_period {
        config.incubation_period = incubation_period;
    }
    if let Some(recovery_time) = overrides.recovery_time {
        config.recovery_time = recovery_time;
    }
    if let Some(p_asymptomatic) = overrides.p_asymptomatic {
        config.p_asymptomatic = p_asymptomatic;
    }
    if let Some(p_transmission) = overrides.p_transmission {
        config.p_transmission = p_transmission;
    }
    if overrides.seed.is_some() {
        config.seed = overrides.seed;
    }
    if overrides.runs.is_some() {
        config.runs = overrides.runs;
    }

    // Re-validate after applying overrides
    config.validate()?;

    Ok(())
}
