//! Compartment model types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Health state of a node at one timestep
///
/// Legal moves are `S -> E -> (A | I) -> R`; `R` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Compartment {
    #[serde(rename = "S")]
    Susceptible,
    #[serde(rename = "E")]
    Exposed,
    #[serde(rename = "A")]
    Asymptomatic,
    #[serde(rename = "I")]
    Infected,
    #[serde(rename = "R")]
    Recovered,
}

impl Compartment {
    /// All compartments in table column order
    pub const ALL: [Compartment; 5] = [
        Compartment::Susceptible,
        Compartment::Exposed,
        Compartment::Asymptomatic,
        Compartment::Infected,
        Compartment::Recovered,
    ];

    /// Single-letter code used in tables
    pub fn symbol(&self) -> char {
        match self {
            Self::Susceptible => 'S',
            Self::Exposed => 'E',
            Self::Asymptomatic => 'A',
            Self::Infected => 'I',
            Self::Recovered => 'R',
        }
    }

    /// Column index in [`Compartment::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Asymptomatic and infected nodes expose their susceptible neighbors
    pub fn is_infectious(&self) -> bool {
        matches!(self, Self::Asymptomatic | Self::Infected)
    }

    /// Compartments reachable in a single forward transition
    pub fn successors(&self) -> &'static [Compartment] {
        match self {
            Self::Susceptible => &[Self::Exposed],
            Self::Exposed => &[Self::Asymptomatic, Self::Infected],
            Self::Asymptomatic | Self::Infected => &[Self::Recovered],
            Self::Recovered => &[],
        }
    }

    /// True if a node may be in `next` one timestep after being in `self`
    pub fn can_advance_to(&self, next: Compartment) -> bool {
        *self == next || self.successors().contains(&next)
    }

    /// Display colour used by renderers
    pub fn color(&self) -> &'static str {
        match self {
            Self::Susceptible => "blue",
            Self::Exposed => "orange",
            Self::Asymptomatic => "white",
            Self::Infected => "red",
            Self::Recovered => "green",
        }
    }
}

impl fmt::Display for Compartment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Mutable per-node state carried between timesteps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeState {
    pub compartment: Compartment,
    /// Timesteps spent in the current latency or infectious phase
    pub timer: usize,
}

impl NodeState {
    pub fn susceptible() -> Self {
        Self::entering(Compartment::Susceptible)
    }

    /// State of a node that has just entered `compartment`
    pub fn entering(compartment: Compartment) -> Self {
        Self { compartment, timer: 0 }
    }
}

/// Engine parameters for a single run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    /// Number of snapshots in the history, including t=0
    pub timesteps: usize,
    /// Per-contact transmission probability per timestep
    pub p_transmission: f64,
    /// Probability that an exposed node becomes asymptomatic rather than infected
    pub p_asymptomatic: f64,
    /// Timesteps spent exposed before becoming infectious
    pub incubation_period: usize,
    /// Timesteps spent infectious before recovering
    pub recovery_time: usize,
}

impl SimParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timesteps < 1 {
            return Err(ConfigError::InvalidTimesteps(self.timesteps));
        }
        validate_period("incubation_period", self.incubation_period)?;
        validate_period("recovery_time", self.recovery_time)?;
        validate_probability("p_asymptomatic", self.p_asymptomatic)?;
        validate_probability("p_transmission", self.p_transmission)?;
        Ok(())
    }
}

fn validate_period(name: &'static str, value: usize) -> Result<(), ConfigError> {
    if value < 1 {
        return Err(ConfigError::InvalidPeriod { name, value });
    }
    Ok(())
}

fn validate_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails the range check as well
    if !(0.0..=1.0).contains(&value) {
        return Err(ConfigError::ProbabilityOutOfRange { name, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        use Compartment::*;

        assert!(Susceptible.can_advance_to(Susceptible));
        assert!(Susceptible.can_advance_to(Exposed));
        assert!(!Susceptible.can_advance_to(Infected));
        assert!(Exposed.can_advance_to(Asymptomatic));
        assert!(Exposed.can_advance_to(Infected));
        assert!(!Exposed.can_advance_to(Recovered));
        assert!(!Asymptomatic.can_advance_to(Infected));
        assert!(Infected.can_advance_to(Recovered));
        assert!(!Recovered.can_advance_to(Susceptible));
        assert!(Recovered.successors().is_empty());
    }

    #[test]
    fn test_symbols_and_indices() {
        let symbols: String = Compartment::ALL.iter().map(Compartment::symbol).collect();
        assert_eq!(symbols, "SEAIR");
        for (i, compartment) in Compartment::ALL.iter().enumerate() {
            assert_eq!(compartment.index(), i);
        }
        assert_eq!(serde_json::to_string(&Compartment::Asymptomatic).unwrap(), "\"A\"");
    }

    #[test]
    fn test_infectious_compartments() {
        let infectious: Vec<_> = Compartment::ALL.iter().filter(|c| c.is_infectious()).collect();
        assert_eq!(infectious, vec![&Compartment::Asymptomatic, &Compartment::Infected]);
    }

    #[test]
    fn test_params_validation() {
        let params = SimParams {
            timesteps: 10,
            p_transmission: 0.5,
            p_asymptomatic: 0.5,
            incubation_period: 1,
            recovery_time: 1,
        };
        assert!(params.validate().is_ok());
        assert!(SimParams { incubation_period: 0, ..params }.validate().is_err());
        assert!(SimParams { p_asymptomatic: 1.01, ..params }.validate().is_err());
        assert!(SimParams { timesteps: 0, ..params }.validate().is_err());
    }
}
