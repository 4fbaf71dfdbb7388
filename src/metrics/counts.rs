//! Per-timestep compartment tallies.

use serde::{Deserialize, Serialize};

use crate::simulation::{Compartment, StateHistory};

/// Number of nodes in each compartment at one timestep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompartmentCounts {
    pub timestep: usize,
    #[serde(rename = "S")]
    pub susceptible: usize,
    #[serde(rename = "E")]
    pub exposed: usize,
    #[serde(rename = "A")]
    pub asymptomatic: usize,
    #[serde(rename = "I")]
    pub infected: usize,
    #[serde(rename = "R")]
    pub recovered: usize,
}

impl CompartmentCounts {
    /// Tally one snapshot
    pub fn tally(timestep: usize, snapshot: &[Compartment]) -> Self {
        let mut counts = Self { timestep, ..Self::default() };
        for compartment in snapshot {
            *counts.get_mut(*compartment) += 1;
        }
        counts
    }

    pub fn get(&self, compartment: Compartment) -> usize {
        match compartment {
            Compartment::Susceptible => self.susceptible,
            Compartment::Exposed => self.exposed,
            Compartment::Asymptomatic => self.asymptomatic,
            Compartment::Infected => self.infected,
            Compartment::Recovered => self.recovered,
        }
    }

    fn get_mut(&mut self, compartment: Compartment) -> &mut usize {
        match compartment {
            Compartment::Susceptible => &mut self.susceptible,
            Compartment::Exposed => &mut self.exposed,
            Compartment::Asymptomatic => &mut self.asymptomatic,
            Compartment::Infected => &mut self.infected,
            Compartment::Recovered => &mut self.recovered,
        }
    }

    /// Sum over all compartments; equals the population size
    pub fn total(&self) -> usize {
        self.susceptible + self.exposed + self.asymptomatic + self.infected + self.recovered
    }
}

/// Tally every snapshot of `history`, one row per timestep starting at t=0
pub fn compartment_counts(history: &StateHistory) -> Vec<CompartmentCounts> {
    let mut rows = Vec::with_capacity(history.len());
    for (timestep, snapshot) in history.snapshots().iter().enumerate() {
        rows.push(CompartmentCounts::tally(timestep, snapshot));
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use Compartment::*;

    #[test]
    fn test_tally() {
        let snapshot = [Susceptible, Exposed, Infected, Infected, Recovered, Asymptomatic, Susceptible];
        let counts = CompartmentCounts::tally(3, &snapshot);
        assert_eq!(counts.timestep, 3);
        assert_eq!(counts.susceptible, 2);
        assert_eq!(counts.exposed, 1);
        assert_eq!(counts.asymptomatic, 1);
        assert_eq!(counts.infected, 2);
        assert_eq!(counts.recovered, 1);
        assert_eq!(counts.total(), snapshot.len());
        assert_eq!(counts.get(Infected), 2);
    }

    #[test]
    fn test_serialized_columns() {
        let counts = CompartmentCounts::tally(0, &[Exposed, Susceptible]);
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["timestep"], 0);
        assert_eq!(json["S"], 1);
        assert_eq!(json["E"], 1);
        assert_eq!(json["R"], 0);
    }
}
