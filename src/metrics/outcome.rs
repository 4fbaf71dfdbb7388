//! Epidemic outcome metrics derived from the compartment-count table.

use serde::{Deserialize, Serialize};

use super::counts::CompartmentCounts;
use super::MetricRow;

/// Index cases seeded at t=0
pub const INITIAL_INFECTED: usize = 1;

/// Outcome of a single run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeMetrics {
    /// Largest Infected count at any timestep
    pub peak_infections: usize,
    /// Largest Recovered count as a percentage of the population
    pub final_attack_rate: f64,
    /// Last timestep with at least one Infected node
    pub epidemic_duration: Option<usize>,
    pub initial_infected_count: usize,
    /// Largest Recovered count divided by the number of index cases.
    ///
    /// This is a placeholder ratio, not an estimate of the basic
    /// reproduction number.
    #[serde(rename = "R0_estimate")]
    pub r0_estimate: f64,
}

impl OutcomeMetrics {
    /// Derive outcome metrics from the count table of a population of `node_count`
    pub fn compute(counts: &[CompartmentCounts], node_count: usize) -> Self {
        let peak_infections = counts.iter().map(|row| row.infected).max().unwrap_or(0);
        let max_recovered = counts.iter().map(|row| row.recovered).max().unwrap_or(0);

        let final_attack_rate = if node_count > 0 {
            max_recovered as f64 / node_count as f64 * 100.0
        } else {
            0.0
        };

        let epidemic_duration = counts
            .iter()
            .filter(|row| row.infected > 0)
            .map(|row| row.timestep)
            .max();

        Self {
            peak_infections,
            final_attack_rate,
            epidemic_duration,
            initial_infected_count: INITIAL_INFECTED,
            r0_estimate: max_recovered as f64 / INITIAL_INFECTED as f64,
        }
    }

    /// Two-column (measure, value) table
    pub fn rows(&self) -> Vec<MetricRow> {
        vec![
            MetricRow::new("peak_infections", Some(self.peak_infections as f64)),
            MetricRow::new("final_attack_rate", Some(self.final_attack_rate)),
            MetricRow::new("epidemic_duration", self.epidemic_duration.map(|t| t as f64)),
            MetricRow::new("initial_infected_count", Some(self.initial_infected_count as f64)),
            MetricRow::new("R0_estimate", Some(self.r0_estimate)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(timestep: usize, s: usize, e: usize, i: usize, r: usize) -> CompartmentCounts {
        CompartmentCounts {
            timestep,
            susceptible: s,
            exposed: e,
            asymptomatic: 0,
            infected: i,
            recovered: r,
        }
    }

    #[test]
    fn test_outcome_metrics() {
        let counts = vec![
            row(0, 9, 1, 0, 0),
            row(1, 9, 0, 1, 0),
            row(2, 0, 9, 0, 1),
            row(3, 0, 0, 9, 1),
            row(4, 0, 0, 0, 10),
            row(5, 0, 0, 0, 10),
        ];
        let metrics = OutcomeMetrics::compute(&counts, 10);
        assert_eq!(metrics.peak_infections, 9);
        assert_eq!(metrics.final_attack_rate, 100.0);
        assert_eq!(metrics.epidemic_duration, Some(3));
        assert_eq!(metrics.initial_infected_count, 1);
        assert_eq!(metrics.r0_estimate, 10.0);
    }

    #[test]
    fn test_no_infected_has_no_duration() {
        let counts = vec![row(0, 19, 1, 0, 0), row(1, 19, 1, 0, 0)];
        let metrics = OutcomeMetrics::compute(&counts, 20);
        assert_eq!(metrics.peak_infections, 0);
        assert_eq!(metrics.epidemic_duration, None);
        assert_eq!(metrics.final_attack_rate, 0.0);

        let rows = metrics.rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2].measure, "epidemic_duration");
        assert_eq!(rows[2].value, None);
    }

    #[test]
    fn test_empty_table() {
        let metrics = OutcomeMetrics::compute(&[], 10);
        assert_eq!(metrics.peak_infections, 0);
        assert_eq!(metrics.epidemic_duration, None);
        assert_eq!(metrics.r0_estimate, 0.0);
    }
}
