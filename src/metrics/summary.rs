//! Summaries across independent replicates.

use serde::{Deserialize, Serialize};

use super::outcome::OutcomeMetrics;

/// Statistical summary of one metric across runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricStats {
    /// Runs where the metric was defined
    pub samples: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

/// Outcome summary over a batch of replicates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: usize,
    pub peak_infections: MetricStats,
    pub final_attack_rate: MetricStats,
    /// Computed over the runs where an epidemic duration was defined
    pub epidemic_duration: MetricStats,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[OutcomeMetrics]) -> Self {
        let peaks: Vec<f64> = outcomes.iter().map(|o| o.peak_infections as f64).collect();
        let attack_rates: Vec<f64> = outcomes.iter().map(|o| o.final_attack_rate).collect();
        let durations: Vec<f64> = outcomes
            .iter()
            .filter_map(|o| o.epidemic_duration)
            .map(|d| d as f64)
            .collect();

        Self {
            runs: outcomes.len(),
            peak_infections: calculate_stats(&peaks),
            final_attack_rate: calculate_stats(&attack_rates),
            epidemic_duration: calculate_stats(&durations),
        }
    }
}

/// Calculate statistical summary
pub fn calculate_stats(values: &[f64]) -> MetricStats {
    if values.is_empty() {
        return MetricStats {
            samples: 0,
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            median: 0.0,
            std_dev: 0.0,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

    let median = if sorted.len() % 2 == 0 {
        (sorted[sorted.len() / 2 - 1] + sorted[sorted.len() / 2]) / 2.0
    } else {
        sorted[sorted.len() / 2]
    };

    let variance = sorted
        .iter()
        .map(|&v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / sorted.len() as f64;

    MetricStats {
        samples: sorted.len(),
        min,
        max,
        mean,
        median,
        std_dev: variance.sqrt(),
    }
}
