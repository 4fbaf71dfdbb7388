//! Network-structure and epidemic-outcome metrics.
//!
//! This module derives the tables handed back to callers: the per-timestep
//! compartment counts, the structural summary of the contact graph, the
//! outcome summary of a run, and summaries across replicates.

pub mod counts;
pub mod network;
pub mod outcome;
pub mod summary;

use serde::Serialize;

pub use counts::{compartment_counts, CompartmentCounts};
pub use network::NetworkMetrics;
pub use outcome::OutcomeMetrics;
pub use summary::{BatchSummary, MetricStats};

/// One (measure, value) row of a metrics table; `None` marks an undefined value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRow {
    pub measure: &'static str,
    pub value: Option<f64>,
}

impl MetricRow {
    pub fn new(measure: &'static str, value: Option<f64>) -> Self {
        Self { measure, value }
    }
}
