//! Per-timestep, per-node compartment history.

use serde::{Deserialize, Serialize};

use crate::simulation::types::Compartment;

/// Ordered snapshots of every node's compartment, one per timestep
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateHistory {
    snapshots: Vec<Vec<Compartment>>,
}

impl StateHistory {
    pub(crate) fn with_capacity(timesteps: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(timesteps),
        }
    }

    pub(crate) fn push(&mut self, snapshot: Vec<Compartment>) {
        self.snapshots.push(snapshot);
    }

    /// Number of recorded timesteps
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number of nodes per snapshot
    pub fn node_count(&self) -> usize {
        self.snapshots.first().map_or(0, Vec::len)
    }

    /// Compartment of every node at `timestep`
    pub fn snapshot(&self, timestep: usize) -> Option<&[Compartment]> {
        self.snapshots.get(timestep).map(Vec::as_slice)
    }

    pub fn snapshots(&self) -> &[Vec<Compartment>] {
        &self.snapshots
    }

    /// Compartment of `node` at every timestep
    pub fn trajectory(&self, node: usize) -> Vec<Compartment> {
        self.snapshots.iter().map(|snapshot| snapshot[node]).collect()
    }

    /// Snapshot at the last recorded timestep
    pub fn last(&self) -> Option<&[Compartment]> {
        self.snapshots.last().map(Vec::as_slice)
    }
}
