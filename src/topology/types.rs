//! Topology type definitions.
//!
//! This file contains the closed set of graph families the simulator can
//! generate (small-world, scale-free, random, complete, cycle, lollipop).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Graph-generation family for the contact network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// Ring lattice of degree 4 with 20% of edges rewired
    SmallWorld,
    /// Preferential attachment growth, 2 edges per new node
    ScaleFree,
    /// Every possible edge present independently with probability 0.1
    Random,
    /// All possible edges present
    Complete,
    /// Single ring through every node
    Cycle,
    /// Clique of ~80% of the nodes with a path tail
    Lollipop,
}

impl Topology {
    /// Every supported topology, in menu order
    pub const ALL: [Topology; 6] = [
        Topology::SmallWorld,
        Topology::ScaleFree,
        Topology::Random,
        Topology::Complete,
        Topology::Cycle,
        Topology::Lollipop,
    ];

    /// Identifier used in configuration files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SmallWorld => "small-world",
            Self::ScaleFree => "scale-free",
            Self::Random => "random",
            Self::Complete => "complete",
            Self::Cycle => "cycle",
            Self::Lollipop => "lollipop",
        }
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Topology {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|topology| topology.as_str() == trimmed)
            .ok_or_else(|| ConfigError::UnknownTopology(s.to_string()))
    }
}
