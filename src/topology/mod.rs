//! Network topology module.
//!
//! This module contains the topology families supported by the simulator
//! and the generators that build a contact graph for each of them.

pub mod types;
pub mod generators;

// Re-export key types and functions for easier access
pub use types::Topology;
pub use generators::generate;
