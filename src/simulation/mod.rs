//! SEAIR state-transition engine.
//!
//! This module contains the compartment model, the per-run parameters and
//! the discrete-time engine that produces a full per-node state history.

pub mod types;
pub mod history;
pub mod engine;

pub use types::{Compartment, NodeState, SimParams};
pub use history::StateHistory;
pub use engine::{exposure_probability, run};
