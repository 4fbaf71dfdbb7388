//! # SEAIRsim - Epidemic spread over generated contact networks
//!
//! This library generates a contact network of a chosen topology, runs a
//! discrete-time SEAIR (Susceptible, Exposed, Asymptomatic/Infected,
//! Recovered) automaton over it and aggregates network-structure and
//! outcome metrics.
//!
//! ## Overview
//!
//! SEAIRsim is a parameterized illustrative simulator, not a calibrated
//! epidemiological model. Front ends hand it a parameter record and get
//! back plain tables and arrays to display.
//!
//! ## Key Features
//!
//! - **Network Topologies**: small-world, scale-free, random, complete,
//!   cycle and lollipop graphs
//! - **Synchronous Updates**: every transition at timestep `t` is decided
//!   from the frozen snapshot of `t - 1`
//! - **Reproducible**: a configured seed drives every random draw
//! - **Replicates**: independent runs in parallel, each with its own RNG
//!
//! ## Architecture
//!
//! - `config`: Parameter record, validation and error types
//! - `config_loader`: YAML loading and CLI overrides
//! - `graph`: Undirected contact graph
//! - `topology`: Topology families and graph generators
//! - `simulation`: Compartments, node state and the SEAIR engine
//! - `metrics`: Compartment counts, network metrics and outcome metrics
//! - `orchestrator`: Single runs and batches of replicates
//! - `report`: JSON, text, CSV and DOT output
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use seairsim::{config::SimulationConfig, orchestrator};
//!
//! let config = SimulationConfig {
//!     network_type: "scale-free".to_string(),
//!     seed: Some(42),
//!     ..SimulationConfig::default()
//! };
//!
//! let output = orchestrator::run_simulation(&config)?;
//! println!("attack rate: {:.1}%", output.outcome_metrics.final_attack_rate);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! network_type: "small-world"  # scale-free/random/complete/cycle/lollipop
//! N: 40
//! timesteps: 40
//! incubation_period: 3
//! recovery_time: 7
//! p_asymptomatic: 0.3
//! p_transmission: 0.3
//! seed: 42   # optional
//! runs: 10   # optional
//! ```
//!
//! ## Error Handling
//!
//! The core returns [`config::ConfigError`] for invalid parameters before
//! any computation starts. Undefined metrics (such as the average shortest
//! path length of a disconnected graph) are `None`, never an error. File
//! output uses `color_eyre` for error reporting with context.

pub mod config;
pub mod config_loader;
pub mod graph;
pub mod metrics;
pub mod orchestrator;
pub mod report;
pub mod simulation;
pub mod topology;
