//! Report generation for simulation results.
//!
//! Generates a JSON report carrying every output table plus the graph and
//! per-node state history for external renderers, a human-readable text
//! report, a CSV compartment-count table and GraphViz DOT snapshots.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::graph::Graph;
use crate::metrics::{BatchSummary, CompartmentCounts, MetricRow, MetricStats};
use crate::orchestrator::{BatchOutput, SimulationOutput};
use crate::simulation::{Compartment, SimParams};

/// Run metadata
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub network_type: String,
    pub nodes: usize,
    pub params: SimParams,
    pub seed: Option<u64>,
}

/// Full serializable output of one run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport<'a> {
    pub metadata: ReportMetadata,
    pub compartment_counts: &'a [CompartmentCounts],
    pub network_metrics: Vec<MetricRow>,
    pub outcome_metrics: Vec<MetricRow>,
    pub edges: Vec<(usize, usize)>,
    /// `states[t][node]` is the compartment of `node` at timestep `t`
    pub states: &'a [Vec<Compartment>],
}

impl<'a> RunReport<'a> {
    pub fn new(output: &'a SimulationOutput) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                network_type: output.topology.to_string(),
                nodes: output.graph.node_count(),
                params: output.params,
                seed: output.seed,
            },
            compartment_counts: &output.counts,
            network_metrics: output.network_metrics.rows(),
            outcome_metrics: output.outcome_metrics.rows(),
            edges: output.graph.edges(),
            states: output.history.snapshots(),
        }
    }
}

/// Serializable summary of a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: &'a BatchSummary,
    pub seeds: Vec<Option<u64>>,
}

/// Generate JSON report
pub fn generate_json_report(output: &SimulationOutput, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&RunReport::new(output))
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("JSON report written to {}", output_path.display());
    Ok(())
}

/// Generate JSON summary of a batch of replicates
pub fn generate_batch_report(batch: &BatchOutput, output_path: &Path) -> Result<()> {
    let report = BatchReport {
        generated_at: Utc::now(),
        summary: &batch.summary,
        seeds: batch.runs.iter().map(|run| run.seed).collect(),
    };
    let json = serde_json::to_string_pretty(&report)
        .context("Failed to serialize batch summary to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write batch summary to {}", output_path.display()))?;

    log::info!("Batch summary written to {}", output_path.display());
    Ok(())
}

/// Generate human-readable text report
pub fn generate_text_report(output: &SimulationOutput, output_path: &Path) -> Result<()> {
    fs::write(output_path, format_text_report(output))
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Render the text report of one run
pub fn format_text_report(output: &SimulationOutput) -> String {
    let mut lines: Vec<String> = Vec::new();

    // Header
    lines.push("=".repeat(60));
    lines.push("               SEAIR NETWORK EPIDEMIC SIMULATION".to_string());
    lines.push("=".repeat(60));
    lines.push(String::new());

    // Parameters
    let params = &output.params;
    lines.push(format!("Network Type: {}", output.topology));
    lines.push(format!("Population: {}", output.graph.node_count()));
    lines.push(format!("Timesteps: {}", params.timesteps));
    lines.push(format!("Incubation Period: {}", params.incubation_period));
    lines.push(format!("Recovery Time: {}", params.recovery_time));
    lines.push(format!("p_asymptomatic: {}", params.p_asymptomatic));
    lines.push(format!("p_transmission: {}", params.p_transmission));
    match output.seed {
        Some(seed) => lines.push(format!("Seed: {}", seed)),
        None => lines.push("Seed: (entropy)".to_string()),
    }
    lines.push(String::new());

    push_metric_table(&mut lines, "NETWORK METRICS", &output.network_metrics.rows());
    push_metric_table(&mut lines, "OUTCOME METRICS", &output.outcome_metrics.rows());

    lines.push("-".repeat(60));
    lines.push("COMPARTMENT COUNTS".to_string());
    lines.push("-".repeat(60));
    lines.push(format!("{:>8} {:>6} {:>6} {:>6} {:>6} {:>6}", "timestep", "S", "E", "A", "I", "R"));
    for row in &output.counts {
        lines.push(format!(
            "{:>8} {:>6} {:>6} {:>6} {:>6} {:>6}",
            row.timestep, row.susceptible, row.exposed, row.asymptomatic, row.infected, row.recovered
        ));
    }
    lines.push(String::new());

    lines.join("\n")
}

/// Render the text summary of a batch
pub fn format_batch_summary(summary: &BatchSummary) -> String {
    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("Replicates: {}", summary.runs));
    lines.push(format!("{:<20} {:>8} {:>8} {:>8} {:>8} {:>8}", "Measure", "n", "min", "mean", "max", "std"));
    let stats: [(&str, &MetricStats); 3] = [
        ("peak_infections", &summary.peak_infections),
        ("final_attack_rate", &summary.final_attack_rate),
        ("epidemic_duration", &summary.epidemic_duration),
    ];
    for (name, stat) in stats {
        lines.push(format!(
            "{:<20} {:>8} {:>8.2} {:>8.2} {:>8.2} {:>8.2}",
            name, stat.samples, stat.min, stat.mean, stat.max, stat.std_dev
        ));
    }
    lines.join("\n")
}

fn push_metric_table(lines: &mut Vec<String>, title: &str, rows: &[MetricRow]) {
    lines.push("-".repeat(60));
    lines.push(title.to_string());
    lines.push("-".repeat(60));
    for row in rows {
        let value = match row.value {
            Some(value) if value.fract() == 0.0 => format!("{}", value),
            Some(value) => format!("{:.4}", value),
            None => "n/a".to_string(),
        };
        lines.push(format!("  {:<24} {}", row.measure, value));
    }
    lines.push(String::new());
}

/// Write the compartment-count table as CSV
pub fn write_counts_csv(counts: &[CompartmentCounts], output_path: &Path) -> Result<()> {
    let mut csv = String::from("timestep,S,E,A,I,R\n");
    for row in counts {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            row.timestep, row.susceptible, row.exposed, row.asymptomatic, row.infected, row.recovered
        ));
    }

    fs::write(output_path, csv)
        .with_context(|| format!("Failed to write counts to {}", output_path.display()))?;

    log::info!("Compartment counts written to {}", output_path.display());
    Ok(())
}

/// Generate GraphViz DOT format for visualization, nodes coloured by compartment
pub fn generate_dot(graph: &Graph, snapshot: &[Compartment], timestep: usize) -> String {
    let mut dot = String::new();
    dot.push_str("graph ContactNetwork {\n");
    dot.push_str("    layout=neato;\n");
    dot.push_str("    node [shape=circle, style=filled, fontsize=8];\n");
    dot.push_str(&format!("    label=\"t={}\";\n", timestep));
    dot.push_str("    labelloc=t;\n\n");

    for (node, compartment) in snapshot.iter().enumerate() {
        dot.push_str(&format!(
            "    {} [label=\"{}\\n{}\", fillcolor={}];\n",
            node,
            node,
            compartment,
            compartment.color()
        ));
    }

    dot.push('\n');

    for (u, v) in graph.edges() {
        dot.push_str(&format!("    {} -- {} [color=gray];\n", u, v));
    }

    dot.push_str("}\n");
    dot
}
