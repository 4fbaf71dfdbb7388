use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use seairsim::config::SimulationConfig;
use seairsim::config_loader::{self, CliOverrides};
use seairsim::orchestrator::{self, SimulationOutput};
use seairsim::report;

/// SEAIR epidemic simulation over generated contact networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the simulation configuration YAML file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory for reports
    #[arg(short, long, default_value = "seairsim_output")]
    output: PathBuf,

    /// Topology: small-world, scale-free, random, complete, cycle or lollipop
    #[arg(long)]
    network_type: Option<String>,

    /// Population size
    #[arg(short = 'n', long)]
    nodes: Option<usize>,

    /// Number of timesteps, including t=0
    #[arg(short, long)]
    timesteps: Option<usize>,

    #[arg(long)]
    incubation_period: Option<usize>,

    #[arg(long)]
    recovery_time: Option<usize>,

    #[arg(long)]
    p_asymptomatic: Option<f64>,

    #[arg(long)]
    p_transmission: Option<f64>,

    /// RNG seed for reproducible runs
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of independent replicates
    #[arg(short, long)]
    runs: Option<usize>,

    /// Timestep rendered in the DOT snapshot (defaults to the last one)
    #[arg(long)]
    dot_timestep: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            network_type: self.network_type.clone(),
            nodes: self.nodes,
            timesteps: self.timesteps,
            incubation_period: self.incubation_period,
            recovery_time: self.recovery_time,
            p_asymptomatic: self.p_asymptomatic,
            p_transmission: self.p_transmission,
            seed: self.seed,
            runs: self.runs,
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level.as_str())).init();

    info!("Starting SEAIRsim v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => config_loader::load_config(path)?,
        None => {
            info!("No configuration file given, using defaults");
            SimulationConfig::default()
        }
    };
    config_loader::apply_overrides(&mut config, &args.overrides())?;

    fs::create_dir_all(&args.output)
        .wrap_err_with(|| format!("Failed to create output directory '{}'", args.output.display()))?;

    if config.run_count() > 1 {
        let batch = orchestrator::run_batch(&config)?;
        for (i, run) in batch.runs.iter().enumerate() {
            report::generate_json_report(run, &args.output.join(format!("run_{:03}.json", i)))?;
        }
        report::generate_batch_report(&batch, &args.output.join("batch_summary.json"))?;
        println!("{}", report::format_batch_summary(&batch.summary));
    } else {
        let output = orchestrator::run_simulation(&config)?;
        write_single_run(&output, &args.output, args.dot_timestep)?;
        println!("{}", report::format_text_report(&output));
    }

    info!("Reports written to {:?}", args.output);
    Ok(())
}

fn write_single_run(output: &SimulationOutput, dir: &Path, dot_timestep: Option<usize>) -> Result<()> {
    report::generate_json_report(output, &dir.join("report.json"))?;
    report::generate_text_report(output, &dir.join("report.txt"))?;
    report::write_counts_csv(&output.counts, &dir.join("compartment_counts.csv"))?;

    let last = output.history.len().saturating_sub(1);
    let timestep = match dot_timestep {
        Some(t) if t > last => {
            warn!("DOT timestep {} is past the last timestep {}; using {}", t, last, last);
            last
        }
        Some(t) => t,
        None => last,
    };
    if let Some(snapshot) = output.history.snapshot(timestep) {
        let dot_path = dir.join("network.dot");
        fs::write(&dot_path, report::generate_dot(&output.graph, snapshot, timestep))
            .wrap_err_with(|| format!("Failed to write DOT file '{}'", dot_path.display()))?;
    }

    Ok(())
}
