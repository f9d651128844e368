//! Run an epsilon-greedy bandit simulation and print the curves.
//!
//! Usage:
//!   banditsim [OPTIONS]
//!
//! Example:
//!   banditsim --bandits 10 --epsilon 0.1 --plays 2000 --seed 42
//!   banditsim --config sim.json --format json --output chart.json
//!
//! Settings come from `--config` (JSON `SimulationConfig`) when given, then any
//! explicit flag overrides the file. Log verbosity follows `RUST_LOG`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use banditsim::{ArmPrior, LineChart, Simulation, SimulationConfig};

#[derive(Parser)]
#[command(name = "banditsim")]
#[command(version, about = "Simulate epsilon-greedy players on random multi-armed bandits")]
struct Cli {
    /// JSON file with a simulation config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of independent players (one bandit each)
    #[arg(short, long)]
    bandits: Option<usize>,

    /// Exploration probability in [0, 1]
    #[arg(short, long)]
    epsilon: Option<f64>,

    /// Plays per player
    #[arg(short, long)]
    plays: Option<usize>,

    /// Arms per bandit
    #[arg(short, long)]
    arms: Option<usize>,

    /// How arm parameters are drawn
    #[arg(long, value_enum)]
    prior: Option<PriorArg>,

    /// Base seed (random when omitted; the chosen seed is logged)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: Format,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PriorArg {
    /// Means ~ N(0, 1), unit spread
    Normal,
    /// Means ~ U[0, 10), spreads ~ U[0, 5)
    Uniform,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Summary,
    Json,
}

impl Cli {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        let mut cfg = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => SimulationConfig::default(),
        };
        if let Some(n) = self.bandits {
            cfg.num_bandits = n;
        }
        if let Some(e) = self.epsilon {
            cfg.epsilon = e;
        }
        if let Some(n) = self.plays {
            cfg.num_plays = n;
        }
        if let Some(n) = self.arms {
            cfg.num_arms = n;
        }
        if let Some(p) = self.prior {
            cfg.prior = match p {
                PriorArg::Normal => ArmPrior::StandardNormal,
                PriorArg::Uniform => ArmPrior::uniform(),
            };
        }
        if self.seed.is_some() {
            cfg.seed = self.seed;
        }
        Ok(cfg)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = cli.simulation_config()?;
    let sim = Simulation::new(cfg).context("refusing to run")?;
    let report = sim.run()?;
    info!(
        seed = report.seed,
        mean_final_average = report.mean_final_average(),
        "simulation finished"
    );

    let chart = LineChart::from_report(&report);
    let rendered = match cli.format {
        Format::Summary => chart.render_summary(),
        Format::Json => chart.to_json().context("serializing chart")?,
    };

    match &cli.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "wrote output");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}
