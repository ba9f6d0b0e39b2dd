mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::classification::ClassifyArgs;
use commands::reference::{StatesArgs, TimelineArgs};
use commands::simulation::{BaselineArgs, SimulateArgs};

/// Brazilian tax-reform (CBS/IBS) transition projections
#[derive(Parser)]
#[command(
    name = "reforma",
    version,
    about = "Brazilian tax-reform (CBS/IBS) transition projections",
    long_about = "Projects a taxpayer's monthly consumption-tax liability across the \
                  2025-2033 transition from PIS/COFINS/ICMS/ISS to CBS/IBS, with \
                  decimal precision. Supports sector rate reductions, input-tax \
                  credits and the 2026 testing year."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Path to a JSON or YAML file overriding the reference parameters
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log debug events to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project the liability across every phase of the transition
    Simulate(SimulateArgs),
    /// Compute the current-law (pre-reform) monthly liability
    Baseline(BaselineArgs),
    /// Classify an activity into its benefit sector and activity type
    Classify(ClassifyArgs),
    /// Print the transition schedule
    Timeline(TimelineArgs),
    /// Print the reference ICMS rate of each state
    States(StatesArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "reforma_core={default_level},reforma={default_level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match input::config::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Simulate(args) => commands::simulation::run_simulate(args, &config),
        Commands::Baseline(args) => commands::simulation::run_baseline(args, &config),
        Commands::Classify(args) => commands::classification::run_classify(args, &config),
        Commands::Timeline(args) => commands::reference::run_timeline(args, &config),
        Commands::States(args) => commands::reference::run_states(args),
        Commands::Version => {
            println!("reforma {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
