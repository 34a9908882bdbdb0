//! SDRAM controller simulator CLI.
//!
//! This binary runs the controller model against the behavioral device with
//! a deterministic traffic workload and prints the activity report. It
//! performs:
//! 1. **Config:** Built-in defaults or a JSON config file.
//! 2. **Run:** Bring-up, then the configured number of traffic ticks.
//! 3. **Report:** Controller statistics plus traffic verification counts.

use clap::{Parser, Subcommand};
use std::process;

use sdram_core::Config;
use sdram_core::Simulator;
use sdram_core::sim::traffic::TrafficGenerator;

#[derive(Parser, Debug)]
#[command(
    name = "sdramsim",
    author,
    version,
    about = "Cycle-accurate SDRAM controller simulator",
    long_about = "Run the six-port SDRAM controller model with a deterministic \
traffic workload.\n\nExamples:\n  sdramsim run\n  sdramsim run --ticks 500000\n  \
sdramsim run --config workload.json --trace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a simulation and print the activity report.
    Run {
        /// JSON config file (defaults are used if omitted).
        #[arg(short, long)]
        config: Option<String>,

        /// Override the run length in ticks.
        #[arg(short, long)]
        ticks: Option<u64>,

        /// Trace every bus command (very verbose).
        #[arg(long)]
        trace: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Run {
            config,
            ticks,
            trace,
        } => cmd_run(config, ticks, trace),
    }
}

/// Loads config, runs bring-up plus the configured tick budget, and prints
/// the statistics and traffic verification summary.
fn cmd_run(config_path: Option<String>, ticks: Option<u64>, trace: bool) {
    let mut config = match config_path {
        Some(path) => match Config::from_file(&path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                process::exit(1);
            }
        },
        None => Config::default(),
    };
    if let Some(t) = ticks {
        config.general.ticks = t;
    }
    init_tracing(trace || config.general.trace_commands);

    let mut sim = Simulator::new();
    sim.run_bringup();
    tracing::info!(
        bringup_ticks = sim.ticks,
        run_ticks = config.general.ticks,
        "bring-up complete"
    );

    let mut generator = TrafficGenerator::new(&config.traffic);
    for _ in 0..config.general.ticks {
        generator.tick(sim.ticks, &mut sim.ctrl.ports);
        sim.tick();
    }

    println!();
    print!("{}", sim.ctrl.stats.report(sim.ticks));
    println!(
        "traffic:          issued={} completed={} verified={} mismatches={}",
        generator.issued, generator.completed, generator.verified, generator.mismatches
    );

    if generator.mismatches > 0 {
        eprintln!("error: read-back verification failed");
        process::exit(1);
    }
}

/// Installs the tracing subscriber; `RUST_LOG` overrides the default level.
fn init_tracing(verbose: bool) {
    let default = if verbose { "trace" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
