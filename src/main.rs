//! Lifegrid CLI - headless driver for running and converting simulations.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use lifegrid::RuleSet;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Lifegrid - a toroidal cellular automaton engine
#[derive(Parser, Debug)]
#[command(name = "lifegrid")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a simulation for a number of generations
    Run {
        /// JSON config file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Window width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Window height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Pixels per cell
        #[arg(long)]
        cell_size: Option<u32>,

        /// Rule set: conway, highlife or daynight
        #[arg(short, long)]
        rule: Option<RuleSet>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Start from a snapshot (.json or .png); a missing file seeds randomly
        #[arg(short, long)]
        load: Option<PathBuf>,

        /// Start from an empty grid with a named pattern in the center
        #[arg(short, long, conflicts_with = "load")]
        pattern: Option<String>,

        /// Generations to run (default: 100)
        #[arg(short, long, default_value = "100")]
        generations: u64,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save the final grid (.json or .png)
        #[arg(long)]
        save: Option<PathBuf>,

        /// Print the final grid as ASCII (text format only)
        #[arg(long)]
        show: bool,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },

    /// Convert a snapshot between JSON and PNG
    Convert {
        /// Input snapshot
        #[arg(required = true)]
        input: PathBuf,

        /// Output snapshot
        #[arg(required = true)]
        output: PathBuf,

        /// Pixels per cell for image input and output (default: 10)
        #[arg(long, default_value = "10")]
        cell_size: u32,
    },

    /// Print dimensions and population of a snapshot
    Inspect {
        /// Snapshot file
        #[arg(required = true)]
        file: PathBuf,

        /// Pixels per cell for image input (default: 10)
        #[arg(long, default_value = "10")]
        cell_size: u32,

        /// Print the grid as ASCII
        #[arg(long)]
        show: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            config,
            width,
            height,
            cell_size,
            rule,
            seed,
            load,
            pattern,
            generations,
            format,
            save,
            show,
            progress,
        } => {
            let overrides = cli::run::Overrides {
                width,
                height,
                cell_size,
                rule,
                seed,
            };
            let options = cli::run::RunOptions {
                generations,
                format,
                load,
                pattern,
                save,
                show,
                progress,
            };
            cli::run::execute(config, overrides, options)
        }

        Commands::Convert {
            input,
            output,
            cell_size,
        } => cli::convert::execute(&input, &output, cell_size),

        Commands::Inspect {
            file,
            cell_size,
            show,
        } => cli::inspect::execute(&file, cell_size, show),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
