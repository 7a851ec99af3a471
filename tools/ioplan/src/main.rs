//! ioplan - Controller & Expansion-Module Point Planner
//!
//! Finds the smallest controller + expansion module combination able to host
//! a list of required I/O points, using a fixed-priority greedy allocation.

mod catalog;
mod config;
mod plan;
mod render;

use crate::catalog::CatalogCommands;
use crate::config::AppConfig;
use crate::plan::PlanArgs;
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "ioplan")]
#[command(about = "Controller & expansion module point planner")]
#[command(long_about = "Controller & expansion module point planner

Commands:
  plan        Find controller + module combinations for a point list
  catalog     List or validate the hardware catalog

Examples:
  ioplan plan --ai 12 --bi 8 --bo-wet 6             # Search the whole catalog
  ioplan plan --ai 4 --headroom 25 --controller UC600 --no-modules
  ioplan plan --request job.yaml --format json
  ioplan catalog list --catalog hardware.csv

Use 'ioplan <command> --help' for more information on a specific command.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Configuration file (default: ./ioplan.yaml or ./ioplan.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find controller + module combinations for a point list
    Plan(PlanArgs),

    /// Inspect the hardware catalog
    Catalog {
        #[command(subcommand)]
        command: CatalogCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "ERROR".red(), e);
            ExitCode::FAILURE
        },
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = AppConfig::load(cli.config.as_deref())?;
    debug!("Configuration: {:?}", config);

    // Configure colored output
    if cli.no_color || !config.color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Plan(args) => plan::handle_command(args, &config),
        Commands::Catalog { command } => {
            catalog::handle_command(command, &config)?;
            Ok(ExitCode::SUCCESS)
        },
    }
}
