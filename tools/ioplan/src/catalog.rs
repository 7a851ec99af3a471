//! Catalog inspection commands

use crate::config::{AppConfig, OutputFormat};
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use ioplan_model::{builtin_catalog, load_catalog, Catalog, HardwareUnit, PointCategory, UnitKind};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Subcommand)]
pub enum CatalogCommands {
    /// List controllers and expansion modules
    #[command(about = "Show every unit in the catalog with its point capacities")]
    List {
        /// Catalog file (YAML/TOML/JSON/CSV); defaults to the built-in catalog
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Validate a catalog file
    #[command(about = "Parse and validate a catalog without computing anything")]
    Validate {
        /// Catalog file (YAML/TOML/JSON/CSV); defaults to the built-in catalog
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
}

pub fn handle_command(cmd: CatalogCommands, config: &AppConfig) -> Result<()> {
    match cmd {
        CatalogCommands::List { catalog, format } => {
            let catalog = resolve_catalog(catalog.as_deref(), config)?;
            match format.unwrap_or(config.format) {
                OutputFormat::Table => print!("{}", render_catalog(&catalog)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
            }
        },
        CatalogCommands::Validate { catalog } => {
            let catalog = resolve_catalog(catalog.as_deref(), config)?;
            println!(
                "{} Catalog is valid: {} controllers, {} modules",
                "SUCCESS".green().bold(),
                catalog.controllers.len(),
                catalog.modules.len()
            );
        },
    }
    Ok(())
}

/// Load the catalog named on the command line, then in config, else the built-in one
pub fn resolve_catalog(flag: Option<&Path>, config: &AppConfig) -> Result<Catalog> {
    match flag.or(config.catalog.as_deref()) {
        Some(path) => {
            debug!("Loading catalog from {}", path.display());
            load_catalog(path)
                .with_context(|| format!("Failed to load catalog {}", path.display()))
        },
        None => {
            debug!("Using built-in catalog");
            builtin_catalog().context("Built-in catalog is invalid")
        },
    }
}

pub fn render_catalog(catalog: &Catalog) -> String {
    let mut out = String::new();
    let _ = write!(out, "{:<12} {:<10}", "Kind", "Name");
    for category in PointCategory::all() {
        let _ = write!(out, " {:>6}", category.as_str());
    }
    let _ = writeln!(out, "  Comments");

    let units = catalog
        .controllers
        .iter()
        .map(|u| (UnitKind::Controller, u))
        .chain(catalog.modules.iter().map(|u| (UnitKind::Module, u)));
    for (kind, unit) in units {
        render_unit(&mut out, kind, unit);
    }
    out
}

fn render_unit(out: &mut String, kind: UnitKind, unit: &HardwareUnit) {
    let _ = write!(out, "{:<12} {:<10}", kind.as_str(), unit.name);
    for (_, count) in unit.capacity.iter() {
        let _ = write!(out, " {:>6}", count);
    }
    let _ = writeln!(out, "  {}", unit.comments);
}
