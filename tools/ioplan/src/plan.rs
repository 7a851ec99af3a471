//! `ioplan plan` - build a request and print the ranked combinations

use crate::catalog::resolve_catalog;
use crate::config::{file_provider, AppConfig, OutputFormat};
use crate::render::{render_plan, Detail};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use ioplan_calc::{compute, PlanOutcome, PlanRequest};
use ioplan_model::{Catalog, Headroom, RequirementCategory, RequirementVector};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, info};

/// Exit status when no combination satisfies the requirement
pub const EXIT_NO_SOLUTION: u8 = 2;

#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Analog inputs
    #[arg(long)]
    pub ai: Option<u32>,

    /// Binary inputs
    #[arg(long)]
    pub bi: Option<u32>,

    /// Analog outputs
    #[arg(long)]
    pub ao: Option<u32>,

    /// Dry-contact binary outputs
    #[arg(long)]
    pub bo_dry: Option<u32>,

    /// Wet-contact binary outputs
    #[arg(long)]
    pub bo_wet: Option<u32>,

    /// Headroom in percent (0-100)
    #[arg(long, value_name = "PCT")]
    pub headroom: Option<f64>,

    /// Controller to consider (repeatable); all when omitted
    #[arg(long = "controller", value_name = "NAME")]
    pub controllers: Vec<String>,

    /// Expansion module to consider (repeatable); all when omitted
    #[arg(long = "module", value_name = "NAME")]
    pub modules: Vec<String>,

    /// Consider controllers on their own, without expansion modules
    #[arg(long, conflicts_with = "modules")]
    pub no_modules: bool,

    /// Request file (YAML/TOML/JSON); flags override its values
    #[arg(long, value_name = "FILE")]
    pub request: Option<PathBuf>,

    /// Catalog file (YAML/TOML/JSON/CSV)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Show the breakdown of this option instead of the recommended one
    #[arg(long, value_name = "LABEL", conflicts_with = "all")]
    pub option: Option<String>,

    /// Show the breakdown of every valid option
    #[arg(long)]
    pub all: bool,
}

impl PlanArgs {
    fn requirement_overrides(&self) -> [(RequirementCategory, Option<u32>); 5] {
        [
            (RequirementCategory::Ai, self.ai),
            (RequirementCategory::Bi, self.bi),
            (RequirementCategory::Ao, self.ao),
            (RequirementCategory::BoDry, self.bo_dry),
            (RequirementCategory::BoWet, self.bo_wet),
        ]
    }
}

pub fn handle_command(args: PlanArgs, config: &AppConfig) -> Result<ExitCode> {
    let outcome = execute(&args, config)?;
    if outcome.is_feasible() {
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!(
        "{} No valid combinations found with the selected controllers/modules and required points ({} evaluated)",
        "ERROR".red(),
        outcome.evaluated()
    );
    Ok(ExitCode::from(EXIT_NO_SOLUTION))
}

/// Compute and print the outcome in the requested format
pub fn execute(args: &PlanArgs, config: &AppConfig) -> Result<PlanOutcome> {
    let catalog = resolve_catalog(args.catalog.as_deref(), config)?;
    let request = build_request(args, config, &catalog)?;
    info!(
        "Planning {} points across {} controllers and {} modules",
        request.requirement.total(),
        request.controllers.len(),
        request.modules.len()
    );

    let outcome = compute(&request, &catalog).context("Calculation failed")?;

    match args.format.unwrap_or(config.format) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Table => {
            if let PlanOutcome::Feasible(plan) = &outcome {
                let detail = match args.option.as_deref() {
                    Some(label) => Detail::Option(
                        plan.find(label)
                            .ok_or_else(|| anyhow!("No valid option named '{}'", label))?,
                    ),
                    None if args.all => Detail::All,
                    None => Detail::Recommended,
                };
                print!("{}", render_plan(plan, detail));
            }
        },
    }

    Ok(outcome)
}

/// Request file as written by the user
///
/// Selections stay `None` when the file omits them, so an explicit `[]`
/// survives the "whole catalog" default.
#[derive(Debug, Default, Deserialize)]
pub struct RequestFile {
    #[serde(default)]
    pub requirement: RequirementVector,
    pub headroom: Option<Headroom>,
    pub controllers: Option<Vec<String>>,
    pub modules: Option<Vec<String>>,
}

/// Merge request file, config defaults and flags into one request
///
/// Flags win over the request file, which wins over the config. A selection
/// that neither names means everything in the catalog.
pub fn build_request(args: &PlanArgs, config: &AppConfig, catalog: &Catalog) -> Result<PlanRequest> {
    let file = match args.request.as_deref() {
        Some(path) => load_request(path)?,
        None => RequestFile::default(),
    };

    let mut requirement = file.requirement;
    for (category, count) in args.requirement_overrides() {
        if let Some(count) = count {
            requirement[category] = count;
        }
    }
    let headroom = match (args.headroom, file.headroom) {
        (Some(percent), _) => Headroom::from_percent(percent)?,
        (None, Some(headroom)) => headroom,
        (None, None) => config.headroom()?,
    };

    let controllers = if !args.controllers.is_empty() {
        args.controllers.clone()
    } else {
        file.controllers
            .unwrap_or_else(|| catalog.controller_names().into_iter().map(String::from).collect())
    };
    let modules = if args.no_modules {
        Vec::new()
    } else if !args.modules.is_empty() {
        args.modules.clone()
    } else {
        file.modules
            .unwrap_or_else(|| catalog.module_names().into_iter().map(String::from).collect())
    };

    let request = PlanRequest::new(requirement)
        .with_headroom(headroom)
        .with_controllers(controllers)
        .with_modules(modules);
    debug!("Request: {:?}", request);
    Ok(request)
}

pub fn load_request(path: &Path) -> Result<RequestFile> {
    if !path.exists() {
        return Err(anyhow!("Request file not found: {}", path.display()));
    }
    file_provider(path)?
        .extract()
        .with_context(|| format!("Failed to parse request {}", path.display()))
}
