//! CLI configuration
//!
//! Layered with figment, later layers winning:
//! built-in defaults, then `ioplan.yaml` / `ioplan.toml` in the working
//! directory (or the file given with `--config`), then `IOPLAN_*` variables.

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use ioplan_model::{validate_headroom_percent, Headroom};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "IOPLAN_";

/// Output format for plan and catalog commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => f.write_str("table"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Catalog file; the built-in catalog when unset
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Default headroom in percent
    #[serde(default)]
    pub headroom_percent: f64,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_color() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: None,
            headroom_percent: 0.0,
            format: OutputFormat::Table,
            color: default_color(),
        }
    }
}

impl AppConfig {
    /// Load the layered configuration
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let figment = match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("Config file not found: {}", path.display());
                }
                Figment::from(Serialized::defaults(Self::default()))
                    .merge(file_provider(path)?)
                    .merge(Env::prefixed(ENV_PREFIX))
            },
            None => Figment::from(Serialized::defaults(Self::default()))
                .merge(Yaml::file("ioplan.yaml"))
                .merge(Toml::file("ioplan.toml"))
                .merge(Env::prefixed(ENV_PREFIX)),
        };
        Self::from_figment(figment)
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        let config: Self = figment
            .extract()
            .context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_headroom_percent(self.headroom_percent)?;
        Ok(())
    }

    pub fn headroom(&self) -> Result<Headroom> {
        Ok(Headroom::from_percent(self.headroom_percent)?)
    }
}

/// Pick a figment provider from the file extension
pub fn file_provider(path: &Path) -> Result<Figment> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let figment = match extension {
        "yaml" | "yml" => Figment::new().merge(Yaml::file(path)),
        "toml" => Figment::new().merge(Toml::file(path)),
        "json" => Figment::new().merge(Json::file(path)),
        _ => bail!("Unsupported config file format: {}", path.display()),
    };
    Ok(figment)
}
