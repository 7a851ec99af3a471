//! Catalog loading from files
//!
//! Structured catalogs (YAML / TOML / JSON) are read through figment.
//! Flat spreadsheets use CSV with one row per unit:
//!
//! ```text
//! kind,name,UI,AI,BI,AO_BI,UIO,BO_Dry,BO_Wet,comments
//! controller,SYM210,2,3,1,2,0,0,5,
//! module,XM30,0,0,0,0,4,0,0,Mix and match
//! ```

use crate::capacity::CapacityVector;
use crate::catalog::{Catalog, HardwareUnit, UnitKind};
use crate::error::{ModelError, Result};
use crate::points::PointCategory;
use figment::{
    providers::{Format, Json, Toml, Yaml},
    Figment,
};
use std::path::Path;
use tracing::{debug, info};

/// Load a catalog, picking the format from the file extension
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .ok_or_else(|| ModelError::config("Catalog file must have an extension"))?;

    let catalog = match extension.as_str() {
        "csv" => load_catalog_csv(path)?,
        "yaml" | "yml" | "toml" | "json" => load_catalog_structured(path)?,
        _ => {
            return Err(ModelError::config(format!(
                "Unsupported catalog file format: {}",
                extension
            )))
        },
    };

    info!(
        "Loaded catalog from {}: {} controllers, {} modules",
        path.display(),
        catalog.controllers.len(),
        catalog.modules.len()
    );
    Ok(catalog)
}

/// Load a YAML / TOML / JSON catalog
pub fn load_catalog_structured(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    ensure_exists(path)?;

    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    let figment = match extension.as_str() {
        "toml" => Figment::new().merge(Toml::file(path)),
        "json" => Figment::new().merge(Json::file(path)),
        _ => Figment::new().merge(Yaml::file(path)),
    };

    let catalog: Catalog = figment.extract()?;
    catalog.validate()?;
    Ok(catalog)
}

/// Load a CSV catalog
///
/// Header names are matched ignoring case. `kind` and `name` are required;
/// capacity columns may be missing or empty (treated as 0).
pub fn load_catalog_csv(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    ensure_exists(path)?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;
    let headers = reader.headers()?.clone();

    let column = |label: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(label));
    let kind_col = column("kind")
        .ok_or_else(|| ModelError::parsing("CSV catalog is missing the 'kind' column"))?;
    let name_col = column("name")
        .ok_or_else(|| ModelError::parsing("CSV catalog is missing the 'name' column"))?;
    let comments_col = column("comments");
    let capacity_cols: Vec<(PointCategory, Option<usize>)> = PointCategory::all()
        .iter()
        .map(|c| (*c, column(c.as_str())))
        .collect();

    let mut controllers = Vec::new();
    let mut modules = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;
        // header is line 1
        let line = row + 2;

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let kind_str = record.get(kind_col).unwrap_or("");
        let kind = UnitKind::try_parse(kind_str).ok_or_else(|| {
            ModelError::parsing(format!("line {}: unknown unit kind '{}'", line, kind_str))
        })?;

        let mut capacity = CapacityVector::zero();
        for (category, col) in &capacity_cols {
            let raw = col.and_then(|c| record.get(c)).unwrap_or("");
            if raw.is_empty() {
                continue;
            }
            capacity[*category] = raw.parse::<u32>().map_err(|e| {
                ModelError::parsing(format!(
                    "line {}: invalid {} count '{}': {}",
                    line, category, raw, e
                ))
            })?;
        }

        let unit = HardwareUnit {
            name: record.get(name_col).unwrap_or("").to_string(),
            capacity,
            comments: comments_col
                .and_then(|c| record.get(c))
                .unwrap_or("")
                .to_string(),
        };
        debug!("CSV line {}: {} {}", line, kind, unit.name);

        match kind {
            UnitKind::Controller => controllers.push(unit),
            UnitKind::Module => modules.push(unit),
        }
    }

    Catalog::new(controllers, modules)
}

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ModelError::Io(format!(
            "Catalog file not found: {}",
            path.display()
        )));
    }
    Ok(())
}
