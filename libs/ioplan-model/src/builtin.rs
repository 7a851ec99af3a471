//! Built-in Hardware Catalog
//!
//! The default controllers and expansion modules, embedded at compile time.
//! Callers that maintain their own catalog load it through [`crate::loader`]
//! instead.

use crate::catalog::Catalog;
use crate::error::Result;

const BUILTIN_CATALOG_YAML: &str = include_str!("../data/builtin_catalog.yaml");

/// Parse and validate the embedded catalog
pub fn builtin_catalog() -> Result<Catalog> {
    let catalog: Catalog = serde_yaml::from_str(BUILTIN_CATALOG_YAML)?;
    catalog.validate()?;
    Ok(catalog)
}
