//! Hardware catalog
//!
//! A catalog lists the controllers and expansion modules available to the
//! planner. Controllers and modules share one record shape; a combination
//! always contains exactly one controller and any number of modules.

use crate::capacity::CapacityVector;
use crate::error::{ModelError, Result};
use crate::validation::validate_unit_name;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::warn;

/// Role of a hardware unit within a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    /// Main controller (exactly one per combination)
    Controller,
    /// Expansion module (zero or more per combination)
    Module,
}

impl UnitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Controller => "controller",
            Self::Module => "module",
        }
    }

    /// Parse from string, ignoring ASCII case. Accepts `xm` for modules.
    pub fn try_parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "controller" => Some(Self::Controller),
            "module" | "xm" | "expansion_module" => Some(Self::Module),
            _ => None,
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A controller or expansion module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareUnit {
    /// Unique identifier across the catalog
    pub name: String,
    /// Point capacity per supply category
    #[serde(flatten)]
    pub capacity: CapacityVector,
    /// Advisory notes, not used in computation
    #[serde(default)]
    pub comments: String,
}

impl HardwareUnit {
    pub fn new(name: impl Into<String>, capacity: CapacityVector) -> Self {
        Self {
            name: name.into(),
            capacity,
            comments: String::new(),
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }
}

/// Controllers and expansion modules, each in catalog order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub controllers: Vec<HardwareUnit>,
    #[serde(default)]
    pub modules: Vec<HardwareUnit>,
}

impl Catalog {
    /// Build a catalog and validate it
    pub fn new(controllers: Vec<HardwareUnit>, modules: Vec<HardwareUnit>) -> Result<Self> {
        let catalog = Self {
            controllers,
            modules,
        };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check names are well formed and unique across controllers and modules
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for unit in self.controllers.iter().chain(self.modules.iter()) {
            validate_unit_name(&unit.name)?;
            if !seen.insert(unit.name.as_str()) {
                return Err(ModelError::DuplicateUnit(unit.name.clone()));
            }
        }
        Ok(())
    }

    pub fn controller(&self, name: &str) -> Option<&HardwareUnit> {
        self.controllers.iter().find(|u| u.name == name)
    }

    pub fn module(&self, name: &str) -> Option<&HardwareUnit> {
        self.modules.iter().find(|u| u.name == name)
    }

    /// Look up any unit by name
    pub fn unit(&self, name: &str) -> Option<(UnitKind, &HardwareUnit)> {
        self.controller(name)
            .map(|u| (UnitKind::Controller, u))
            .or_else(|| self.module(name).map(|u| (UnitKind::Module, u)))
    }

    pub fn controller_names(&self) -> Vec<&str> {
        self.controllers.iter().map(|u| u.name.as_str()).collect()
    }

    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|u| u.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty() && self.modules.is_empty()
    }

    /// Resolve selected controller names to catalog entries
    ///
    /// Every name must exist. Resolved units come back in catalog order with
    /// repeated names collapsed.
    pub fn select_controllers<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&HardwareUnit>> {
        select(&self.controllers, names, ModelError::unknown_controller)
    }

    /// Resolve selected expansion module names to catalog entries
    ///
    /// Same ordering rules as [`Catalog::select_controllers`].
    pub fn select_modules<S: AsRef<str>>(&self, names: &[S]) -> Result<Vec<&HardwareUnit>> {
        select(&self.modules, names, ModelError::unknown_module)
    }
}

fn select<'a, S: AsRef<str>>(
    units: &'a [HardwareUnit],
    names: &[S],
    unknown: fn(String) -> ModelError,
) -> Result<Vec<&'a HardwareUnit>> {
    let mut wanted = HashSet::with_capacity(names.len());
    for name in names {
        let name = name.as_ref();
        if !units.iter().any(|u| u.name == name) {
            return Err(unknown(name.to_string()));
        }
        if !wanted.insert(name) {
            warn!("Ignoring repeated selection of {}", name);
        }
    }

    Ok(units
        .iter()
        .filter(|u| wanted.contains(u.name.as_str()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::points::PointCategory;

    fn sample() -> Catalog {
        Catalog::new(
            vec![
                HardwareUnit::new("C1", CapacityVector::zero().with(PointCategory::Ai, 5)),
                HardwareUnit::new("C2", CapacityVector::zero().with(PointCategory::Ui, 8))
                    .with_comments("universal"),
            ],
            vec![
                HardwareUnit::new("M1", CapacityVector::zero().with(PointCategory::Uio, 4)),
                HardwareUnit::new("M2", CapacityVector::zero().with(PointCategory::BoWet, 4)),
                HardwareUnit::new("M3", CapacityVector::zero().with(PointCategory::Ui, 16)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_lookup() {
        let catalog = sample();
        assert_eq!(catalog.controller("C2").unwrap().comments, "universal");
        assert!(catalog.controller("M1").is_none());
        assert_eq!(catalog.unit("M2").unwrap().0, UnitKind::Module);
        assert_eq!(catalog.controller_names(), vec!["C1", "C2"]);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let unit = HardwareUnit::new("X", CapacityVector::zero());
        let err = Catalog::new(vec![unit.clone()], vec![unit]).unwrap_err();
        assert_eq!(err, ModelError::DuplicateUnit("X".to_string()));
    }

    #[test]
    fn test_invalid_name_rejected() {
        let unit = HardwareUnit::new("C 1", CapacityVector::zero());
        assert!(matches!(
            Catalog::new(vec![unit], vec![]),
            Err(ModelError::InvalidUnitName(_))
        ));
    }

    #[test]
    fn test_selection_uses_catalog_order() {
        let catalog = sample();
        let selected = catalog.select_modules(&["M3", "M1", "M3"]).unwrap();
        let names: Vec<_> = selected.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["M1", "M3"]);
    }

    #[test]
    fn test_unknown_selection_rejected() {
        let catalog = sample();
        let err = catalog.select_controllers(&["C9"]).unwrap_err();
        assert_eq!(err, ModelError::unknown_controller("C9"));
        // Modules are not controllers
        assert!(catalog.select_controllers(&["M1"]).is_err());
    }

    #[test]
    fn test_empty_selection() {
        let catalog = sample();
        let none: [&str; 0] = [];
        assert!(catalog.select_modules(&none).unwrap().is_empty());
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!(UnitKind::try_parse("Controller"), Some(UnitKind::Controller));
        assert_eq!(UnitKind::try_parse("XM"), Some(UnitKind::Module));
        assert_eq!(UnitKind::try_parse("sensor"), None);
    }
}
