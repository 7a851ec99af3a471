//! ioplan Model Library
//!
//! Core data model for the controller / expansion-module point planner.
//! This library provides pure data types and catalog handling without any
//! allocation logic.

//! # Modules
//!
//! - `points`: Supply (`PointCategory`) and demand (`RequirementCategory`) categories
//! - `capacity`: Per-category capacity vectors
//! - `requirement`: Requirement vectors and headroom
//! - `catalog`: Hardware units (controllers, expansion modules) and catalogs
//! - `builtin`: The embedded default hardware catalog
//! - `loader`: Catalog loading from YAML/TOML/JSON and CSV files
//! - `validation`: Input validation utilities
//!
//! # Example
//!
//! ```
//! use ioplan_model::{builtin_catalog, Headroom, RequirementVector};
//!
//! let catalog = builtin_catalog().unwrap();
//! assert!(catalog.controller("UC600").is_some());
//!
//! let raw = RequirementVector::new(4, 0, 0, 0, 0);
//! let adjusted = raw.with_headroom(Headroom::from_fraction(0.5).unwrap());
//! assert_eq!(adjusted.ai, 6);
//! ```

pub mod builtin;
pub mod capacity;
pub mod catalog;
pub mod error;
pub mod loader;
pub mod points;
pub mod requirement;
pub mod validation;

// Re-exports for convenience
pub use builtin::builtin_catalog;
pub use capacity::CapacityVector;
pub use catalog::{Catalog, HardwareUnit, UnitKind};
pub use error::{ModelError, Result};
pub use loader::{load_catalog, load_catalog_csv, load_catalog_structured};
pub use points::{PointCategory, RequirementCategory};
pub use requirement::{Headroom, RequirementVector};
pub use validation::{validate_headroom_fraction, validate_headroom_percent, validate_unit_name};
