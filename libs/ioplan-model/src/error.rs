//! Model Layer Error Types

use crate::catalog::UnitKind;
use thiserror::Error;

/// Result type for ioplan-model operations
pub type Result<T> = std::result::Result<T, ModelError>;

/// Model layer errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    /// Validation error (requirement values, headroom, selections)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Invalid hardware unit name
    #[error("Invalid unit name: {0}")]
    InvalidUnitName(String),

    /// The same unit name appears more than once in a catalog
    #[error("Duplicate unit in catalog: {0}")]
    DuplicateUnit(String),

    /// A selected name is not present in the catalog
    #[error("Unknown {kind}: {name}")]
    UnknownUnit { kind: &'static str, name: String },

    /// Catalog parsing error
    #[error("Catalog parsing error: {0}")]
    CatalogParsing(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ModelError {
    fn from(err: serde_yaml::Error) -> Self {
        ModelError::CatalogParsing(err.to_string())
    }
}

impl From<csv::Error> for ModelError {
    fn from(err: csv::Error) -> Self {
        ModelError::CatalogParsing(err.to_string())
    }
}

impl From<figment::Error> for ModelError {
    fn from(err: figment::Error) -> Self {
        ModelError::CatalogParsing(err.to_string())
    }
}

// Helper methods
impl ModelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        ModelError::Validation(msg.into())
    }

    pub fn parsing(msg: impl Into<String>) -> Self {
        ModelError::CatalogParsing(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        ModelError::Config(msg.into())
    }

    pub fn unknown_controller(name: impl Into<String>) -> Self {
        ModelError::UnknownUnit {
            kind: UnitKind::Controller.as_str(),
            name: name.into(),
        }
    }

    pub fn unknown_module(name: impl Into<String>) -> Self {
        ModelError::UnknownUnit {
            kind: UnitKind::Module.as_str(),
            name: name.into(),
        }
    }
}
