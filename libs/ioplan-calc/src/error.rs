//! Error types for ioplan-calc

use ioplan_model::ModelError;
use thiserror::Error;

/// Calculation errors
///
/// These are boundary errors only: the allocator itself never fails, it
/// reports shortfalls.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Too many expansion modules selected: {selected} (maximum {max})")]
    SelectionTooLarge { selected: usize, max: usize },
}

impl CalcError {
    pub fn selection_too_large(selected: usize, max: usize) -> Self {
        Self::SelectionTooLarge { selected, max }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;
