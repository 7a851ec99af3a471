//! Calculation results
//!
//! A request ends in exactly one of two ways: a non-empty ranked list of
//! feasible combinations, or an explicit "no valid combination" outcome.

use crate::allocator::AllocationTable;
use ioplan_model::{CapacityVector, Headroom, RequirementVector};
use serde::Serialize;

/// One feasible controller + module combination
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationResult {
    /// `"CONTROLLER + XM1 + XM2"`, modules in selection order
    pub label: String,
    pub controller: String,
    pub modules: Vec<String>,
    /// Controller and module capacities summed
    pub combined: CapacityVector,
    /// Units drawn per source, split by requirement
    pub allocation: AllocationTable,
    /// Capacity left after allocation
    pub remaining: CapacityVector,
    /// The controller's catalog comments
    pub comments: String,
    pub module_count: usize,
    /// Generation order, the ranking tie-break
    #[serde(skip)]
    pub ordinal: usize,
}

/// Feasible combinations ordered by ascending module count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlan {
    /// Raw requirement as supplied
    pub requirement: RequirementVector,
    pub headroom: Headroom,
    /// Requirement after headroom, the demand actually allocated
    pub adjusted: RequirementVector,
    /// Number of combinations examined
    pub evaluated: usize,
    options: Vec<CombinationResult>,
}

impl RankedPlan {
    /// `options` must be non-empty and already ranked
    pub(crate) fn new(
        requirement: RequirementVector,
        headroom: Headroom,
        adjusted: RequirementVector,
        evaluated: usize,
        options: Vec<CombinationResult>,
    ) -> Self {
        debug_assert!(!options.is_empty());
        Self {
            requirement,
            headroom,
            adjusted,
            evaluated,
            options,
        }
    }

    /// The recommended option: fewest modules, earliest generated
    pub fn recommended(&self) -> &CombinationResult {
        &self.options[0]
    }

    /// Every feasible option in rank order
    pub fn options(&self) -> &[CombinationResult] {
        &self.options
    }

    /// Find an option by its label
    pub fn find(&self, label: &str) -> Option<&CombinationResult> {
        self.options.iter().find(|o| o.label == label)
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// Terminal outcome of a calculation request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanOutcome {
    /// At least one combination hosts every point
    Feasible(RankedPlan),
    /// No combination of the selected hardware satisfies the requirement
    /// under the fixed allocation policy
    NoValidCombination {
        adjusted: RequirementVector,
        evaluated: usize,
    },
}

impl PlanOutcome {
    pub fn is_feasible(&self) -> bool {
        matches!(self, Self::Feasible(_))
    }

    pub fn plan(&self) -> Option<&RankedPlan> {
        match self {
            Self::Feasible(plan) => Some(plan),
            Self::NoValidCombination { .. } => None,
        }
    }

    pub fn into_plan(self) -> Option<RankedPlan> {
        match self {
            Self::Feasible(plan) => Some(plan),
            Self::NoValidCombination { .. } => None,
        }
    }

    /// Ranked options, empty when nothing fits
    pub fn options(&self) -> &[CombinationResult] {
        self.plan().map(RankedPlan::options).unwrap_or(&[])
    }

    pub fn evaluated(&self) -> usize {
        match self {
            Self::Feasible(plan) => plan.evaluated,
            Self::NoValidCombination { evaluated, .. } => *evaluated,
        }
    }
}
