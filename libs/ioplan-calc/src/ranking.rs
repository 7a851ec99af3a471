//! Feasibility filter and ranking

use crate::allocator::Allocation;
use crate::result::{CombinationResult, PlanOutcome, RankedPlan};
use ioplan_model::{Headroom, RequirementVector};

/// A combination is kept only if the greedy pass left no shortfall
pub fn is_feasible(allocation: &Allocation) -> bool {
    allocation.is_feasible()
}

/// Order by ascending module count; ties keep generation order
pub fn rank(mut options: Vec<CombinationResult>) -> Vec<CombinationResult> {
    options.sort_by_key(|o| (o.module_count, o.ordinal));
    options
}

/// Rank the feasible set and wrap it in the terminal outcome
pub(crate) fn conclude(
    requirement: RequirementVector,
    headroom: Headroom,
    adjusted: RequirementVector,
    evaluated: usize,
    feasible: Vec<CombinationResult>,
) -> PlanOutcome {
    if feasible.is_empty() {
        return PlanOutcome::NoValidCombination {
            adjusted,
            evaluated,
        };
    }
    PlanOutcome::Feasible(RankedPlan::new(
        requirement,
        headroom,
        adjusted,
        evaluated,
        rank(feasible),
    ))
}
