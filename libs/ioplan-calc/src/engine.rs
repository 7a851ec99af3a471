//! Plan Engine
//!
//! Orchestrates enumeration, aggregation, allocation and ranking for one
//! calculation request. The engine is pure: identical requests against an
//! identical catalog give identical outcomes, and nothing is cached between
//! calls. Callers that want memoization key it on the request themselves.

use crate::aggregate::aggregate;
use crate::allocator::{Allocation, GreedyAllocator};
use crate::combination::{combination_count, enumerate, Combination};
use crate::error::{CalcError, Result};
use crate::ranking::{conclude, is_feasible};
use crate::result::{CombinationResult, PlanOutcome};
use ioplan_model::{CapacityVector, Catalog, HardwareUnit, Headroom, RequirementVector};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Default ceiling on selected expansion modules (2^20 subsets per controller)
pub const DEFAULT_MAX_MODULES: usize = 20;

/// One calculation request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Raw point demand
    #[serde(default)]
    pub requirement: RequirementVector,
    /// Safety margin applied before allocation
    #[serde(default)]
    pub headroom: Headroom,
    /// Selected controller names
    #[serde(default)]
    pub controllers: Vec<String>,
    /// Selected expansion module names
    #[serde(default)]
    pub modules: Vec<String>,
}

impl PlanRequest {
    pub fn new(requirement: RequirementVector) -> Self {
        Self {
            requirement,
            ..Default::default()
        }
    }

    pub fn with_headroom(mut self, headroom: Headroom) -> Self {
        self.headroom = headroom;
        self
    }

    pub fn with_controllers<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.controllers = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_modules<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = names.into_iter().map(Into::into).collect();
        self
    }

    /// Select every controller and module in the catalog
    pub fn select_all(mut self, catalog: &Catalog) -> Self {
        self.controllers = catalog.controllers.iter().map(|u| u.name.clone()).collect();
        self.modules = catalog.modules.iter().map(|u| u.name.clone()).collect();
        self
    }

    /// Requirement after headroom
    pub fn adjusted_requirement(&self) -> RequirementVector {
        self.requirement.with_headroom(self.headroom)
    }
}

/// Plan Engine Configuration
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Maximum number of selected expansion modules
    pub max_modules: usize,
    /// Emit a trace event for every evaluated combination
    pub trace_combinations: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_modules: DEFAULT_MAX_MODULES,
            trace_combinations: false,
        }
    }
}

/// Plan Engine - combination search over a hardware selection
pub struct PlanEngine {
    allocator: GreedyAllocator,
    config: EngineConfig,
}

impl PlanEngine {
    /// Create new engine with default config
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create new engine with custom config
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            allocator: GreedyAllocator::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Resolve the request against the catalog and evaluate it
    ///
    /// # Errors
    /// Unknown controller or module names, or more selected modules than
    /// [`EngineConfig::max_modules`].
    pub fn compute(&self, request: &PlanRequest, catalog: &Catalog) -> Result<PlanOutcome> {
        let controllers = catalog.select_controllers(&request.controllers)?;
        let modules = catalog.select_modules(&request.modules)?;

        if modules.len() > self.config.max_modules {
            return Err(CalcError::selection_too_large(
                modules.len(),
                self.config.max_modules,
            ));
        }

        let adjusted = request.adjusted_requirement();
        debug!(
            "Requirement {:?} with {:.1}% headroom -> {:?}",
            request.requirement,
            request.headroom.percent(),
            adjusted
        );

        Ok(self.run(
            request.requirement,
            request.headroom,
            &adjusted,
            &controllers,
            &modules,
        ))
    }

    /// Evaluate already-resolved hardware against an adjusted requirement
    pub fn evaluate(
        &self,
        adjusted: &RequirementVector,
        controllers: &[&HardwareUnit],
        modules: &[&HardwareUnit],
    ) -> PlanOutcome {
        self.run(*adjusted, Headroom::NONE, adjusted, controllers, modules)
    }

    /// Aggregate and allocate a single combination
    pub fn assess(&self, combination: &Combination<'_>, adjusted: &RequirementVector) -> Allocation {
        self.allocator.allocate(&combined_capacity(combination), adjusted)
    }

    fn run(
        &self,
        requirement: RequirementVector,
        headroom: Headroom,
        adjusted: &RequirementVector,
        controllers: &[&HardwareUnit],
        modules: &[&HardwareUnit],
    ) -> PlanOutcome {
        debug!(
            "Evaluating {} controllers x {} combinations each",
            controllers.len(),
            combination_count(modules.len())
        );

        let mut evaluated = 0;
        let mut feasible = Vec::new();

        for combination in enumerate(controllers, modules) {
            evaluated += 1;
            let combined = combined_capacity(&combination);
            let allocation = self.allocator.allocate(&combined, adjusted);

            if self.config.trace_combinations {
                trace!(
                    "{}: shortfall {:?}",
                    combination.label(),
                    allocation.shortfall
                );
            }

            if is_feasible(&allocation) {
                feasible.push(to_result(&combination, combined, &allocation));
            }
        }

        info!("{} of {} combinations feasible", feasible.len(), evaluated);

        conclude(requirement, headroom, *adjusted, evaluated, feasible)
    }
}

impl Default for PlanEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn combined_capacity(combination: &Combination<'_>) -> CapacityVector {
    aggregate(
        &combination.controller.capacity,
        combination.modules.iter().map(|m| &m.capacity),
    )
}

fn to_result(
    combination: &Combination<'_>,
    combined: CapacityVector,
    allocation: &Allocation,
) -> CombinationResult {
    CombinationResult {
        label: combination.label(),
        controller: combination.controller.name.clone(),
        modules: combination.modules.iter().map(|m| m.name.clone()).collect(),
        combined,
        allocation: allocation.breakdown,
        remaining: allocation.remaining,
        comments: combination.controller.comments.clone(),
        module_count: combination.module_count(),
        ordinal: combination.ordinal,
    }
}

/// Compute with a default engine
///
/// ```
/// use ioplan_calc::{compute, PlanRequest};
/// use ioplan_model::{builtin_catalog, RequirementVector};
///
/// let catalog = builtin_catalog().unwrap();
/// let request = PlanRequest::new(RequirementVector::new(40, 0, 0, 0, 0))
///     .with_controllers(["SYM700"]);
/// assert!(!compute(&request, &catalog).unwrap().is_feasible());
/// ```
pub fn compute(request: &PlanRequest, catalog: &Catalog) -> Result<PlanOutcome> {
    PlanEngine::new().compute(request, catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ioplan_model::{PointCategory, RequirementCategory};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![HardwareUnit::new(
                "C1",
                CapacityVector::zero()
                    .with(PointCategory::Ai, 5)
                    .with(PointCategory::Bi, 3),
            )
            .with_comments("test controller")],
            vec![
                HardwareUnit::new("M1", CapacityVector::zero().with(PointCategory::Uio, 4)),
                HardwareUnit::new("M2", CapacityVector::zero().with(PointCategory::Ui, 2)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_single_controller_exact_fit() {
        let request =
            PlanRequest::new(RequirementVector::new(5, 3, 0, 0, 0)).with_controllers(["C1"]);
        let outcome = compute(&request, &catalog()).unwrap();
        let plan = outcome.plan().unwrap();

        assert_eq!(plan.len(), 1);
        let best = plan.recommended();
        assert_eq!(best.label, "C1");
        assert_eq!(best.comments, "test controller");
        assert_eq!(
            best.allocation.get(PointCategory::Ai, RequirementCategory::Ai),
            5
        );
        assert_eq!(
            best.allocation.get(PointCategory::Bi, RequirementCategory::Bi),
            3
        );
        assert!(best.remaining.is_zero());
        assert_eq!(best.combined, catalog().controllers[0].capacity);
    }

    #[test]
    fn test_single_controller_short() {
        let request =
            PlanRequest::new(RequirementVector::new(6, 3, 0, 0, 0)).with_controllers(["C1"]);
        let outcome = compute(&request, &catalog()).unwrap();
        assert_eq!(
            outcome,
            PlanOutcome::NoValidCombination {
                adjusted: RequirementVector::new(6, 3, 0, 0, 0),
                evaluated: 1,
            }
        );
    }

    #[test]
    fn test_modules_extend_capacity() {
        let request = PlanRequest::new(RequirementVector::new(7, 3, 0, 0, 0))
            .with_controllers(["C1"])
            .with_modules(["M1", "M2"]);
        let outcome = compute(&request, &catalog()).unwrap();
        let plan = outcome.plan().unwrap();

        let labels: Vec<_> = plan.options().iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["C1 + M1", "C1 + M2", "C1 + M1 + M2"]);
        assert_eq!(plan.evaluated, 4);
        assert_eq!(plan.recommended().module_count, 1);
        assert_eq!(plan.recommended().modules, vec!["M1".to_string()]);
    }

    #[test]
    fn test_headroom_applied_before_allocation() {
        // 4 * 1.5 = 6 > 5 AI points
        let request = PlanRequest::new(RequirementVector::new(4, 0, 0, 0, 0))
            .with_headroom(Headroom::from_fraction(0.5).unwrap())
            .with_controllers(["C1"]);
        let outcome = compute(&request, &catalog()).unwrap();
        assert!(!outcome.is_feasible());

        let request = request.with_modules(["M2"]);
        let plan = compute(&request, &catalog()).unwrap().into_plan().unwrap();
        assert_eq!(plan.adjusted.ai, 6);
        assert_eq!(plan.requirement.ai, 4);
        assert_eq!(
            plan.recommended()
                .allocation
                .get(PointCategory::Ui, RequirementCategory::Ai),
            1
        );
    }

    #[test]
    fn test_empty_controller_selection() {
        let request = PlanRequest::new(RequirementVector::zero()).with_modules(["M1"]);
        let outcome = compute(&request, &catalog()).unwrap();
        assert!(!outcome.is_feasible());
        assert_eq!(outcome.evaluated(), 0);
    }

    #[test]
    fn test_unknown_names_rejected() {
        let request = PlanRequest::new(RequirementVector::zero()).with_controllers(["C9"]);
        assert!(matches!(
            compute(&request, &catalog()),
            Err(CalcError::Model(_))
        ));

        let request = PlanRequest::new(RequirementVector::zero())
            .with_controllers(["C1"])
            .with_modules(["C1"]);
        assert!(compute(&request, &catalog()).is_err());
    }

    #[test]
    fn test_selection_limit() {
        let engine = PlanEngine::with_config(EngineConfig {
            max_modules: 1,
            ..Default::default()
        });
        let request = PlanRequest::new(RequirementVector::zero())
            .with_controllers(["C1"])
            .with_modules(["M1", "M2"]);
        assert_eq!(
            engine.compute(&request, &catalog()).unwrap_err(),
            CalcError::selection_too_large(2, 1)
        );
    }

    #[test]
    fn test_select_all() {
        let catalog = catalog();
        let request = PlanRequest::new(RequirementVector::zero()).select_all(&catalog);
        assert_eq!(request.controllers, vec!["C1".to_string()]);
        assert_eq!(request.modules.len(), 2);

        let outcome = compute(&request, &catalog).unwrap();
        assert_eq!(outcome.options().len(), 4);
        assert_eq!(outcome.plan().unwrap().recommended().label, "C1");
    }

    #[test]
    fn test_request_from_json() {
        let request: PlanRequest = serde_json::from_str(
            r#"{"requirement": {"AI": 4}, "headroom": 0.5, "controllers": ["C1"]}"#,
        )
        .unwrap();
        assert_eq!(request.adjusted_requirement().ai, 6);
        assert!(request.modules.is_empty());

        let bad = serde_json::from_str::<PlanRequest>(r#"{"headroom": 1.5}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_assess_single_combination() {
        let catalog = catalog();
        let controllers = catalog.select_controllers(&["C1"]).unwrap();
        let modules = catalog.select_modules(&["M1"]).unwrap();
        let engine = PlanEngine::new();

        let combination = enumerate(&controllers, &modules).nth(1).unwrap();
        assert_eq!(combination.label(), "C1 + M1");

        let allocation = engine.assess(&combination, &RequirementVector::new(0, 5, 0, 0, 0));
        assert!(allocation.is_feasible());
        assert_eq!(allocation.breakdown.get(PointCategory::Uio, RequirementCategory::Bi), 2);
        assert_eq!(allocation.remaining.uio, 2);
    }

    #[test]
    fn test_evaluate_resolved_hardware() {
        let catalog = catalog();
        let controllers: Vec<_> = catalog.controllers.iter().collect();
        let modules: Vec<_> = catalog.modules.iter().collect();

        let outcome = PlanEngine::new().evaluate(
            &RequirementVector::new(0, 0, 0, 0, 4),
            &controllers,
            &modules,
        );
        let plan = outcome.plan().unwrap();
        assert_eq!(plan.recommended().label, "C1 + M1");
        assert_eq!(plan.headroom, Headroom::NONE);
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_outcome_is_logged() {
        let engine = PlanEngine::with_config(EngineConfig {
            trace_combinations: true,
            ..Default::default()
        });
        let request = PlanRequest::new(RequirementVector::new(1, 0, 0, 0, 0))
            .with_controllers(["C1"])
            .with_modules(["M2"]);
        engine.compute(&request, &catalog()).unwrap();

        assert!(logs_contain("2 of 2 combinations feasible"));
    }
}
