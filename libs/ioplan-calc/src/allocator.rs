//! Greedy point allocator
//!
//! Requirements are served one category at a time in the fixed order
//! `AI, BI, AO, BO_Dry, BO_Wet`. Each walks its source priority list
//! ([`RequirementCategory::source_priority`]) and takes
//! `min(outstanding, remaining)` from every source in turn.
//!
//! Single pass, no backtracking: once a shared point (`UI`, `AO_BI`, `UIO`)
//! is committed to an earlier requirement it is never handed back. `AO_BI`
//! is one fungible pool drawn down by whichever requirement reaches it first.

use ioplan_model::{CapacityVector, PointCategory, RequirementCategory, RequirementVector};
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::trace;

/// Units drawn from each supply category, split by requirement category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllocationTable {
    usage: [RequirementVector; PointCategory::COUNT],
}

impl AllocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Units of `source` assigned to `requirement`
    pub fn get(&self, source: PointCategory, requirement: RequirementCategory) -> u32 {
        self.usage[source.index()][requirement]
    }

    /// Per-requirement usage of one source
    pub fn usage(&self, source: PointCategory) -> &RequirementVector {
        &self.usage[source.index()]
    }

    pub fn record(&mut self, source: PointCategory, requirement: RequirementCategory, units: u32) {
        self.usage[source.index()][requirement] += units;
    }

    /// Total units drawn from a source across all requirements
    pub fn drawn_from(&self, source: PointCategory) -> u32 {
        self.usage(source).total()
    }

    /// Total units assigned to a requirement across all sources
    pub fn allocated_to(&self, requirement: RequirementCategory) -> u32 {
        self.usage.iter().map(|u| u[requirement]).sum()
    }

    /// Units assigned per requirement category
    pub fn allocated(&self) -> RequirementVector {
        let mut totals = RequirementVector::zero();
        for requirement in RequirementCategory::all() {
            totals[*requirement] = self.allocated_to(*requirement);
        }
        totals
    }

    /// Sources with at least one unit drawn, in canonical order
    pub fn used_sources(&self) -> impl Iterator<Item = (PointCategory, &RequirementVector)> + '_ {
        PointCategory::all()
            .iter()
            .map(move |s| (*s, self.usage(*s)))
            .filter(|(_, usage)| !usage.is_zero())
    }

    pub fn is_empty(&self) -> bool {
        self.usage.iter().all(RequirementVector::is_zero)
    }
}

impl Serialize for AllocationTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PointCategory::COUNT))?;
        for source in PointCategory::all() {
            map.serialize_entry(source.as_str(), self.usage(*source))?;
        }
        map.end()
    }
}

/// Outcome of one greedy pass over a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocation {
    /// Units drawn per (source, requirement)
    pub breakdown: AllocationTable,
    /// Combined capacity minus everything drawn
    pub remaining: CapacityVector,
    /// Outstanding demand per requirement; all zero when satisfied
    pub shortfall: RequirementVector,
}

impl Allocation {
    /// Every requirement fully served
    pub fn is_feasible(&self) -> bool {
        self.shortfall.is_zero()
    }
}

/// Fixed-priority greedy allocator
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyAllocator;

impl GreedyAllocator {
    pub fn new() -> Self {
        Self
    }

    /// Run the greedy pass
    ///
    /// `combined` is copied; the caller's vector is never modified.
    pub fn allocate(
        &self,
        combined: &CapacityVector,
        requirement: &RequirementVector,
    ) -> Allocation {
        let mut remaining = *combined;
        let mut shortfall = *requirement;
        let mut breakdown = AllocationTable::new();

        for category in RequirementCategory::all() {
            for source in category.source_priority() {
                let outstanding = shortfall[*category];
                if outstanding == 0 {
                    break;
                }

                let used = outstanding.min(remaining[*source]);
                if used == 0 {
                    continue;
                }

                remaining[*source] -= used;
                shortfall[*category] -= used;
                breakdown.record(*source, *category, used);
                if source.is_shared() {
                    trace!("{} <- {} (shared): {} points", category, source, used);
                } else {
                    trace!("{} <- {}: {} points", category, source, used);
                }
            }
        }

        Allocation {
            breakdown,
            remaining,
            shortfall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use PointCategory as P;
    use RequirementCategory as R;

    fn allocate(combined: CapacityVector, requirement: RequirementVector) -> Allocation {
        GreedyAllocator::new().allocate(&combined, &requirement)
    }

    #[test]
    fn test_exact_fit_from_dedicated_sources() {
        let combined = CapacityVector::zero().with(P::Ai, 5).with(P::Bi, 3);
        let result = allocate(combined, RequirementVector::new(5, 3, 0, 0, 0));

        assert!(result.is_feasible());
        assert_eq!(result.breakdown.get(P::Ai, R::Ai), 5);
        assert_eq!(result.breakdown.get(P::Bi, R::Bi), 3);
        assert!(result.remaining.is_zero());
        assert_eq!(result.breakdown.used_sources().count(), 2);
    }

    #[test]
    fn test_shortfall_without_fallback() {
        let combined = CapacityVector::zero().with(P::Ai, 5).with(P::Bi, 3);
        let result = allocate(combined, RequirementVector::new(6, 3, 0, 0, 0));

        assert!(!result.is_feasible());
        assert_eq!(result.shortfall, RequirementVector::new(1, 0, 0, 0, 0));
        assert_eq!(result.breakdown.allocated_to(R::Ai), 5);
    }

    #[test]
    fn test_fallback_follows_priority_order() {
        // AI: 2 dedicated, then UI, then UIO
        let combined = CapacityVector::zero()
            .with(P::Ai, 2)
            .with(P::Ui, 3)
            .with(P::Uio, 4);
        let result = allocate(combined, RequirementVector::new(7, 0, 0, 0, 0));

        assert!(result.is_feasible());
        assert_eq!(result.breakdown.get(P::Ai, R::Ai), 2);
        assert_eq!(result.breakdown.get(P::Ui, R::Ai), 3);
        assert_eq!(result.breakdown.get(P::Uio, R::Ai), 2);
        assert_eq!(result.remaining.uio, 2);
    }

    #[test]
    fn test_bi_draws_ao_bi_before_uio() {
        let combined = CapacityVector::zero().with(P::AoBi, 2).with(P::Uio, 2);
        let result = allocate(combined, RequirementVector::new(0, 3, 0, 0, 0));

        assert_eq!(result.breakdown.get(P::AoBi, R::Bi), 2);
        assert_eq!(result.breakdown.get(P::Uio, R::Bi), 1);
        assert_eq!(result.remaining.uio, 1);
    }

    #[test]
    fn test_earlier_requirement_claims_shared_source() {
        // One UIO point, wanted by both AI and BO_Wet: AI is served first
        let combined = CapacityVector::zero().with(P::Uio, 1);
        let result = allocate(combined, RequirementVector::new(1, 0, 0, 0, 1));

        assert_eq!(result.breakdown.get(P::Uio, R::Ai), 1);
        assert_eq!(result.breakdown.get(P::Uio, R::BoWet), 0);
        assert_eq!(result.shortfall, RequirementVector::new(0, 0, 0, 0, 1));
        assert!(!result.is_feasible());
    }

    #[test]
    fn test_ao_bi_pool_shared_between_bi_and_ao() {
        // BI takes the AO_BI points before AO gets a chance
        let combined = CapacityVector::zero().with(P::AoBi, 2);
        let result = allocate(combined, RequirementVector::new(0, 2, 1, 0, 0));

        assert_eq!(result.breakdown.get(P::AoBi, R::Bi), 2);
        assert_eq!(result.breakdown.get(P::AoBi, R::Ao), 0);
        assert_eq!(result.shortfall.ao, 1);
    }

    #[tracing_test::traced_test]
    #[test]
    fn test_shared_draws_are_traced() {
        let combined = CapacityVector::zero().with(P::Bi, 1).with(P::AoBi, 2);
        allocate(combined, RequirementVector::new(0, 3, 0, 0, 0));

        assert!(logs_contain("BI <- BI: 1 points"));
        assert!(logs_contain("BI <- AO_BI (shared): 2 points"));
    }

    #[test]
    fn test_ao_never_uses_ui() {
        let combined = CapacityVector::zero().with(P::Ui, 10);
        let result = allocate(combined, RequirementVector::new(0, 0, 1, 0, 0));
        assert_eq!(result.shortfall.ao, 1);
        assert_eq!(result.remaining.ui, 10);
    }

    #[test]
    fn test_zero_requirement_draws_nothing() {
        let combined = CapacityVector::from_array([1, 2, 3, 4, 5, 6, 7]);
        let result = allocate(combined, RequirementVector::zero());
        assert!(result.is_feasible());
        assert!(result.breakdown.is_empty());
        assert_eq!(result.remaining, combined);
    }

    #[test]
    fn test_input_vector_not_mutated() {
        let combined = CapacityVector::zero().with(P::BoDry, 3);
        let before = combined;
        let _ = GreedyAllocator::new().allocate(&combined, &RequirementVector::new(0, 0, 0, 3, 0));
        assert_eq!(combined, before);
    }

    #[test]
    fn test_remaining_accounts_for_all_draws() {
        let combined = CapacityVector::from_array([2, 3, 1, 2, 4, 3, 5]);
        let result = allocate(combined, RequirementVector::new(6, 4, 2, 4, 6));
        for source in P::all() {
            assert_eq!(
                result.remaining[*source] + result.breakdown.drawn_from(*source),
                combined[*source]
            );
        }
    }

    #[test]
    fn test_serialize_by_source_label() {
        let combined = CapacityVector::zero().with(P::Uio, 4);
        let result = allocate(combined, RequirementVector::new(0, 0, 2, 0, 0));
        let json = serde_json::to_value(result.breakdown).unwrap();
        assert_eq!(json["UIO"]["AO"], 2);
        assert_eq!(json["UI"]["AI"], 0);
    }
}
