//! ioplan-calc - Combination search and point allocation engine
//!
//! Finds every controller + expansion-module combination able to host a
//! required set of I/O points, and ranks them by the number of modules used.
//!
//! # Pipeline
//!
//! 1. **Enumerate**: for each selected controller, every subset of the selected
//!    modules (sizes 0..=n, lexicographic within a size) - see [`combination`]
//! 2. **Aggregate**: sum controller and module capacities - see [`aggregate`]
//! 3. **Allocate**: fixed-priority greedy assignment of each requirement
//!    category to supply categories - see [`allocator`]
//! 4. **Filter & rank**: keep fully satisfied combinations, stable-sort by
//!    module count - see [`ranking`]
//!
//! # Example
//!
//! ```rust
//! use ioplan_calc::{compute, PlanRequest};
//! use ioplan_model::{builtin_catalog, Headroom, RequirementVector};
//!
//! let catalog = builtin_catalog().unwrap();
//! let request = PlanRequest::new(RequirementVector::new(4, 2, 1, 0, 3))
//!     .with_headroom(Headroom::from_percent(25.0).unwrap())
//!     .with_controllers(["UC600"])
//!     .with_modules(["XM30", "XM32"]);
//!
//! let outcome = compute(&request, &catalog).unwrap();
//! let plan = outcome.plan().expect("UC600 alone hosts these points");
//! assert_eq!(plan.recommended().label, "UC600");
//! assert_eq!(plan.recommended().module_count, 0);
//! ```
//!
//! # Allocation policy
//!
//! | Requirement | Sources, in draw order |
//! |-------------|------------------------|
//! | `AI` | `AI` → `UI` → `UIO` |
//! | `BI` | `BI` → `UI` → `AO_BI` → `UIO` |
//! | `AO` | `AO_BI` → `UIO` |
//! | `BO_Dry` | `BO_Dry` → `UIO` |
//! | `BO_Wet` | `BO_Wet` → `UIO` |
//!
//! Requirements are served in the order `AI, BI, AO, BO_Dry, BO_Wet`. The
//! pass is greedy and never backtracks, so a combination can be rejected
//! even though some other assignment of shared points would have fit.

pub mod aggregate;
pub mod allocator;
pub mod combination;
pub mod engine;
pub mod error;
pub mod ranking;
pub mod result;

// Re-exports for convenience
pub use aggregate::aggregate;
pub use allocator::{Allocation, AllocationTable, GreedyAllocator};
pub use combination::{combination_count, enumerate, Combination, Combinations};
pub use engine::{compute, EngineConfig, PlanEngine, PlanRequest};
pub use error::{CalcError, Result};
pub use ranking::rank;
pub use result::{CombinationResult, PlanOutcome, RankedPlan};
