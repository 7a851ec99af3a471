//! Capacity aggregation

use ioplan_model::CapacityVector;

/// Sum a controller's capacity with the capacities of a module subset
///
/// Returns a fresh vector; inputs are untouched.
pub fn aggregate<'a, I>(controller: &CapacityVector, modules: I) -> CapacityVector
where
    I: IntoIterator<Item = &'a CapacityVector>,
{
    modules
        .into_iter()
        .fold(*controller, |mut combined, module| {
            combined += module;
            combined
        })
}
