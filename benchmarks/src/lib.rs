//! Shared helpers for strider benchmark suites.

#![forbid(unsafe_code)]

use strider_harness::worlds::PlanningWorld;
use strider_kernel::abort::AbortFlag;
use strider_kernel::lifted::TypedObjectIndex;
use strider_kernel::model::Declaration;
use strider_kernel::translate::translate;

/// Ground a fixture world once, outside the timed section.
///
/// # Panics
///
/// Panics if translation fails. Benchmark setup failures are fatal.
#[must_use]
pub fn prepare_declaration(world: &dyn PlanningWorld) -> Declaration {
    let problem = world.problem();
    let oracle = TypedObjectIndex::from_problem(&problem);
    translate(&problem, &oracle, &AbortFlag::new()).expect("benchmark world must ground")
}
