//! Shared fixtures for the lock tests.
//!
//! The lock tests pin down observable behavior across the kernel, the
//! search engine, and the harness: plan validity, determinism, exhaustion
//! semantics, budget enforcement, and macro expansion.

#![forbid(unsafe_code)]

use strider_kernel::abort::AbortFlag;
use strider_kernel::lifted::TypedObjectIndex;
use strider_kernel::model::Declaration;
use strider_kernel::translate::translate;
use strider_harness::worlds::PlanningWorld;

/// Ground a world, panicking on translation failure (fixture worlds are
/// known-good).
#[must_use]
pub fn ground(world: &dyn PlanningWorld) -> Declaration {
    let problem = world.problem();
    let oracle = TypedObjectIndex::from_problem(&problem);
    translate(&problem, &oracle, &AbortFlag::new()).expect("fixture world must ground")
}
