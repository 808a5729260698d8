//! Fixture worlds for the harness runner.
//!
//! Each world builds its lifted problem programmatically, the way a parser
//! front-end would after type-checking its input.

use strider_kernel::lifted::LiftedProblem;

pub mod blocks;
pub mod gripper;
pub mod switches;
pub mod unsolvable;

/// A named planning fixture the runner can translate and search.
pub trait PlanningWorld {
    /// Stable identifier, used in reports and bundle metadata.
    fn name(&self) -> &str;

    /// Build the lifted problem for this world.
    fn problem(&self) -> LiftedProblem;
}
