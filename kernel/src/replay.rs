//! Plan validation by deterministic replay against a declaration.
//!
//! The external validator replays plans against the *lifted* domain; this
//! helper replays against the grounded declaration, which is how the
//! harness and the lock tests check plans without a front-end. Macro steps
//! must be expanded to primitives before replay (or handed to a validator
//! whose domain was augmented with the macros as ordinary actions).

use std::collections::BTreeSet;

use crate::model::{Declaration, FactId, Operator};

/// Outcome of replaying a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayVerdict {
    /// Every step applied and the final state satisfies the goal.
    Valid,
    /// A step's precondition did not hold in the state it was applied to.
    PreconditionFailed { step: usize, operator: String },
    /// All steps applied but the final state misses part of the goal.
    GoalUnsatisfied,
}

/// Replay `steps` from the declaration's initial state.
///
/// Never fails structurally: the verdict is the result. Checks each step's
/// applicability before applying its effects, then checks goal satisfaction
/// at the end.
#[must_use]
pub fn replay(declaration: &Declaration, steps: &[Operator]) -> ReplayVerdict {
    let mut state: BTreeSet<FactId> = declaration.init().clone();
    for (index, op) in steps.iter().enumerate() {
        if !op.is_applicable(&state) {
            return ReplayVerdict::PreconditionFailed {
                step: index,
                operator: op.name.clone(),
            };
        }
        state = op.apply(&state);
    }
    if declaration.goal_satisfied(&state) {
        ReplayVerdict::Valid
    } else {
        ReplayVerdict::GoalUnsatisfied
    }
}
