//! Goal-count heuristic.

use strider_kernel::model::OperatorId;

use crate::heuristic::{Estimate, EvalContext, Heuristic};
use crate::node::SearchNode;

/// Counts the goal facts not yet satisfied in the node's state.
///
/// Cheap and inadmissible on most domains (one operator may satisfy
/// several goal facts at once), but a serviceable default.
#[derive(Debug, Clone, Default)]
pub struct GoalCountHeuristic {
    evals: u64,
}

impl GoalCountHeuristic {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Heuristic for GoalCountHeuristic {
    fn evaluate(
        &mut self,
        node: &SearchNode,
        ctx: &EvalContext<'_>,
        _applicable: &[OperatorId],
    ) -> Estimate {
        self.evals += 1;
        let missing = ctx
            .declaration
            .goal()
            .iter()
            .filter(|f| !node.state.contains(f))
            .count();
        Estimate(missing as u64)
    }

    fn reset(&mut self) {
        self.evals = 0;
    }

    fn evaluations(&self) -> u64 {
        self.evals
    }
}
