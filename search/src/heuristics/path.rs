//! Path-length heuristic.

use strider_kernel::model::OperatorId;

use crate::heuristic::{Estimate, EvalContext, Heuristic};
use crate::node::SearchNode;

/// Returns `1 + step count`: the deeper the node, the worse it ranks.
///
/// Used alone this turns guided search into uniform-cost-like,
/// breadth-ordered exploration.
#[derive(Debug, Clone, Default)]
pub struct PathHeuristic {
    evals: u64,
}

impl PathHeuristic {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Heuristic for PathHeuristic {
    fn evaluate(
        &mut self,
        node: &SearchNode,
        _ctx: &EvalContext<'_>,
        _applicable: &[OperatorId],
    ) -> Estimate {
        self.evals += 1;
        Estimate(node.depth.saturating_add(1))
    }

    fn reset(&mut self) {
        self.evals = 0;
    }

    fn evaluations(&self) -> u64 {
        self.evals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::test_support::{context_fixture, root_node};

    #[test]
    fn three_prior_steps_estimate_four() {
        let (decl, ops) = context_fixture();
        let ctx = EvalContext {
            declaration: &decl,
            operators: &ops,
        };
        let mut node = root_node(&decl);
        node.depth = 3;
        let mut h = PathHeuristic::new();
        assert_eq!(h.evaluate(&node, &ctx, &[]), Estimate(4));
        assert_eq!(h.evaluations(), 1);
    }
}
