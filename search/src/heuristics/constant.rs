//! Fixed-value heuristic.

use strider_kernel::model::OperatorId;

use crate::heuristic::{Estimate, EvalContext, Heuristic};
use crate::node::SearchNode;

/// Returns a fixed configured value for every node.
///
/// Useful as a baseline (turns best-first into pure FIFO when used alone)
/// and as a building block in combinator tests.
#[derive(Debug, Clone)]
pub struct ConstantHeuristic {
    value: Estimate,
    evals: u64,
}

impl ConstantHeuristic {
    /// A heuristic that always answers `value`.
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self {
            value: Estimate(value),
            evals: 0,
        }
    }
}

impl Heuristic for ConstantHeuristic {
    fn evaluate(
        &mut self,
        _node: &SearchNode,
        _ctx: &EvalContext<'_>,
        _applicable: &[OperatorId],
    ) -> Estimate {
        self.evals += 1;
        self.value
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
    fn always_returns_the_configured_value() {
        let (decl, ops) = context_fixture();
        let ctx = EvalContext {
            declaration: &decl,
            operators: &ops,
        };
        let node = root_node(&decl);
        let mut h = ConstantHeuristic::new(7);
        assert_eq!(h.evaluate(&node, &ctx, &[]), Estimate(7));
        assert_eq!(h.evaluate(&node, &ctx, &[]), Estimate(7));
        assert_eq!(h.evaluations(), 2);
        h.reset();
        assert_eq!(h.evaluations(), 0);
    }
}
