//! Combinators over child heuristics.

use strider_kernel::model::OperatorId;

use crate::heuristic::{Estimate, EvalContext, Heuristic};
use crate::node::SearchNode;

/// Reports the greatest child estimate.
///
/// If any child reports the unreachable sentinel, so does the maximum. An
/// empty combinator is a construction error; release builds degrade to the
/// sentinel rather than inventing a finite estimate.
pub struct MaxCombinator {
    children: Vec<Box<dyn Heuristic>>,
    evals: u64,
}

impl MaxCombinator {
    #[must_use]
    pub fn new(children: Vec<Box<dyn Heuristic>>) -> Self {
        debug_assert!(!children.is_empty(), "max combinator needs a child");
        Self { children, evals: 0 }
    }
}

impl Heuristic for MaxCombinator {
    fn evaluate(
        &mut self,
        node: &SearchNode,
        ctx: &EvalContext<'_>,
        applicable: &[OperatorId],
    ) -> Estimate {
        self.evals += 1;
        self.children
            .iter_mut()
            .map(|child| child.evaluate(node, ctx, applicable))
            .max()
            .unwrap_or(Estimate::UNREACHABLE)
    }

    fn reset(&mut self) {
        self.evals = 0;
        for child in &mut self.children {
            child.reset();
        }
    }

    fn evaluations(&self) -> u64 {
        self.evals
    }
}

/// Reports the saturating sum of the child estimates.
///
/// The unreachable sentinel already sits at the top of the range, so a
/// single unreachable child saturates the whole sum.
pub struct SumCombinator {
    children: Vec<Box<dyn Heuristic>>,
    evals: u64,
}

impl SumCombinator {
    #[must_use]
    pub fn new(children: Vec<Box<dyn Heuristic>>) -> Self {
        Self { children, evals: 0 }
    }
}

impl Heuristic for SumCombinator {
    fn evaluate(
        &mut self,
        node: &SearchNode,
        ctx: &EvalContext<'_>,
        applicable: &[OperatorId],
    ) -> Estimate {
        self.evals += 1;
        self.children
            .iter_mut()
            .fold(Estimate::ZERO, |acc, child| {
                acc.saturating_add(child.evaluate(node, ctx, applicable))
            })
    }

    fn reset(&mut self) {
        self.evals = 0;
        for child in &mut self.children {
            child.reset();
        }
    }

    fn evaluations(&self) -> u64 {
        self.evals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::test_support::{context_fixture, root_node};
    use crate::heuristics::ConstantHeuristic;

    fn constants(values: &[u64]) -> Vec<Box<dyn Heuristic>> {
        values
            .iter()
            .map(|&v| Box::new(ConstantHeuristic::new(v)) as Box<dyn Heuristic>)
            .collect()
    }

    #[test]
    fn max_picks_the_greatest_child() {
        let (decl, ops) = context_fixture();
        let ctx = EvalContext {
            declaration: &decl,
            operators: &ops,
        };
        let node = root_node(&decl);
        let mut h = MaxCombinator::new(constants(&[1, 2, 3, 5]));
        assert_eq!(h.evaluate(&node, &ctx, &[]), Estimate(5));
    }

    #[test]
    fn max_propagates_the_sentinel() {
        let (decl, ops) = context_fixture();
        let ctx = EvalContext {
            declaration: &decl,
            operators: &ops,
        };
        let node = root_node(&decl);
        let mut h = MaxCombinator::new(constants(&[u64::MAX, 2]));
        assert!(h.evaluate(&node, &ctx, &[]).is_unreachable());
    }

    #[test]
    fn sum_saturates_on_the_sentinel() {
        let (decl, ops) = context_fixture();
        let ctx = EvalContext {
            declaration: &decl,
            operators: &ops,
        };
        let node = root_node(&decl);
        let mut finite = SumCombinator::new(constants(&[1, 2, 3, 5]));
        assert_eq!(finite.evaluate(&node, &ctx, &[]), Estimate(11));

        let mut saturated = SumCombinator::new(constants(&[u64::MAX, 7]));
        assert!(saturated.evaluate(&node, &ctx, &[]).is_unreachable());
    }

    #[test]
    fn reset_cascades_to_children() {
        let (decl, ops) = context_fixture();
        let ctx = EvalContext {
            declaration: &decl,
            operators: &ops,
        };
        let node = root_node(&decl);
        let mut h = SumCombinator::new(constants(&[1, 2]));
        h.evaluate(&node, &ctx, &[]);
        h.reset();
        assert_eq!(h.evaluations(), 0);
        assert_eq!(h.evaluate(&node, &ctx, &[]), Estimate(3));
    }
}
