//! Weighted wrapper around another heuristic.

use strider_kernel::model::OperatorId;

use crate::heuristic::{Estimate, EvalContext, Heuristic};
use crate::node::SearchNode;

/// Scales an inner heuristic: `floor(inner × weight)`.
///
/// The unreachable sentinel passes through unscaled, and finite products
/// clamp just below it so weighting can never fabricate unreachability.
/// `reset` cascades to the wrapped heuristic.
pub struct WeightedHeuristic {
    inner: Box<dyn Heuristic>,
    weight: f64,
    evals: u64,
}

impl WeightedHeuristic {
    /// Wrap `inner`, scaling its estimates by `weight` (non-negative).
    #[must_use]
    pub fn new(inner: Box<dyn Heuristic>, weight: f64) -> Self {
        Self {
            inner,
            weight,
            evals: 0,
        }
    }
}

impl Heuristic for WeightedHeuristic {
    fn evaluate(
        &mut self,
        node: &SearchNode,
        ctx: &EvalContext<'_>,
        applicable: &[OperatorId],
    ) -> Estimate {
        self.evals += 1;
        let inner = self.inner.evaluate(node, ctx, applicable);
        if inner.is_unreachable() {
            return Estimate::UNREACHABLE;
        }
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let scaled = (inner.0 as f64 * self.weight).floor() as u64;
        Estimate(scaled.min(u64::MAX - 1))
    }

    fn reset(&mut self) {
        self.evals = 0;
        self.inner.reset();
    }

    fn evaluations(&self) -> u64 {
        self.evals
    }
}
