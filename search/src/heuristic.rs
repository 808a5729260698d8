//! The heuristic contract shared by every estimator and combinator.

use strider_kernel::model::{Declaration, Operator, OperatorId};

use crate::node::SearchNode;

/// A non-negative cost-to-goal estimate.
///
/// `Estimate::UNREACHABLE` is the reserved sentinel for "the goal cannot be
/// reached from here under this heuristic's model"; it is also the maximum
/// representable estimate, so saturating arithmetic and sentinel
/// propagation agree by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Estimate(pub u64);

impl Estimate {
    /// Zero cost: the goal is already satisfied.
    pub const ZERO: Estimate = Estimate(0);
    /// The reserved "unreachable" sentinel (maximum representable value).
    pub const UNREACHABLE: Estimate = Estimate(u64::MAX);

    /// Whether this is the unreachable sentinel.
    #[must_use]
    pub fn is_unreachable(self) -> bool {
        self == Self::UNREACHABLE
    }

    /// Saturating addition: totals clamp at the maximum instead of wrapping.
    #[must_use]
    pub fn saturating_add(self, other: Estimate) -> Estimate {
        Estimate(self.0.saturating_add(other.0))
    }
}

/// Read-only evaluation context handed to every heuristic call.
///
/// Heuristics share the declaration with the engine for the whole run; the
/// context adds the live operator list, which may be longer than the
/// declaration's when macro learning has appended composites.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    /// The immutable propositional declaration.
    pub declaration: &'a Declaration,
    /// The engine's live operator list (declaration operators plus any
    /// learned macros).
    pub operators: &'a [Operator],
}

/// The capability every heuristic variant and combinator implements.
///
/// Evaluation is a blocking, synchronous call on the worker driving
/// expansion. Implementations carry only their own counters as mutable
/// state; each `evaluate` call increments the counter exactly once, and
/// `reset` zeroes it (combinators and wrappers cascade the reset to their
/// children).
pub trait Heuristic {
    /// Estimate the cost to reach the goal from `node`.
    ///
    /// `applicable` lists the operators applicable at `node` (indices into
    /// `ctx.operators`); estimators that don't need it ignore it.
    fn evaluate(
        &mut self,
        node: &SearchNode,
        ctx: &EvalContext<'_>,
        applicable: &[OperatorId],
    ) -> Estimate;

    /// Zero the evaluation counter (cascading to children, if any).
    fn reset(&mut self);

    /// Number of `evaluate` calls since construction or the last `reset`.
    fn evaluations(&self) -> u64;
}
