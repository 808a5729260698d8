//! Relaxed-reachability heuristic (delete-free planning graph).

use std::collections::{BTreeSet, HashMap, HashSet};

use strider_kernel::model::{FactId, OperatorId};

use crate::heuristic::{Estimate, EvalContext, Heuristic};
use crate::node::SearchNode;

/// Estimates cost-to-goal by building layered fact sets reachable under
/// delete-free operator application, then extracting a minimal relaxed plan
/// backwards through the layers.
///
/// The relaxation drops delete effects and negative preconditions, so the
/// estimate is fast and goal-aware but inadmissible in general. When the
/// fixpoint never covers the goal the state is a dead end even in the
/// relaxation, and the unreachable sentinel is returned.
#[derive(Debug, Clone, Default)]
pub struct RelaxedReachabilityHeuristic {
    evals: u64,
}

impl RelaxedReachabilityHeuristic {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Heuristic for RelaxedReachabilityHeuristic {
    fn evaluate(
        &mut self,
        node: &SearchNode,
        ctx: &EvalContext<'_>,
        _applicable: &[OperatorId],
    ) -> Estimate {
        self.evals += 1;
        relaxed_plan_size(&node.state, ctx).map_or(Estimate::UNREACHABLE, Estimate)
    }

    fn reset(&mut self) {
        self.evals = 0;
    }

    fn evaluations(&self) -> u64 {
        self.evals
    }
}

/// Size of a minimal relaxed plan from `state` to the goal, or `None` when
/// the delete-free fixpoint never satisfies the goal.
fn relaxed_plan_size(state: &BTreeSet<FactId>, ctx: &EvalContext<'_>) -> Option<u64> {
    let goal = ctx.declaration.goal();

    // Forward pass: layer each fact with the step at which it first becomes
    // reachable, remembering its earliest achiever.
    let mut fact_layer: HashMap<FactId, usize> =
        state.iter().map(|&f| (f, 0)).collect();
    let mut achiever: HashMap<FactId, OperatorId> = HashMap::new();
    let mut applied = vec![false; ctx.operators.len()];
    let mut layer = 0;

    while !goal.iter().all(|f| fact_layer.contains_key(f)) {
        let mut discovered: Vec<(FactId, OperatorId)> = Vec::new();
        for (oid, op) in ctx.operators.iter().enumerate() {
            if applied[oid] || !op.pre_pos.iter().all(|f| fact_layer.contains_key(f)) {
                continue;
            }
            applied[oid] = true;
            for &f in &op.add {
                if !fact_layer.contains_key(&f) {
                    discovered.push((f, oid));
                }
            }
        }
        if discovered.is_empty() {
            return None; // fixpoint reached, goal still uncovered
        }
        layer += 1;
        for (f, oid) in discovered {
            fact_layer.entry(f).or_insert_with(|| {
                achiever.insert(f, oid);
                layer
            });
        }
    }

    // Backward pass: collect the achievers of every goal fact and,
    // transitively, of their preconditions, stopping at layer-0 facts.
    let mut selected: BTreeSet<OperatorId> = BTreeSet::new();
    let mut seen: HashSet<FactId> = goal.iter().copied().collect();
    let mut pending: Vec<FactId> = goal
        .iter()
        .copied()
        .filter(|f| fact_layer[f] > 0)
        .collect();

    while let Some(fact) = pending.pop() {
        let oid = achiever[&fact];
        if selected.insert(oid) {
            for &pre in &ctx.operators[oid].pre_pos {
                if seen.insert(pre) && fact_layer[&pre] > 0 {
                    pending.push(pre);
                }
            }
        }
    }

    Some(selected.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::test_support::{context_fixture, root_node};

    #[test]
    fn counts_the_relaxed_plan_not_the_layers() {
        let (decl, ops) = context_fixture();
        let ctx = EvalContext {
            declaration: &decl,
            operators: &ops,
        };
        let node = root_node(&decl);
        let mut h = RelaxedReachabilityHeuristic::new();
        // (make-q) then (make-r): two operators in the minimal relaxed plan.
        assert_eq!(h.evaluate(&node, &ctx, &[]), Estimate(2));
    }

    #[test]
    fn satisfied_goal_estimates_zero() {
        let (decl, ops) = context_fixture();
        let ctx = EvalContext {
            declaration: &decl,
            operators: &ops,
        };
        let mut node = root_node(&decl);
        node.state.extend(decl.goal().iter().copied());
        let mut h = RelaxedReachabilityHeuristic::new();
        assert_eq!(h.evaluate(&node, &ctx, &[]), Estimate::ZERO);
    }

    #[test]
    fn uncovered_goal_is_the_unreachable_sentinel() {
        let (decl, ops) = context_fixture();
        let ctx = EvalContext {
            declaration: &decl,
            operators: &ops,
        };
        let mut node = root_node(&decl);
        // Strip the only fact enabling any operator.
        node.state.clear();
        let mut h = RelaxedReachabilityHeuristic::new();
        assert_eq!(h.evaluate(&node, &ctx, &[]), Estimate::UNREACHABLE);
        assert_eq!(h.evaluations(), 1);
    }
}
