//! Heuristic estimators and combinators.
//!
//! Every type here implements the [`Heuristic`] capability; combinators own
//! their children by value (composition, not inheritance).
//!
//! [`Heuristic`]: crate::heuristic::Heuristic

mod combine;
mod constant;
mod goal_count;
mod path;
mod relaxed;
mod weighted;

pub use combine::{MaxCombinator, SumCombinator};
pub use constant::ConstantHeuristic;
pub use goal_count::GoalCountHeuristic;
pub use path::PathHeuristic;
pub use relaxed::RelaxedReachabilityHeuristic;
pub use weighted::WeightedHeuristic;

#[cfg(test)]
pub(crate) mod test_support {
    //! A tiny two-step declaration shared by heuristic unit tests:
    //! init {p}, goal {r}, (make-q): p ⊢ +q −p, (make-r): q ⊢ +r.

    use std::collections::BTreeSet;

    use strider_kernel::model::{Declaration, Fact, FactTable, Operator};

    use crate::node::SearchNode;

    pub fn context_fixture() -> (Declaration, Vec<Operator>) {
        let mut facts = FactTable::new();
        let p = facts.intern(Fact::nullary("p"));
        let q = facts.intern(Fact::nullary("q"));
        let r = facts.intern(Fact::nullary("r"));
        let make_q = Operator {
            name: "(make-q)".into(),
            pre_pos: [p].into_iter().collect(),
            pre_neg: BTreeSet::new(),
            add: [q].into_iter().collect(),
            del: [p].into_iter().collect(),
            cost: 1,
        };
        let make_r = Operator {
            name: "(make-r)".into(),
            pre_pos: [q].into_iter().collect(),
            pre_neg: BTreeSet::new(),
            add: [r].into_iter().collect(),
            del: BTreeSet::new(),
            cost: 1,
        };
        let decl = Declaration::new(
            facts,
            vec![make_q, make_r],
            [p].into_iter().collect(),
            [r].into_iter().collect(),
        )
        .unwrap();
        let ops = decl.operators().to_vec();
        (decl, ops)
    }

    pub fn root_node(decl: &Declaration) -> SearchNode {
        SearchNode {
            id: 0,
            parent: None,
            operator: None,
            state: decl.init().clone(),
            depth: 0,
        }
    }
}
