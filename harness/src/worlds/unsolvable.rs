//! `Unsolvable`: a two-state toggle whose goal no operator ever adds.
//!
//! Exhaustion fixtures need a space the search can enumerate completely;
//! this one has exactly two reachable states.

use strider_kernel::expr::ExprArena;
use strider_kernel::lifted::{ActionSchema, Atom, LiftedProblem};

use crate::worlds::PlanningWorld;

/// Unsolvable fixture with two reachable states.
pub struct Unsolvable;

fn toggle(name: &str, from: &str, to: &str) -> ActionSchema {
    let mut pre = ExprArena::truth();
    let at = pre.atom(Atom::ground(from, &[]));
    pre.set_root(at);

    let mut eff = ExprArena::truth();
    let gained = eff.atom(Atom::ground(to, &[]));
    let lost = eff.atom(Atom::ground(from, &[]));
    let no_lost = eff.not(lost);
    let root = eff.and(vec![gained, no_lost]);
    eff.set_root(root);

    ActionSchema {
        name: name.into(),
        parameters: Vec::new(),
        precondition: pre,
        effect: eff,
        cost: 1,
    }
}

impl PlanningWorld for Unsolvable {
    fn name(&self) -> &str {
        "unsolvable"
    }

    fn problem(&self) -> LiftedProblem {
        let mut goal = ExprArena::truth();
        // "jammed" appears in no effect, so the goal is unreachable.
        let jammed = goal.atom(Atom::ground("jammed", &[]));
        goal.set_root(jammed);

        LiftedProblem {
            name: "toggle-unsolvable".into(),
            objects: Vec::new(),
            schemas: vec![toggle("flip-up", "down", "up"), toggle("flip-down", "up", "down")],
            init: vec![Atom::ground("down", &[])],
            goal,
        }
    }
}
