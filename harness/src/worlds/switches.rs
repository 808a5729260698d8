//! `Switches`: flip every switch on, recharging between flips.
//!
//! Each flip consumes the charge that only `crank` produces, so solving
//! plans alternate crank/flip pairs. This is the macro-learning fixture:
//! the pair statistics concentrate on (crank, flip) chainings.

use strider_kernel::expr::ExprArena;
use strider_kernel::lifted::{ActionSchema, Atom, LiftedProblem, Parameter, Term};

use crate::worlds::PlanningWorld;

/// Crank-and-flip fixture over three switches.
pub struct Switches;

fn crank() -> ActionSchema {
    let mut pre = ExprArena::truth();
    let charged = pre.atom(Atom::ground("charged", &[]));
    let uncharged = pre.not(charged);
    pre.set_root(uncharged);

    let mut eff = ExprArena::truth();
    let charged = eff.atom(Atom::ground("charged", &[]));
    eff.set_root(charged);

    ActionSchema {
        name: "crank".into(),
        parameters: Vec::new(),
        precondition: pre,
        effect: eff,
        cost: 1,
    }
}

fn flip() -> ActionSchema {
    let s = || Term::Variable("s".into());

    let mut pre = ExprArena::truth();
    let charged = pre.atom(Atom::ground("charged", &[]));
    let on = pre.atom(Atom {
        predicate: "on".into(),
        terms: vec![s()],
    });
    let off = pre.not(on);
    let root = pre.and(vec![charged, off]);
    pre.set_root(root);

    let mut eff = ExprArena::truth();
    let on = eff.atom(Atom {
        predicate: "on".into(),
        terms: vec![s()],
    });
    let charged = eff.atom(Atom::ground("charged", &[]));
    let drained = eff.not(charged);
    let root = eff.and(vec![on, drained]);
    eff.set_root(root);

    ActionSchema {
        name: "flip".into(),
        parameters: vec![Parameter::new("s", "switch")],
        precondition: pre,
        effect: eff,
        cost: 1,
    }
}

impl PlanningWorld for Switches {
    fn name(&self) -> &str {
        "switches"
    }

    fn problem(&self) -> LiftedProblem {
        let mut goal = ExprArena::truth();
        let on_1 = goal.atom(Atom::ground("on", &["s1"]));
        let on_2 = goal.atom(Atom::ground("on", &["s2"]));
        let on_3 = goal.atom(Atom::ground("on", &["s3"]));
        let root = goal.and(vec![on_1, on_2, on_3]);
        goal.set_root(root);

        LiftedProblem {
            name: "switches-3".into(),
            objects: ["s1", "s2", "s3"]
                .iter()
                .map(|s| ((*s).into(), "switch".into()))
                .collect(),
            schemas: vec![crank(), flip()],
            init: Vec::new(),
            goal,
        }
    }
}
