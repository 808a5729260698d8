//! `Blocks`: the classic single-arm block-stacking world.
//!
//! Three blocks start on the table; the goal is the tower a-on-b-on-c.
//! Shortest plan: pick-up b, stack b c, pick-up a, stack a b.

use strider_kernel::expr::ExprArena;
use strider_kernel::lifted::{ActionSchema, Atom, LiftedProblem, Parameter, Term};

use crate::worlds::PlanningWorld;

/// Block-stacking fixture over three blocks.
pub struct Blocks;

fn var(name: &str) -> Term {
    Term::Variable(name.into())
}

fn lifted(predicate: &str, terms: Vec<Term>) -> Atom {
    Atom {
        predicate: predicate.into(),
        terms,
    }
}

fn pick_up() -> ActionSchema {
    let mut pre = ExprArena::truth();
    let clear = pre.atom(lifted("clear", vec![var("x")]));
    let ontable = pre.atom(lifted("ontable", vec![var("x")]));
    let hand = pre.atom(Atom::ground("handempty", &[]));
    let root = pre.and(vec![clear, ontable, hand]);
    pre.set_root(root);

    let mut eff = ExprArena::truth();
    let holding = eff.atom(lifted("holding", vec![var("x")]));
    let ontable = eff.atom(lifted("ontable", vec![var("x")]));
    let no_table = eff.not(ontable);
    let clear = eff.atom(lifted("clear", vec![var("x")]));
    let no_clear = eff.not(clear);
    let hand = eff.atom(Atom::ground("handempty", &[]));
    let no_hand = eff.not(hand);
    let root = eff.and(vec![holding, no_table, no_clear, no_hand]);
    eff.set_root(root);

    ActionSchema {
        name: "pick-up".into(),
        parameters: vec![Parameter::new("x", "block")],
        precondition: pre,
        effect: eff,
        cost: 1,
    }
}

fn put_down() -> ActionSchema {
    let mut pre = ExprArena::truth();
    let holding = pre.atom(lifted("holding", vec![var("x")]));
    pre.set_root(holding);

    let mut eff = ExprArena::truth();
    let ontable = eff.atom(lifted("ontable", vec![var("x")]));
    let clear = eff.atom(lifted("clear", vec![var("x")]));
    let hand = eff.atom(Atom::ground("handempty", &[]));
    let holding = eff.atom(lifted("holding", vec![var("x")]));
    let no_holding = eff.not(holding);
    let root = eff.and(vec![ontable, clear, hand, no_holding]);
    eff.set_root(root);

    ActionSchema {
        name: "put-down".into(),
        parameters: vec![Parameter::new("x", "block")],
        precondition: pre,
        effect: eff,
        cost: 1,
    }
}

fn stack() -> ActionSchema {
    let mut pre = ExprArena::truth();
    let holding = pre.atom(lifted("holding", vec![var("x")]));
    let clear_y = pre.atom(lifted("clear", vec![var("y")]));
    let root = pre.and(vec![holding, clear_y]);
    pre.set_root(root);

    let mut eff = ExprArena::truth();
    let on = eff.atom(lifted("on", vec![var("x"), var("y")]));
    let clear_x = eff.atom(lifted("clear", vec![var("x")]));
    let hand = eff.atom(Atom::ground("handempty", &[]));
    let holding = eff.atom(lifted("holding", vec![var("x")]));
    let no_holding = eff.not(holding);
    let clear_y = eff.atom(lifted("clear", vec![var("y")]));
    let no_clear_y = eff.not(clear_y);
    let root = eff.and(vec![on, clear_x, hand, no_holding, no_clear_y]);
    eff.set_root(root);

    ActionSchema {
        name: "stack".into(),
        parameters: vec![Parameter::new("x", "block"), Parameter::new("y", "block")],
        precondition: pre,
        effect: eff,
        cost: 1,
    }
}

fn unstack() -> ActionSchema {
    let mut pre = ExprArena::truth();
    let on = pre.atom(lifted("on", vec![var("x"), var("y")]));
    let clear_x = pre.atom(lifted("clear", vec![var("x")]));
    let hand = pre.atom(Atom::ground("handempty", &[]));
    let root = pre.and(vec![on, clear_x, hand]);
    pre.set_root(root);

    let mut eff = ExprArena::truth();
    let holding = eff.atom(lifted("holding", vec![var("x")]));
    let clear_y = eff.atom(lifted("clear", vec![var("y")]));
    let on = eff.atom(lifted("on", vec![var("x"), var("y")]));
    let no_on = eff.not(on);
    let clear_x = eff.atom(lifted("clear", vec![var("x")]));
    let no_clear_x = eff.not(clear_x);
    let hand = eff.atom(Atom::ground("handempty", &[]));
    let no_hand = eff.not(hand);
    let root = eff.and(vec![holding, clear_y, no_on, no_clear_x, no_hand]);
    eff.set_root(root);

    ActionSchema {
        name: "unstack".into(),
        parameters: vec![Parameter::new("x", "block"), Parameter::new("y", "block")],
        precondition: pre,
        effect: eff,
        cost: 1,
    }
}

impl PlanningWorld for Blocks {
    fn name(&self) -> &str {
        "blocks"
    }

    fn problem(&self) -> LiftedProblem {
        let mut goal = ExprArena::truth();
        let on_ab = goal.atom(Atom::ground("on", &["a", "b"]));
        let on_bc = goal.atom(Atom::ground("on", &["b", "c"]));
        let root = goal.and(vec![on_ab, on_bc]);
        goal.set_root(root);

        LiftedProblem {
            name: "blocks-3".into(),
            objects: ["a", "b", "c"]
                .iter()
                .map(|b| ((*b).into(), "block".into()))
                .collect(),
            schemas: vec![pick_up(), put_down(), stack(), unstack()],
            init: vec![
                Atom::ground("ontable", &["a"]),
                Atom::ground("ontable", &["b"]),
                Atom::ground("ontable", &["c"]),
                Atom::ground("clear", &["a"]),
                Atom::ground("clear", &["b"]),
                Atom::ground("clear", &["c"]),
                Atom::ground("handempty", &[]),
            ],
            goal,
        }
    }
}
