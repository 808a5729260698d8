//! `Gripper`: a two-gripper robot ferrying balls between rooms.
//!
//! The goal is a universal quantifier (every ball in room-b), so this world
//! exercises quantifier deconstruction on the goal expression.

use strider_kernel::expr::ExprArena;
use strider_kernel::lifted::{ActionSchema, Atom, LiftedProblem, Parameter, Term};

use crate::worlds::PlanningWorld;

/// Gripper fixture: two balls, two rooms, two grippers.
pub struct Gripper;

fn var(name: &str) -> Term {
    Term::Variable(name.into())
}

fn obj(name: &str) -> Term {
    Term::Object(name.into())
}

fn lifted(predicate: &str, terms: Vec<Term>) -> Atom {
    Atom {
        predicate: predicate.into(),
        terms,
    }
}

fn move_schema() -> ActionSchema {
    let mut pre = ExprArena::truth();
    let at = pre.atom(lifted("at-robby", vec![var("from")]));
    pre.set_root(at);

    let mut eff = ExprArena::truth();
    let to = eff.atom(lifted("at-robby", vec![var("to")]));
    let from = eff.atom(lifted("at-robby", vec![var("from")]));
    let no_from = eff.not(from);
    let root = eff.and(vec![to, no_from]);
    eff.set_root(root);

    ActionSchema {
        name: "move".into(),
        parameters: vec![Parameter::new("from", "room"), Parameter::new("to", "room")],
        precondition: pre,
        effect: eff,
        cost: 1,
    }
}

fn pick_schema() -> ActionSchema {
    let mut pre = ExprArena::truth();
    let at_ball = pre.atom(lifted("at", vec![var("b"), var("r")]));
    let at_robby = pre.atom(lifted("at-robby", vec![var("r")]));
    let free = pre.atom(lifted("free", vec![var("g")]));
    let root = pre.and(vec![at_ball, at_robby, free]);
    pre.set_root(root);

    let mut eff = ExprArena::truth();
    let carry = eff.atom(lifted("carry", vec![var("b"), var("g")]));
    let at_ball = eff.atom(lifted("at", vec![var("b"), var("r")]));
    let no_at = eff.not(at_ball);
    let free = eff.atom(lifted("free", vec![var("g")]));
    let no_free = eff.not(free);
    let root = eff.and(vec![carry, no_at, no_free]);
    eff.set_root(root);

    ActionSchema {
        name: "pick".into(),
        parameters: vec![
            Parameter::new("b", "ball"),
            Parameter::new("r", "room"),
            Parameter::new("g", "gripper"),
        ],
        precondition: pre,
        effect: eff,
        cost: 1,
    }
}

fn drop_schema() -> ActionSchema {
    let mut pre = ExprArena::truth();
    let carry = pre.atom(lifted("carry", vec![var("b"), var("g")]));
    let at_robby = pre.atom(lifted("at-robby", vec![var("r")]));
    let root = pre.and(vec![carry, at_robby]);
    pre.set_root(root);

    let mut eff = ExprArena::truth();
    let at_ball = eff.atom(lifted("at", vec![var("b"), var("r")]));
    let free = eff.atom(lifted("free", vec![var("g")]));
    let carry = eff.atom(lifted("carry", vec![var("b"), var("g")]));
    let no_carry = eff.not(carry);
    let root = eff.and(vec![at_ball, free, no_carry]);
    eff.set_root(root);

    ActionSchema {
        name: "drop".into(),
        parameters: vec![
            Parameter::new("b", "ball"),
            Parameter::new("r", "room"),
            Parameter::new("g", "gripper"),
        ],
        precondition: pre,
        effect: eff,
        cost: 1,
    }
}

impl PlanningWorld for Gripper {
    fn name(&self) -> &str {
        "gripper"
    }

    fn problem(&self) -> LiftedProblem {
        // Goal: every ball ends up in room-b.
        let mut goal = ExprArena::truth();
        let at = goal.atom(lifted("at", vec![var("b"), obj("room-b")]));
        let all = goal.forall(Parameter::new("b", "ball"), at);
        goal.set_root(all);

        LiftedProblem {
            name: "gripper-2".into(),
            objects: vec![
                ("room-a".into(), "room".into()),
                ("room-b".into(), "room".into()),
                ("ball-1".into(), "ball".into()),
                ("ball-2".into(), "ball".into()),
                ("left".into(), "gripper".into()),
                ("right".into(), "gripper".into()),
            ],
            schemas: vec![move_schema(), pick_schema(), drop_schema()],
            init: vec![
                Atom::ground("at-robby", &["room-a"]),
                Atom::ground("free", &["left"]),
                Atom::ground("free", &["right"]),
                Atom::ground("at", &["ball-1", "room-a"]),
                Atom::ground("at", &["ball-2", "room-a"]),
            ],
            goal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strider_kernel::abort::AbortFlag;
    use strider_kernel::lifted::TypedObjectIndex;
    use strider_kernel::translate::translate;

    #[test]
    fn quantified_goal_grounds_to_one_fact_per_ball() {
        let problem = Gripper.problem();
        let oracle = TypedObjectIndex::from_problem(&problem);
        let decl = translate(&problem, &oracle, &AbortFlag::new()).unwrap();
        assert_eq!(decl.goal().len(), 2);
        // move: 4, pick: 2*2*2 = 8, drop: 8.
        assert_eq!(decl.operators().len(), 20);
    }
}
