//! The grounding translator: lifted problem in, propositional declaration out.

use std::collections::BTreeSet;

use crate::abort::AbortFlag;
use crate::expr::ExprArena;
use crate::lifted::{ActionSchema, GroundingOracle, LiftedProblem, Parameter};
use crate::model::{Declaration, Fact, FactId, FactTable, Operator};
use crate::translate::extract::{extract_facts, ground_fact, Polarity, RequiredFacts};
use crate::translate::quantifier::deconstruct;
use crate::translate::TranslateError;

/// Ground a lifted problem into an immutable [`Declaration`].
///
/// Pipeline per expression: normalize to negation-normal conjunctive shape,
/// eliminate universal quantifiers through `oracle`, then either extract
/// fact sets (init/goal) or instantiate every typed parameter binding into a
/// concrete [`Operator`] (action schemas).
///
/// Ground operators whose preconditions are internally contradictory
/// (some fact required both true and false) are omitted from the output, so
/// the search engine never sees a live operator that can never apply.
///
/// Negative goal facts are encoded with the reserved negated-fact
/// counterpart: the goal requires `~p`, the initial state carries `~p` when
/// `p` is absent, and every operator whose net effect asserts or retracts
/// `p` maintains `~p` inversely. An operator listing `p` as both add and
/// delete nets `p` true, so it deletes `~p` rather than asserting it.
///
/// # Errors
///
/// - [`TranslateError::UnsupportedExpression`] when a post-normalization
///   node kind falls outside {trivially-true, atom, negation, conjunction}.
/// - [`TranslateError::MalformedTree`] from quantifier elimination.
/// - [`TranslateError::Aborted`] when the abort flag stops the pipeline; no
///   partial declaration is ever returned.
pub fn translate(
    problem: &LiftedProblem,
    oracle: &dyn GroundingOracle,
    abort: &AbortFlag,
) -> Result<Declaration, TranslateError> {
    let mut facts = FactTable::new();

    // Initial state: ground atoms only.
    let mut init: BTreeSet<FactId> = BTreeSet::new();
    for atom in &problem.init {
        init.insert(facts.intern(ground_fact(atom)?));
    }

    // Goal: normalize, eliminate quantifiers, extract.
    let goal_req = ground_and_extract(&problem.goal, oracle, abort)?;
    let mut goal: BTreeSet<FactId> = goal_req
        .positive
        .iter()
        .map(|f| facts.intern(f.clone()))
        .collect();

    // Action schemas: one operator per valid typed binding.
    let mut operators: Vec<Operator> = Vec::new();
    for schema in &problem.schemas {
        ground_schema(schema, oracle, abort, &mut facts, &mut operators)?;
    }

    // Negative goal facts become their explicit negated counterparts.
    for fact in &goal_req.negative {
        let p = facts.intern(fact.clone());
        let np = facts.intern(fact.negated());
        goal.insert(np);
        if !init.contains(&p) {
            init.insert(np);
        }
        for op in &mut operators {
            // Application deletes before it adds, so an operator listing p
            // on both sides nets p true; only a strict delete earns ~p.
            if op.add.contains(&p) {
                op.del.insert(np);
            } else if op.del.contains(&p) {
                op.add.insert(np);
            }
        }
    }

    if abort.is_set() {
        return Err(TranslateError::Aborted);
    }

    Declaration::new(facts, operators, init, goal)
        .map_err(|e| TranslateError::MalformedTree {
            detail: format!("declaration validation failed: {e}"),
        })
}

/// Normalize, deconstruct, and extract one expression with positive
/// starting polarity.
fn ground_and_extract(
    expr: &ExprArena,
    oracle: &dyn GroundingOracle,
    abort: &AbortFlag,
) -> Result<RequiredFacts, TranslateError> {
    let normalized = expr.normalized();
    let deconstructed = deconstruct(&normalized, oracle, abort)?;
    if deconstructed.aborted {
        return Err(TranslateError::Aborted);
    }
    extract_facts(
        &deconstructed.arena,
        deconstructed.arena.root(),
        Polarity::Positive,
    )
}

fn ground_schema(
    schema: &ActionSchema,
    oracle: &dyn GroundingOracle,
    abort: &AbortFlag,
    facts: &mut FactTable,
    operators: &mut Vec<Operator>,
) -> Result<(), TranslateError> {
    // Quantifiers inside the schema body are eliminated once, before
    // parameter binding; parameters themselves are bound per instance.
    let precondition = {
        let d = deconstruct(&schema.precondition.normalized(), oracle, abort)?;
        if d.aborted {
            return Err(TranslateError::Aborted);
        }
        d.arena
    };
    let effect = {
        let d = deconstruct(&schema.effect.normalized(), oracle, abort)?;
        if d.aborted {
            return Err(TranslateError::Aborted);
        }
        d.arena
    };

    for binding in parameter_bindings(&schema.parameters, oracle) {
        let pre_arena = precondition.substituted(&binding);
        let eff_arena = effect.substituted(&binding);
        let pre = extract_facts(&pre_arena, pre_arena.root(), Polarity::Positive)?;
        let eff = extract_facts(&eff_arena, eff_arena.root(), Polarity::Positive)?;

        // A precondition demanding some fact both true and false can never
        // be satisfied; the instance is dropped here, not flagged dead.
        if pre.positive.intersection(&pre.negative).next().is_some() {
            continue;
        }

        let intern_all = |facts: &mut FactTable, set: &BTreeSet<Fact>| -> BTreeSet<FactId> {
            set.iter().map(|f| facts.intern(f.clone())).collect()
        };
        let pre_pos = intern_all(facts, &pre.positive);
        let pre_neg = intern_all(facts, &pre.negative);
        let add = intern_all(facts, &eff.positive);
        let del = intern_all(facts, &eff.negative);

        operators.push(Operator {
            name: ground_name(&schema.name, &binding),
            pre_pos,
            pre_neg,
            add,
            del,
            cost: schema.cost,
        });
    }
    Ok(())
}

/// Every assignment of typed objects to the schema's parameters, in
/// deterministic (oracle-order) sequence. A parameter whose type has no
/// objects yields no bindings at all.
fn parameter_bindings(
    parameters: &[Parameter],
    oracle: &dyn GroundingOracle,
) -> Vec<Vec<(String, String)>> {
    let mut bindings: Vec<Vec<(String, String)>> = vec![Vec::new()];
    for parameter in parameters {
        let objects = oracle.objects_of_type(&parameter.type_name);
        let mut extended = Vec::with_capacity(bindings.len() * objects.len());
        for prefix in &bindings {
            for object in objects {
                let mut next = prefix.clone();
                next.push((parameter.name.clone(), object.clone()));
                extended.push(next);
            }
        }
        bindings = extended;
    }
    bindings
}

fn ground_name(schema: &str, binding: &[(String, String)]) -> String {
    let mut name = format!("({schema}");
    for (_, object) in binding {
        name.push(' ');
        name.push_str(object);
    }
    name.push(')');
    name
}
