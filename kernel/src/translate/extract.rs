//! Fact extraction from normalized expressions.

use std::collections::BTreeSet;

use crate::expr::{ExprArena, ExprId, ExprKind};
use crate::lifted::{Atom, Term};
use crate::model::Fact;
use crate::translate::TranslateError;

/// Polarity under which a subtree is being read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// The subtree must hold.
    #[default]
    Positive,
    /// The subtree must not hold.
    Negative,
}

impl Polarity {
    /// The opposite polarity.
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            Self::Positive => Self::Negative,
            Self::Negative => Self::Positive,
        }
    }
}

/// The two disjoint fact sets an expression requires.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredFacts {
    /// Facts the expression requires to be true.
    pub positive: BTreeSet<Fact>,
    /// Facts the expression requires to be false.
    pub negative: BTreeSet<Fact>,
}

/// Decompose a normalized expression into positively and negatively
/// required fact sets.
///
/// Accepts only `TriviallyTrue`, ground `Atom`, `Not`, and `And` nodes:
/// negation flips the polarity for its subtree, conjunction merges children
/// under the same polarity, an atom contributes one fact under the current
/// polarity, and trivially-true contributes nothing. This function assumes
/// prior normalization and does not itself normalize.
///
/// Pure: the arena is never mutated, and identical input always produces
/// identical output.
///
/// # Errors
///
/// [`TranslateError::UnsupportedExpression`] for any other node kind, or
/// for an atom still carrying an unbound variable.
pub fn extract_facts(
    arena: &ExprArena,
    id: ExprId,
    polarity: Polarity,
) -> Result<RequiredFacts, TranslateError> {
    let mut required = RequiredFacts::default();
    collect(arena, id, polarity, &mut required)?;
    Ok(required)
}

fn collect(
    arena: &ExprArena,
    id: ExprId,
    polarity: Polarity,
    required: &mut RequiredFacts,
) -> Result<(), TranslateError> {
    match arena.kind(id) {
        ExprKind::TriviallyTrue => Ok(()),
        ExprKind::Atom(atom) => {
            let fact = ground_fact(atom)?;
            match polarity {
                Polarity::Positive => required.positive.insert(fact),
                Polarity::Negative => required.negative.insert(fact),
            };
            Ok(())
        }
        ExprKind::Not(child) => collect(arena, *child, polarity.flipped(), required),
        ExprKind::And(children) => {
            for child in children {
                collect(arena, *child, polarity, required)?;
            }
            Ok(())
        }
        other @ (ExprKind::Or(_)
        | ExprKind::Imply(..)
        | ExprKind::Exists { .. }
        | ExprKind::Forall { .. }) => Err(TranslateError::UnsupportedExpression {
            detail: format!("fact extraction cannot process node kind {}", kind_name(other)),
        }),
    }
}

fn kind_name(kind: &ExprKind) -> &'static str {
    match kind {
        ExprKind::TriviallyTrue => "TriviallyTrue",
        ExprKind::Atom(_) => "Atom",
        ExprKind::Not(_) => "Not",
        ExprKind::And(_) => "And",
        ExprKind::Or(_) => "Or",
        ExprKind::Imply(..) => "Imply",
        ExprKind::Exists { .. } => "Exists",
        ExprKind::Forall { .. } => "Forall",
    }
}

/// Convert a ground atom into a [`Fact`].
///
/// # Errors
///
/// [`TranslateError::UnsupportedExpression`] if any term is still a
/// variable (the expression was not fully grounded before extraction).
pub fn ground_fact(atom: &Atom) -> Result<Fact, TranslateError> {
    let mut args = Vec::with_capacity(atom.terms.len());
    for term in &atom.terms {
        match term {
            Term::Object(name) => args.push(name.clone()),
            Term::Variable(name) => {
                return Err(TranslateError::UnsupportedExpression {
                    detail: format!(
                        "atom ({} ...) still carries unbound variable {name}",
                        atom.predicate
                    ),
                })
            }
        }
    }
    Ok(Fact::new(atom.predicate.clone(), args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifted::Atom;

    #[test]
    fn polarity_splits_positive_and_negative() {
        let mut arena = ExprArena::truth();
        let p = arena.atom(Atom::ground("p", &["a"]));
        let q = arena.atom(Atom::ground("q", &[]));
        let nq = arena.not(q);
        let t = arena.truth_node();
        let root = arena.and(vec![p, nq, t]);
        arena.set_root(root);

        let req = extract_facts(&arena, arena.root(), Polarity::Positive).unwrap();
        assert_eq!(req.positive.len(), 1);
        assert_eq!(req.negative.len(), 1);
        assert!(req.positive.contains(&Fact::new("p", vec!["a".into()])));
        assert!(req.negative.contains(&Fact::nullary("q")));
    }

    #[test]
    fn starting_polarity_negative_inverts_everything() {
        let mut arena = ExprArena::truth();
        let p = arena.atom(Atom::ground("p", &[]));
        arena.set_root(p);

        let req = extract_facts(&arena, arena.root(), Polarity::Negative).unwrap();
        assert!(req.positive.is_empty());
        assert!(req.negative.contains(&Fact::nullary("p")));
    }

    #[test]
    fn double_negation_restores_polarity() {
        let mut arena = ExprArena::truth();
        let p = arena.atom(Atom::ground("p", &[]));
        let n1 = arena.not(p);
        let n2 = arena.not(n1);
        arena.set_root(n2);

        let req = extract_facts(&arena, arena.root(), Polarity::Positive).unwrap();
        assert!(req.positive.contains(&Fact::nullary("p")));
        assert!(req.negative.is_empty());
    }

    #[test]
    fn disjunction_is_unsupported() {
        let mut arena = ExprArena::truth();
        let p = arena.atom(Atom::ground("p", &[]));
        let q = arena.atom(Atom::ground("q", &[]));
        let or = arena.or(vec![p, q]);
        arena.set_root(or);

        let err = extract_facts(&arena, arena.root(), Polarity::Positive).unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedExpression { .. }));
    }

    #[test]
    fn unbound_variable_is_unsupported() {
        let mut arena = ExprArena::truth();
        let p = arena.atom(Atom {
            predicate: "p".into(),
            terms: vec![crate::lifted::Term::Variable("x".into())],
        });
        arena.set_root(p);

        let err = extract_facts(&arena, arena.root(), Polarity::Positive).unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedExpression { .. }));
    }

    #[test]
    fn extraction_never_mutates_input() {
        let mut arena = ExprArena::truth();
        let p = arena.atom(Atom::ground("p", &[]));
        arena.set_root(p);
        let before = arena.clone();
        let _ = extract_facts(&arena, arena.root(), Polarity::Positive).unwrap();
        assert_eq!(arena, before);
    }
}
