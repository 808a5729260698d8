//! Atomic propositions and the interned fact table.

use std::collections::HashMap;
use std::fmt;

/// Reserved predicate-name prefix marking the negated counterpart of a fact.
///
/// The transform is additive, not an involution: negating `p` yields `~p`,
/// negating `~p` yields `~~p`, which is a distinct fact from `p`.
pub const NEGATION_PREFIX: &str = "~";

/// Stable index of a fact within a [`FactTable`].
pub type FactId = usize;

/// An atomic proposition: predicate name plus ordered argument names.
///
/// Equality, hashing, and ordering are structural (name + arguments),
/// independent of where or when the fact was constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fact {
    predicate: String,
    args: Vec<String>,
}

impl Fact {
    /// Construct a fact from a predicate name and argument names.
    #[must_use]
    pub fn new(predicate: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            predicate: predicate.into(),
            args,
        }
    }

    /// Construct a zero-arity fact.
    #[must_use]
    pub fn nullary(predicate: impl Into<String>) -> Self {
        Self::new(predicate, Vec::new())
    }

    /// The predicate name.
    #[must_use]
    pub fn predicate(&self) -> &str {
        &self.predicate
    }

    /// The ordered argument names.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The negated counterpart: same arguments, predicate prefixed with
    /// [`NEGATION_PREFIX`].
    ///
    /// Applying this twice does not cancel out.
    #[must_use]
    pub fn negated(&self) -> Self {
        Self {
            predicate: format!("{NEGATION_PREFIX}{}", self.predicate),
            args: self.args.clone(),
        }
    }

    /// Whether this fact carries the reserved negation prefix.
    #[must_use]
    pub fn is_negated(&self) -> bool {
        self.predicate.starts_with(NEGATION_PREFIX)
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.predicate)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        write!(f, ")")
    }
}

/// Interning table assigning each distinct fact a stable [`FactId`].
///
/// Ids are assigned in first-intern order and never change, so downstream
/// consumers (states, operators, fingerprints) can address facts by index.
#[derive(Debug, Clone, Default)]
pub struct FactTable {
    facts: Vec<Fact>,
    index: HashMap<Fact, FactId>,
}

impl FactTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a fact, returning its id. Re-interning an equal fact returns
    /// the original id.
    pub fn intern(&mut self, fact: Fact) -> FactId {
        if let Some(&id) = self.index.get(&fact) {
            return id;
        }
        let id = self.facts.len();
        self.index.insert(fact.clone(), id);
        self.facts.push(fact);
        id
    }

    /// Look up the id of an already-interned fact.
    #[must_use]
    pub fn id_of(&self, fact: &Fact) -> Option<FactId> {
        self.index.get(fact).copied()
    }

    /// The fact at `id`, or `None` if out of range.
    #[must_use]
    pub fn get(&self, id: FactId) -> Option<&Fact> {
        self.facts.get(id)
    }

    /// Number of interned facts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Iterate facts in id order.
    pub fn iter(&self) -> impl Iterator<Item = (FactId, &Fact)> {
        self.facts.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality_ignores_construction_site() {
        let a = Fact::new("at", vec!["truck".into(), "depot".into()]);
        let b = Fact::new(String::from("at"), vec!["truck".into(), "depot".into()]);
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "(at truck depot)");
    }

    #[test]
    fn negation_is_not_an_involution() {
        let p = Fact::nullary("handempty");
        let not_p = p.negated();
        let not_not_p = not_p.negated();
        assert_ne!(p, not_p);
        assert_ne!(p, not_not_p, "double negation must not cancel out");
        assert!(not_p.is_negated());
        assert_eq!(not_p.predicate(), "~handempty");
        assert_eq!(not_not_p.predicate(), "~~handempty");
    }

    #[test]
    fn intern_is_idempotent_and_ids_are_stable() {
        let mut table = FactTable::new();
        let p = table.intern(Fact::nullary("p"));
        let q = table.intern(Fact::nullary("q"));
        assert_ne!(p, q);
        assert_eq!(table.intern(Fact::nullary("p")), p);
        assert_eq!(table.id_of(&Fact::nullary("q")), Some(q));
        assert_eq!(table.len(), 2);
        assert_eq!(table.get(p).unwrap().predicate(), "p");
    }

    #[test]
    fn unknown_fact_has_no_id() {
        let table = FactTable::new();
        assert_eq!(table.id_of(&Fact::nullary("ghost")), None);
        assert!(table.get(0).is_none());
    }
}
