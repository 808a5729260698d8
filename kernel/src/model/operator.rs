//! Ground operators: concrete action instances over interned facts.

use std::collections::BTreeSet;

use crate::model::fact::FactId;

/// Stable index of an operator within a declaration (and within the search
/// engine's live operator list, which extends the declaration's by appending
/// learned macros).
pub type OperatorId = usize;

/// A ground action: applicability conditions and effects over fact ids.
///
/// Immutable once produced by the translator. Precondition checks and effect
/// application never mutate the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator {
    /// Human-readable ground name, e.g. `(stack a b)`.
    pub name: String,
    /// Facts that must be true for the operator to apply.
    pub pre_pos: BTreeSet<FactId>,
    /// Facts that must be false for the operator to apply.
    pub pre_neg: BTreeSet<FactId>,
    /// Facts made true by application.
    pub add: BTreeSet<FactId>,
    /// Facts made false by application.
    pub del: BTreeSet<FactId>,
    /// Application cost (unit for most domains).
    pub cost: u64,
}

impl Operator {
    /// Whether this operator applies in `state`: every positive precondition
    /// holds and no negative precondition does.
    #[must_use]
    pub fn is_applicable(&self, state: &BTreeSet<FactId>) -> bool {
        self.pre_pos.iter().all(|f| state.contains(f))
            && self.pre_neg.iter().all(|f| !state.contains(f))
    }

    /// The successor state: `(state ∖ del) ∪ add`.
    ///
    /// Callers are expected to have checked [`Self::is_applicable`] first;
    /// applying an inapplicable operator still produces a well-formed set,
    /// just not a reachable one.
    #[must_use]
    pub fn apply(&self, state: &BTreeSet<FactId>) -> BTreeSet<FactId> {
        let mut next: BTreeSet<FactId> = state.difference(&self.del).copied().collect();
        next.extend(self.add.iter().copied());
        next
    }

    /// Whether the precondition requires some fact both true and false.
    /// Such an operator can never apply and must not reach the search engine.
    #[must_use]
    pub fn is_contradictory(&self) -> bool {
        self.pre_pos.intersection(&self.pre_neg).next().is_some()
    }
}
