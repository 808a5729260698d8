//! The immutable propositional declaration produced by translation.

use std::collections::BTreeSet;

use crate::model::fact::{FactId, FactTable};
use crate::model::operator::Operator;

/// Construction-time validation failure for a [`Declaration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationError {
    /// An operator references a fact id outside the fact table.
    FactIdOutOfRange { operator: String, id: FactId },
    /// The initial state or goal references a fact id outside the fact table.
    StateIdOutOfRange { which: &'static str, id: FactId },
    /// An operator with a contradictory precondition reached construction.
    ContradictoryOperator { operator: String },
}

impl std::fmt::Display for DeclarationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FactIdOutOfRange { operator, id } => {
                write!(f, "operator {operator} references unknown fact id {id}")
            }
            Self::StateIdOutOfRange { which, id } => {
                write!(f, "{which} references unknown fact id {id}")
            }
            Self::ContradictoryOperator { operator } => {
                write!(f, "operator {operator} has a contradictory precondition")
            }
        }
    }
}

impl std::error::Error for DeclarationError {}

/// The finite propositional planning problem: all facts, all ground
/// operators, the initial fact set, and the goal fact set.
///
/// Immutable after construction. The search engine and every heuristic hold
/// it by shared reference for the duration of a run.
#[derive(Debug, Clone)]
pub struct Declaration {
    facts: FactTable,
    operators: Vec<Operator>,
    init: BTreeSet<FactId>,
    goal: BTreeSet<FactId>,
}

impl Declaration {
    /// Validate and seal a declaration.
    ///
    /// # Errors
    ///
    /// Rejects operators or state sets referencing ids outside the fact
    /// table, and operators with contradictory preconditions (the translator
    /// must have dropped those already).
    pub fn new(
        facts: FactTable,
        operators: Vec<Operator>,
        init: BTreeSet<FactId>,
        goal: BTreeSet<FactId>,
    ) -> Result<Self, DeclarationError> {
        let bound = facts.len();
        for op in &operators {
            if op.is_contradictory() {
                return Err(DeclarationError::ContradictoryOperator {
                    operator: op.name.clone(),
                });
            }
            for &id in op
                .pre_pos
                .iter()
                .chain(&op.pre_neg)
                .chain(&op.add)
                .chain(&op.del)
            {
                if id >= bound {
                    return Err(DeclarationError::FactIdOutOfRange {
                        operator: op.name.clone(),
                        id,
                    });
                }
            }
        }
        for (&id, which) in init
            .iter()
            .map(|id| (id, "initial state"))
            .chain(goal.iter().map(|id| (id, "goal")))
        {
            if id >= bound {
                return Err(DeclarationError::StateIdOutOfRange { which, id });
            }
        }
        Ok(Self {
            facts,
            operators,
            init,
            goal,
        })
    }

    /// The interned fact table.
    #[must_use]
    pub fn facts(&self) -> &FactTable {
        &self.facts
    }

    /// All ground operators, in translation order.
    #[must_use]
    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// The initial fact set.
    #[must_use]
    pub fn init(&self) -> &BTreeSet<FactId> {
        &self.init
    }

    /// The goal fact set.
    #[must_use]
    pub fn goal(&self) -> &BTreeSet<FactId> {
        &self.goal
    }

    /// Whether `state` satisfies the goal (superset check).
    #[must_use]
    pub fn goal_satisfied(&self, state: &BTreeSet<FactId>) -> bool {
        self.goal.iter().all(|f| state.contains(f))
    }
}
