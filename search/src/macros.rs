//! Macro-operator learning.
//!
//! A macro operator is the sequential composition of two primitive operators
//! that the search chained often enough to be worth a single step. Learning
//! runs as a two-pass search: the first pass counts consecutive operator
//! pairs along generated successors, promoted pairs are composed into fresh
//! operators, and the second pass searches with the extended operator set.

use std::collections::BTreeMap;

use strider_kernel::abort::AbortFlag;
use strider_kernel::model::{Declaration, Operator, OperatorId};

use crate::engine::{run_search, SearchPolicy, SearchRun};
use crate::error::SearchError;
use crate::heuristic::Heuristic;

/// Promotion thresholds for macro learning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroPolicy {
    /// Minimum number of observed chainings before a pair is promoted.
    pub min_support: u64,
    /// Hard cap on promoted macros per learning run.
    pub max_macros: usize,
}

impl MacroPolicy {
    /// Validate the thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] when a threshold is zero, which
    /// would promote unobserved pairs or learn nothing at all.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.min_support == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "macro min_support must be at least 1".into(),
            });
        }
        if self.max_macros == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "macro max_macros must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for MacroPolicy {
    fn default() -> Self {
        Self {
            min_support: 3,
            max_macros: 8,
        }
    }
}

/// A promoted macro: the composed operator plus the primitive parts it
/// stands for, in application order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LearnedMacro {
    pub operator: Operator,
    pub parts: Vec<OperatorId>,
}

/// Counts consecutive operator pairs observed during successor generation.
#[derive(Debug, Default)]
pub(crate) struct PairCounter {
    counts: BTreeMap<(OperatorId, OperatorId), u64>,
}

impl PairCounter {
    pub(crate) fn record(&mut self, first: OperatorId, second: OperatorId) {
        *self.counts.entry((first, second)).or_insert(0) += 1;
    }
}

/// Compose `first; second` into one operator, or `None` when the pair does
/// not chain: `second` must not require a fact `first` deletes without
/// re-adding, nor forbid a fact `first` adds.
fn compose(first: &Operator, second: &Operator) -> Option<Operator> {
    if second
        .pre_pos
        .iter()
        .any(|f| first.del.contains(f) && !first.add.contains(f))
    {
        return None;
    }
    if second.pre_neg.iter().any(|f| first.add.contains(f)) {
        return None;
    }

    let pre_pos = first
        .pre_pos
        .iter()
        .chain(second.pre_pos.difference(&first.add))
        .copied()
        .collect();
    let pre_neg = first
        .pre_neg
        .iter()
        .chain(second.pre_neg.difference(&first.del))
        .copied()
        .collect();
    let add = first
        .add
        .difference(&second.del)
        .chain(second.add.iter())
        .copied()
        .collect();
    let del = first
        .del
        .difference(&second.add)
        .chain(second.del.iter())
        .copied()
        .collect();

    let composed = Operator {
        name: format!("{}+{}", first.name, second.name),
        pre_pos,
        pre_neg,
        add,
        del,
        cost: first.cost.saturating_add(second.cost),
    };
    if composed.is_contradictory() {
        return None;
    }
    Some(composed)
}

/// Promote the best-supported pairs into macro operators.
///
/// Pairs are ranked by support descending, then by pair key ascending so the
/// selection is deterministic. Pairs that fail to compose are skipped without
/// consuming a promotion slot.
fn promote(
    declaration: &Declaration,
    counter: &PairCounter,
    policy: &MacroPolicy,
) -> Vec<LearnedMacro> {
    let mut ranked: Vec<(&(OperatorId, OperatorId), &u64)> = counter
        .counts
        .iter()
        .filter(|(_, &count)| count >= policy.min_support)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut macros = Vec::new();
    for (&(first_id, second_id), _) in ranked {
        if macros.len() >= policy.max_macros {
            break;
        }
        let first = &declaration.operators()[first_id];
        let second = &declaration.operators()[second_id];
        if let Some(operator) = compose(first, second) {
            macros.push(LearnedMacro {
                operator,
                parts: vec![first_id, second_id],
            });
        }
    }
    macros
}

/// Result of a macro-learning search: the final run plus the macros that the
/// plan may reference. Feed the macros to [`crate::plan::Plan::expand_macros`]
/// to recover a primitive plan.
#[derive(Debug)]
pub struct MacroSearchRun {
    pub run: SearchRun,
    pub macros: Vec<LearnedMacro>,
}

/// Two-pass best-first search with macro promotion between the passes.
///
/// When no pair clears `min_support` the first pass stands as the result and
/// no macros are reported.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] for out-of-range policy values.
pub fn macro_learning_search(
    declaration: &Declaration,
    heuristic: &mut dyn Heuristic,
    policy: &SearchPolicy,
    macro_policy: &MacroPolicy,
    abort: &AbortFlag,
) -> Result<MacroSearchRun, SearchError> {
    policy.validate()?;
    macro_policy.validate()?;

    let mut counter = PairCounter::default();
    let operators = declaration.operators().to_vec();
    heuristic.reset();
    let first_pass = run_search(
        declaration,
        &operators,
        heuristic,
        policy,
        abort,
        Some(&mut counter),
    );

    let macros = promote(declaration, &counter, macro_policy);
    if macros.is_empty() {
        return Ok(MacroSearchRun {
            run: first_pass,
            macros,
        });
    }

    let mut extended = operators;
    extended.extend(macros.iter().map(|m| m.operator.clone()));
    heuristic.reset();
    let run = run_search(declaration, &extended, heuristic, policy, abort, None);
    Ok(MacroSearchRun { run, macros })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::test_support::context_fixture;

    #[test]
    fn zero_support_policy_rejected() {
        let policy = MacroPolicy {
            min_support: 0,
            ..MacroPolicy::default()
        };
        let err = policy.validate().unwrap_err();
        assert!(matches!(err, SearchError::InvalidPolicy { .. }));
    }

    #[test]
    fn compose_chains_compatible_operators() {
        let (decl, _) = context_fixture();
        // (make-q): {p} => +q -p, then (make-r): {q} => +r.
        let composed = compose(&decl.operators()[0], &decl.operators()[1]).unwrap();
        assert_eq!(composed.name, "(make-q)+(make-r)");
        let p = *decl.operators()[0].pre_pos.iter().next().unwrap();
        // The internally satisfied precondition q does not leak outward.
        assert_eq!(composed.pre_pos.iter().copied().collect::<Vec<_>>(), vec![p]);
        assert!(composed.del.contains(&p));
        let r = *decl.goal().iter().next().unwrap();
        assert!(composed.add.contains(&r));
    }

    #[test]
    fn compose_rejects_broken_chains() {
        let (decl, _) = context_fixture();
        // (make-q) deletes p without re-adding it, so (make-q); (make-q)
        // cannot chain.
        assert!(compose(&decl.operators()[0], &decl.operators()[0]).is_none());
    }

    #[test]
    fn promotion_respects_support_and_cap() {
        let (decl, _) = context_fixture();
        let mut counter = PairCounter::default();
        for _ in 0..5 {
            counter.record(0, 1);
        }
        counter.record(1, 0);

        let policy = MacroPolicy {
            min_support: 3,
            max_macros: 8,
        };
        let macros = promote(&decl, &counter, &policy);
        assert_eq!(macros.len(), 1);
        assert_eq!(macros[0].parts, vec![0, 1]);
    }
}
