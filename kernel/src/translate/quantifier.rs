//! Universal-quantifier elimination by exhaustive instantiation.

use crate::abort::AbortFlag;
use crate::expr::{ExprArena, ExprKind, SpliceError};
use crate::lifted::GroundingOracle;
use crate::translate::TranslateError;

/// The result of a deconstruction pass.
#[derive(Debug, Clone)]
pub struct Deconstructed {
    /// The rewritten copy. Quantifier-free unless `aborted` is set.
    pub arena: ExprArena,
    /// True if the abort flag stopped the rewrite early. A partial copy
    /// must not be used to ground production plans.
    pub aborted: bool,
}

/// Rewrite a quantifier-bearing expression into an equivalent
/// quantifier-free one.
///
/// Operates on a deep copy; the caller's arena is untouched. Each step
/// locates a remaining `Forall`, asks the oracle for every object of the
/// quantified variable's type, and splices into the parent slot:
///
/// - zero bindings → a trivially-true node,
/// - one binding → the single instantiated body, unwrapped,
/// - N > 1 bindings → a conjunction of the N instantiated bodies.
///
/// The abort flag is polled once per rewrite step; when set, the rewrite
/// stops at the next safe point and returns the partial copy with
/// `aborted = true`. This bounds pathological quantifier expansions without
/// preempting mid-splice.
///
/// # Errors
///
/// [`TranslateError::MalformedTree`] when a quantifier's parent cannot hold
/// a replacement child -- invalid input structure, not a retryable runtime
/// condition.
pub fn deconstruct(
    arena: &ExprArena,
    oracle: &dyn GroundingOracle,
    abort: &AbortFlag,
) -> Result<Deconstructed, TranslateError> {
    let mut work = arena.clone();

    while let Some(target) = work.find_forall() {
        if abort.is_set() {
            return Ok(Deconstructed {
                arena: work,
                aborted: true,
            });
        }

        let ExprKind::Forall { variable, body } = work.kind(target).clone() else {
            unreachable!("find_forall returned a non-Forall node");
        };
        let parent = work.parent(target);

        let objects = oracle.objects_of_type(&variable.type_name).to_vec();
        let replacement = match objects.as_slice() {
            [] => work.truth_node(),
            [only] => work.instantiate(body, &variable.name, only),
            many => {
                let instances = many
                    .iter()
                    .map(|object| work.instantiate(body, &variable.name, object))
                    .collect();
                work.and(instances)
            }
        };

        work.replace_child(parent, target, replacement)
            .map_err(|e| splice_failure(&variable.name, e))?;
    }

    Ok(Deconstructed {
        arena: work,
        aborted: false,
    })
}

fn splice_failure(variable: &str, error: SpliceError) -> TranslateError {
    let detail = match error {
        SpliceError::NoChildSlot => format!(
            "parent of quantifier over {variable} has no child slot to replace"
        ),
        SpliceError::ChildNotFound => format!(
            "parent of quantifier over {variable} does not reference it as a child"
        ),
    };
    TranslateError::MalformedTree { detail }
}
