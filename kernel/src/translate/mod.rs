//! Translation: from a lifted problem to a propositional [`Declaration`].
//!
//! [`Declaration`]: crate::model::Declaration

pub mod extract;
pub mod quantifier;
mod translator;

pub use extract::{extract_facts, Polarity, RequiredFacts};
pub use quantifier::{deconstruct, Deconstructed};
pub use translator::translate;

/// Typed failure for the translation pipeline.
///
/// All variants are unrecoverable: translation aborts immediately and never
/// yields a partially-built declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// A node kind outside the supported grammar survived normalization
    /// (disjunction, implication, existential quantifier, or an atom with an
    /// unbound variable).
    UnsupportedExpression { detail: String },
    /// A quantifier rewrite target has no replaceable parent slot. The input
    /// tree structure is invalid.
    MalformedTree { detail: String },
    /// The abort flag was set before translation completed.
    Aborted,
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedExpression { detail } => {
                write!(f, "unsupported expression: {detail}")
            }
            Self::MalformedTree { detail } => write!(f, "malformed expression tree: {detail}"),
            Self::Aborted => write!(f, "translation aborted by caller"),
        }
    }
}

impl std::error::Error for TranslateError {}
