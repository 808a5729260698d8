//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures only. Runtime terminations
//! (budget exhaustion, deadlines, cooperative aborts) are expressed through
//! [`crate::engine::SearchOutcome`] and always carry search statistics.

/// Typed failure for pre-flight search validation.
///
/// These errors are returned before any node is expanded, so no statistics
/// are produced alongside them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A policy field holds a value the engine cannot honor.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => {
                write!(f, "invalid search policy: {detail}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
