//! Cooperative cancellation flag.
//!
//! Cancellation in this workspace is cooperative only: long-running
//! operations (quantifier deconstruction, search expansion) poll the flag
//! once per step boundary and stop at the next safe point. Nothing is ever
//! preempted mid-operation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared, externally settable abort flag.
///
/// Cloning produces a handle to the same underlying flag, so a caller can
/// keep one clone and hand another to the translator or search engine.
#[derive(Debug, Clone, Default)]
pub struct AbortFlag(Arc<AtomicBool>);

impl AbortFlag {
    /// Create a new, unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next polled step boundary.
    pub fn set(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Clear the flag so the handle can be reused for another run.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
