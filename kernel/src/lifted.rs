//! Lifted input model: the parsed, type-checked problem an external
//! front-end hands to the translator, plus the grounding oracle seam.
//!
//! Grammar and error reporting of the surface syntax are out of scope; the
//! harness builds these values programmatically and a parser front-end would
//! do the same.

use std::collections::BTreeMap;

use crate::expr::ExprArena;

pub use crate::expr::{Atom, Parameter, Term};

/// A parametrized action schema: name, typed parameters, and
/// precondition/effect expression trees.
#[derive(Debug, Clone)]
pub struct ActionSchema {
    pub name: String,
    pub parameters: Vec<Parameter>,
    pub precondition: ExprArena,
    pub effect: ExprArena,
    /// Cost of every ground instance (unit for most domains).
    pub cost: u64,
}

/// The parsed domain/problem pair the translator consumes.
#[derive(Debug, Clone)]
pub struct LiftedProblem {
    pub name: String,
    /// Declared objects as `(object, type)` pairs.
    pub objects: Vec<(String, String)>,
    pub schemas: Vec<ActionSchema>,
    /// Ground atoms true in the initial state.
    pub init: Vec<Atom>,
    /// Goal expression (may quantify over typed objects).
    pub goal: ExprArena,
}

/// Enumerates, for a variable's declared type, every valid concrete object
/// substitution.
///
/// Injected into quantifier deconstruction and schema grounding so the
/// expression machinery never hard-codes a typing discipline. Enumeration
/// must be deterministic: same type name, same ordered object list.
pub trait GroundingOracle {
    /// All objects of `type_name`, in a stable order. Unknown types
    /// enumerate to the empty list.
    fn objects_of_type(&self, type_name: &str) -> &[String];
}

/// The stock oracle: a by-type index over a problem's declared objects.
///
/// Objects of each type are sorted and deduplicated at construction, which
/// fixes the grounding order for the whole run.
#[derive(Debug, Clone, Default)]
pub struct TypedObjectIndex {
    by_type: BTreeMap<String, Vec<String>>,
    empty: Vec<String>,
}

impl TypedObjectIndex {
    /// Build the index from a problem's object declarations.
    #[must_use]
    pub fn from_problem(problem: &LiftedProblem) -> Self {
        let mut by_type: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (object, type_name) in &problem.objects {
            by_type
                .entry(type_name.clone())
                .or_default()
                .push(object.clone());
        }
        for objects in by_type.values_mut() {
            objects.sort();
            objects.dedup();
        }
        Self {
            by_type,
            empty: Vec::new(),
        }
    }
}

impl GroundingOracle for TypedObjectIndex {
    fn objects_of_type(&self, type_name: &str) -> &[String] {
        self.by_type.get(type_name).unwrap_or(&self.empty)
    }
}
