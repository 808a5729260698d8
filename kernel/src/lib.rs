//! Strider Kernel: the propositional core of the planner.
//!
//! # API Surface
//!
//! The kernel exposes three entry points:
//!
//! - [`translate::translate`] -- ground a lifted problem into a [`model::Declaration`]
//! - [`translate::quantifier::deconstruct`] -- eliminate universal quantifiers from one expression
//! - [`replay::replay`] -- validate a plan by replaying it against a declaration
//!
//! # Module Dependency Direction
//!
//! `model` ← `expr` ← `lifted` ← `translate` ← `replay`
//!
//! One-way only. No cycles. `abort` depends on nothing internal. This
//! crate has no external dependencies;
//! hashing and serialization live downstream in `strider-search` and
//! `strider-harness`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod abort;
pub mod expr;
pub mod lifted;
pub mod model;
pub mod replay;
pub mod translate;
