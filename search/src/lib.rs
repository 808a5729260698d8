//! Strider Search: deterministic heuristic best-first search over a
//! propositional declaration.
//!
//! This crate provides the search layer of the planner. It depends only on
//! `strider-kernel` -- it does NOT depend on `strider-harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! strider-kernel  ←  strider-search  ←  strider-harness
//! (facts, ops)       (frontier, h(n))    (worlds, runner, bundles)
//! ```
//!
//! # Key types
//!
//! - [`node::SearchNode`] -- an arena-resident state with parent/operator links
//! - [`frontier::Frontier`] -- open heap + closed fingerprint map
//! - [`heuristic::Heuristic`] -- the {evaluate, reset} capability every
//!   estimator and combinator implements
//! - [`engine::SearchOutcome`] -- goal-found / exhausted / aborted, always a
//!   value, never a fault
//! - [`macros::macro_learning_search`] -- two-pass search that promotes
//!   frequently chained operator pairs into macro operators

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod engine;
pub mod error;
pub mod fingerprint;
pub mod frontier;
pub mod heuristic;
pub mod heuristics;
pub mod macros;
pub mod node;
pub mod plan;
