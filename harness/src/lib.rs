//! Strider Harness: fixture worlds, the end-to-end runner, and audit
//! bundle persistence.
//!
//! The harness is the integration layer: it builds lifted problems in code
//! (standing in for a parser front-end), feeds them through the kernel's
//! translator and the search engine, validates the resulting plan by
//! replay, and can persist the whole run as a bundle directory for offline
//! inspection.
//!
//! # Crate dependency graph
//!
//! ```text
//! strider-kernel  <-  strider-search  <-  strider-harness (this crate)
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bundle_dir;
pub mod runner;
pub mod worlds;
