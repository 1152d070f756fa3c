//! Tabu Search engine specialized to quadratic binary optimization.
//!
//! - **Tabu Search (TS)**: a generic engine that builds an initial
//!   solution with a greedy-randomized constructive heuristic and then
//!   improves it with tabu-governed local search. Problem-specific
//!   behavior is injected through the [`tabu::TabuProblem`] trait.
//! - **QBF**: the specialization to quadratic binary functions with an
//!   adjacency constraint, using insertion, removal and exchange moves,
//!   first- or best-improving selection and adaptive move sampling.
//!
//! The search is single-threaded and fully reproducible for a given seed.
//! Progress is reported through `tracing` events; install a subscriber
//! to see them.

pub mod error;
pub mod qbf;
pub mod tabu;

pub use error::{InstanceError, TabuError};
