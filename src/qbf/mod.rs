//! Tabu Search for Quadratic Binary Functions (QBF).
//!
//! Maximizes `f(x) = xᵀ A x` over binary vectors `x` in which no two
//! adjacent variables are both set, by minimizing the inverse function
//! with [`TabuSearch`](crate::tabu::TabuSearch).
//!
//! The neighborhood is made of insertions, removals and exchanges
//! encoded as [`PairedMove`]s.
//!
//! # References
//!
//! - Kochenberger, G. et al. (2014). "The unconstrained binary quadratic
//!   programming problem: a survey", *Journal of Combinatorial Optimization* 28, 58-81.

mod config;
mod evaluator;
mod explorer;
mod moves;
mod solver;

pub use config::{QbfConfig, RemovalSource};
pub use evaluator::QbfEvaluator;
pub use explorer::{update_candidate_list, MoveExplorer};
pub use moves::{MoveKind, PairedMove};
pub use solver::TsQbf;
