//! Tabu Search (TS).
//!
//! A single-solution trajectory metaheuristic that uses memory structures
//! (the tabu list) to forbid recently moved elements, preventing cycling
//! and encouraging exploration of new regions of the search space. The
//! starting point comes from a greedy-randomized constructive heuristic.
//!
//! # References
//!
//! - Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! - Glover, F. (1990). "Tabu Search—Part II", *ORSA Journal on Computing* 2(1), 4-32.

mod config;
mod memory;
mod runner;
mod solution;
mod stop;
mod types;

pub use config::TabuConfig;
pub use memory::TabuList;
pub use runner::{TabuResult, TabuSearch};
pub use solution::Solution;
pub use stop::StopCriterion;
pub use types::{Evaluator, SearchState, TabuProblem};
