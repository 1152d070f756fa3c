//! Core traits for Tabu Search problems.

use std::fmt::Debug;
use std::time::Duration;

use rand::Rng;

use super::memory::TabuList;
use super::solution::Solution;
use crate::error::TabuError;

/// Objective function consumed by the engine. Lower is better.
///
/// Delta methods must not mutate the solution; they report the cost
/// change the corresponding move would cause.
pub trait Evaluator<E> {
    /// Number of elements in the candidate domain.
    fn domain_size(&self) -> usize;

    /// Fully re-evaluates `solution`, stores the result in
    /// `solution.cost` and returns it.
    fn evaluate(&self, solution: &mut Solution<E>) -> f64;

    /// Cost change of adding `element` to `solution`.
    fn evaluate_insertion_cost(&self, element: &E, solution: &Solution<E>) -> f64;

    /// Cost change of removing `element` from `solution`.
    fn evaluate_removal_cost(&self, element: &E, solution: &Solution<E>) -> f64;

    /// Cost change of swapping `elem_out` for `elem_in`.
    fn evaluate_exchange_cost(&self, elem_in: &E, elem_out: &E, solution: &Solution<E>) -> f64;
}

/// Mutable view of the engine's local-search state handed to
/// [`TabuProblem::neighborhood_move`].
pub struct SearchState<'a, E> {
    /// Candidate list, owned by the engine and rebuilt by the problem.
    pub cl: &'a mut Vec<E>,
    /// Short-term memory.
    pub tabu: &'a mut TabuList<E>,
    /// Solution being modified.
    pub incumbent: &'a mut Solution<E>,
    /// Cost of the best solution found so far (aspiration threshold).
    pub best_cost: f64,
}

/// Problem-specific capabilities injected into [`TabuSearch`](super::TabuSearch).
///
/// Users implement this trait to specify:
/// - How candidate lists are built and refreshed for a solution
/// - How one local-search move is chosen and applied
/// - When the search stops
///
/// The engine owns the candidate lists, the tabu list and both
/// solutions; implementations only act on what they are handed.
pub trait TabuProblem: Send + Sync {
    /// Domain element type.
    type Element: Copy + PartialEq + Debug;

    /// Objective function.
    type Evaluator: Evaluator<Self::Element>;

    /// Returns the objective function.
    fn evaluator(&self) -> &Self::Evaluator;

    /// Checks problem-specific parameters before a search is built.
    fn validate(&self) -> Result<(), TabuError> {
        Ok(())
    }

    /// Builds the initial candidate list.
    fn make_cl(&self) -> Vec<Self::Element>;

    /// Builds the (empty) restricted candidate list.
    fn make_rcl(&self) -> Vec<Self::Element> {
        Vec::new()
    }

    /// Builds the tabu list for the given tenure.
    fn make_tl(&self, tenure: usize) -> TabuList<Self::Element> {
        TabuList::new(tenure)
    }

    /// Rebuilds `cl` from scratch against `solution`.
    fn update_cl(&self, cl: &mut Vec<Self::Element>, solution: &Solution<Self::Element>);

    /// Creates an empty solution with its known cost.
    fn create_empty_sol(&self) -> Solution<Self::Element>;

    /// Applies exactly one move to `state.incumbent` and records it in
    /// `state.tabu`.
    fn neighborhood_move<R: Rng>(&mut self, state: SearchState<'_, Self::Element>, rng: &mut R);

    /// Clears per-run state at the start of every solve.
    fn reset(&mut self) {}

    /// Decides whether the local search should stop.
    fn stop_criteria(&mut self, best_cost: f64, elapsed: Duration) -> bool;

    /// Puts a solution into canonical order for reporting.
    fn sort(&self, _solution: &mut Solution<Self::Element>) {}
}
