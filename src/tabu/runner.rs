//! Tabu Search execution engine.
//!
//! # Algorithm
//!
//! 1. Build an initial solution with a greedy-randomized constructive
//!    heuristic: at each step the candidates tying for the lowest *or*
//!    highest insertion cost form the RCL, one of them is picked at
//!    random, and construction stops once the cost no longer decreases.
//! 2. Allocate the tabu list and re-seed the random source.
//! 3. At each iteration:
//!    a. Let the problem apply exactly one neighborhood move
//!    b. Copy the incumbent into the best solution if it is strictly better
//! 4. Terminate when the problem's stop criterion fires
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search—Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Feo, T. & Resende, M. (1995). "Greedy Randomized Adaptive Search Procedures",
//! *Journal of Global Optimization* 6, 109-133.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use super::config::TabuConfig;
use super::memory::TabuList;
use super::solution::Solution;
use super::types::{Evaluator, SearchState, TabuProblem};
use crate::error::TabuError;

/// Result of a Tabu Search run.
#[derive(Debug, Clone)]
pub struct TabuResult<E> {
    /// Best solution found, in the problem's canonical order.
    pub best: Solution<E>,
    /// Solution produced by the constructive heuristic.
    pub initial: Solution<E>,
    /// Local-search iterations executed.
    pub iterations: usize,
    /// Iteration at which the best solution was found (0 if never updated).
    pub best_iteration: usize,
    /// Best cost after each iteration.
    pub cost_history: Vec<f64>,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}

/// Tabu Search engine.
///
/// Owns the candidate list, restricted candidate list, tabu list, the
/// incumbent and best solutions, and the random source. Problem-specific
/// behavior comes from the injected [`TabuProblem`].
pub struct TabuSearch<P: TabuProblem> {
    problem: P,
    config: TabuConfig,
    rng: ChaCha8Rng,
    cl: Vec<P::Element>,
    rcl: Vec<P::Element>,
    tl: TabuList<P::Element>,
    incumbent: Solution<P::Element>,
    best: Solution<P::Element>,
}

impl<P: TabuProblem> TabuSearch<P> {
    /// Creates an engine for `problem`.
    ///
    /// # Errors
    ///
    /// Returns [`TabuError::InvalidConfig`] if `config` or the problem's
    /// own parameters are invalid.
    pub fn new(problem: P, config: TabuConfig) -> Result<Self, TabuError> {
        config.validate()?;
        problem.validate()?;
        let tl = problem.make_tl(config.tenure);
        let incumbent = problem.create_empty_sol();
        let best = problem.create_empty_sol();
        Ok(Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            problem,
            config,
            cl: Vec::new(),
            rcl: Vec::new(),
            tl,
            incumbent,
            best,
        })
    }

    /// Builds a feasible solution by greedy-randomized insertion and makes
    /// it the incumbent.
    ///
    /// An empty initial candidate list yields the empty solution.
    pub fn constructive_heuristic(&mut self) -> &Solution<P::Element> {
        self.cl = self.problem.make_cl();
        self.rcl = self.problem.make_rcl();
        self.incumbent = self.problem.create_empty_sol();

        let evaluator = self.problem.evaluator();
        let mut previous_cost = f64::INFINITY;
        let mut deltas = Vec::with_capacity(self.cl.len());

        while !(self.cl.is_empty() || previous_cost <= self.incumbent.cost) {
            previous_cost = self.incumbent.cost;

            deltas.clear();
            let mut min_cost = f64::INFINITY;
            let mut max_cost = f64::NEG_INFINITY;
            for c in &self.cl {
                let delta = evaluator.evaluate_insertion_cost(c, &self.incumbent);
                min_cost = min_cost.min(delta);
                max_cost = max_cost.max(delta);
                deltas.push(delta);
            }

            // Both extremes are admitted, not only the best.
            for (c, &delta) in self.cl.iter().zip(&deltas) {
                if delta <= min_cost || delta >= max_cost {
                    self.rcl.push(*c);
                }
            }

            if self.rcl.is_empty() {
                break;
            }

            let chosen = self.rcl[self.rng.random_range(0..self.rcl.len())];
            self.incumbent.add(chosen);
            evaluator.evaluate(&mut self.incumbent);
            self.rcl.clear();

            trace!(
                event = "construction_step",
                element = ?chosen,
                cost = self.incumbent.cost,
            );

            self.problem.update_cl(&mut self.cl, &self.incumbent);
        }

        &self.incumbent
    }

    /// Allocates a fresh tabu list and re-seeds the random source so the
    /// local search does not depend on the construction's draws.
    pub fn initialize_local_search(&mut self) {
        self.tl = self.problem.make_tl(self.config.tenure);
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
    }

    /// Runs one local-search iteration. Returns `true` if the best
    /// solution improved.
    pub fn iterate(&mut self) -> bool {
        let state = SearchState {
            cl: &mut self.cl,
            tabu: &mut self.tl,
            incumbent: &mut self.incumbent,
            best_cost: self.best.cost,
        };
        self.problem.neighborhood_move(state, &mut self.rng);

        if self.incumbent.cost < self.best.cost {
            self.best = self.incumbent.clone();
            return true;
        }
        false
    }

    /// Executes the full search and returns the best solution found.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_tabuqbf::qbf::{QbfConfig, QbfEvaluator, TsQbf};
    /// use u_tabuqbf::tabu::{TabuConfig, TabuSearch};
    ///
    /// // maximize x0 + x2 - x0*x1 (as minimization of the negation)
    /// let evaluator = QbfEvaluator::from_matrix(vec![
    ///     vec![1.0, -1.0, 0.0],
    ///     vec![0.0, 0.0, 0.0],
    ///     vec![0.0, 0.0, 1.0],
    /// ]).inverse();
    /// let problem = TsQbf::new(evaluator, QbfConfig::default().with_iterations(50));
    /// let mut search = TabuSearch::new(problem, TabuConfig::default().with_tenure(1)).unwrap();
    /// let result = search.solve();
    /// assert_eq!(result.best.elements(), &[0, 2]);
    /// ```
    pub fn solve(&mut self) -> TabuResult<P::Element> {
        let start = Instant::now();

        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.best = self.problem.create_empty_sol();
        self.problem.reset();

        info!(event = "phase_start", phase = "Construction Heuristic");
        self.constructive_heuristic();
        let initial = self.incumbent.clone();
        info!(
            event = "phase_end",
            phase = "Construction Heuristic",
            size = initial.len(),
            cost = initial.cost,
            duration_ms = start.elapsed().as_millis() as u64,
        );

        self.initialize_local_search();
        info!(
            event = "phase_start",
            phase = "Local Search",
            tenure = self.config.tenure,
        );

        let mut iterations = 0;
        let mut best_iteration = 0;
        let mut cost_history = Vec::new();

        while !self.problem.stop_criteria(self.best.cost, start.elapsed()) {
            iterations += 1;
            if self.iterate() {
                best_iteration = iterations;
                debug!(
                    event = "new_best",
                    iteration = iterations,
                    cost = self.best.cost,
                    size = self.best.len(),
                );
            }
            cost_history.push(self.best.cost);
        }

        let elapsed = start.elapsed();
        info!(
            event = "phase_end",
            phase = "Local Search",
            iterations,
            best_iteration,
            best_cost = self.best.cost,
            duration_ms = elapsed.as_millis() as u64,
        );

        let mut best = self.best.clone();
        self.problem.sort(&mut best);

        TabuResult {
            best,
            initial,
            iterations,
            best_iteration,
            cost_history,
            elapsed,
        }
    }

    /// The problem specialization.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Current incumbent solution.
    pub fn incumbent(&self) -> &Solution<P::Element> {
        &self.incumbent
    }

    /// Best solution found so far.
    pub fn best(&self) -> &Solution<P::Element> {
        &self.best
    }

    /// Current tabu list.
    pub fn tabu_list(&self) -> &TabuList<P::Element> {
        &self.tl
    }

    /// Current candidate list.
    pub fn candidate_list(&self) -> &[P::Element] {
        &self.cl
    }

    /// Engine configuration.
    pub fn config(&self) -> &TabuConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Linear costs over independent elements ----

    struct LinearEvaluator {
        weights: Vec<f64>,
    }

    impl Evaluator<usize> for LinearEvaluator {
        fn domain_size(&self) -> usize {
            self.weights.len()
        }

        fn evaluate(&self, solution: &mut Solution<usize>) -> f64 {
            solution.cost = solution.iter().map(|&i| self.weights[i]).sum();
            solution.cost
        }

        fn evaluate_insertion_cost(&self, element: &usize, solution: &Solution<usize>) -> f64 {
            if solution.contains(element) {
                0.0
            } else {
                self.weights[*element]
            }
        }

        fn evaluate_removal_cost(&self, element: &usize, solution: &Solution<usize>) -> f64 {
            if solution.contains(element) {
                -self.weights[*element]
            } else {
                0.0
            }
        }

        fn evaluate_exchange_cost(&self, elem_in: &usize, elem_out: &usize, solution: &Solution<usize>) -> f64 {
            self.evaluate_insertion_cost(elem_in, solution) + self.evaluate_removal_cost(elem_out, solution)
        }
    }

    /// Candidates are all unselected elements; each move inserts the
    /// first candidate and pops the oldest element once the budget is
    /// spent.
    struct ScriptedProblem {
        evaluator: LinearEvaluator,
        max_checks: usize,
        checks: usize,
        moves: usize,
    }

    impl ScriptedProblem {
        fn new(weights: Vec<f64>, max_checks: usize) -> Self {
            Self {
                evaluator: LinearEvaluator { weights },
                max_checks,
                checks: 0,
                moves: 0,
            }
        }
    }

    impl TabuProblem for ScriptedProblem {
        type Element = usize;
        type Evaluator = LinearEvaluator;

        fn evaluator(&self) -> &LinearEvaluator {
            &self.evaluator
        }

        fn make_cl(&self) -> Vec<usize> {
            (0..self.evaluator.domain_size()).collect()
        }

        fn update_cl(&self, cl: &mut Vec<usize>, solution: &Solution<usize>) {
            cl.clear();
            cl.extend((0..self.evaluator.domain_size()).filter(|i| !solution.contains(i)));
        }

        fn create_empty_sol(&self) -> Solution<usize> {
            Solution::with_cost(0.0)
        }

        fn neighborhood_move<R: Rng>(&mut self, state: SearchState<'_, usize>, rng: &mut R) {
            self.moves += 1;
            self.update_cl(state.cl, state.incumbent);
            let inserted = if state.cl.is_empty() {
                None
            } else {
                Some(state.cl[rng.random_range(0..state.cl.len())])
            };
            state.tabu.record(None, inserted);
            if let Some(e) = inserted {
                state.incumbent.add(e);
            }
            self.evaluator.evaluate(state.incumbent);
        }

        fn stop_criteria(&mut self, _best_cost: f64, _elapsed: Duration) -> bool {
            self.checks += 1;
            self.checks > self.max_checks
        }

        fn sort(&self, solution: &mut Solution<usize>) {
            solution.sort();
        }
    }

    fn engine(weights: Vec<f64>, max_checks: usize, tenure: usize) -> TabuSearch<ScriptedProblem> {
        TabuSearch::new(
            ScriptedProblem::new(weights, max_checks),
            TabuConfig::default().with_tenure(tenure),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_zero_tenure() {
        let result = TabuSearch::new(ScriptedProblem::new(vec![1.0], 1), TabuConfig::default().with_tenure(0));
        assert!(matches!(result, Err(TabuError::InvalidConfig(_))));
    }

    #[test]
    fn test_constructive_empty_domain() {
        let mut search = engine(vec![], 1, 1);
        let sol = search.constructive_heuristic();
        assert!(sol.is_empty());
        assert_eq!(sol.cost, 0.0);
    }

    #[test]
    fn test_constructive_stops_when_cost_stalls() {
        // Every insertion costs 0: one insertion happens, then no strict
        // improvement stops construction.
        let mut search = engine(vec![0.0; 6], 1, 1);
        let sol = search.constructive_heuristic();
        assert_eq!(sol.len(), 1);
        assert_eq!(sol.cost, 0.0);
    }

    #[test]
    fn test_constructive_keeps_inserting_while_improving() {
        // All negative and equal: every step ties, and cost keeps dropping
        // until the candidate list is exhausted.
        let mut search = engine(vec![-1.0; 5], 1, 1);
        let sol = search.constructive_heuristic().clone();
        assert_eq!(sol.len(), 5);
        assert!((sol.cost + 5.0).abs() < 1e-12);
        assert!(search.candidate_list().is_empty());
    }

    #[test]
    fn test_constructive_picks_extremes_only() {
        // Deltas -3, -1, 2: RCL holds {0, 2}, never 1.
        for seed in 0..20 {
            let mut search = TabuSearch::new(
                ScriptedProblem::new(vec![-3.0, -1.0, 2.0], 1),
                TabuConfig::default().with_seed(seed),
            )
            .unwrap();
            let sol = search.constructive_heuristic().clone();
            assert_ne!(sol.elements().first(), Some(&1), "seed {seed}");
        }
    }

    #[test]
    fn test_constructive_non_negative_deltas_may_take_worst() {
        // Deltas 0, 1.5, 3: the RCL holds both extremes {0, 2}. Either way
        // the first insertion does not lower the cost, so construction
        // stops after it.
        let mut chosen = Vec::new();
        for seed in 0..50 {
            let mut search = TabuSearch::new(
                ScriptedProblem::new(vec![0.0, 1.5, 3.0], 1),
                TabuConfig::default().with_seed(seed),
            )
            .unwrap();
            let sol = search.constructive_heuristic().clone();
            assert_eq!(sol.len(), 1, "seed {seed}");
            assert!(sol.contains(&0) || sol.contains(&2), "seed {seed}");
            chosen.push(sol.elements()[0]);
        }
        assert!(chosen.contains(&0));
        assert!(chosen.contains(&2));
    }

    #[test]
    fn test_best_starts_empty_and_only_improves() {
        let mut search = engine(vec![-1.0, -2.0, 0.5], 3, 2);
        let result = search.solve();
        for window in result.cost_history.windows(2) {
            assert!(window[1] <= window[0]);
        }
        assert!(result.best.cost <= 0.0);
    }

    #[test]
    fn test_iterations_follow_stop_criterion() {
        let mut search = engine(vec![1.0; 4], 7, 1);
        let result = search.solve();
        assert_eq!(result.iterations, 7);
        assert_eq!(search.problem().moves, 7);
        assert_eq!(result.cost_history.len(), 7);
    }

    #[test]
    fn test_tabu_list_allocated_per_tenure() {
        let mut search = engine(vec![1.0; 4], 0, 3);
        search.solve();
        assert_eq!(search.tabu_list().len(), 6);
        assert_eq!(search.tabu_list(), &TabuList::new(3));
    }

    #[test]
    fn test_positive_weights_never_update_best() {
        let mut search = engine(vec![2.0, 3.0], 5, 1);
        let result = search.solve();
        assert!(result.best.is_empty());
        assert_eq!(result.best_iteration, 0);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let weights = vec![-1.0, 0.5, -0.25, 2.0, -3.0, 0.0];
        let a = engine(weights.clone(), 10, 2).solve();
        let b = engine(weights, 10, 2).solve();
        assert_eq!(a.best, b.best);
        assert_eq!(a.initial, b.initial);
        assert_eq!(a.cost_history, b.cost_history);
    }
}
