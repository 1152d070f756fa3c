//! Tabu Search specialization for QBF.

use std::path::Path;
use std::time::Duration;

use rand::Rng;

use super::config::QbfConfig;
use super::evaluator::QbfEvaluator;
use super::explorer::{update_candidate_list, MoveExplorer};
use crate::error::TabuError;
use crate::tabu::{
    Evaluator, SearchState, Solution, StopCriterion, TabuConfig, TabuProblem, TabuResult, TabuSearch,
};

/// QBF problem plugged into [`TabuSearch`].
///
/// Forbids selecting two adjacent variables, explores insertion,
/// removal and exchange moves, and stops on stagnation or timeout.
#[derive(Debug, Clone)]
pub struct TsQbf<V = QbfEvaluator> {
    evaluator: V,
    config: QbfConfig,
    explorer: MoveExplorer,
    stop: StopCriterion,
}

impl<V: Evaluator<usize>> TsQbf<V> {
    /// Creates the problem for `evaluator` with the given local-search
    /// parameters.
    pub fn new(evaluator: V, config: QbfConfig) -> Self {
        let explorer = MoveExplorer::new(evaluator.domain_size(), &config);
        let stop = StopCriterion::new(config.iterations, config.time_limit);
        Self {
            evaluator,
            config,
            explorer,
            stop,
        }
    }

    /// Local-search parameters.
    pub fn config(&self) -> &QbfConfig {
        &self.config
    }

    /// Stopping rule state (stagnation counter and flag cost).
    pub fn stop(&self) -> &StopCriterion {
        &self.stop
    }
}

impl TsQbf<QbfEvaluator> {
    /// Reads the instance at `path` and maximizes its QBF.
    ///
    /// The returned costs are those of the inverse function, i.e. the
    /// negated objective value.
    pub fn solve_instance<P: AsRef<Path>>(
        path: P,
        tabu_config: TabuConfig,
        config: QbfConfig,
    ) -> Result<TabuResult<usize>, TabuError> {
        let evaluator = QbfEvaluator::from_path(path)?.inverse();
        let mut search = TabuSearch::new(Self::new(evaluator, config), tabu_config)?;
        Ok(search.solve())
    }
}

impl<V: Evaluator<usize> + Send + Sync> TabuProblem for TsQbf<V> {
    type Element = usize;
    type Evaluator = V;

    fn evaluator(&self) -> &V {
        &self.evaluator
    }

    fn validate(&self) -> Result<(), TabuError> {
        self.config.validate()
    }

    fn make_cl(&self) -> Vec<usize> {
        (0..self.evaluator.domain_size()).collect()
    }

    fn update_cl(&self, cl: &mut Vec<usize>, solution: &Solution<usize>) {
        update_candidate_list(self.evaluator.domain_size(), cl, solution);
    }

    /// The all-zero assignment has cost 0.
    fn create_empty_sol(&self) -> Solution<usize> {
        Solution::with_cost(0.0)
    }

    fn neighborhood_move<R: Rng>(&mut self, state: SearchState<'_, usize>, rng: &mut R) {
        self.explorer
            .neighborhood_move(&self.evaluator, state, self.stop.stagnation_ratio(), rng);
    }

    fn reset(&mut self) {
        self.stop.reset();
    }

    fn stop_criteria(&mut self, best_cost: f64, elapsed: Duration) -> bool {
        self.stop.should_stop(best_cost, elapsed)
    }

    fn sort(&self, solution: &mut Solution<usize>) {
        solution.sort();
    }
}
