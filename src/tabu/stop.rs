//! Stagnation / wall-clock stopping rule.

use std::time::Duration;

/// Stops the local search after `max_no_improve` consecutive checks
/// without a strict improvement of the best cost, or once the elapsed
/// time reaches `time_limit`. Either signal alone is sufficient.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tabuqbf::tabu::StopCriterion;
///
/// let mut stop = StopCriterion::new(2, Duration::from_secs(60));
/// assert!(!stop.should_stop(-1.0, Duration::ZERO)); // improves on 0.0
/// assert!(!stop.should_stop(-1.0, Duration::ZERO));
/// assert!(stop.should_stop(-1.0, Duration::ZERO));
/// ```
#[derive(Debug, Clone)]
pub struct StopCriterion {
    max_no_improve: usize,
    time_limit: Duration,
    flag_cost: f64,
    no_improve: usize,
}

impl StopCriterion {
    /// Creates a criterion with a flag cost of `0.0` (the cost of the
    /// empty solution).
    pub fn new(max_no_improve: usize, time_limit: Duration) -> Self {
        Self {
            max_no_improve,
            time_limit,
            flag_cost: 0.0,
            no_improve: 0,
        }
    }

    /// Updates the stagnation counter with the current best cost and
    /// reports whether the search should halt.
    pub fn should_stop(&mut self, best_cost: f64, elapsed: Duration) -> bool {
        if best_cost < self.flag_cost {
            self.flag_cost = best_cost;
            self.no_improve = 0;
        } else {
            self.no_improve += 1;
        }

        self.no_improve >= self.max_no_improve || elapsed >= self.time_limit
    }

    /// Fraction of the iteration budget spent without improvement.
    ///
    /// Returns `0.0` for a zero budget.
    pub fn stagnation_ratio(&self) -> f64 {
        if self.max_no_improve == 0 {
            return 0.0;
        }
        self.no_improve as f64 / self.max_no_improve as f64
    }

    /// Consecutive checks without improvement.
    pub fn no_improve(&self) -> usize {
        self.no_improve
    }

    /// Lowest best cost observed so far.
    pub fn flag_cost(&self) -> f64 {
        self.flag_cost
    }

    /// Restores the initial state.
    pub fn reset(&mut self) {
        self.flag_cost = 0.0;
        self.no_improve = 0;
    }
}
