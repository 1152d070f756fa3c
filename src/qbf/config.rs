//! Local-search configuration for the QBF specialization.

use std::time::Duration;

use crate::error::TabuError;

/// Where removal moves draw their candidates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RemovalSource {
    /// The insertion candidate list of the incumbent. Most such removals
    /// are no-ops with zero delta, which keeps the historic search
    /// trajectory.
    #[default]
    CandidateList,

    /// The elements currently in the incumbent.
    Incumbent,
}

/// Stop and move-selection parameters.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_tabuqbf::qbf::QbfConfig;
///
/// let config = QbfConfig::default()
///     .with_iterations(5_000)
///     .with_time_limit(Duration::from_secs(60))
///     .with_percent(0.3)
///     .with_first_improving(false);
/// assert!(config.validate().is_ok());
/// assert!(config.is_adaptive());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QbfConfig {
    /// Consecutive iterations without improving the best cost before
    /// stopping.
    pub iterations: usize,

    /// Wall-clock budget for the whole run.
    pub time_limit: Duration,

    /// Fraction of the shuffled move list scanned per iteration, in (0, 1].
    ///
    /// Below `1.0` the sample widens with the stagnation ratio.
    pub percent: f64,

    /// Stop scanning at the first admissible improving move.
    pub first_improving: bool,

    /// Source of removal candidates.
    pub removal_source: RemovalSource,
}

impl Default for QbfConfig {
    fn default() -> Self {
        Self {
            iterations: 100_000,
            time_limit: Duration::from_secs(30 * 60),
            percent: 1.0,
            first_improving: true,
            removal_source: RemovalSource::default(),
        }
    }
}

impl QbfConfig {
    /// Sets the non-improvement iteration budget.
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = limit;
        self
    }

    /// Sets the sampled fraction of the move list.
    pub fn with_percent(mut self, percent: f64) -> Self {
        self.percent = percent;
        self
    }

    /// Enables or disables first-improving selection.
    pub fn with_first_improving(mut self, first: bool) -> Self {
        self.first_improving = first;
        self
    }

    /// Sets the source of removal candidates.
    pub fn with_removal_source(mut self, source: RemovalSource) -> Self {
        self.removal_source = source;
        self
    }

    /// Whether the sample size adapts to stagnation.
    pub fn is_adaptive(&self) -> bool {
        self.percent < 1.0
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TabuError> {
        if self.iterations == 0 {
            return Err(TabuError::InvalidConfig("iterations must be positive".into()));
        }
        if !(self.percent > 0.0 && self.percent <= 1.0) {
            return Err(TabuError::InvalidConfig(format!(
                "percent must be in (0, 1], got {}",
                self.percent
            )));
        }
        Ok(())
    }
}
