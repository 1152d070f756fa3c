//! Tabu Search configuration.

use crate::error::TabuError;

/// Configuration parameters for the Tabu Search engine.
///
/// # Examples
///
/// ```
/// use u_tabuqbf::tabu::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_tenure(7)
///     .with_seed(42);
/// assert_eq!(config.tenure, 7);
/// assert_eq!(config.seed, 42);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// Iterations a moved element stays tabu. The tabu list holds
    /// `2 * tenure` slots.
    pub tenure: usize,
    /// Seed of the random source. The source is re-seeded with the same
    /// value when the local search starts.
    pub seed: u64,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            tenure: 10,
            seed: 0,
        }
    }
}

impl TabuConfig {
    /// Sets the tabu tenure.
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TabuError> {
        if self.tenure == 0 {
            return Err(TabuError::InvalidConfig("tenure must be at least 1".into()));
        }
        Ok(())
    }
}
