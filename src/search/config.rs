//! Search configuration.
//!
//! [`SearchConfig`] is the fully specified parameter set of one run.
//! There is deliberately no `Default`: beam width, spread and budgets
//! depend on the problem and must be chosen by the caller.
//! [`SearchSettings`] is its plain-data twin, with operators named
//! instead of instantiated, for loading from configuration files.

use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mutation::{MutationPlan, MutationRegistry};

/// Parameters of a budgeted beam search.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_teamform::mutation::{LocalMax, MutationPlan, RandomSwap};
/// use u_teamform::search::SearchConfig;
///
/// let plan = MutationPlan::new().with(RandomSwap, 8).with(LocalMax, 2);
/// let config = SearchConfig::new(3, 10, 100, Duration::from_secs(5), plan)
///     .unwrap()
///     .with_seed(42);
/// assert_eq!(config.max_spread, 10);
///
/// // Plan counts must add up to max_spread.
/// let plan = MutationPlan::new().with(RandomSwap, 4);
/// assert!(SearchConfig::new(3, 10, 100, Duration::from_secs(5), plan).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Beam width: candidates retained between generations.
    pub max_keep: usize,

    /// Children generated per retained candidate per generation.
    pub max_spread: usize,

    /// Number of generations before the search stops.
    pub max_iterations: usize,

    /// Wall-clock budget.
    ///
    /// Checked once before every generation, so a run can overrun it by
    /// up to one generation's worth of work.
    pub max_time: Duration,

    /// Operators and their per-parent counts.
    pub mutation_plan: MutationPlan,

    /// Random seed for reproducibility. `None` draws one at random.
    pub seed: Option<u64>,

    /// Generate children on the rayon thread pool.
    ///
    /// Only effective with the `parallel` feature. Results are identical
    /// either way because every child gets its own seeded RNG.
    pub parallel: bool,
}

impl SearchConfig {
    /// Creates and validates a configuration.
    pub fn new(
        max_keep: usize,
        max_spread: usize,
        max_iterations: usize,
        max_time: Duration,
        mutation_plan: MutationPlan,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            max_keep,
            max_spread,
            max_iterations,
            max_time,
            mutation_plan,
            seed: None,
            parallel: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel child generation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// `max_keep` must be positive and the mutation plan's counts must sum
    /// to `max_spread`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_keep == 0 {
            return Err(ConfigError::InvalidParameter(
                "max_keep must be at least 1".into(),
            ));
        }
        self.mutation_plan.validate(self.max_spread)
    }
}

/// One named operator of a [`SearchSettings`] plan.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MutationSetting {
    /// Registry name of the operator.
    pub name: String,
    /// Children per parent.
    pub count: usize,
}

/// Plain-data form of [`SearchConfig`].
///
/// With the `serde` feature this deserializes from e.g.
///
/// ```json
/// {
///   "max_keep": 3,
///   "max_spread": 10,
///   "max_iterations": 200,
///   "max_time_ms": 5000,
///   "mutations": [{"name": "random_swap", "count": 8}, {"name": "local_max", "count": 2}]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchSettings {
    /// See [`SearchConfig::max_keep`].
    pub max_keep: usize,
    /// See [`SearchConfig::max_spread`].
    pub max_spread: usize,
    /// See [`SearchConfig::max_iterations`].
    pub max_iterations: usize,
    /// [`SearchConfig::max_time`] in milliseconds.
    pub max_time_ms: u64,
    /// Operators by name, in plan order.
    pub mutations: Vec<MutationSetting>,
    /// See [`SearchConfig::seed`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: Option<u64>,
    /// See [`SearchConfig::parallel`].
    #[cfg_attr(feature = "serde", serde(default))]
    pub parallel: bool,
}

impl SearchSettings {
    /// Resolves operator names through `registry` and validates the result.
    pub fn into_config(self, registry: &MutationRegistry) -> Result<SearchConfig, ConfigError> {
        let names: Vec<(String, usize)> = self
            .mutations
            .into_iter()
            .map(|m| (m.name, m.count))
            .collect();
        let plan = MutationPlan::from_names(registry, &names)?;
        let mut config = SearchConfig::new(
            self.max_keep,
            self.max_spread,
            self.max_iterations,
            Duration::from_millis(self.max_time_ms),
            plan,
        )?;
        config.seed = self.seed;
        config.parallel = self.parallel;
        Ok(config)
    }
}
