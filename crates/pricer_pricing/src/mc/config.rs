//! Monte Carlo simulation configuration.
//!
//! The trial count and seed are always explicit on the built configuration;
//! the builder supplies defaults only for the execution knobs (batch size,
//! time budget) and the reference seed.

use std::time::Duration;

use pricer_core::types::PricingError;

/// Maximum number of trials allowed in one run.
pub const MAX_TRIALS: u64 = 100_000_000;

/// Trials per scheduling batch when none is configured.
pub const DEFAULT_BATCH_SIZE: u64 = 1024;

/// Seed used when the builder is not given one.
pub const DEFAULT_SEED: u64 = 42;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_trials(10_000)
///     .seed(7)
///     .batch_size(512)
///     .time_budget(Duration::from_secs(5))
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_trials(), 10_000);
/// assert_eq!(config.seed(), 7);
/// assert_eq!(config.n_batches(), 20);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    n_trials: u64,
    seed: u64,
    batch_size: u64,
    time_budget: Option<Duration>,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Configuration for `n_trials` trials with `seed` and default execution settings.
    ///
    /// # Errors
    ///
    /// See [`validate`](Self::validate).
    pub fn new(n_trials: u64, seed: u64) -> Result<Self, PricingError> {
        Self::builder().n_trials(n_trials).seed(seed).build()
    }

    /// Returns the number of trials.
    #[inline]
    pub fn n_trials(&self) -> u64 {
        self.n_trials
    }

    /// Returns the run seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of trials per scheduling batch.
    #[inline]
    pub fn batch_size(&self) -> u64 {
        self.batch_size
    }

    /// Returns the optional wall-clock budget.
    #[inline]
    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget
    }

    /// Number of batches needed to cover all trials.
    #[inline]
    pub fn n_batches(&self) -> u64 {
        self.n_trials.div_ceil(self.batch_size)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] if:
    /// - `n_trials` is 0 or greater than [`MAX_TRIALS`]
    /// - `batch_size` is 0
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.n_trials == 0 || self.n_trials > MAX_TRIALS {
            return Err(PricingError::invalid_parameter(
                "trial_count",
                format!("must be in range [1, {}], got {}", MAX_TRIALS, self.n_trials),
            ));
        }
        if self.batch_size == 0 {
            return Err(PricingError::invalid_parameter(
                "batch_size",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// `n_trials` must be set; everything else has a default.
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_trials: Option<u64>,
    seed: Option<u64>,
    batch_size: Option<u64>,
    time_budget: Option<Duration>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of trials.
    #[inline]
    pub fn n_trials(mut self, n_trials: u64) -> Self {
        self.n_trials = Some(n_trials);
        self
    }

    /// Sets the run seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of trials per scheduling batch.
    ///
    /// Batching affects only scheduling granularity; the estimate for a
    /// given seed is identical for every batch size up to floating-point
    /// merge order.
    #[inline]
    pub fn batch_size(mut self, batch_size: u64) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Sets a wall-clock budget after which no new batches are started.
    #[inline]
    pub fn time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] if `n_trials` was never set
    /// or validation fails.
    pub fn build(self) -> Result<MonteCarloConfig, PricingError> {
        let n_trials = self.n_trials.ok_or_else(|| {
            PricingError::invalid_parameter("trial_count", "must be set explicitly")
        })?;

        let config = MonteCarloConfig {
            n_trials,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            time_budget: self.time_budget,
        };
        config.validate()?;
        Ok(config)
    }
}
