//! Monte Carlo engine for the discretely monitored down-and-out call.
//!
//! Each trial `i` draws its own path from `PricerRng::for_trial(seed, i)`,
//! scans it for a barrier breach and evaluates the discounted payoff.
//! Trials are grouped into fixed batches of consecutive indices; batches run
//! on the rayon pool, each with its own accumulator, and the accumulators are
//! merged sequentially in batch order. The estimate therefore depends only on
//! `(params, n_trials, seed, batch_size)`, never on the thread count or
//! scheduling.
//!
//! With a time budget, batches that have not started when the budget runs
//! out are skipped and the estimate is flagged partial.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use pricer_core::math::statistics::RunningStats;
use pricer_core::types::{MarketParameters, NumericalInstabilityWarning, PricingError};
use rayon::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::config::MonteCarloConfig;
use super::paths::{GbmPathGenerator, SimulatedPath};
use crate::path_dependent::{BarrierMonitor, BarrierOutcome, KnockOutCallPayoff};
use crate::rng::PricerRng;

/// Monte Carlo price estimate.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketParameters;
/// use pricer_pricing::price_barrier_call;
///
/// let params = MarketParameters::new(145.0, 150.0, 140.0, 30, 0.01, 0.15);
/// let estimate = price_barrier_call(params, 2_000, 42).unwrap();
///
/// let half_width = estimate.confidence_95().unwrap();
/// println!("Price: {:.4} +/- {:.4}", estimate.price, half_width);
/// assert!(!estimate.partial);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PriceEstimate {
    /// Mean discounted payoff over completed trials.
    pub price: f64,
    /// Sample standard deviation over √n; `None` below two trials.
    pub std_error: Option<f64>,
    /// Trials that contributed to the estimate.
    pub n_trials: u64,
    /// Trials requested.
    pub requested_trials: u64,
    /// Run seed.
    pub seed: u64,
    /// Fraction of completed trials that were knocked out.
    pub knock_out_ratio: f64,
    /// True when the time budget stopped the run early.
    pub partial: bool,
    /// Non-fatal diagnostics raised at construction.
    pub warnings: Vec<NumericalInstabilityWarning>,
}

impl PriceEstimate {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> Option<f64> {
        self.std_error.map(|se| 1.96 * se)
    }

    /// Returns the 99% confidence interval half-width.
    #[inline]
    pub fn confidence_99(&self) -> Option<f64> {
        self.std_error.map(|se| 2.576 * se)
    }
}

/// Accumulator owned by one batch.
#[derive(Clone, Copy, Debug, Default)]
struct BatchAccumulator {
    payoffs: RunningStats,
    knocked_out: u64,
}

impl BatchAccumulator {
    #[inline]
    fn record(&mut self, payoff: f64, outcome: &BarrierOutcome) {
        self.payoffs.push(payoff);
        if outcome.is_knocked_out() {
            self.knocked_out += 1;
        }
    }

    #[inline]
    fn merge(&mut self, other: &BatchAccumulator) {
        self.payoffs.merge(&other.payoffs);
        self.knocked_out += other.knocked_out;
    }
}

/// Monte Carlo pricing engine.
///
/// All validation happens in [`new`](Self::new); pricing itself cannot fail.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketParameters;
/// use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
///
/// let params = MarketParameters::new(100.0, 100.0, 90.0, 63, 0.05, 0.2);
/// let config = MonteCarloConfig::builder()
///     .n_trials(4_000)
///     .seed(1)
///     .batch_size(500)
///     .build()
///     .unwrap();
///
/// let engine = MonteCarloEngine::new(params, config).unwrap();
/// let estimate = engine.price();
/// assert_eq!(estimate.n_trials, 4_000);
/// assert!(estimate.std_error.unwrap() > 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct MonteCarloEngine {
    params: MarketParameters,
    config: MonteCarloConfig,
    generator: GbmPathGenerator,
    monitor: BarrierMonitor,
    payoff: KnockOutCallPayoff,
    warnings: Vec<NumericalInstabilityWarning>,
}

impl MonteCarloEngine {
    /// Creates an engine after validating parameters and configuration.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidParameter`] for invalid market parameters or configuration
    /// - [`PricingError::BarrierConfiguration`] when the barrier is not below spot
    pub fn new(params: MarketParameters, config: MonteCarloConfig) -> Result<Self, PricingError> {
        config.validate()?;
        let generator = GbmPathGenerator::new(&params)?;
        let monitor = BarrierMonitor::from_market(&params)?;
        let payoff = KnockOutCallPayoff::from_market(&params);

        let warnings: Vec<_> = params.stability_warning().into_iter().collect();
        for warning in &warnings {
            warn!(
                step_volatility = warning.step_volatility,
                threshold = warning.threshold,
                "Daily step volatility exceeds sanity threshold"
            );
        }

        debug!(
            n_trials = config.n_trials(),
            seed = config.seed(),
            batch_size = config.batch_size(),
            n_steps = generator.n_steps(),
            "Monte Carlo engine initialised"
        );

        Ok(Self {
            params,
            config,
            generator,
            monitor,
            payoff,
            warnings,
        })
    }

    /// Market parameters priced by this engine.
    #[inline]
    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    /// Simulation configuration.
    #[inline]
    pub fn config(&self) -> &MonteCarloConfig {
        &self.config
    }

    /// Non-fatal warnings raised at construction.
    #[inline]
    pub fn warnings(&self) -> &[NumericalInstabilityWarning] {
        &self.warnings
    }

    /// Replays a single trial: its discounted payoff and barrier outcome.
    ///
    /// The result is identical to that trial's contribution inside
    /// [`price`](Self::price).
    pub fn run_trial(&self, trial_index: u64) -> (f64, BarrierOutcome) {
        let mut path = SimulatedPath::with_capacity(self.generator.n_steps());
        self.run_trial_into(trial_index, &mut path)
    }

    #[inline]
    fn run_trial_into(&self, trial_index: u64, path: &mut SimulatedPath) -> (f64, BarrierOutcome) {
        let mut rng = PricerRng::for_trial(self.config.seed(), trial_index);
        self.generator.generate_into(&mut rng, path);
        let outcome = self.monitor.scan(path.spots());
        (self.payoff.evaluate(path.spots(), &outcome), outcome)
    }

    fn run_batch(&self, batch: u64) -> BatchAccumulator {
        let start = batch * self.config.batch_size();
        let end = (start + self.config.batch_size()).min(self.config.n_trials());

        let mut path = SimulatedPath::with_capacity(self.generator.n_steps());
        let mut acc = BatchAccumulator::default();
        for trial in start..end {
            let (payoff, outcome) = self.run_trial_into(trial, &mut path);
            acc.record(payoff, &outcome);
        }
        acc
    }

    /// Runs all trials and returns the estimate.
    ///
    /// Without a time budget the result is bit-identical for identical
    /// inputs. With one, the estimate covers completed batches only and is
    /// flagged [`partial`](PriceEstimate::partial) if any were skipped.
    pub fn price(&self) -> PriceEstimate {
        let started = Instant::now();
        let deadline = self
            .config
            .time_budget()
            .and_then(|budget| started.checked_add(budget));
        let expired = AtomicBool::new(false);

        let n_batches = self.config.n_batches() as usize;
        let batches: Vec<Option<BatchAccumulator>> = (0..n_batches)
            .into_par_iter()
            .map(|batch| {
                if expired.load(Ordering::Relaxed) {
                    return None;
                }
                if let Some(deadline) = deadline {
                    if Instant::now() >= deadline {
                        expired.store(true, Ordering::Relaxed);
                        return None;
                    }
                }
                Some(self.run_batch(batch as u64))
            })
            .collect();

        let mut total = BatchAccumulator::default();
        for acc in batches.iter().flatten() {
            total.merge(acc);
        }

        let estimate = self.estimate_from(&total);
        let elapsed_ms = started.elapsed().as_secs_f64() * 1e3;
        if estimate.partial {
            warn!(
                completed = estimate.n_trials,
                requested = estimate.requested_trials,
                elapsed_ms,
                "Time budget exhausted; returning partial estimate"
            );
        }
        info!(
            price = estimate.price,
            std_error = ?estimate.std_error,
            n_trials = estimate.n_trials,
            knock_out_ratio = estimate.knock_out_ratio,
            elapsed_ms,
            "Monte Carlo estimate complete"
        );
        estimate
    }

    fn estimate_from(&self, total: &BatchAccumulator) -> PriceEstimate {
        let completed = total.payoffs.count();
        let knock_out_ratio = if completed == 0 {
            0.0
        } else {
            total.knocked_out as f64 / completed as f64
        };

        PriceEstimate {
            price: total.payoffs.mean(),
            std_error: total.payoffs.std_error(),
            n_trials: completed,
            requested_trials: self.config.n_trials(),
            seed: self.config.seed(),
            knock_out_ratio,
            partial: completed < self.config.n_trials(),
            warnings: self.warnings.clone(),
        }
    }
}
