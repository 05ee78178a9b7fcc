//! Path generation for Monte Carlo simulation.
//!
//! Geometric Brownian Motion sampled once per trading day with the exact
//! lognormal step:
//!
//! ```text
//! S(t+Δt) = S(t) · exp((r − σ²/2)·Δt + σ·√Δt · z),   z ~ N(0, 1),   Δt = 1/252
//! ```
//!
//! The step is exact for GBM, so the only discretisation error in the
//! engine comes from monitoring the barrier at the same daily grid.
//!
//! # Memory Layout
//!
//! A [`SimulatedPath`] holds `maturity_days + 1` spots; index 0 is the
//! inception spot and index `t` the spot after `t` trading days.

use pricer_core::types::{MarketParameters, PricingError};

use crate::rng::PricerRng;

/// One simulated spot trajectory.
///
/// Owned by the trial that generated it. The engine reuses one buffer per
/// batch and overwrites it for each trial.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimulatedPath {
    spots: Vec<f64>,
}

impl SimulatedPath {
    /// Empty path with room for `n_steps` steps.
    #[inline]
    pub fn with_capacity(n_steps: usize) -> Self {
        Self {
            spots: Vec::with_capacity(n_steps + 1),
        }
    }

    /// Path over the given spots, e.g. an observed series.
    #[inline]
    pub fn from_spots(spots: Vec<f64>) -> Self {
        Self { spots }
    }

    /// All spots, inception first.
    #[inline]
    pub fn spots(&self) -> &[f64] {
        &self.spots
    }

    /// Number of observations (steps + 1).
    #[inline]
    pub fn len(&self) -> usize {
        self.spots.len()
    }

    /// True when no spot has been written.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Inception spot.
    #[inline]
    pub fn initial(&self) -> Option<f64> {
        self.spots.first().copied()
    }

    /// Spot at maturity.
    #[inline]
    pub fn terminal(&self) -> Option<f64> {
        self.spots.last().copied()
    }

    /// Consume the path, returning its spots.
    #[inline]
    pub fn into_spots(self) -> Vec<f64> {
        self.spots
    }
}

/// Daily GBM path generator.
///
/// Drift and diffusion per step are precomputed at construction.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketParameters;
/// use pricer_pricing::mc::GbmPathGenerator;
///
/// let params = MarketParameters::new(145.0, 150.0, 140.0, 30, 0.01, 0.15);
/// let generator = GbmPathGenerator::new(&params).unwrap();
///
/// let path = generator.generate_with_seed(42);
/// assert_eq!(path.len(), 31);
/// assert_eq!(path.initial(), Some(145.0));
/// assert_eq!(path, generator.generate_with_seed(42));
/// ```
#[derive(Clone, Debug)]
pub struct GbmPathGenerator {
    spot: f64,
    n_steps: usize,
    drift_dt: f64,
    vol_sqrt_dt: f64,
}

impl GbmPathGenerator {
    /// Generator for the contract described by `params`.
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] for negative volatility, zero
    /// maturity or any other invalid market parameter.
    pub fn new(params: &MarketParameters) -> Result<Self, PricingError> {
        params.validate()?;

        let dt = params.dt();
        let sigma = params.volatility;
        Ok(Self {
            spot: params.spot,
            n_steps: params.maturity_days as usize,
            drift_dt: (params.rate - 0.5 * sigma * sigma) * dt,
            vol_sqrt_dt: sigma * dt.sqrt(),
        })
    }

    /// Number of daily steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Overwrite `path` with a fresh trajectory drawn from `rng`.
    ///
    /// Consumes exactly `n_steps` normal variates.
    pub fn generate_into(&self, rng: &mut PricerRng, path: &mut SimulatedPath) {
        let spots = &mut path.spots;
        spots.clear();
        spots.reserve(self.n_steps + 1);

        let mut s = self.spot;
        spots.push(s);
        for _ in 0..self.n_steps {
            let z = rng.gen_normal();
            s *= (self.drift_dt + self.vol_sqrt_dt * z).exp();
            spots.push(s);
        }
    }

    /// Fresh trajectory drawn from `rng`.
    pub fn generate(&self, rng: &mut PricerRng) -> SimulatedPath {
        let mut path = SimulatedPath::with_capacity(self.n_steps);
        self.generate_into(rng, &mut path);
        path
    }

    /// Trajectory from a generator seeded with `seed`.
    pub fn generate_with_seed(&self, seed: u64) -> SimulatedPath {
        self.generate(&mut PricerRng::from_seed(seed))
    }

    /// Trajectory of trial `trial_index` in a run seeded with `seed`.
    pub fn generate_trial(&self, seed: u64, trial_index: u64) -> SimulatedPath {
        self.generate(&mut PricerRng::for_trial(seed, trial_index))
    }
}
