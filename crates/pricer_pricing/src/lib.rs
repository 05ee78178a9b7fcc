//! # Pricer Pricing (Layer 3: Simulation Engines)
//!
//! Monte Carlo pricing of a discretely monitored down-and-out call under
//! geometric Brownian motion, and replay of a discrete self-financing delta
//! hedge over an observed price series.
//!
//! ## Pricing flow
//!
//! ```text
//! GbmPathGenerator → BarrierMonitor → KnockOutCallPayoff → MonteCarloEngine → PriceEstimate
//! ```
//!
//! Every trial draws from its own generator derived from `(seed, trial_index)`,
//! so estimates are reproducible bit for bit whatever the rayon pool size.
//!
//! ## Hedging flow
//!
//! ```text
//! price series + SpotPolicy (delta) + SpotPolicy (value) → HedgeReplaySimulator → HedgeResult
//! ```
//!
//! The two flows share [`MarketParameters`] but no state.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::MarketParameters;
//! use pricer_pricing::hedge::{BlackScholesDelta, BlackScholesValue};
//! use pricer_pricing::{price_barrier_call, simulate_hedge};
//!
//! let params = MarketParameters::new(145.0, 150.0, 140.0, 30, 0.01, 0.15);
//!
//! let estimate = price_barrier_call(params, 4_000, 42).unwrap();
//! assert!(estimate.price >= 0.0);
//!
//! let prices = [145.0, 146.2, 144.8, 147.5, 148.0];
//! let hedge = simulate_hedge(&prices, params.with_maturity_days(5), 0.4, BlackScholesDelta, BlackScholesValue).unwrap();
//! assert_eq!(hedge.daily_pnl.len(), prices.len());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![allow(unknown_lints)]

pub mod hedge;
pub mod mc;
pub mod path_dependent;
pub mod rng;

use pricer_core::types::{MarketParameters, PricingError};

use hedge::{HedgeReplaySimulator, HedgeResult, SpotPolicy};
use mc::{MonteCarloConfig, MonteCarloEngine, PriceEstimate};

/// Prices the down-and-out call described by `params` with `trial_count`
/// trials seeded by `seed`.
///
/// Identical arguments always give an identical estimate.
///
/// # Errors
///
/// - [`PricingError::InvalidParameter`] for invalid market parameters
///   (including zero maturity) or a trial count outside `1..=MAX_TRIALS`
/// - [`PricingError::BarrierConfiguration`] if the barrier is not below spot
pub fn price_barrier_call(
    params: MarketParameters,
    trial_count: u64,
    seed: u64,
) -> Result<PriceEstimate, PricingError> {
    let config = MonteCarloConfig::new(trial_count, seed)?;
    let engine = MonteCarloEngine::new(params, config)?;
    Ok(engine.price())
}

/// Replays a delta hedge over the first `params.maturity_days` observations
/// of `prices` and returns the completed result.
///
/// # Errors
///
/// See [`HedgeReplaySimulator::new`] and [`HedgeReplaySimulator::step`].
pub fn simulate_hedge<D, V>(
    prices: &[f64],
    params: MarketParameters,
    initial_delta: f64,
    delta_policy: D,
    value_policy: V,
) -> Result<HedgeResult, PricingError>
where
    D: SpotPolicy,
    V: SpotPolicy,
{
    HedgeReplaySimulator::new(prices, params, initial_delta, delta_policy, value_policy)?.run()
}
