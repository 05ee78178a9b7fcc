//! Monte Carlo pricing of the discretely monitored down-and-out call.
//!
//! # Architecture
//!
//! ```text
//! MonteCarloEngine
//! ├── MonteCarloConfig   (trial count, seed, batch size, time budget)
//! ├── GbmPathGenerator   (daily exact lognormal steps)
//! ├── BarrierMonitor     (first index with spot <= barrier)
//! ├── KnockOutCallPayoff (discounted max(S_T − K, 0), zero if knocked out)
//! └── Orchestration
//!     ├── PricerRng::for_trial(seed, i) per trial
//!     ├── rayon over fixed batches, one accumulator per batch
//!     └── ordered Welford/Chan merge → PriceEstimate
//! ```
//!
//! # Examples
//!
//! ```rust
//! use pricer_core::types::MarketParameters;
//! use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
//!
//! let params = MarketParameters::new(145.0, 150.0, 140.0, 30, 0.01, 0.15);
//! let config = MonteCarloConfig::new(5_000, 42).unwrap();
//! let engine = MonteCarloEngine::new(params, config).unwrap();
//!
//! let first = engine.price();
//! let second = engine.price();
//! assert_eq!(first, second);
//! ```

mod config;
mod engine;
mod paths;

pub use config::{
    MonteCarloConfig, MonteCarloConfigBuilder, DEFAULT_BATCH_SIZE, DEFAULT_SEED, MAX_TRIALS,
};
pub use engine::{MonteCarloEngine, PriceEstimate};
pub use paths::{GbmPathGenerator, SimulatedPath};
