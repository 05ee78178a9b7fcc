//! # Random Number Generation
//!
//! Seeded pseudo-random generation for the Monte Carlo engine.
//!
//! ## Design Rationale
//!
//! - **Reproducibility**: Every generator is constructed from an explicit seed;
//!   there is no process-wide RNG state
//! - **Per-trial streams**: [`PricerRng::for_trial`] derives an independent
//!   generator from `(seed, trial_index)`, so any trial can be replayed alone
//!   and trials can run on any thread in any order
//! - **Efficiency**: Zero-allocation batch operations via `&mut [f64]` slices
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::PricerRng;
//!
//! // Generator for trial 7 of a run seeded with 42
//! let mut rng = PricerRng::for_trial(42, 7);
//! let z = rng.gen_normal();
//!
//! // Same (seed, trial) pair, same stream
//! let mut again = PricerRng::for_trial(42, 7);
//! assert_eq!(z, again.gen_normal());
//! ```

mod prng;

pub use prng::{derive_stream_seed, PricerRng};
