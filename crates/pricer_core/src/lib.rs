//! # pricer_core: Foundation for the Barrier Pricing and Hedging Engines
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Market parameters shared by the pricing and hedging flows (`types::market`)
//! - Error taxonomy: `PricingError`, `NumericalInstabilityWarning` (`types::error`)
//! - Streaming statistics with parallel merge (`math::statistics`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - thiserror: Error derivation
//! - serde: Serialisation of parameters and warnings
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::statistics::RunningStats;
//! use pricer_core::types::MarketParameters;
//!
//! let params = MarketParameters::new(145.0, 150.0, 140.0, 30, 0.01, 0.15);
//! assert!(params.validate().is_ok());
//! assert!((params.maturity_years() - 30.0 / 252.0).abs() < 1e-15);
//!
//! let mut stats = RunningStats::new();
//! for x in [1.0, 2.0, 3.0] {
//!     stats.push(x);
//! }
//! assert_eq!(stats.mean(), 2.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
