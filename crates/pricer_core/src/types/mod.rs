//! Core market and error types.
//!
//! This module provides:
//! - `market`: `MarketParameters` and the trading-day conventions used by every engine
//! - `error`: The `PricingError` taxonomy and the non-fatal `NumericalInstabilityWarning`
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`MarketParameters`], [`TRADING_DAYS_PER_YEAR`] from `market`
//! - [`PricingError`], [`NumericalInstabilityWarning`] from `error`

pub mod error;
pub mod market;

pub use error::{NumericalInstabilityWarning, PricingError};
pub use market::{MarketParameters, STEP_VOLATILITY_THRESHOLD, TRADING_DAYS_PER_YEAR};
