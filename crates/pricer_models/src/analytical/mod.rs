//! Closed-form reference prices.
//!
//! This module provides:
//! - Black-Scholes call/put prices and delta for lognormal dynamics
//! - Continuously monitored down-and-out call (Reiner-Rubinstein)
//! - Standard normal CDF/PDF
//!
//! These serve as hedge policies and as benchmarks for the Monte Carlo
//! engine: a negligible barrier must reproduce Black-Scholes, and daily
//! monitoring must price above the continuous barrier.

pub mod barrier;
pub mod black_scholes;
pub mod distributions;

pub use barrier::{down_and_out_call, down_and_out_call_from_market};
pub use black_scholes::BlackScholes;
pub use distributions::{norm_cdf, norm_pdf};
