//! # Pricer Models (L2: Analytics)
//!
//! Closed-form pricing and volatility estimation used around the simulation
//! engines.
//!
//! This crate provides:
//! - Black-Scholes prices and deltas (`analytical::black_scholes`)
//! - Continuous-monitoring down-and-out call (`analytical::barrier`)
//! - Rolling historical volatility and the strike/maturity grid (`volatility`)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** where the formula allows it
//! - **Total over the valid domain**: zero volatility and zero expiry
//!   collapse to intrinsic values instead of dividing by zero
//! - **Errors from `pricer_core`**: every fallible function returns
//!   `PricingError`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod volatility;
