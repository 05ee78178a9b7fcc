//! Barrier monitoring and knock-out payoff evaluation.
//!
//! # Key Components
//!
//! - [`BarrierMonitor`]: Scans a path once for the first down-and-out breach
//! - [`BarrierOutcome`]: Knock-out flag and first-breach index
//! - [`KnockOutCallPayoff`]: Discounted call payoff, zero when knocked out
//!
//! For each trial the engine runs path → monitor → payoff; nothing here
//! holds per-trial state.

mod barrier;
mod payoff;

pub use barrier::{BarrierMonitor, BarrierOutcome};
pub use payoff::KnockOutCallPayoff;
