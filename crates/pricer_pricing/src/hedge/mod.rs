//! Delta-hedge replay over an observed price series.
//!
//! # Key Components
//!
//! - [`SpotPolicy`]: `(spot, params) → f64` plug-in for hedge ratios and option values
//! - [`HedgeReplaySimulator`]: Sequential self-financing replay with a
//!   `Initialized → Replaying → Completed` lifecycle
//! - [`HedgeResult`]: Daily cumulative PnL plus terminal and replication PnL
//!
//! The replay is single-threaded: each day depends on the previous day's
//! position.

mod policy;
mod simulator;

pub use policy::{BlackScholesDelta, BlackScholesValue, ConstantDelta, KnockOutIntrinsic, SpotPolicy};
pub use simulator::{HedgeReplaySimulator, HedgeResult, HedgeState, ReplayState};
