//! Historical volatility estimation and the strike/maturity volatility grid.
//!
//! - `historical`: Rolling annualised volatility of daily log returns
//! - `grid`: `(strikes, maturities, volatility_grid)` triple handed to renderers
//!
//! Both operate on a plain ordered series of positive spot observations, as
//! supplied by a price-series provider or produced by a simulated path.

pub mod grid;
pub mod historical;

pub use grid::{VolatilityGrid, DEFAULT_GRID_MATURITIES, DEFAULT_GRID_STRIKES};
pub use historical::{historical_volatility, log_returns, realised_volatility, DEFAULT_VOLATILITY_WINDOW};
