//! Strike/maturity volatility grid built from a historical volatility series.
//!
//! Strikes span `[0.95·min, 1.05·max]` of the observed prices. Each maturity
//! row (in trading days) is filled with the historical volatility observed at
//! that index of the series, so rows are flat across strikes: there is no
//! smile information in a single price history.
//!
//! # Grid Layout
//!
//! `vols[maturity_idx][strike_idx]`, matching the volatility surfaces used
//! elsewhere in the workspace.

use pricer_core::types::PricingError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default maturity rows, in trading days.
pub const DEFAULT_GRID_MATURITIES: [u32; 6] = [10, 20, 30, 40, 50, 60];

/// Default number of strike columns.
pub const DEFAULT_GRID_STRIKES: usize = 10;

/// Strike-by-maturity grid of historical volatilities.
///
/// Cells are `None` where the series has no estimate (window not yet filled,
/// or maturity beyond the end of the series).
///
/// # Example
///
/// ```
/// use pricer_models::volatility::{historical_volatility, VolatilityGrid};
///
/// let prices: Vec<f64> = (0..80).map(|i| 100.0 * (1.0 + 0.01 * ((i % 5) as f64 - 2.0))).collect();
/// let vols = historical_volatility(&prices, 20).unwrap();
/// let grid = VolatilityGrid::from_historical(&prices, &vols, 10, &[10, 20, 30, 40, 50, 60]).unwrap();
///
/// assert_eq!(grid.strikes().len(), 10);
/// assert_eq!(grid.maturities(), &[10.0, 20.0, 30.0, 40.0, 50.0, 60.0]);
/// assert!(grid.vol(0, 0).is_none()); // index 10 precedes the 20-day window
/// assert!(grid.vol(1, 3).is_some());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolatilityGrid {
    strikes: Vec<f64>,
    maturities: Vec<f64>,
    vols: Vec<Vec<Option<f64>>>,
}

impl VolatilityGrid {
    /// Build the grid from a price series and its aligned volatility series.
    ///
    /// # Arguments
    ///
    /// * `prices` - Observed spot series (non-empty, positive)
    /// * `vols` - Volatility estimates aligned with `prices`
    /// * `n_strikes` - Number of strike columns (at least 1)
    /// * `maturities_days` - Maturity rows in trading days (non-empty)
    ///
    /// # Errors
    ///
    /// [`PricingError::InvalidParameter`] for empty inputs, mismatched lengths
    /// or non-positive prices.
    pub fn from_historical(
        prices: &[f64],
        vols: &[Option<f64>],
        n_strikes: usize,
        maturities_days: &[u32],
    ) -> Result<Self, PricingError> {
        if prices.is_empty() {
            return Err(PricingError::invalid_parameter("prices", "series is empty"));
        }
        if vols.len() != prices.len() {
            return Err(PricingError::invalid_parameter(
                "vols",
                format!(
                    "length {} does not match price series length {}",
                    vols.len(),
                    prices.len()
                ),
            ));
        }
        if n_strikes == 0 {
            return Err(PricingError::invalid_parameter("n_strikes", "must be at least 1"));
        }
        if maturities_days.is_empty() {
            return Err(PricingError::invalid_parameter(
                "maturities",
                "at least one maturity row is required",
            ));
        }

        let (lo, hi) = prices.iter().try_fold((f64::INFINITY, 0.0_f64), |(lo, hi), &p| {
            if p.is_finite() && p > 0.0 {
                Ok((lo.min(p), hi.max(p)))
            } else {
                Err(PricingError::invalid_parameter(
                    "prices",
                    format!("observations must be finite and positive, got {}", p),
                ))
            }
        })?;

        let strikes = linspace(0.95 * lo, 1.05 * hi, n_strikes);
        let maturities = maturities_days.iter().map(|&d| f64::from(d)).collect();
        let vols = maturities_days
            .iter()
            .map(|&d| {
                let cell = vols.get(d as usize).copied().flatten();
                vec![cell; n_strikes]
            })
            .collect();

        Ok(Self {
            strikes,
            maturities,
            vols,
        })
    }

    /// Strike axis.
    #[inline]
    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    /// Maturity axis in trading days.
    #[inline]
    pub fn maturities(&self) -> &[f64] {
        &self.maturities
    }

    /// Grid rows, `vols[maturity_idx][strike_idx]`.
    #[inline]
    pub fn rows(&self) -> &[Vec<Option<f64>>] {
        &self.vols
    }

    /// Single cell; `None` when out of range or unavailable.
    pub fn vol(&self, maturity_idx: usize, strike_idx: usize) -> Option<f64> {
        self.vols.get(maturity_idx)?.get(strike_idx).copied().flatten()
    }

    /// Decompose into the `(strikes, maturities, volatility_grid)` triple.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<Vec<Option<f64>>>) {
        (self.strikes, self.maturities, self.vols)
    }
}

fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![start];
    }
    let step = (end - start) / (n - 1) as f64;
    (0..n)
        .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
        .collect()
}
