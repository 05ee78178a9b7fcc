//! Rolling historical volatility.
//!
//! For daily log returns `rᵢ = ln(Sᵢ/Sᵢ₋₁)` the estimate at index `i` is the
//! sample standard deviation (n − 1 denominator) of the `window` most recent
//! returns, annualised by `√252`. The output is aligned with the input
//! series: index 0 has no return, so the first estimate appears at index
//! `window`.

use pricer_core::math::statistics::RunningStats;
use pricer_core::types::{PricingError, TRADING_DAYS_PER_YEAR};

/// Rolling window used when none is configured (one trading month).
pub const DEFAULT_VOLATILITY_WINDOW: usize = 20;

/// Daily log returns of a positive price series.
///
/// # Errors
/// [`PricingError::InvalidParameter`] if any price is non-finite or not positive.
pub fn log_returns(prices: &[f64]) -> Result<Vec<f64>, PricingError> {
    validate_prices(prices)?;
    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Rolling annualised volatility aligned with `prices`.
///
/// # Arguments
/// * `prices` - Ordered positive spot observations
/// * `window` - Number of returns per estimate (at least 2)
///
/// # Errors
/// [`PricingError::InvalidParameter`] for `window < 2` or invalid prices.
///
/// # Examples
/// ```
/// use pricer_models::volatility::historical_volatility;
///
/// let prices = [100.0, 101.0, 100.0, 101.0, 100.0];
/// let vols = historical_volatility(&prices, 2).unwrap();
/// assert_eq!(vols.len(), prices.len());
/// assert!(vols[0].is_none() && vols[1].is_none());
/// assert!(vols[2].is_some());
/// ```
pub fn historical_volatility(prices: &[f64], window: usize) -> Result<Vec<Option<f64>>, PricingError> {
    if window < 2 {
        return Err(PricingError::invalid_parameter(
            "window",
            format!("must contain at least 2 returns, got {}", window),
        ));
    }
    let returns = log_returns(prices)?;
    let annualise = TRADING_DAYS_PER_YEAR.sqrt();

    let mut out = vec![None; prices.len()];
    for end in window..=returns.len() {
        let stats: RunningStats = returns[end - window..end].iter().copied().collect();
        // returns[end - 1] is the return into prices[end]
        out[end] = stats.sample_std().map(|s| s * annualise);
    }
    Ok(out)
}

/// Annualised volatility over the whole series; `None` with fewer than two returns.
pub fn realised_volatility(prices: &[f64]) -> Result<Option<f64>, PricingError> {
    let stats: RunningStats = log_returns(prices)?.into_iter().collect();
    Ok(stats.sample_std().map(|s| s * TRADING_DAYS_PER_YEAR.sqrt()))
}

fn validate_prices(prices: &[f64]) -> Result<(), PricingError> {
    match prices.iter().position(|p| !(p.is_finite() && *p > 0.0)) {
        Some(idx) => Err(PricingError::invalid_parameter(
            "prices",
            format!("observation {} must be finite and positive, got {}", idx, prices[idx]),
        )),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_log_returns() {
        let r = log_returns(&[100.0, 110.0, 99.0]).unwrap();
        assert_eq!(r.len(), 2);
        assert_relative_eq!(r[0], (1.1_f64).ln());
        assert_relative_eq!(r[1], (0.9_f64).ln());
    }

    #[test]
    fn test_alignment_and_warm_up() {
        let prices: Vec<f64> = (0..30).map(|i| 100.0 + (i % 3) as f64).collect();
        let vols = historical_volatility(&prices, 20).unwrap();
        assert_eq!(vols.len(), 30);
        assert!(vols[..20].iter().all(Option::is_none));
        assert!(vols[20..].iter().all(Option::is_some));
    }

    #[test]
    fn test_constant_series_zero_volatility() {
        let vols = historical_volatility(&[50.0; 10], 3).unwrap();
        assert_eq!(vols[3], Some(0.0));
        assert_eq!(vols[9], Some(0.0));
    }

    #[test]
    fn test_alternating_returns() {
        // Returns alternate ±ln(1.01); window of 2 has sample std ln(1.01)·√2
        let prices = [100.0, 101.0, 100.0, 101.0];
        let vols = historical_volatility(&prices, 2).unwrap();
        let expected = (1.01_f64).ln() * 2.0_f64.sqrt() * 252.0_f64.sqrt();
        assert_relative_eq!(vols[2].unwrap(), expected, epsilon = 1e-12);
        assert_relative_eq!(vols[3].unwrap(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_short_series_yields_no_estimates() {
        let vols = historical_volatility(&[100.0, 101.0], 5).unwrap();
        assert_eq!(vols, vec![None, None]);
        assert_eq!(realised_volatility(&[100.0, 101.0]).unwrap(), None);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(historical_volatility(&[100.0, 101.0, 102.0], 1).is_err());
        assert!(matches!(
            historical_volatility(&[100.0, -1.0, 102.0], 2),
            Err(PricingError::InvalidParameter { name: "prices", .. })
        ));
    }
}
