//! Closed-form down-and-out call under continuous barrier monitoring.
//!
//! Reiner-Rubinstein formulas without dividends or rebate. With
//! λ = (r + σ²/2)/σ² and the reflected spot H²/S:
//!
//! **K ≥ H**: C_do = C(S, K) − (H/S)^(2λ−2)·C(H²/S, K)
//!
//! **K < H**:
//! ```text
//! x₁ = ln(S/H)/(σ√T) + λσ√T,   y₁ = ln(H/S)/(σ√T) + λσ√T
//! C_do = S·N(x₁) − K·e^(−rT)·N(x₁ − σ√T)
//!      − S·(H/S)^(2λ)·N(y₁) + K·e^(−rT)·(H/S)^(2λ−2)·N(y₁ − σ√T)
//! ```
//!
//! A simulation that checks the barrier once per day misses crossings
//! between observations, so its price sits above this continuous value.

use pricer_core::types::{MarketParameters, PricingError};

use super::black_scholes::BlackScholes;
use super::distributions::norm_cdf;

/// Continuously monitored down-and-out call price.
///
/// # Arguments
/// * `spot` - Spot price (must lie strictly above the barrier)
/// * `strike` - Strike price
/// * `barrier` - Knock-out level
/// * `rate` - Risk-free rate (annualised)
/// * `volatility` - Volatility (must be positive)
/// * `expiry` - Time to expiry in years
///
/// # Errors
/// - [`PricingError::BarrierConfiguration`] if `barrier >= spot`
/// - [`PricingError::InvalidParameter`] for non-positive volatility, strike or barrier
///
/// # Examples
/// ```
/// use pricer_models::analytical::{down_and_out_call, BlackScholes};
///
/// let vanilla = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap().price_call(100.0, 0.25);
/// let knock_out = down_and_out_call(100.0, 100.0, 90.0, 0.05, 0.2, 0.25).unwrap();
/// assert!(knock_out < vanilla);
/// assert!(knock_out > 0.0);
/// ```
pub fn down_and_out_call(
    spot: f64,
    strike: f64,
    barrier: f64,
    rate: f64,
    volatility: f64,
    expiry: f64,
) -> Result<f64, PricingError> {
    if !(barrier.is_finite() && barrier > 0.0) {
        return Err(PricingError::invalid_parameter(
            "barrier",
            format!("must be finite and positive, got {}", barrier),
        ));
    }
    if !(strike.is_finite() && strike > 0.0) {
        return Err(PricingError::invalid_parameter(
            "strike",
            format!("must be finite and positive, got {}", strike),
        ));
    }
    if !(volatility.is_finite() && volatility > 0.0) {
        return Err(PricingError::invalid_parameter(
            "volatility",
            format!("must be finite and positive, got {}", volatility),
        ));
    }
    if barrier >= spot {
        return Err(PricingError::BarrierConfiguration { spot, barrier });
    }

    let model = BlackScholes::new(spot, rate, volatility)?;
    let expiry = expiry.max(0.0);
    if expiry == 0.0 {
        return Ok((spot - strike).max(0.0));
    }

    let total_vol = volatility * expiry.sqrt();
    let lambda = (rate + 0.5 * volatility * volatility) / (volatility * volatility);
    let ratio = barrier / spot;
    let df = (-rate * expiry).exp();

    let price = if strike >= barrier {
        let reflected = model.with_spot(barrier * barrier / spot)?;
        model.price_call(strike, expiry)
            - ratio.powf(2.0 * lambda - 2.0) * reflected.price_call(strike, expiry)
    } else {
        let x1 = (spot / barrier).ln() / total_vol + lambda * total_vol;
        let y1 = (barrier / spot).ln() / total_vol + lambda * total_vol;
        spot * norm_cdf(x1) - strike * df * norm_cdf(x1 - total_vol)
            - spot * ratio.powf(2.0 * lambda) * norm_cdf(y1)
            + strike * df * ratio.powf(2.0 * lambda - 2.0) * norm_cdf(y1 - total_vol)
    };

    Ok(price.max(0.0))
}

/// [`down_and_out_call`] evaluated on a set of market parameters.
pub fn down_and_out_call_from_market(params: &MarketParameters) -> Result<f64, PricingError> {
    params.validate()?;
    down_and_out_call(
        params.spot,
        params.strike,
        params.barrier,
        params.rate,
        params.volatility,
        params.maturity_years(),
    )
}
