//! Black-Scholes pricing for European options on a non-dividend-paying asset.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! When σ√T vanishes (zero volatility or expiry) the formulas collapse to
//! the discounted forward intrinsic value, so the model stays total over
//! non-negative volatilities.

use num_traits::Float;
use pricer_core::types::{MarketParameters, PricingError};

use super::distributions::{constant, norm_cdf};

/// Below this σ√T the degenerate (deterministic) limit is used.
const MIN_TOTAL_VOLATILITY: f64 = 1e-12;

/// d₁ returned in the deterministic limit; Φ(±40) is 0 or 1 in f64.
const DEGENERATE_D1: f64 = 40.0;

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float`
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    spot: T,
    rate: T,
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised)
    /// * `volatility` - Volatility (must be non-negative)
    ///
    /// # Errors
    /// [`PricingError::InvalidParameter`] if spot is not positive, the rate is
    /// not finite, or volatility is negative.
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, PricingError> {
        let zero = T::zero();

        if !(spot.is_finite() && spot > zero) {
            return Err(PricingError::invalid_parameter(
                "spot",
                format!("must be finite and positive, got {}", to_f64(spot)),
            ));
        }
        if !rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                format!("must be finite, got {}", to_f64(rate)),
            ));
        }
        if !(volatility.is_finite() && volatility >= zero) {
            return Err(PricingError::invalid_parameter(
                "volatility",
                format!("must be finite and non-negative, got {}", to_f64(volatility)),
            ));
        }

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Computes d₁ for the given strike and expiry (years).
    ///
    /// In the deterministic limit returns ±40 according to whether the
    /// forward finishes in or out of the money.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let expiry = expiry.max(T::zero());
        let total_vol = self.volatility * expiry.sqrt();
        let log_forward_moneyness = (self.spot / strike).ln() + self.rate * expiry;

        if total_vol <= constant(MIN_TOTAL_VOLATILITY) {
            let large = constant::<T>(DEGENERATE_D1);
            return if log_forward_moneyness > T::zero() {
                large
            } else {
                -large
            };
        }

        (log_forward_moneyness + constant::<T>(0.5) * total_vol * total_vol) / total_vol
    }

    /// Computes d₂ = d₁ − σ√T.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.max(T::zero()).sqrt()
    }

    /// European call price.
    ///
    /// # Arguments
    /// * `strike` - Strike price (K)
    /// * `expiry` - Time to expiration in years (T)
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        let expiry = expiry.max(T::zero());
        let df = (-self.rate * expiry).exp();
        self.spot * norm_cdf(self.d1(strike, expiry)) - strike * df * norm_cdf(self.d2(strike, expiry))
    }

    /// European put price.
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        let expiry = expiry.max(T::zero());
        let df = (-self.rate * expiry).exp();
        strike * df * norm_cdf(-self.d2(strike, expiry)) - self.spot * norm_cdf(-self.d1(strike, expiry))
    }

    /// Spot delta: N(d₁) for a call, N(d₁) − 1 for a put.
    pub fn delta(&self, strike: T, expiry: T, is_call: bool) -> T {
        let nd1 = norm_cdf(self.d1(strike, expiry));
        if is_call {
            nd1
        } else {
            nd1 - T::one()
        }
    }
}

impl BlackScholes<f64> {
    /// Model at the inception spot of a set of market parameters.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::MarketParameters;
    /// use pricer_models::analytical::BlackScholes;
    ///
    /// let params = MarketParameters::new(100.0, 100.0, 90.0, 252, 0.05, 0.2);
    /// let bs = BlackScholes::from_market(&params).unwrap();
    /// assert!((bs.price_call(params.strike, params.maturity_years()) - 10.4506).abs() < 1e-3);
    /// ```
    pub fn from_market(params: &MarketParameters) -> Result<Self, PricingError> {
        Self::new(params.spot, params.rate, params.volatility)
    }

    /// Same model re-anchored at another spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, PricingError> {
        Self::new(spot, self.rate, self.volatility)
    }
}

#[inline]
fn to_f64<T: Float>(x: T) -> f64 {
    x.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn atm() -> BlackScholes<f64> {
        BlackScholes::new(100.0, 0.05, 0.2).unwrap()
    }

    // ==========================================================
    // Construction
    // ==========================================================

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(BlackScholes::new(0.0_f64, 0.05, 0.2).is_err());
        assert!(BlackScholes::new(-1.0_f64, 0.05, 0.2).is_err());
        assert!(BlackScholes::new(100.0_f64, f64::NAN, 0.2).is_err());
        assert!(matches!(
            BlackScholes::new(100.0_f64, 0.05, -0.2),
            Err(PricingError::InvalidParameter {
                name: "volatility",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_volatility_accepted() {
        assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_ok());
    }

    // ==========================================================
    // Prices
    // ==========================================================

    #[test]
    fn test_reference_prices() {
        // Hull, S=K=100, r=5%, σ=20%, T=1
        let bs = atm();
        assert_relative_eq!(bs.price_call(100.0, 1.0), 10.450_583_572_185_565, epsilon = 1e-4);
        assert_relative_eq!(bs.price_put(100.0, 1.0), 5.573_526_022_256_971, epsilon = 1e-4);
    }

    #[test]
    fn test_put_call_parity() {
        let bs = atm();
        for strike in [80.0, 95.0, 100.0, 105.0, 130.0] {
            for expiry in [0.05, 0.25, 1.0, 3.0] {
                let lhs = bs.price_call(strike, expiry) - bs.price_put(strike, expiry);
                let rhs = 100.0 - strike * (-0.05_f64 * expiry).exp();
                assert_relative_eq!(lhs, rhs, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_zero_volatility_is_discounted_forward_intrinsic() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.0).unwrap();
        let expected = 100.0 - 95.0 * (-0.05_f64).exp();
        assert_relative_eq!(bs.price_call(95.0, 1.0), expected, epsilon = 1e-12);
        assert_relative_eq!(bs.price_call(120.0, 1.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_expiry_is_intrinsic() {
        let bs = atm();
        assert_relative_eq!(bs.price_call(90.0, 0.0), 10.0, epsilon = 1e-12);
        assert_relative_eq!(bs.price_call(110.0, 0.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(bs.price_put(110.0, 0.0), 10.0, epsilon = 1e-12);
    }

    // ==========================================================
    // Delta
    // ==========================================================

    #[test]
    fn test_delta_bounds() {
        let bs = atm();
        for strike in [50.0, 90.0, 100.0, 110.0, 200.0] {
            let call = bs.delta(strike, 0.5, true);
            let put = bs.delta(strike, 0.5, false);
            assert!((0.0..=1.0).contains(&call));
            assert!((-1.0..=0.0).contains(&put));
            assert_relative_eq!(call - put, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let bs = atm();
        let h = 1e-3;
        let up = bs.with_spot(100.0 + h).unwrap().price_call(100.0, 0.5);
        let down = bs.with_spot(100.0 - h).unwrap().price_call(100.0, 0.5);
        assert_relative_eq!(bs.delta(100.0, 0.5, true), (up - down) / (2.0 * h), epsilon = 1e-4);
    }

    #[test]
    fn test_from_market() {
        let params = MarketParameters::new(145.0, 150.0, 140.0, 30, 0.01, 0.15);
        let bs = BlackScholes::from_market(&params).unwrap();
        assert_eq!(bs.spot(), 145.0);
        assert_eq!(bs.rate(), 0.01);
        assert_eq!(bs.volatility(), 0.15);
    }
}
