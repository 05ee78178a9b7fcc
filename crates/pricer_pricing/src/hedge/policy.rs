//! Hedge-ratio and option-value policies.
//!
//! A policy maps the current spot and the contract's market parameters to a
//! single real number. Policies are total and side-effect free; a non-finite
//! return value is reported by the simulator as
//! [`PricingError::PolicyEvaluation`](pricer_core::types::PricingError::PolicyEvaluation).
//!
//! Policies do not see calendar time. The analytic policies price at the
//! contract maturity held in [`MarketParameters`].

use pricer_core::types::MarketParameters;
use pricer_models::analytical::BlackScholes;

/// Function of `(spot, params)` used as a hedge ratio or an option value.
///
/// Any `Fn(f64, &MarketParameters) -> f64` is a policy:
///
/// ```rust
/// use pricer_core::types::MarketParameters;
/// use pricer_pricing::hedge::SpotPolicy;
///
/// let params = MarketParameters::new(100.0, 100.0, 90.0, 30, 0.01, 0.2);
/// let half = |_spot: f64, _params: &MarketParameters| 0.5;
/// assert_eq!(half.evaluate(101.0, &params), 0.5);
/// ```
pub trait SpotPolicy {
    /// Evaluates the policy at `spot`.
    fn evaluate(&self, spot: f64, params: &MarketParameters) -> f64;
}

impl<F> SpotPolicy for F
where
    F: Fn(f64, &MarketParameters) -> f64,
{
    #[inline]
    fn evaluate(&self, spot: f64, params: &MarketParameters) -> f64 {
        self(spot, params)
    }
}

/// Hedge ratio that never changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstantDelta(pub f64);

impl SpotPolicy for ConstantDelta {
    #[inline]
    fn evaluate(&self, _spot: f64, _params: &MarketParameters) -> f64 {
        self.0
    }
}

/// Black-Scholes delta of the vanilla call on the contract strike.
///
/// Returns NaN when the model cannot be built at `spot` (e.g. non-positive spot),
/// which the simulator surfaces as a policy failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlackScholesDelta;

impl SpotPolicy for BlackScholesDelta {
    fn evaluate(&self, spot: f64, params: &MarketParameters) -> f64 {
        match BlackScholes::new(spot, params.rate, params.volatility) {
            Ok(model) => model.delta(params.strike, params.maturity_years(), true),
            Err(_) => f64::NAN,
        }
    }
}

/// Black-Scholes value of the vanilla call on the contract strike.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlackScholesValue;

impl SpotPolicy for BlackScholesValue {
    fn evaluate(&self, spot: f64, params: &MarketParameters) -> f64 {
        match BlackScholes::new(spot, params.rate, params.volatility) {
            Ok(model) => model.price_call(params.strike, params.maturity_years()),
            Err(_) => f64::NAN,
        }
    }
}

/// Intrinsic value of the knock-out call: `max(S − K, 0)` strictly above the
/// barrier, zero at or below it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KnockOutIntrinsic;

impl SpotPolicy for KnockOutIntrinsic {
    #[inline]
    fn evaluate(&self, spot: f64, params: &MarketParameters) -> f64 {
        if spot <= params.barrier {
            0.0
        } else {
            (spot - params.strike).max(0.0)
        }
    }
}
