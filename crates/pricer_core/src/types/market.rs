//! Market parameters shared by the pricing and hedging flows.
//!
//! All time quantities are expressed in trading days and converted to years
//! with a fixed 252-day convention, matching the daily simulation step.

use serde::{Deserialize, Serialize};

use super::error::{NumericalInstabilityWarning, PricingError};

/// Trading days per year used for Δt and year fractions.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Upper bound on `σ·√Δt` before a [`NumericalInstabilityWarning`] is raised.
///
/// At 0.1 a four-sigma daily move already exceeds 49%.
pub const STEP_VOLATILITY_THRESHOLD: f64 = 0.1;

/// Contract and market description for a down-and-out call.
///
/// A plain `Copy` value: engines take their own copy at construction and
/// never mutate it. Call [`validate`](Self::validate) (engines do this
/// eagerly) before use.
///
/// # Examples
/// ```
/// use pricer_core::types::MarketParameters;
///
/// let params = MarketParameters::new(100.0, 100.0, 90.0, 63, 0.05, 0.2);
/// assert!(params.validate().is_ok());
/// assert!((params.maturity_years() - 0.25).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketParameters {
    /// Spot price at inception
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Knock-out barrier level
    pub barrier: f64,
    /// Time to maturity in trading days
    pub maturity_days: u32,
    /// Annualised continuously-compounded risk-free rate
    pub rate: f64,
    /// Annualised volatility
    pub volatility: f64,
}

impl MarketParameters {
    /// Create parameters without validation.
    ///
    /// # Arguments
    ///
    /// * `spot` - Spot price at inception
    /// * `strike` - Strike price
    /// * `barrier` - Knock-out barrier level
    /// * `maturity_days` - Time to maturity in trading days
    /// * `rate` - Annualised risk-free rate
    /// * `volatility` - Annualised volatility
    pub fn new(
        spot: f64,
        strike: f64,
        barrier: f64,
        maturity_days: u32,
        rate: f64,
        volatility: f64,
    ) -> Self {
        Self {
            spot,
            strike,
            barrier,
            maturity_days,
            rate,
            volatility,
        }
    }

    /// Copy of these parameters with a different barrier level.
    #[inline]
    pub fn with_barrier(self, barrier: f64) -> Self {
        Self { barrier, ..self }
    }

    /// Copy of these parameters with a different maturity.
    #[inline]
    pub fn with_maturity_days(self, maturity_days: u32) -> Self {
        Self {
            maturity_days,
            ..self
        }
    }

    /// Validate every field.
    ///
    /// The barrier is only checked for positivity here; its position relative
    /// to the spot is a property of the product and is checked by the barrier
    /// monitor.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), PricingError> {
        check_positive("spot", self.spot)?;
        check_positive("strike", self.strike)?;
        check_positive("barrier", self.barrier)?;
        if self.maturity_days == 0 {
            return Err(PricingError::invalid_parameter(
                "maturity_days",
                "must be a positive number of trading days, got 0",
            ));
        }
        if !self.rate.is_finite() {
            return Err(PricingError::invalid_parameter(
                "rate",
                format!("must be finite, got {}", self.rate),
            ));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(PricingError::invalid_parameter(
                "volatility",
                format!("must be finite and non-negative, got {}", self.volatility),
            ));
        }
        Ok(())
    }

    /// Simulation time step in years (one trading day).
    #[inline]
    pub fn dt(&self) -> f64 {
        1.0 / TRADING_DAYS_PER_YEAR
    }

    /// Time to maturity in years.
    #[inline]
    pub fn maturity_years(&self) -> f64 {
        self.maturity_days as f64 / TRADING_DAYS_PER_YEAR
    }

    /// Discount factor to maturity, `exp(-r·T)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity_years()).exp()
    }

    /// Standard deviation of one daily log-return, `σ·√Δt`.
    #[inline]
    pub fn step_volatility(&self) -> f64 {
        self.volatility * self.dt().sqrt()
    }

    /// Warning when the daily step volatility exceeds
    /// [`STEP_VOLATILITY_THRESHOLD`].
    pub fn stability_warning(&self) -> Option<NumericalInstabilityWarning> {
        let step_volatility = self.step_volatility();
        (step_volatility > STEP_VOLATILITY_THRESHOLD).then_some(NumericalInstabilityWarning {
            step_volatility,
            threshold: STEP_VOLATILITY_THRESHOLD,
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be finite and positive, got {}", value),
        ))
    }
}
