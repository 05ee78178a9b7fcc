//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Fatal errors from parameter validation, barrier set-up and policy evaluation
//! - `NumericalInstabilityWarning`: Non-fatal diagnostic surfaced alongside results

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Categorised pricing and hedging errors.
///
/// Every engine validates its inputs when it is constructed, so a malformed
/// configuration is reported here instead of producing a partially computed
/// result.
///
/// # Variants
/// - `InvalidParameter`: Malformed market parameters, counts or series
/// - `BarrierConfiguration`: Barrier inconsistent with spot at inception
/// - `PolicyEvaluation`: A hedge-ratio or option-value policy returned a non-finite value
/// - `ReplayCompleted`: A completed hedge replay was asked to run again
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::invalid_parameter("volatility", "must be non-negative, got -0.1");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'volatility': must be non-negative, got -0.1"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// A parameter is outside its admissible domain.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Human-readable description of the violation
        reason: String,
    },

    /// Down-and-out barrier at or above the spot at inception.
    #[error(
        "Barrier configuration error: down-and-out barrier {barrier} must lie strictly below spot {spot}"
    )]
    BarrierConfiguration {
        /// Spot at inception
        spot: f64,
        /// Barrier level
        barrier: f64,
    },

    /// A supplied policy function returned a non-finite value.
    #[error("Policy evaluation error: {policy} policy returned {value} on day {day} (spot {spot})")]
    PolicyEvaluation {
        /// Which policy failed (`"delta"` or `"value"`)
        policy: &'static str,
        /// Day index at which the policy was evaluated
        day: usize,
        /// Spot passed to the policy
        spot: f64,
        /// Offending value
        value: f64,
    },

    /// The hedge replay has already computed its terminal PnL.
    #[error("Hedge replay already completed; construct a new simulator to re-run")]
    ReplayCompleted,
}

impl PricingError {
    /// Shorthand for [`PricingError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        PricingError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Non-fatal warning: single-step volatility exceeds the sanity threshold.
///
/// Raised when `σ·√Δt` is large enough that one simulated day can move the
/// spot by an implausible fraction. Results are still produced; the caller
/// decides whether to trust them.
///
/// # Examples
/// ```
/// use pricer_core::types::NumericalInstabilityWarning;
///
/// let w = NumericalInstabilityWarning { step_volatility: 0.2, threshold: 0.1 };
/// assert!(format!("{}", w).contains("0.2"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericalInstabilityWarning {
    /// Observed `σ·√Δt`
    pub step_volatility: f64,
    /// Threshold that was exceeded
    pub threshold: f64,
}

impl fmt::Display for NumericalInstabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Numerical instability: daily step volatility {} exceeds threshold {}",
            self.step_volatility, self.threshold
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = PricingError::invalid_parameter("maturity_days", "must be positive, got 0");
        assert_eq!(
            format!("{}", err),
            "Invalid parameter 'maturity_days': must be positive, got 0"
        );
    }

    #[test]
    fn test_barrier_configuration_display() {
        let err = PricingError::BarrierConfiguration {
            spot: 100.0,
            barrier: 105.0,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("105"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn test_policy_evaluation_display() {
        let err = PricingError::PolicyEvaluation {
            policy: "delta",
            day: 3,
            spot: 99.0,
            value: f64::NAN,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("delta"));
        assert!(msg.contains("day 3"));
        assert!(msg.contains("NaN"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&PricingError::ReplayCompleted);
    }
}
