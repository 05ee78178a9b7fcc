//! Discrete down-and-out barrier monitoring.
//!
//! The barrier is checked once per simulated day, on the same grid the path
//! generator uses. A breach is the first index with `spot <= barrier`.
//!
//! # Discrete Monitoring Bias
//!
//! Daily observation cannot see a path that dips below the barrier and
//! recovers between two observations, so the knock-out probability is
//! systematically lower than under continuous monitoring and the estimated
//! knock-out call price is correspondingly higher. The engine reports the
//! discretely monitored contract as simulated; it applies no continuity
//! correction. Compare with
//! `pricer_models::analytical::down_and_out_call` for the continuous limit.

use pricer_core::types::{MarketParameters, PricingError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of scanning one path for a barrier breach.
///
/// Derived from a path once and never mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BarrierOutcome {
    first_breach: Option<usize>,
}

impl BarrierOutcome {
    /// Outcome of a path that never touched the barrier.
    pub const SURVIVED: BarrierOutcome = BarrierOutcome { first_breach: None };

    /// Outcome of a path first breaching at `index`.
    #[inline]
    pub fn breached_at(index: usize) -> Self {
        Self {
            first_breach: Some(index),
        }
    }

    /// True when the barrier was breached.
    #[inline]
    pub fn is_knocked_out(&self) -> bool {
        self.first_breach.is_some()
    }

    /// Index of the first observation at or below the barrier.
    #[inline]
    pub fn first_breach(&self) -> Option<usize> {
        self.first_breach
    }
}

/// Down-and-out barrier monitor.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::path_dependent::BarrierMonitor;
///
/// let monitor = BarrierMonitor::down_and_out(100.0, 95.0).unwrap();
///
/// let outcome = monitor.scan(&[100.0, 97.0, 95.0, 99.0, 94.0]);
/// assert!(outcome.is_knocked_out());
/// assert_eq!(outcome.first_breach(), Some(2));
///
/// assert!(!monitor.scan(&[100.0, 96.0, 101.0]).is_knocked_out());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarrierMonitor {
    barrier: f64,
}

impl BarrierMonitor {
    /// Monitor for a down-and-out barrier below the inception spot.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidParameter`] for a non-positive spot or barrier
    /// - [`PricingError::BarrierConfiguration`] when `barrier >= spot`: the
    ///   contract would be dead at inception
    pub fn down_and_out(spot: f64, barrier: f64) -> Result<Self, PricingError> {
        if !(spot.is_finite() && spot > 0.0) {
            return Err(PricingError::invalid_parameter(
                "spot",
                format!("must be finite and positive, got {}", spot),
            ));
        }
        if !(barrier.is_finite() && barrier > 0.0) {
            return Err(PricingError::invalid_parameter(
                "barrier",
                format!("must be finite and positive, got {}", barrier),
            ));
        }
        if barrier >= spot {
            return Err(PricingError::BarrierConfiguration { spot, barrier });
        }
        Ok(Self { barrier })
    }

    /// Monitor for the barrier in `params`.
    pub fn from_market(params: &MarketParameters) -> Result<Self, PricingError> {
        Self::down_and_out(params.spot, params.barrier)
    }

    /// Barrier level.
    #[inline]
    pub fn barrier(&self) -> f64 {
        self.barrier
    }

    /// Single left-to-right scan; stops at the first breach.
    #[inline]
    pub fn scan(&self, spots: &[f64]) -> BarrierOutcome {
        match spots.iter().position(|&s| s <= self.barrier) {
            Some(index) => BarrierOutcome::breached_at(index),
            None => BarrierOutcome::SURVIVED,
        }
    }
}
