//! Discounted knock-out call payoff.

use pricer_core::types::MarketParameters;

use super::barrier::BarrierOutcome;

/// Payoff evaluator for a down-and-out call.
///
/// `0` if knocked out, otherwise `e^(−rT)·max(S_T − K, 0)`. Pure: holds only
/// the strike and discount factor.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketParameters;
/// use pricer_pricing::path_dependent::{BarrierOutcome, KnockOutCallPayoff};
///
/// let params = MarketParameters::new(100.0, 100.0, 90.0, 252, 0.0, 0.2);
/// let payoff = KnockOutCallPayoff::from_market(&params);
///
/// assert_eq!(payoff.evaluate(&[100.0, 104.0, 110.0], &BarrierOutcome::SURVIVED), 10.0);
/// assert_eq!(payoff.evaluate(&[100.0, 89.0, 110.0], &BarrierOutcome::breached_at(1)), 0.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnockOutCallPayoff {
    strike: f64,
    discount_factor: f64,
}

impl KnockOutCallPayoff {
    /// Payoff with an explicit strike and discount factor.
    #[inline]
    pub fn new(strike: f64, discount_factor: f64) -> Self {
        Self {
            strike,
            discount_factor,
        }
    }

    /// Payoff for the contract in `params`, discounted at `exp(−r·maturity_years)`.
    #[inline]
    pub fn from_market(params: &MarketParameters) -> Self {
        Self::new(params.strike, params.discount_factor())
    }

    /// Strike.
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Discount factor to maturity.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        self.discount_factor
    }

    /// Discounted payoff of one trial.
    ///
    /// An empty path pays nothing.
    #[inline]
    pub fn evaluate(&self, spots: &[f64], outcome: &BarrierOutcome) -> f64 {
        if outcome.is_knocked_out() {
            return 0.0;
        }
        match spots.last() {
            Some(&terminal) => self.discount_factor * (terminal - self.strike).max(0.0),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discounting() {
        let params = MarketParameters::new(100.0, 95.0, 80.0, 126, 0.04, 0.2);
        let payoff = KnockOutCallPayoff::from_market(&params);
        let value = payoff.evaluate(&[100.0, 105.0], &BarrierOutcome::SURVIVED);
        assert_relative_eq!(value, 10.0 * (-0.02_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_out_of_the_money_pays_zero() {
        let payoff = KnockOutCallPayoff::new(100.0, 1.0);
        assert_eq!(payoff.evaluate(&[100.0, 99.0], &BarrierOutcome::SURVIVED), 0.0);
    }

    #[test]
    fn test_knocked_out_pays_zero_even_in_the_money() {
        let payoff = KnockOutCallPayoff::new(100.0, 1.0);
        assert_eq!(payoff.evaluate(&[100.0, 80.0, 150.0], &BarrierOutcome::breached_at(1)), 0.0);
    }

    #[test]
    fn test_empty_path() {
        let payoff = KnockOutCallPayoff::new(100.0, 1.0);
        assert_eq!(payoff.evaluate(&[], &BarrierOutcome::SURVIVED), 0.0);
    }
}
