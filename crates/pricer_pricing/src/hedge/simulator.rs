//! Discrete self-financing delta-hedge replay.
//!
//! Replays a short option position hedged with the underlying over an
//! observed price series. Only the contract's life is replayed: the first
//! `maturity_days` observations, so `S_{L−1}` below is the price on the last
//! trading day and later observations are ignored.
//!
//! ```text
//! day 0:      cash = V(S₀) − δ₀·S₀,  position = δ₀,  pnl = 0
//! day t ≥ 1:  pnl  += position·(S_t − S_{t−1})
//!             δ_t   = delta_policy(S_t)
//!             cash += (position − δ_t)·S_t
//!             position = δ_t
//! terminal:   terminal_pnl    = pnl + cash − V(S_{L−1})
//!             replication_pnl = cash + position·S_{L−1} − V(S_{L−1})
//! ```
//!
//! Rebalancing is funded from cash only, so `cash + position·S_t` always
//! equals `V(S₀)` plus the cumulative mark-to-market PnL.
//!
//! # State Machine
//!
//! `Initialized → Replaying → Completed`. A completed replay can be queried
//! but not re-run; construct a new simulator instead.

use pricer_core::types::{MarketParameters, PricingError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::policy::SpotPolicy;

/// Lifecycle of a [`HedgeReplaySimulator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReplayState {
    /// Day 0 set up, no day processed yet.
    Initialized,
    /// At least one day processed, terminal PnL not yet computed.
    Replaying,
    /// Terminal PnL computed.
    Completed,
}

/// Running hedge book.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HedgeState {
    /// Cumulative mark-to-market PnL of the hedge position.
    pub cumulative_pnl: f64,
    /// Cash balance.
    pub cash: f64,
    /// Units of the underlying held.
    pub position: f64,
}

/// Outcome of a completed replay.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HedgeResult {
    /// Cumulative PnL after each day, one entry per price (first entry 0).
    pub daily_pnl: Vec<f64>,
    /// `cumulative_pnl + final_cash − V(S_end)`.
    pub terminal_pnl: f64,
    /// Cash balance after the last rebalance.
    pub final_cash: f64,
    /// Hedge position after the last rebalance.
    pub final_position: f64,
    /// `final_cash + final_position·S_end − V(S_end)`.
    pub replication_pnl: f64,
}

/// Day-by-day delta-hedge replay over an observed price series.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketParameters;
/// use pricer_pricing::hedge::{ConstantDelta, HedgeReplaySimulator, ReplayState};
///
/// let params = MarketParameters::new(100.0, 100.0, 90.0, 4, 0.0, 0.2);
/// let prices = [100.0, 101.0, 99.0, 100.0];
/// let zero_value = |_: f64, _: &MarketParameters| 0.0;
///
/// let mut sim =
///     HedgeReplaySimulator::new(&prices, params, 0.5, ConstantDelta(0.5), zero_value).unwrap();
/// assert_eq!(sim.step().unwrap(), ReplayState::Replaying);
///
/// let result = sim.finish().unwrap();
/// assert_eq!(result.daily_pnl, vec![0.0, 0.5, -0.5, 0.0]);
/// assert_eq!(result.terminal_pnl, -50.0);
/// ```
#[derive(Debug)]
pub struct HedgeReplaySimulator<'a, D, V> {
    prices: &'a [f64],
    params: MarketParameters,
    delta_policy: D,
    value_policy: V,
    day: usize,
    book: HedgeState,
    daily_pnl: Vec<f64>,
    state: ReplayState,
    result: Option<HedgeResult>,
}

impl<'a, D, V> HedgeReplaySimulator<'a, D, V>
where
    D: SpotPolicy,
    V: SpotPolicy,
{
    /// Sets up day 0 of the replay over `prices[..params.maturity_days]`.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidParameter`] for invalid market parameters, a
    ///   maturity under two days, a series shorter than the maturity, a
    ///   non-positive or non-finite price within the horizon or a non-finite
    ///   initial delta
    /// - [`PricingError::PolicyEvaluation`] if the option value at `S₀` is
    ///   not finite
    pub fn new(
        prices: &'a [f64],
        params: MarketParameters,
        initial_delta: f64,
        delta_policy: D,
        value_policy: V,
    ) -> Result<Self, PricingError> {
        params.validate()?;
        let horizon = params.maturity_days as usize;
        if horizon < 2 {
            return Err(PricingError::invalid_parameter(
                "maturity_days",
                format!("hedge replay needs at least 2 trading days, got {}", horizon),
            ));
        }
        if prices.len() < horizon {
            return Err(PricingError::invalid_parameter(
                "price_series",
                format!(
                    "{} observations required to cover the maturity, got {}",
                    horizon,
                    prices.len()
                ),
            ));
        }
        let prices = &prices[..horizon];
        if let Some((day, &p)) = prices
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.is_finite() && **p > 0.0))
        {
            return Err(PricingError::invalid_parameter(
                "price_series",
                format!("observation {} must be finite and positive, got {}", day, p),
            ));
        }
        if !initial_delta.is_finite() {
            return Err(PricingError::invalid_parameter(
                "initial_delta",
                format!("must be finite, got {}", initial_delta),
            ));
        }

        let s0 = prices[0];
        let v0 = checked("value", &value_policy, 0, s0, &params)?;

        debug!(
            days = prices.len() - 1,
            initial_delta, initial_value = v0, "Hedge replay initialised"
        );

        let mut daily_pnl = Vec::with_capacity(prices.len());
        daily_pnl.push(0.0);

        Ok(Self {
            prices,
            params,
            delta_policy,
            value_policy,
            day: 0,
            book: HedgeState {
                cumulative_pnl: 0.0,
                cash: v0 - initial_delta * s0,
                position: initial_delta,
            },
            daily_pnl,
            state: ReplayState::Initialized,
            result: None,
        })
    }

    /// Current lifecycle state.
    #[inline]
    pub fn state(&self) -> ReplayState {
        self.state
    }

    /// Hedge book after the last processed day.
    #[inline]
    pub fn hedge_state(&self) -> HedgeState {
        self.book
    }

    /// Index of the last processed day.
    #[inline]
    pub fn day(&self) -> usize {
        self.day
    }

    /// Market parameters passed to the policies.
    #[inline]
    pub fn params(&self) -> &MarketParameters {
        &self.params
    }

    /// Cumulative PnL for each processed day so far.
    #[inline]
    pub fn daily_pnl(&self) -> &[f64] {
        &self.daily_pnl
    }

    /// Result of a completed replay.
    #[inline]
    pub fn result(&self) -> Option<&HedgeResult> {
        self.result.as_ref()
    }

    /// Processes the next day, or computes the terminal PnL once every day
    /// has been processed. Returns the state afterwards.
    ///
    /// A failing policy leaves the simulator untouched.
    ///
    /// # Errors
    ///
    /// - [`PricingError::ReplayCompleted`] once the replay has completed
    /// - [`PricingError::PolicyEvaluation`] if a policy returns a non-finite value
    pub fn step(&mut self) -> Result<ReplayState, PricingError> {
        if self.state == ReplayState::Completed {
            return Err(PricingError::ReplayCompleted);
        }

        let last = self.prices.len() - 1;
        if self.day == last {
            self.complete()?;
            return Ok(self.state);
        }

        let t = self.day + 1;
        let spot = self.prices[t];
        let new_position = checked("delta", &self.delta_policy, t, spot, &self.params)?;

        let book = &mut self.book;
        book.cumulative_pnl += book.position * (spot - self.prices[t - 1]);
        book.cash += (book.position - new_position) * spot;
        book.position = new_position;

        self.daily_pnl.push(book.cumulative_pnl);
        self.day = t;
        self.state = ReplayState::Replaying;
        Ok(self.state)
    }

    /// Processes every remaining day and computes the terminal PnL.
    ///
    /// # Errors
    ///
    /// As for [`step`](Self::step).
    pub fn finish(&mut self) -> Result<&HedgeResult, PricingError> {
        if self.state == ReplayState::Completed {
            return Err(PricingError::ReplayCompleted);
        }
        while self.step()? != ReplayState::Completed {}
        self.result.as_ref().ok_or(PricingError::ReplayCompleted)
    }

    /// Runs the replay to completion and returns an owned result.
    ///
    /// # Errors
    ///
    /// As for [`step`](Self::step).
    pub fn run(&mut self) -> Result<HedgeResult, PricingError> {
        self.finish().cloned()
    }

    fn complete(&mut self) -> Result<(), PricingError> {
        let day = self.prices.len() - 1;
        let spot = self.prices[day];
        let terminal_value = checked("value", &self.value_policy, day, spot, &self.params)?;

        let book = self.book;
        let result = HedgeResult {
            daily_pnl: self.daily_pnl.clone(),
            terminal_pnl: book.cumulative_pnl + book.cash - terminal_value,
            final_cash: book.cash,
            final_position: book.position,
            replication_pnl: book.cash + book.position * spot - terminal_value,
        };

        info!(
            days = day,
            terminal_pnl = result.terminal_pnl,
            replication_pnl = result.replication_pnl,
            "Hedge replay completed"
        );

        self.result = Some(result);
        self.state = ReplayState::Completed;
        Ok(())
    }
}

fn checked<P: SpotPolicy>(
    policy_name: &'static str,
    policy: &P,
    day: usize,
    spot: f64,
    params: &MarketParameters,
) -> Result<f64, PricingError> {
    let value = policy.evaluate(spot, params);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::PolicyEvaluation {
            policy: policy_name,
            day,
            spot,
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hedge::{BlackScholesDelta, BlackScholesValue, ConstantDelta};
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn params() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 90.0, 30, 0.01, 0.2)
    }

    /// Contract whose life spans exactly `prices`.
    fn params_for(prices: &[f64]) -> MarketParameters {
        params().with_maturity_days(prices.len() as u32)
    }

    fn zero(_: f64, _: &MarketParameters) -> f64 {
        0.0
    }

    // ========================================================================
    // Accounting
    // ========================================================================

    #[test]
    fn test_reference_scenario() {
        let prices = [100.0, 101.0, 99.0, 100.0];
        let mut sim = HedgeReplaySimulator::new(&prices, params_for(&prices), 0.5, ConstantDelta(0.5), zero)
            .unwrap();
        let result = sim.run().unwrap();

        assert_eq!(result.daily_pnl, vec![0.0, 0.5, -0.5, 0.0]);
        assert_eq!(result.final_cash, -50.0);
        assert_eq!(result.final_position, 0.5);
        assert_eq!(result.terminal_pnl, -50.0);
        assert_eq!(result.replication_pnl, 0.0);
    }

    #[test]
    fn test_constant_series_has_no_pnl() {
        let prices = [100.0; 6];
        let value = |_: f64, _: &MarketParameters| 4.0;
        let mut sim =
            HedgeReplaySimulator::new(&prices, params_for(&prices), 0.4, ConstantDelta(0.4), value).unwrap();
        let result = sim.run().unwrap();

        assert!(result.daily_pnl.iter().all(|&p| p == 0.0));
        assert_eq!(result.replication_pnl, 0.0);
        assert_eq!(result.terminal_pnl, result.final_cash - 4.0);
    }

    #[test]
    fn test_rebalance_moves_cash() {
        let prices = [100.0, 110.0];
        let delta = |spot: f64, _: &MarketParameters| if spot > 105.0 { 0.8 } else { 0.5 };
        let mut sim = HedgeReplaySimulator::new(&prices, params_for(&prices), 0.5, delta, zero).unwrap();
        let result = sim.run().unwrap();

        // buys 0.3 units at 110
        assert_relative_eq!(result.final_cash, -50.0 - 33.0, epsilon = 1e-12);
        assert_eq!(result.final_position, 0.8);
        assert_relative_eq!(result.daily_pnl[1], 5.0, epsilon = 1e-12);
        assert_relative_eq!(result.replication_pnl, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_daily_pnl_length_matches_prices() {
        let prices = [100.0, 100.5, 101.0, 99.5, 98.0, 102.0];
        let mut sim = HedgeReplaySimulator::new(
            &prices,
            params_for(&prices),
            0.5,
            BlackScholesDelta,
            BlackScholesValue,
        )
        .unwrap();
        assert_eq!(sim.run().unwrap().daily_pnl.len(), prices.len());
    }

    #[test]
    fn test_replay_stops_at_maturity() {
        let prices = [100.0, 101.0, 99.0, 100.0, 120.0, 130.0, 140.0];
        let p = params().with_maturity_days(4);
        let mut sim = HedgeReplaySimulator::new(&prices, p, 0.5, ConstantDelta(0.5), zero).unwrap();
        let result = sim.run().unwrap();

        assert_eq!(result.daily_pnl, vec![0.0, 0.5, -0.5, 0.0]);
        assert_eq!(sim.day(), 3);
        assert_eq!(result.replication_pnl, 0.0);
    }

    #[test]
    fn test_horizon_errors() {
        let prices = [100.0, 101.0, 102.0];
        assert!(matches!(
            HedgeReplaySimulator::new(
                &prices,
                params().with_maturity_days(5),
                0.5,
                ConstantDelta(0.5),
                zero
            ),
            Err(PricingError::InvalidParameter { name: "price_series", .. })
        ));
        assert!(matches!(
            HedgeReplaySimulator::new(
                &prices,
                params().with_maturity_days(1),
                0.5,
                ConstantDelta(0.5),
                zero
            ),
            Err(PricingError::InvalidParameter { name: "maturity_days", .. })
        ));

        // prices past expiry are never inspected
        let trailing_garbage = [100.0, 101.0, f64::NAN, -3.0];
        assert!(HedgeReplaySimulator::new(
            &trailing_garbage,
            params().with_maturity_days(2),
            0.5,
            ConstantDelta(0.5),
            zero
        )
        .is_ok());
    }

    // ========================================================================
    // State machine
    // ========================================================================

    #[test]
    fn test_state_transitions() {
        let prices = [100.0, 101.0, 102.0];
        let mut sim = HedgeReplaySimulator::new(&prices, params_for(&prices), 0.5, ConstantDelta(0.5), zero)
            .unwrap();
        assert_eq!(sim.state(), ReplayState::Initialized);
        assert!(sim.result().is_none());

        assert_eq!(sim.step().unwrap(), ReplayState::Replaying);
        assert_eq!(sim.day(), 1);
        assert_eq!(sim.step().unwrap(), ReplayState::Replaying);
        assert_eq!(sim.day(), 2);
        assert_eq!(sim.step().unwrap(), ReplayState::Completed);

        assert!(sim.result().is_some());
        assert_eq!(sim.daily_pnl(), sim.result().unwrap().daily_pnl.as_slice());
    }

    #[test]
    fn test_completed_replay_is_not_rerunnable() {
        let prices = [100.0, 101.0];
        let mut sim = HedgeReplaySimulator::new(&prices, params_for(&prices), 0.5, ConstantDelta(0.5), zero)
            .unwrap();
        let first = sim.run().unwrap();

        assert_eq!(sim.run(), Err(PricingError::ReplayCompleted));
        assert_eq!(sim.step(), Err(PricingError::ReplayCompleted));
        assert!(matches!(sim.finish(), Err(PricingError::ReplayCompleted)));
        assert_eq!(sim.result(), Some(&first));
    }

    // ========================================================================
    // Failures
    // ========================================================================

    #[test]
    fn test_non_finite_delta_reports_day_and_keeps_state() {
        let prices = [100.0, 101.0, 90.0, 95.0];
        let fragile = |spot: f64, _: &MarketParameters| if spot < 95.0 { f64::NAN } else { 0.5 };
        let mut sim = HedgeReplaySimulator::new(&prices, params_for(&prices), 0.5, fragile, zero).unwrap();

        sim.step().unwrap();
        let before = sim.hedge_state();

        match sim.step() {
            Err(PricingError::PolicyEvaluation {
                policy, day, spot, value,
            }) => {
                assert_eq!(policy, "delta");
                assert_eq!(day, 2);
                assert_eq!(spot, 90.0);
                assert!(value.is_nan());
            }
            other => panic!("expected policy failure, got {:?}", other),
        }
        assert_eq!(sim.hedge_state(), before);
        assert_eq!(sim.day(), 1);
        assert_eq!(sim.state(), ReplayState::Replaying);
    }

    #[test]
    fn test_non_finite_terminal_value() {
        let prices = [100.0, 120.0];
        let value = |spot: f64, _: &MarketParameters| if spot > 110.0 { f64::INFINITY } else { 1.0 };
        let mut sim =
            HedgeReplaySimulator::new(&prices, params_for(&prices), 0.5, ConstantDelta(0.5), value).unwrap();
        assert!(matches!(
            sim.run(),
            Err(PricingError::PolicyEvaluation { policy: "value", day: 1, .. })
        ));
        assert_ne!(sim.state(), ReplayState::Completed);
    }

    #[test]
    fn test_construction_errors() {
        let short = [100.0];
        assert!(matches!(
            HedgeReplaySimulator::new(&short, params(), 0.5, ConstantDelta(0.5), zero),
            Err(PricingError::InvalidParameter { name: "price_series", .. })
        ));

        let negative = [100.0, -1.0, 100.0];
        assert!(matches!(
            HedgeReplaySimulator::new(&negative, params_for(&negative), 0.5, ConstantDelta(0.5), zero),
            Err(PricingError::InvalidParameter { name: "price_series", .. })
        ));

        let prices = [100.0, 101.0];
        assert!(matches!(
            HedgeReplaySimulator::new(&prices, params_for(&prices), f64::NAN, ConstantDelta(0.5), zero),
            Err(PricingError::InvalidParameter { name: "initial_delta", .. })
        ));

        let bad_params = MarketParameters {
            volatility: -0.1,
            ..params_for(&prices)
        };
        assert!(matches!(
            HedgeReplaySimulator::new(&prices, bad_params, 0.5, ConstantDelta(0.5), zero),
            Err(PricingError::InvalidParameter { name: "volatility", .. })
        ));

        let nan_value = |_: f64, _: &MarketParameters| f64::NAN;
        assert!(matches!(
            HedgeReplaySimulator::new(&prices, params_for(&prices), 0.5, ConstantDelta(0.5), nan_value),
            Err(PricingError::PolicyEvaluation { policy: "value", day: 0, .. })
        ));
    }

    // ========================================================================
    // Self-financing property
    // ========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_portfolio_value_tracks_cumulative_pnl(
            moves in prop::collection::vec(-0.05f64..0.05, 1..40),
            initial_delta in 0.0f64..1.0,
        ) {
            let mut prices = vec![100.0];
            for m in &moves {
                let last = *prices.last().unwrap();
                prices.push(last * (1.0 + m));
            }

            let p = params_for(&prices);
            let v0 = BlackScholesValue.evaluate(prices[0], &p);
            let mut sim = HedgeReplaySimulator::new(
                &prices, p, initial_delta, BlackScholesDelta, BlackScholesValue,
            ).unwrap();
            let result = sim.run().unwrap();

            let s_end = *prices.last().unwrap();
            let v_end = BlackScholesValue.evaluate(s_end, &p);
            let cumulative = *result.daily_pnl.last().unwrap();

            // cash + position·S = V(S₀) + Σ position·dS
            let portfolio = result.final_cash + result.final_position * s_end;
            prop_assert!((portfolio - (v0 + cumulative)).abs() < 1e-9);
            prop_assert!((result.replication_pnl + v_end - portfolio).abs() < 1e-9);
            prop_assert!((result.terminal_pnl - (cumulative + result.final_cash - v_end)).abs() < 1e-12);
        }
    }
}
