//! Property tests for the closed-form prices.

use pricer_models::analytical::{down_and_out_call, BlackScholes};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// No-arbitrage bounds: max(S − K·e^(−rT), 0) ≤ C ≤ S.
    #[test]
    fn test_call_within_arbitrage_bounds(
        spot in 10.0f64..500.0,
        strike in 10.0f64..500.0,
        rate in -0.02f64..0.1,
        vol in 0.01f64..1.0,
        expiry in 0.01f64..3.0,
    ) {
        let bs = BlackScholes::new(spot, rate, vol).unwrap();
        let call = bs.price_call(strike, expiry);
        let lower = (spot - strike * (-rate * expiry).exp()).max(0.0);
        prop_assert!(call >= lower - 1e-4 * spot);
        prop_assert!(call <= spot + 1e-9);
    }

    /// Knock-out never exceeds the vanilla call and is never negative.
    #[test]
    fn test_down_and_out_below_vanilla(
        barrier_frac in 0.3f64..0.99,
        strike in 60.0f64..140.0,
        rate in 0.0f64..0.08,
        vol in 0.05f64..0.6,
        expiry in 0.02f64..2.0,
    ) {
        let spot = 100.0;
        let barrier = spot * barrier_frac;
        let knock_out = down_and_out_call(spot, strike, barrier, rate, vol, expiry).unwrap();
        let vanilla = BlackScholes::new(spot, rate, vol).unwrap().price_call(strike, expiry);
        prop_assert!(knock_out >= 0.0);
        prop_assert!(knock_out <= vanilla + 1e-4);
    }
}
