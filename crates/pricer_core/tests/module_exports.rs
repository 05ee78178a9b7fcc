//! Integration tests for module exports and serialisation of core types.

use pricer_core::math::statistics::RunningStats;
use pricer_core::types::{
    MarketParameters, NumericalInstabilityWarning, PricingError, STEP_VOLATILITY_THRESHOLD,
    TRADING_DAYS_PER_YEAR,
};
use proptest::prelude::*;

#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::PricingError as FullPath;
    use pricer_core::types::market::MarketParameters as FullMarket;

    let params: FullMarket = MarketParameters::new(100.0, 100.0, 90.0, 21, 0.0, 0.2);
    assert!(params.validate().is_ok());

    let err: FullPath = PricingError::ReplayCompleted;
    assert_eq!(err, PricingError::ReplayCompleted);
    assert_eq!(TRADING_DAYS_PER_YEAR, 252.0);
}

#[test]
fn test_market_parameters_serde_round_trip() {
    let params = MarketParameters::new(145.0, 150.0, 140.0, 30, 0.01, 0.15);
    let json = serde_json::to_string(&params).unwrap();
    assert!(json.contains("\"maturity_days\":30"));

    let back: MarketParameters = serde_json::from_str(&json).unwrap();
    assert_eq!(back, params);
}

#[test]
fn test_warning_serialises_fields() {
    let warning = NumericalInstabilityWarning {
        step_volatility: 0.2,
        threshold: STEP_VOLATILITY_THRESHOLD,
    };
    let value = serde_json::to_value(warning).unwrap();
    assert_eq!(value["step_volatility"], 0.2);
    assert_eq!(value["threshold"], STEP_VOLATILITY_THRESHOLD);
}

#[test]
fn test_statistics_exports() {
    let stats: RunningStats = (1..=4).map(f64::from).collect();
    assert_eq!(stats.count(), 4);
    assert_eq!(stats.mean(), 2.5);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn test_valid_domain_always_validates(
        spot in 1e-3f64..1e6,
        strike in 1e-3f64..1e6,
        barrier in 1e-3f64..1e6,
        days in 1u32..5000,
        rate in -0.1f64..0.5,
        vol in 0.0f64..3.0,
    ) {
        let params = MarketParameters::new(spot, strike, barrier, days, rate, vol);
        prop_assert!(params.validate().is_ok());
        prop_assert!(params.discount_factor() > 0.0);
        prop_assert_eq!(params.stability_warning().is_some(), params.step_volatility() > STEP_VOLATILITY_THRESHOLD);
    }

    #[test]
    fn test_negative_volatility_never_validates(vol in -10.0f64..-1e-12) {
        let params = MarketParameters::new(100.0, 100.0, 90.0, 10, 0.0, vol);
        let is_volatility_error = matches!(
            params.validate(),
            Err(PricingError::InvalidParameter { name: "volatility", .. })
        );
        prop_assert!(is_volatility_error);
    }
}
