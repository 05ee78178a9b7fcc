//! Statistical and reproducibility properties of the Monte Carlo engine.

use pricer_core::types::{MarketParameters, PricingError};
use pricer_pricing::mc::{MonteCarloConfig, MonteCarloEngine};
use pricer_pricing::price_barrier_call;

fn params() -> MarketParameters {
    MarketParameters::new(100.0, 100.0, 90.0, 63, 0.05, 0.2)
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_identical_arguments_give_identical_estimates() {
    let a = price_barrier_call(params(), 10_000, 42).unwrap();
    let b = price_barrier_call(params(), 10_000, 42).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.price.to_bits(), b.price.to_bits());
}

#[test]
fn test_thread_count_does_not_change_estimate() {
    let config = MonteCarloConfig::builder()
        .n_trials(8_000)
        .seed(11)
        .batch_size(250)
        .build()
        .unwrap();
    let engine = MonteCarloEngine::new(params(), config).unwrap();

    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| engine.price());
    let several = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap()
        .install(|| engine.price());
    let default_pool = engine.price();

    assert_eq!(single, several);
    assert_eq!(single, default_pool);
}

#[test]
fn test_different_seeds_differ() {
    let a = price_barrier_call(params(), 2_000, 1).unwrap();
    let b = price_barrier_call(params(), 2_000, 2).unwrap();
    assert_ne!(a.price, b.price);
}

// ============================================================================
// Monotonicity and scaling
// ============================================================================

#[test]
fn test_raising_barrier_never_increases_price() {
    let mut previous = f64::INFINITY;
    let mut previous_ratio = 0.0;
    for barrier in [50.0, 80.0, 90.0, 95.0, 99.0] {
        let estimate = price_barrier_call(params().with_barrier(barrier), 10_000, 42).unwrap();
        assert!(
            estimate.price <= previous,
            "price rose to {} at barrier {}",
            estimate.price,
            barrier
        );
        assert!(estimate.knock_out_ratio >= previous_ratio);
        previous = estimate.price;
        previous_ratio = estimate.knock_out_ratio;
    }
}

#[test]
fn test_std_error_scales_with_inverse_root_n() {
    let small = price_barrier_call(params(), 5_000, 42).unwrap();
    let large = price_barrier_call(params(), 20_000, 42).unwrap();

    let ratio = small.std_error.unwrap() / large.std_error.unwrap();
    assert!((1.7..=2.3).contains(&ratio), "SE ratio {}", ratio);
}

// ============================================================================
// Boundaries and errors
// ============================================================================

#[test]
fn test_single_trial_estimate() {
    let estimate = price_barrier_call(params(), 1, 42).unwrap();
    assert_eq!(estimate.n_trials, 1);
    assert!(estimate.std_error.is_none());
    assert!(estimate.confidence_95().is_none());
    assert!(estimate.price.is_finite() && estimate.price >= 0.0);
}

#[test]
fn test_zero_maturity_rejected() {
    assert!(matches!(
        price_barrier_call(params().with_maturity_days(0), 1_000, 42),
        Err(PricingError::InvalidParameter {
            name: "maturity_days",
            ..
        })
    ));
}

#[test]
fn test_zero_trials_rejected() {
    assert!(matches!(
        price_barrier_call(params(), 0, 42),
        Err(PricingError::InvalidParameter {
            name: "trial_count",
            ..
        })
    ));
}

#[test]
fn test_barrier_at_or_above_spot_rejected() {
    for barrier in [100.0, 110.0] {
        assert!(matches!(
            price_barrier_call(params().with_barrier(barrier), 1_000, 42),
            Err(PricingError::BarrierConfiguration { .. })
        ));
    }
}

#[test]
fn test_negative_volatility_rejected() {
    let p = MarketParameters {
        volatility: -0.2,
        ..params()
    };
    assert!(matches!(
        price_barrier_call(p, 1_000, 42),
        Err(PricingError::InvalidParameter {
            name: "volatility",
            ..
        })
    ));
}
