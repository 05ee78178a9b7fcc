//! Price command implementation
//!
//! Prices the down-and-out call with the Monte Carlo engine and, optionally,
//! prints the continuous-monitoring and vanilla closed forms beside it.

use pricer_core::types::MarketParameters;
use pricer_models::analytical::{down_and_out_call_from_market, BlackScholes};
use pricer_pricing::mc::{MonteCarloEngine, PriceEstimate};
use serde::Serialize;
use tracing::info;

use super::{print_json, OutputFormat};
use crate::config::CliConfig;
use crate::Result;

#[derive(Debug, Serialize)]
struct PriceReport {
    market: MarketParameters,
    estimate: PriceEstimate,
    confidence_95: Option<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    continuous_barrier_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vanilla_price: Option<f64>,
}

/// Run the price command
pub fn run(config: &CliConfig, with_references: bool, format: OutputFormat) -> Result<()> {
    let params = config.market.to_params();
    let mc_config = config.monte_carlo.to_config()?;

    info!(
        spot = params.spot,
        strike = params.strike,
        barrier = params.barrier,
        maturity_days = params.maturity_days,
        n_trials = mc_config.n_trials(),
        seed = mc_config.seed(),
        "Starting pricing"
    );

    let engine = MonteCarloEngine::new(params, mc_config)?;
    let estimate = engine.price();

    let (continuous_barrier_price, vanilla_price) = if with_references {
        (
            down_and_out_call_from_market(&params).ok(),
            BlackScholes::from_market(&params)
                .ok()
                .map(|bs| bs.price_call(params.strike, params.maturity_years())),
        )
    } else {
        (None, None)
    };

    let report = PriceReport {
        market: params,
        confidence_95: estimate
            .confidence_95()
            .map(|hw| (estimate.price - hw, estimate.price + hw)),
        estimate,
        continuous_barrier_price,
        vanilla_price,
    };

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => print_table(&report),
    }
    Ok(())
}

fn print_table(report: &PriceReport) {
    let est = &report.estimate;
    let fmt_opt = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |x| format!("{:.6}", x));

    println!("\n┌──────────────────────────┬──────────────────────┐");
    println!("│ Down-and-out call        │                      │");
    println!("├──────────────────────────┼──────────────────────┤");
    row("Price", &format!("{:.6}", est.price));
    row("Std error", &fmt_opt(est.std_error));
    match report.confidence_95 {
        Some((lo, hi)) => row("95% CI", &format!("[{:.4}, {:.4}]", lo, hi)),
        None => row("95% CI", "n/a"),
    }
    row("Trials", &format!("{} / {}", est.n_trials, est.requested_trials));
    row("Seed", &est.seed.to_string());
    row("Knock-out ratio", &format!("{:.4}", est.knock_out_ratio));
    if est.partial {
        row("Status", "partial (time budget)");
    }
    if let Some(price) = report.continuous_barrier_price {
        row("Continuous barrier", &format!("{:.6}", price));
    }
    if let Some(price) = report.vanilla_price {
        row("Vanilla call", &format!("{:.6}", price));
    }
    println!("└──────────────────────────┴──────────────────────┘");

    for warning in &est.warnings {
        println!("warning: {}", warning);
    }
}

fn row(label: &str, value: &str) {
    println!("│ {:<24} │ {:>20} │", label, value);
}
