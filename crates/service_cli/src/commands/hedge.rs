//! Hedge command implementation
//!
//! Replays a delta hedge over a price series loaded from file, or over a
//! simulated path when no file is configured. Observations after the
//! contract's last trading day are not replayed or reported.

use pricer_core::types::MarketParameters;
use pricer_pricing::hedge::{
    BlackScholesDelta, BlackScholesValue, ConstantDelta, HedgeResult, KnockOutIntrinsic,
    SpotPolicy,
};
use pricer_pricing::simulate_hedge;
use serde::Serialize;
use tracing::info;

use super::{load_prices, print_json, simulated_prices, OutputFormat};
use crate::config::{CliConfig, DeltaPolicyKind, ValuePolicyKind};
use crate::Result;

/// Hedge-ratio policy chosen at run time.
#[derive(Debug, Clone, Copy)]
struct DeltaPolicy {
    kind: DeltaPolicyKind,
    constant: f64,
}

impl SpotPolicy for DeltaPolicy {
    fn evaluate(&self, spot: f64, params: &MarketParameters) -> f64 {
        match self.kind {
            DeltaPolicyKind::BlackScholes => BlackScholesDelta.evaluate(spot, params),
            DeltaPolicyKind::Constant => ConstantDelta(self.constant).evaluate(spot, params),
        }
    }
}

/// Option-value policy chosen at run time.
#[derive(Debug, Clone, Copy)]
struct ValuePolicy(ValuePolicyKind);

impl SpotPolicy for ValuePolicy {
    fn evaluate(&self, spot: f64, params: &MarketParameters) -> f64 {
        match self.0 {
            ValuePolicyKind::BlackScholes => BlackScholesValue.evaluate(spot, params),
            ValuePolicyKind::KnockOutIntrinsic => KnockOutIntrinsic.evaluate(spot, params),
            ValuePolicyKind::Zero => 0.0,
        }
    }
}

#[derive(Debug, Serialize)]
struct HedgeReport {
    market: MarketParameters,
    delta_policy: DeltaPolicyKind,
    value_policy: ValuePolicyKind,
    initial_delta: f64,
    prices: Vec<f64>,
    result: HedgeResult,
}

/// Run the hedge command
pub fn run(config: &CliConfig, format: OutputFormat) -> Result<()> {
    let report = replay(config)?;
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => print_table(&report),
    }
    Ok(())
}

fn replay(config: &CliConfig) -> Result<HedgeReport> {
    let params = config.market.to_params();
    let hedge = &config.hedge;

    let mut prices = match &hedge.prices_file {
        Some(path) => load_prices(path)?,
        None => simulated_prices(&params, hedge.path_seed)?,
    };

    let delta_policy = DeltaPolicy {
        kind: hedge.delta_policy,
        constant: hedge.constant_delta,
    };
    let value_policy = ValuePolicy(hedge.value_policy);
    let initial_delta = match (hedge.initial_delta, prices.first()) {
        (Some(delta), _) => delta,
        (None, Some(&s0)) => delta_policy.evaluate(s0, &params),
        // rejected by the simulator
        (None, None) => 0.0,
    };

    info!(
        observations = prices.len(),
        delta_policy = ?hedge.delta_policy,
        value_policy = ?hedge.value_policy,
        initial_delta,
        "Starting hedge replay"
    );

    let result = simulate_hedge(&prices, params, initial_delta, delta_policy, value_policy)?;
    prices.truncate(result.daily_pnl.len());

    Ok(HedgeReport {
        market: params,
        delta_policy: hedge.delta_policy,
        value_policy: hedge.value_policy,
        initial_delta,
        prices,
        result,
    })
}

fn print_table(report: &HedgeReport) {
    println!("\n┌───────┬──────────────┬────────────────┐");
    println!("│ Day   │ Spot         │ Cumulative PnL │");
    println!("├───────┼──────────────┼────────────────┤");
    for (day, (spot, pnl)) in report
        .prices
        .iter()
        .zip(&report.result.daily_pnl)
        .enumerate()
    {
        println!("│ {:>5} │ {:>12.4} │ {:>14.6} │", day, spot, pnl);
    }
    println!("└───────┴──────────────┴────────────────┘");

    let r = &report.result;
    println!("Initial delta:    {:.6}", report.initial_delta);
    println!("Final position:   {:.6}", r.final_position);
    println!("Final cash:       {:.6}", r.final_cash);
    println!("Terminal PnL:     {:.6}", r.terminal_pnl);
    println!("Replication PnL:  {:.6}", r.replication_pnl);
}
