//! Volatility grid command implementation
//!
//! Estimates rolling historical volatility over a price series and lays it out
//! as the `(strikes, maturities, volatility_grid)` triple.

use std::path::Path;

use pricer_models::volatility::{historical_volatility, realised_volatility, VolatilityGrid};
use serde::Serialize;
use tracing::info;

use super::{load_prices, print_json, simulated_prices, OutputFormat};
use crate::config::CliConfig;
use crate::{CliError, Result};

/// Grid layout options
#[derive(Debug, Clone)]
pub struct GridOptions<'a> {
    /// Price series file; a simulated path over `simulated_days` when absent
    pub prices_file: Option<&'a Path>,
    /// Length of the simulated path in trading days
    pub simulated_days: u32,
    /// Rolling window in returns
    pub window: usize,
    /// Number of strike columns
    pub n_strikes: usize,
    /// Maturity rows in trading days
    pub maturities: &'a [u32],
}

#[derive(Debug, Serialize)]
struct GridReport {
    observations: usize,
    window: usize,
    realised_volatility: Option<f64>,
    strikes: Vec<f64>,
    maturities: Vec<f64>,
    volatility_grid: Vec<Vec<Option<f64>>>,
}

/// Run the vol-grid command
pub fn run(config: &CliConfig, options: &GridOptions<'_>, format: OutputFormat) -> Result<()> {
    if options.simulated_days == 0 {
        return Err(CliError::InvalidArgument(
            "simulated path needs at least one day".to_string(),
        ));
    }

    let prices = match options.prices_file.or(config.hedge.prices_file.as_deref()) {
        Some(path) => load_prices(path)?,
        None => {
            let params = config
                .market
                .to_params()
                .with_maturity_days(options.simulated_days);
            simulated_prices(&params, config.monte_carlo.seed)?
        }
    };

    let vols = historical_volatility(&prices, options.window)?;
    let realised = realised_volatility(&prices)?;
    let grid =
        VolatilityGrid::from_historical(&prices, &vols, options.n_strikes, options.maturities)?;

    info!(
        observations = prices.len(),
        window = options.window,
        realised_volatility = ?realised,
        "Volatility grid built"
    );

    let (strikes, maturities, volatility_grid) = grid.into_parts();
    let report = GridReport {
        observations: prices.len(),
        window: options.window,
        realised_volatility: realised,
        strikes,
        maturities,
        volatility_grid,
    };

    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => print_table(&report),
    }
    Ok(())
}

fn print_table(report: &GridReport) {
    match report.realised_volatility {
        Some(vol) => println!("Realised volatility: {:.4}", vol),
        None => println!("Realised volatility: n/a"),
    }

    print!("\n{:>8} │", "T \\ K");
    for strike in &report.strikes {
        print!(" {:>8.2}", strike);
    }
    println!();
    println!("{}", "─".repeat(10 + 9 * report.strikes.len()));

    for (maturity, row) in report.maturities.iter().zip(&report.volatility_grid) {
        print!("{:>8} │", maturity);
        for cell in row {
            match cell {
                Some(vol) => print!(" {:>8.4}", vol),
                None => print!(" {:>8}", "-"),
            }
        }
        println!();
    }
}
