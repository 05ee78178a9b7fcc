//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared here: the output
//! format switch and the price-series provider used by `hedge` and `vol-grid`.

pub mod hedge;
pub mod price;
pub mod vol_grid;

use std::path::Path;

use clap::ValueEnum;
use pricer_core::types::MarketParameters;
use pricer_pricing::mc::GbmPathGenerator;
use serde::Serialize;
use tracing::info;

use crate::{CliError, Result};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Print `report` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(report: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

/// Column names recognised as the price, best first.
const PRICE_COLUMNS: [&str; 5] = ["usdjpy", "close", "adj close", "price", "spot"];

/// Read a price series from a CSV file.
///
/// Accepts a bare column of prices or a table with a leading date column, as
/// written by pandas and yfinance (including their multi-row headers). The
/// price column is the first header matching [`PRICE_COLUMNS`], otherwise the
/// last column. Rows before the first price are headers; `#` lines are
/// comments.
pub fn load_prices(path: &Path) -> Result<Vec<f64>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let prices = parse_prices(&content, &path.display().to_string())?;
    info!(path = %path.display(), observations = prices.len(), "Price series loaded");
    Ok(prices)
}

fn parse_prices(content: &str, source: &str) -> Result<Vec<f64>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut column = None;
    let mut prices = Vec::new();
    for record in reader.records() {
        let record = record?;
        let idx = column.unwrap_or_else(|| record.len().saturating_sub(1));
        let field = record.get(idx).unwrap_or("");
        match field.parse::<f64>() {
            Ok(price) => {
                column = Some(idx);
                prices.push(price);
            }
            Err(_) if prices.is_empty() => {
                if column.is_none() {
                    column = price_column(&record);
                }
            }
            Err(e) => {
                return Err(CliError::PriceSeries {
                    path: source.to_string(),
                    line: record.position().map_or(0, |p| p.line() as usize),
                    reason: format!("'{}': {}", field, e),
                })
            }
        }
    }
    Ok(prices)
}

fn price_column(header: &csv::StringRecord) -> Option<usize> {
    // leading date index
    let skip = usize::from(header.len() > 1);
    PRICE_COLUMNS.iter().find_map(|name| {
        header
            .iter()
            .enumerate()
            .skip(skip)
            .find(|(_, field)| field.eq_ignore_ascii_case(name))
            .map(|(i, _)| i)
    })
}

/// Simulated daily price series over the contract's maturity.
pub fn simulated_prices(params: &MarketParameters, seed: u64) -> Result<Vec<f64>> {
    let generator = GbmPathGenerator::new(params)?;
    let prices = generator.generate_with_seed(seed).into_spots();
    info!(
        seed,
        observations = prices.len(),
        "Simulated price series generated"
    );
    Ok(prices)
}
