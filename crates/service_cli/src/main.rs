//! Pricer CLI - knock-out call pricing and delta-hedge replay
//!
//! # Commands
//!
//! - `pricer price` - Monte Carlo price of the down-and-out call
//! - `pricer hedge` - Replay a delta hedge over a price series
//! - `pricer vol-grid` - Historical volatility grid over a price series
//!
//! # Configuration
//!
//! Settings come from an optional TOML file (`--config`), then `PRICER_*`
//! environment variables, then command-line flags.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pricer_models::volatility::{
    DEFAULT_GRID_MATURITIES, DEFAULT_GRID_STRIKES, DEFAULT_VOLATILITY_WINDOW,
};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::vol_grid::GridOptions;
use commands::OutputFormat;
use config::{build_config, DeltaPolicyKind, MarketArgs, SimulationArgs, ValuePolicyKind};
pub use error::{CliError, Result};

/// Knock-out barrier call pricer and hedge replay
#[derive(Parser, Debug)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "PRICER_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price the down-and-out call by Monte Carlo
    Price {
        #[command(flatten)]
        market: MarketArgs,

        #[command(flatten)]
        simulation: SimulationArgs,

        /// Also print the continuous-barrier and vanilla closed forms
        #[arg(long)]
        reference: bool,
    },

    /// Replay a delta hedge over a price series
    Hedge {
        #[command(flatten)]
        market: MarketArgs,

        /// Price series file (one price per line or `date,price` rows)
        #[arg(short, long, value_name = "FILE")]
        prices: Option<PathBuf>,

        /// Seed of the simulated path when no series file is given
        #[arg(long)]
        path_seed: Option<u64>,

        /// Hedge-ratio policy
        #[arg(long, value_enum)]
        delta_policy: Option<DeltaPolicyKind>,

        /// Ratio used by the constant delta policy
        #[arg(long)]
        constant_delta: Option<f64>,

        /// Option-value policy
        #[arg(long, value_enum)]
        value_policy: Option<ValuePolicyKind>,

        /// Initial hedge ratio (defaults to the delta policy at the first price)
        #[arg(long, allow_hyphen_values = true)]
        initial_delta: Option<f64>,
    },

    /// Build a historical volatility grid
    VolGrid {
        #[command(flatten)]
        market: MarketArgs,

        /// Price series file (one price per line or `date,price` rows)
        #[arg(short, long, value_name = "FILE")]
        prices: Option<PathBuf>,

        /// Length of the simulated path when no series file is given
        #[arg(long, default_value_t = 252)]
        simulated_days: u32,

        /// Rolling window in daily returns
        #[arg(short, long, default_value_t = DEFAULT_VOLATILITY_WINDOW)]
        window: usize,

        /// Number of strike columns
        #[arg(long, default_value_t = DEFAULT_GRID_STRIKES)]
        strikes: usize,

        /// Maturity rows in trading days
        #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_GRID_MATURITIES)]
        maturities: Vec<u32>,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = build_config(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_tracing(config.log_level.as_filter_str());
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Price {
            market,
            simulation,
            reference,
        } => {
            config.merge_market(&market);
            config.merge_simulation(&simulation);
            commands::price::run(&config, reference, cli.format)
        }
        Commands::Hedge {
            market,
            prices,
            path_seed,
            delta_policy,
            constant_delta,
            value_policy,
            initial_delta,
        } => {
            config.merge_market(&market);
            let hedge = &mut config.hedge;
            if prices.is_some() {
                hedge.prices_file = prices;
            }
            if let Some(seed) = path_seed {
                hedge.path_seed = seed;
            }
            if let Some(kind) = delta_policy {
                hedge.delta_policy = kind;
            }
            if let Some(ratio) = constant_delta {
                hedge.constant_delta = ratio;
            }
            if let Some(kind) = value_policy {
                hedge.value_policy = kind;
            }
            if initial_delta.is_some() {
                hedge.initial_delta = initial_delta;
            }
            commands::hedge::run(&config, cli.format)
        }
        Commands::VolGrid {
            market,
            prices,
            simulated_days,
            window,
            strikes,
            maturities,
        } => {
            config.merge_market(&market);
            let options = GridOptions {
                prices_file: prices.as_deref(),
                simulated_days,
                window,
                n_strikes: strikes,
                maturities: &maturities,
            };
            commands::vol_grid::run(&config, &options, cli.format)
        }
    }
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_price_overrides() {
        let cli = Cli::parse_from([
            "pricer", "price", "--spot", "150", "--vol", "0.3", "-n", "500", "--reference",
        ]);
        match cli.command {
            Commands::Price {
                market,
                simulation,
                reference,
            } => {
                assert_eq!(market.spot, Some(150.0));
                assert_eq!(market.volatility, Some(0.3));
                assert_eq!(simulation.trials, Some(500));
                assert!(reference);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_vol_grid_defaults() {
        let cli = Cli::parse_from(["pricer", "--format", "json", "vol-grid"]);
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            Commands::VolGrid {
                window,
                strikes,
                maturities,
                ..
            } => {
                assert_eq!(window, 20);
                assert_eq!(strikes, 10);
                assert_eq!(maturities, vec![10, 20, 30, 40, 50, 60]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_hedge_policies() {
        let cli = Cli::parse_from([
            "pricer",
            "hedge",
            "--delta-policy",
            "constant",
            "--constant-delta",
            "0.4",
            "--value-policy",
            "knock-out-intrinsic",
        ]);
        match cli.command {
            Commands::Hedge {
                delta_policy,
                constant_delta,
                value_policy,
                ..
            } => {
                assert_eq!(delta_policy, Some(DeltaPolicyKind::Constant));
                assert_eq!(constant_delta, Some(0.4));
                assert_eq!(value_policy, Some(ValuePolicyKind::KnockOutIntrinsic));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
