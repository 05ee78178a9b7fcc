//! CLI configuration management
//!
//! Loads settings from a TOML file, `PRICER_*` environment variables and
//! command-line arguments.
//!
//! Priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Config file
//! 4. Default values (the reference contract: S=145, K=150, H=140, 30 days)

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use clap::{Args, ValueEnum};
use pricer_core::types::MarketParameters;
use pricer_pricing::mc::{MonteCarloConfig, DEFAULT_BATCH_SIZE, DEFAULT_SEED};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Hedge-ratio policy selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum DeltaPolicyKind {
    /// Black-Scholes call delta
    #[default]
    BlackScholes,
    /// Fixed hedge ratio (`hedge.constant_delta`)
    Constant,
}

/// Option-value policy selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ValuePolicyKind {
    /// Black-Scholes call value
    #[default]
    BlackScholes,
    /// `max(S − K, 0)` above the barrier, zero at or below
    KnockOutIntrinsic,
    /// Always zero
    Zero,
}

/// `[market]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MarketSection {
    pub spot: f64,
    pub strike: f64,
    pub barrier: f64,
    pub maturity_days: u32,
    pub rate: f64,
    pub volatility: f64,
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            spot: 145.0,
            strike: 150.0,
            barrier: 140.0,
            maturity_days: 30,
            rate: 0.01,
            volatility: 0.15,
        }
    }
}

impl MarketSection {
    /// Market parameters for the engines; validated by the engines themselves.
    pub fn to_params(&self) -> MarketParameters {
        MarketParameters::new(
            self.spot,
            self.strike,
            self.barrier,
            self.maturity_days,
            self.rate,
            self.volatility,
        )
    }
}

/// `[monte_carlo]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MonteCarloSection {
    pub trials: u64,
    pub seed: u64,
    pub batch_size: u64,
    /// Wall-clock budget in milliseconds; unlimited when absent
    pub time_budget_ms: Option<u64>,
}

impl Default for MonteCarloSection {
    fn default() -> Self {
        Self {
            trials: 10_000,
            seed: DEFAULT_SEED,
            batch_size: DEFAULT_BATCH_SIZE,
            time_budget_ms: None,
        }
    }
}

impl MonteCarloSection {
    /// Engine configuration.
    pub fn to_config(&self) -> Result<MonteCarloConfig, pricer_core::types::PricingError> {
        let mut builder = MonteCarloConfig::builder()
            .n_trials(self.trials)
            .seed(self.seed)
            .batch_size(self.batch_size);
        if let Some(ms) = self.time_budget_ms {
            builder = builder.time_budget(Duration::from_millis(ms));
        }
        builder.build()
    }
}

/// `[hedge]` section
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HedgeSection {
    pub delta_policy: DeltaPolicyKind,
    pub value_policy: ValuePolicyKind,
    /// Ratio used by the constant delta policy
    pub constant_delta: f64,
    /// Initial hedge ratio; the delta policy at the first price when absent
    pub initial_delta: Option<f64>,
    /// Price series file; a simulated path is replayed when absent
    pub prices_file: Option<PathBuf>,
    /// Seed of the simulated path
    pub path_seed: u64,
}

impl Default for HedgeSection {
    fn default() -> Self {
        Self {
            delta_policy: DeltaPolicyKind::default(),
            value_policy: ValuePolicyKind::default(),
            constant_delta: 0.5,
            initial_delta: None,
            prices_file: None,
            path_seed: DEFAULT_SEED,
        }
    }
}

/// Full CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    pub log_level: LogLevel,
    pub market: MarketSection,
    pub monte_carlo: MonteCarloSection,
    pub hedge: HedgeSection,
}

/// Market overrides shared by every subcommand
#[derive(Debug, Clone, Default, Args)]
pub struct MarketArgs {
    /// Spot price at inception
    #[arg(long)]
    pub spot: Option<f64>,

    /// Strike price
    #[arg(long)]
    pub strike: Option<f64>,

    /// Down-and-out barrier level
    #[arg(long)]
    pub barrier: Option<f64>,

    /// Maturity in trading days
    #[arg(long = "days")]
    pub maturity_days: Option<u32>,

    /// Annualised risk-free rate
    #[arg(long)]
    pub rate: Option<f64>,

    /// Annualised volatility
    #[arg(long = "vol")]
    pub volatility: Option<f64>,
}

/// Monte Carlo overrides
#[derive(Debug, Clone, Default, Args)]
pub struct SimulationArgs {
    /// Number of trials
    #[arg(short = 'n', long)]
    pub trials: Option<u64>,

    /// Run seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Trials per scheduling batch
    #[arg(long)]
    pub batch_size: Option<u64>,

    /// Wall-clock budget in milliseconds
    #[arg(long)]
    pub time_budget_ms: Option<u64>,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Load configuration from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Apply `PRICER_*` overrides from `lookup`
    pub fn apply_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("PRICER_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }

        let market = &mut self.market;
        override_from(&lookup, "PRICER_SPOT", &mut market.spot)?;
        override_from(&lookup, "PRICER_STRIKE", &mut market.strike)?;
        override_from(&lookup, "PRICER_BARRIER", &mut market.barrier)?;
        override_from(&lookup, "PRICER_MATURITY_DAYS", &mut market.maturity_days)?;
        override_from(&lookup, "PRICER_RATE", &mut market.rate)?;
        override_from(&lookup, "PRICER_VOLATILITY", &mut market.volatility)?;

        let mc = &mut self.monte_carlo;
        override_from(&lookup, "PRICER_TRIALS", &mut mc.trials)?;
        override_from(&lookup, "PRICER_SEED", &mut mc.seed)?;
        override_from(&lookup, "PRICER_BATCH_SIZE", &mut mc.batch_size)?;
        if let Some(raw) = lookup("PRICER_TIME_BUDGET_MS") {
            mc.time_budget_ms = Some(parse_var("PRICER_TIME_BUDGET_MS", &raw)?);
        }

        let hedge = &mut self.hedge;
        override_kind(&lookup, "PRICER_DELTA_POLICY", &mut hedge.delta_policy)?;
        override_kind(&lookup, "PRICER_VALUE_POLICY", &mut hedge.value_policy)?;
        override_from(&lookup, "PRICER_CONSTANT_DELTA", &mut hedge.constant_delta)?;
        override_from(&lookup, "PRICER_PATH_SEED", &mut hedge.path_seed)?;
        if let Some(raw) = lookup("PRICER_INITIAL_DELTA") {
            hedge.initial_delta = Some(parse_var("PRICER_INITIAL_DELTA", &raw)?);
        }
        if let Some(path) = lookup("PRICER_PRICES_FILE") {
            hedge.prices_file = Some(PathBuf::from(path));
        }
        Ok(())
    }

    /// Merge market overrides (CLI takes precedence)
    pub fn merge_market(&mut self, args: &MarketArgs) {
        let market = &mut self.market;
        if let Some(spot) = args.spot {
            market.spot = spot;
        }
        if let Some(strike) = args.strike {
            market.strike = strike;
        }
        if let Some(barrier) = args.barrier {
            market.barrier = barrier;
        }
        if let Some(days) = args.maturity_days {
            market.maturity_days = days;
        }
        if let Some(rate) = args.rate {
            market.rate = rate;
        }
        if let Some(vol) = args.volatility {
            market.volatility = vol;
        }
    }

    /// Merge Monte Carlo overrides (CLI takes precedence)
    pub fn merge_simulation(&mut self, args: &SimulationArgs) {
        let mc = &mut self.monte_carlo;
        if let Some(trials) = args.trials {
            mc.trials = trials;
        }
        if let Some(seed) = args.seed {
            mc.seed = seed;
        }
        if let Some(batch_size) = args.batch_size {
            mc.batch_size = batch_size;
        }
        if args.time_budget_ms.is_some() {
            mc.time_budget_ms = args.time_budget_ms;
        }
    }
}

fn parse_var<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

fn override_from<F, T>(lookup: &F, key: &'static str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    if let Some(raw) = lookup(key) {
        *target = parse_var(key, &raw)?;
    }
    Ok(())
}

fn override_kind<F, T>(lookup: &F, key: &'static str, target: &mut T) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: ValueEnum,
{
    if let Some(raw) = lookup(key) {
        *target = T::from_str(raw.trim(), true)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw })?;
    }
    Ok(())
}

/// Build configuration from file, environment and log-level override
///
/// Subcommand-specific overrides are merged afterwards by each command.
pub fn build_config(
    config_file: Option<&Path>,
    log_level: Option<&str>,
) -> Result<CliConfig, ConfigError> {
    let mut config = match config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => CliConfig::default(),
    };

    config.apply_env()?;

    if let Some(level) = log_level {
        config.log_level = LogLevel::from_str(level)?;
    }

    Ok(config)
}
