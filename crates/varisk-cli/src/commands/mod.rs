//! CLI command implementations.

pub mod config;
pub mod portfolio;
pub mod var;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use portfolio::PortfolioArgs;
pub use var::VarArgs;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;

use varisk_core::{ConfidenceLevel, EstimatorConfig, SimulationConfig, VaRMethod, VarianceKind};
use varisk_engine::{HistoryWindow, VarEngine};
use varisk_ext_file::{CsvPathSink, CsvPriceSource};
use varisk_risk::VaRCalculator;

use crate::commands::config::Settings;
use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Options shared by every estimating command.
#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Start of the price history (YYYY-MM-DD). Defaults to one year before the end date.
    #[arg(short, long)]
    pub start: Option<String>,

    /// End of the price history (YYYY-MM-DD). Defaults to today.
    #[arg(short, long)]
    pub end: Option<String>,

    /// Confidence level, strictly between 0 and 1 (e.g. 0.95)
    #[arg(short, long)]
    pub confidence: f64,

    /// Method: variance-covariance, historical, or monte-carlo
    #[arg(short, long)]
    pub method: Option<String>,

    /// Monte Carlo horizon in days
    #[arg(short, long)]
    pub days: Option<u32>,

    /// Monte Carlo trial count
    #[arg(long)]
    pub trials: Option<u32>,

    /// Monte Carlo seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Decimal places of the reported VaR
    #[arg(long)]
    pub precision: Option<u32>,

    /// Use the population (n) variance instead of the sample (n-1) form
    #[arg(long)]
    pub population: bool,

    /// CSV file with instrument_id,date,close columns
    #[arg(long, env = "VARISK_PRICES")]
    pub prices: Option<PathBuf>,

    /// Write simulated Monte Carlo paths to this CSV file
    #[arg(long)]
    pub paths_out: Option<PathBuf>,
}

/// Everything an estimating command needs, resolved from flags and settings.
pub struct Plan {
    pub engine: VarEngine,
    pub method: VaRMethod,
    pub window: HistoryWindow,
    pub confidence: ConfidenceLevel,
    pub precision: u32,
}

impl EstimateArgs {
    /// Resolves flags against persisted settings and opens the price source.
    ///
    /// With `per_instrument_paths`, `--paths-out` names a file per instrument.
    pub fn plan(&self, settings: &Settings, debug: bool, per_instrument_paths: bool) -> Result<Plan> {
        let confidence = ConfidenceLevel::new(self.confidence)?;

        let method = match &self.method {
            Some(m) => m.parse::<VaRMethod>()?,
            None => settings.method()?,
        };

        let end = match &self.end {
            Some(s) => parse_date(s)?,
            None => chrono::Local::now().date_naive(),
        };
        let window = match &self.start {
            Some(s) => HistoryWindow::new(parse_date(s)?, end)?,
            None => HistoryWindow::trailing_year(end),
        };

        let days = self.days.map_or_else(|| settings.days(), Ok)?;
        let trials = self.trials.map_or_else(|| settings.trials(), Ok)?;
        let simulation = SimulationConfig::new(days, trials)?;

        let precision = self.precision.map_or_else(|| settings.precision(), Ok)?;
        let seed = self.seed.map_or_else(|| settings.seed(), Ok)?;

        let variance = if self.population {
            VarianceKind::Population
        } else {
            VarianceKind::Sample
        };
        let config = EstimatorConfig::default()
            .with_variance(variance)
            .with_precision(precision)
            .with_diagnostics(debug);
        config.validate()?;

        let prices = self
            .prices
            .clone()
            .or_else(|| settings.price_file())
            .ok_or_else(|| CliError::MissingArgument("--prices <CSV>".to_string()))?;
        let source = CsvPriceSource::new(&prices).map_err(CliError::from)?;

        let calculator = VaRCalculator::new(config)
            .with_simulation(simulation)
            .with_seed(seed);
        let mut engine = VarEngine::new(Arc::new(source)).with_calculator(calculator);

        if let Some(out) = &self.paths_out {
            if !method.is_simulated() {
                crate::output::print_warning(&format!(
                    "--paths-out is ignored for the {} method",
                    method
                ));
            }
            let sink = if per_instrument_paths {
                CsvPathSink::per_instrument(out)
            } else {
                CsvPathSink::new(out)
            };
            engine = engine.with_sink(Arc::new(sink));
        }

        tracing::debug!(
            %method,
            confidence = confidence.value(),
            start = %window.start(),
            end = %window.end(),
            days,
            trials,
            seed,
            prices = %prices.display(),
            "resolved estimation plan"
        );

        Ok(Plan {
            engine,
            method,
            window,
            confidence,
            precision,
        })
    }
}
