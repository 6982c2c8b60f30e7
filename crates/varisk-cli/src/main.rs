//! Varisk CLI - Value-at-Risk estimation from historical closing prices.
//!
//! # Usage
//!
//! ```bash
//! # Historical VaR of one instrument over an explicit window
//! varisk var --ticker SPY --prices prices.csv -s 2024-01-01 -e 2024-12-31 -c 0.95 -m historical
//!
//! # Monte Carlo VaR, 30-day horizon, 5000 trials, paths written to CSV
//! varisk var -t SPY --prices prices.csv -c 0.99 -m monte-carlo -d 30 --trials 5000 --paths-out paths.csv
//!
//! # Weighted portfolio
//! varisk portfolio --asset SPY=0.6 --asset QQQ=0.4 --prices prices.csv -c 0.95
//!
//! # Persist defaults
//! varisk config set prices ~/data/prices.csv
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::config::Settings;

const DEBUG_FILTER: &str =
    "warn,varisk=debug,varisk_core=debug,varisk_risk=debug,varisk_engine=debug,varisk_ext_file=debug";

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new(DEBUG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // stdout carries command output
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match cli.command {
        Commands::Var(args) => {
            let settings = Settings::load()?;
            let format = match cli.format {
                Some(format) => format,
                None => settings.format()?,
            };
            commands::var::execute(args, &settings, format, cli.debug).await?;
        }
        Commands::Portfolio(args) => {
            let settings = Settings::load()?;
            let format = match cli.format {
                Some(format) => format,
                None => settings.format()?,
            };
            commands::portfolio::execute(args, &settings, format, cli.debug).await?;
        }
        Commands::Config(args) => {
            commands::config::execute(args, cli.format.unwrap_or_default())?;
        }
    }

    Ok(())
}
