//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, PortfolioArgs, VarArgs};

/// Varisk - Value-at-Risk estimation from historical prices
#[derive(Parser)]
#[command(name = "varisk")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format [default: table, or the configured format]
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Log intermediate quantities (mean, drift, volatility, selected rank)
    #[arg(long, global = true, env = "VARISK_DEBUG")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Estimate the VaR of a single instrument
    Var(VarArgs),

    /// Estimate the VaR of a weighted portfolio
    Portfolio(PortfolioArgs),

    /// Manage configurations
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
