//! Portfolio VaR command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use varisk_core::Portfolio;
use varisk_engine::PortfolioReport;

use crate::cli::OutputFormat;
use crate::commands::config::Settings;
use crate::commands::EstimateArgs;
use crate::error::CliError;
use crate::output::{format_percent, format_var, print_header, print_info, print_output};

/// Arguments for the portfolio command.
#[derive(Args, Debug)]
pub struct PortfolioArgs {
    /// Portfolio member as ID=WEIGHT (repeatable, e.g. --asset SPY=0.6 --asset QQQ=0.4)
    #[arg(short, long = "asset", value_name = "ID=WEIGHT", required = true)]
    pub assets: Vec<String>,

    #[command(flatten)]
    pub estimate: EstimateArgs,
}

/// One line of the contribution breakdown.
#[derive(Debug, Serialize, Tabled)]
struct ContributionRow {
    #[tabled(rename = "Instrument")]
    instrument: String,
    #[tabled(rename = "Weight")]
    weight: String,
    #[tabled(rename = "VaR")]
    var: String,
    #[tabled(rename = "Contribution")]
    contribution: String,
}

/// Flat CSV row; the portfolio total uses the `PORTFOLIO` instrument.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    instrument: &'a str,
    method: &'a str,
    confidence_level: f64,
    weight: Option<f64>,
    var: f64,
    contribution: Option<f64>,
}

/// Execute the portfolio command.
pub async fn execute(
    args: PortfolioArgs,
    settings: &Settings,
    format: OutputFormat,
    debug: bool,
) -> Result<()> {
    let portfolio = Portfolio::parse(&args.assets).map_err(CliError::from)?;
    let plan = args.estimate.plan(settings, debug, true)?;

    let result = plan
        .engine
        .portfolio(&portfolio, plan.method, plan.window, plan.confidence)
        .await
        .map_err(CliError::from)?;

    match format {
        OutputFormat::Table => {
            print_header(&format!(
                "Portfolio VaR ({}, {} confidence)",
                result.report.method,
                format_percent(result.report.confidence_level)
            ));
            let rows: Vec<_> = result
                .contributions
                .iter()
                .map(|c| ContributionRow {
                    instrument: c.instrument.to_string(),
                    weight: format!("{}", c.weight),
                    var: format_var(c.var, plan.precision),
                    contribution: format_var(c.contribution, plan.precision),
                })
                .collect();
            print_output(&rows, format)?;
            print_info(&format!(
                "Portfolio VaR: {}",
                format_var(result.report.var, plan.precision)
            ));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        OutputFormat::Csv => {
            print_rows(&result)?;
        }
        OutputFormat::Minimal => {
            println!("{}", format_var(result.report.var, plan.precision));
        }
    }

    Ok(())
}

fn print_rows(result: &PortfolioReport) -> Result<()> {
    let method = result.report.method.as_str();
    let confidence_level = result.report.confidence_level;

    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for c in &result.contributions {
        wtr.serialize(CsvRow {
            instrument: c.instrument.as_str(),
            method,
            confidence_level,
            weight: Some(c.weight),
            var: c.var,
            contribution: Some(c.contribution),
        })?;
    }
    wtr.serialize(CsvRow {
        instrument: "PORTFOLIO",
        method,
        confidence_level,
        weight: None,
        var: result.report.var,
        contribution: None,
    })?;
    wtr.flush()?;
    Ok(())
}
