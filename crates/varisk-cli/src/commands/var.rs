//! Single-instrument VaR command.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use varisk_core::{InstrumentId, VaRReport};

use crate::cli::OutputFormat;
use crate::commands::config::Settings;
use crate::commands::EstimateArgs;
use crate::error::CliError;
use crate::output::{format_percent, format_var, print_header, print_output, KeyValue};

/// Arguments for the var command.
#[derive(Args, Debug)]
pub struct VarArgs {
    /// Instrument identifier (e.g. SPY)
    #[arg(short, long)]
    pub ticker: String,

    #[command(flatten)]
    pub estimate: EstimateArgs,
}

/// Flat CSV row for a report.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    instrument: &'a str,
    method: &'a str,
    confidence_level: f64,
    horizon_days: Option<u32>,
    trials: Option<u32>,
    var: f64,
}

/// Execute the var command.
pub async fn execute(
    args: VarArgs,
    settings: &Settings,
    format: OutputFormat,
    debug: bool,
) -> Result<()> {
    let plan = args.estimate.plan(settings, debug, false)?;
    let instrument = InstrumentId::new(args.ticker.trim());

    let report = plan
        .engine
        .estimate(&instrument, plan.method, plan.window, plan.confidence)
        .await
        .map_err(CliError::from)?;

    match format {
        OutputFormat::Table => {
            print_header(&format!("VaR: {}", instrument));
            let mut rows = vec![
                KeyValue::new("Instrument", instrument.as_str()),
                KeyValue::new("Method", report.method.as_str()),
                KeyValue::new("Confidence", format_percent(report.confidence_level)),
                KeyValue::new(
                    "Window",
                    format!("{} to {}", plan.window.start(), plan.window.end()),
                ),
            ];
            if let Some(days) = report.horizon_days {
                rows.push(KeyValue::new("Horizon (days)", days.to_string()));
            }
            if let Some(trials) = report.trials {
                rows.push(KeyValue::new("Trials", trials.to_string()));
            }
            rows.push(KeyValue::new("VaR", format_var(report.var, plan.precision)));
            print_output(&rows, format)?;
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Csv => {
            print_rows(&report)?;
        }
        OutputFormat::Minimal => {
            println!("{}", format_var(report.var, plan.precision));
        }
    }

    Ok(())
}

fn print_rows(report: &VaRReport) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for instrument in &report.instruments {
        wtr.serialize(ReportRow {
            instrument,
            method: report.method.as_str(),
            confidence_level: report.confidence_level,
            horizon_days: report.horizon_days,
            trials: report.trials,
            var: report.var,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
