//! Return transform.
//!
//! Converts an ordered price series into per-period returns. A series of `n`
//! prices yields `n - 1` returns.

use crate::error::{RiskError, RiskResult};
use crate::types::{LogReturnSeries, PriceSeries, ReturnSeries};

/// Minimum number of prices for any return series.
pub const MIN_PRICES: usize = 2;

fn check_length(prices: &PriceSeries) -> RiskResult<()> {
    if prices.len() < MIN_PRICES {
        return Err(RiskError::InsufficientData {
            required: MIN_PRICES,
            actual: prices.len(),
        });
    }
    Ok(())
}

fn check_positive(prices: &PriceSeries, use_of: &str) -> RiskResult<()> {
    if let Some(bad) = prices.points().iter().find(|p| p.close <= 0.0) {
        return Err(RiskError::computation(format!(
            "non-positive price {} on {} {use_of}",
            bad.close, bad.date
        )));
    }
    Ok(())
}

/// Simple returns `(P_i - P_{i-1}) / P_{i-1}`.
///
/// # Errors
///
/// Returns `RiskError::InsufficientData` for fewer than two prices and
/// `RiskError::Computation` for any non-positive price.
///
/// # Example
///
/// ```rust
/// use varisk_core::prelude::*;
///
/// let prices = PriceSeries::from_closes(&[100.0, 110.0, 99.0]).unwrap();
/// let returns = simple_returns(&prices).unwrap();
/// assert!((returns.values()[0] - 0.10).abs() < 1e-12);
/// assert!((returns.values()[1] + 0.10).abs() < 1e-12);
/// ```
pub fn simple_returns(prices: &PriceSeries) -> RiskResult<ReturnSeries> {
    check_length(prices)?;
    check_positive(prices, "cannot anchor a return")?;
    let values = prices
        .points()
        .windows(2)
        .map(|w| (w[1].close - w[0].close) / w[0].close)
        .collect();
    ReturnSeries::from_values(values)
}

/// Log returns `ln(P_i / P_{i-1})`.
///
/// # Errors
///
/// Returns `RiskError::InsufficientData` for fewer than two prices and
/// `RiskError::Computation` for any non-positive price.
pub fn log_returns(prices: &PriceSeries) -> RiskResult<LogReturnSeries> {
    check_length(prices)?;
    check_positive(prices, "has no logarithm")?;
    let values = prices
        .points()
        .windows(2)
        .map(|w| (w[1].close / w[0].close).ln())
        .collect();
    LogReturnSeries::from_values(values)
}

/// Converts simple returns to log returns via `ln(1 + r)`.
///
/// # Errors
///
/// Returns `RiskError::Computation` for a return at or below -100%, which
/// implies a non-positive price.
pub fn to_log_returns(returns: &ReturnSeries) -> RiskResult<LogReturnSeries> {
    let values = returns
        .values()
        .iter()
        .enumerate()
        .map(|(i, &r)| {
            if r <= -1.0 {
                Err(RiskError::computation(format!(
                    "return {r} at position {i} implies a non-positive price"
                )))
            } else {
                Ok(r.ln_1p())
            }
        })
        .collect::<RiskResult<Vec<_>>>()?;
    LogReturnSeries::from_values(values)
}
