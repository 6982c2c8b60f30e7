//! Historical VaR calculation.

use varisk_core::{ConfidenceLevel, EstimatorConfig, ReturnSeries, RiskResult};
use varisk_math::quantile::{empirical_quantile, rank_index};
use varisk_math::rounding::round_to;

/// Calculate historical VaR from a series of returns.
///
/// Sorts the returns ascending and reads the one at rank
/// `floor((1 - c) * n)`, clamped into the sample. No distributional
/// assumption is made.
///
/// # Arguments
///
/// * `returns` - Historical simple returns (as decimals, e.g., -0.01 for -1%)
/// * `confidence` - Confidence level (e.g., 0.95 for 95%)
/// * `config` - Rounding precision and diagnostics
///
/// # Returns
///
/// The selected return, rounded to `config.precision` places.
pub fn historical_var(
    returns: &ReturnSeries,
    confidence: ConfidenceLevel,
    config: &EstimatorConfig,
) -> RiskResult<f64> {
    config.validate()?;

    let mut sorted = returns.values().to_vec();
    let var_return = empirical_quantile(&mut sorted, confidence.tail())?;

    if config.diagnostics {
        tracing::debug!(
            observations = sorted.len(),
            index = rank_index(confidence.tail(), sorted.len())?,
            worst = sorted[0],
            var_return,
            "historical VaR"
        );
    }

    Ok(round_to(var_return, config.precision)?)
}
