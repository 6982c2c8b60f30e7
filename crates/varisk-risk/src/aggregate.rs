//! Portfolio VaR aggregation.
//!
//! The portfolio figure is the weight-sum of per-instrument VaRs. No
//! correlation or diversification adjustment is made, so the result is the
//! VaR of a portfolio whose constituents move in lockstep.

use std::collections::BTreeMap;

use serde::Serialize;
use varisk_core::{EstimatorConfig, InstrumentId, Portfolio, RiskError, RiskResult};
use varisk_math::rounding::round_to;

/// One instrument's share of a portfolio VaR.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetContribution {
    /// Instrument identifier.
    pub instrument: InstrumentId,
    /// Portfolio weight.
    pub weight: f64,
    /// Stand-alone VaR of the instrument.
    pub var: f64,
    /// `weight * var`, unrounded.
    pub contribution: f64,
}

/// Aggregated portfolio VaR with its breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioVaR {
    /// Rounded weighted sum.
    pub var: f64,
    /// Per-instrument breakdown, ordered by identifier.
    pub contributions: Vec<AssetContribution>,
}

impl PortfolioVaR {
    /// Contribution of a single instrument, if present.
    pub fn contribution(&self, id: &InstrumentId) -> Option<&AssetContribution> {
        self.contributions.iter().find(|c| &c.instrument == id)
    }
}

/// Combines per-instrument VaRs into a portfolio VaR.
///
/// # Errors
///
/// Returns `RiskError::DataUnavailable` if an instrument in `portfolio` has
/// no entry in `per_asset`, and `RiskError::Computation` for a non-finite
/// VaR input.
///
/// # Example
///
/// ```rust
/// use std::collections::BTreeMap;
/// use varisk_core::prelude::*;
/// use varisk_risk::aggregate_var;
///
/// let portfolio = Portfolio::parse(&["A=0.5", "B=0.5"])?;
/// let per_asset = BTreeMap::from([
///     (InstrumentId::from("A"), -0.02),
///     (InstrumentId::from("B"), -0.04),
/// ]);
/// let result = aggregate_var(&portfolio, &per_asset, &EstimatorConfig::default())?;
/// assert_eq!(result.var, -0.03);
/// # Ok::<(), RiskError>(())
/// ```
pub fn aggregate_var(
    portfolio: &Portfolio,
    per_asset: &BTreeMap<InstrumentId, f64>,
    config: &EstimatorConfig,
) -> RiskResult<PortfolioVaR> {
    config.validate()?;

    let contributions = portfolio
        .iter()
        .map(|(id, weight)| {
            let var = *per_asset.get(id).ok_or_else(|| {
                RiskError::data_unavailable(id.as_str(), "no VaR estimate for portfolio member")
            })?;
            if !var.is_finite() {
                return Err(RiskError::computation(format!(
                    "VaR for {id} is not finite"
                )));
            }
            Ok(AssetContribution {
                instrument: id.clone(),
                weight,
                var,
                contribution: weight * var,
            })
        })
        .collect::<RiskResult<Vec<_>>>()?;

    let total: f64 = contributions.iter().map(|c| c.contribution).sum();

    if config.diagnostics {
        tracing::debug!(instruments = contributions.len(), total, "portfolio VaR");
    }

    Ok(PortfolioVaR {
        var: round_to(total, config.precision)?,
        contributions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use varisk_core::ErrorKind;

    fn per_asset(entries: &[(&str, f64)]) -> BTreeMap<InstrumentId, f64> {
        entries.iter().map(|(id, v)| (InstrumentId::from(*id), *v)).collect()
    }

    #[test]
    fn test_equal_weights() {
        let portfolio = Portfolio::parse(&["A=0.5", "B=0.5"]).unwrap();
        let result = aggregate_var(
            &portfolio,
            &per_asset(&[("A", -0.02), ("B", -0.04)]),
            &EstimatorConfig::default(),
        )
        .unwrap();

        assert_eq!(result.var, -0.03);
        assert_eq!(result.contributions.len(), 2);
        assert_relative_eq!(
            result.contribution(&"B".into()).unwrap().contribution,
            -0.02,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_weights_need_not_sum_to_one() {
        let portfolio = Portfolio::parse(&["A=2", "B=-1"]).unwrap();
        let result = aggregate_var(
            &portfolio,
            &per_asset(&[("A", -0.01), ("B", -0.03)]),
            &EstimatorConfig::default(),
        )
        .unwrap();
        assert_eq!(result.var, 0.01);
    }

    #[test]
    fn test_extra_inputs_ignored() {
        let portfolio = Portfolio::parse(&["A=1"]).unwrap();
        let result = aggregate_var(
            &portfolio,
            &per_asset(&[("A", -0.05), ("Z", -0.9)]),
            &EstimatorConfig::default(),
        )
        .unwrap();
        assert_eq!(result.var, -0.05);
        assert_eq!(result.contributions.len(), 1);
    }

    #[test]
    fn test_missing_instrument() {
        let portfolio = Portfolio::parse(&["A=0.5", "B=0.5"]).unwrap();
        let err = aggregate_var(
            &portfolio,
            &per_asset(&[("A", -0.02)]),
            &EstimatorConfig::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
        assert!(err.to_string().contains('B'));
    }
}
