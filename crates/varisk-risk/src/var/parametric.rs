//! Parametric (variance-covariance) VaR calculation.
//!
//! Assumes normally distributed returns. The estimate is the `1 - c`
//! quantile of N(μ, σ²):
//!
//! ```text
//! VaR = μ + z·σ,   z = Φ⁻¹(1 - c)
//! ```
//!
//! z is negative for c > 0.5, so the estimate sits below the mean.

use varisk_core::{ConfidenceLevel, EstimatorConfig, ReturnSeries, RiskResult};
use varisk_math::distributions::StandardNormal;
use varisk_math::rounding::round_to;
use varisk_math::statistics::{mean, std_dev};

/// Standard normal quantile of the tail probability, `Φ⁻¹(1 - c)`.
///
/// Returns about -1.645 for c = 0.95 and -2.326 for c = 0.99.
pub fn z_score(confidence: ConfidenceLevel) -> RiskResult<f64> {
    Ok(StandardNormal::new().inverse_cdf(confidence.tail())?)
}

/// Calculate parametric VaR from a series of returns.
///
/// μ and σ are estimated from `returns` with the variance form in
/// `config.variance`. A series with zero dispersion yields μ exactly.
pub fn parametric_var(
    returns: &ReturnSeries,
    confidence: ConfidenceLevel,
    config: &EstimatorConfig,
) -> RiskResult<f64> {
    config.validate()?;

    let values = returns.values();
    let mu = mean(values)?;
    let sigma = std_dev(values, config.variance)?;
    let z = z_score(confidence)?;

    let var_return = if sigma == 0.0 { mu } else { mu + z * sigma };

    if config.diagnostics {
        tracing::debug!(mu, sigma, z, var_return, "parametric VaR");
    }

    Ok(round_to(var_return, config.precision)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use varisk_core::VarianceKind;

    fn conf(c: f64) -> ConfidenceLevel {
        ConfidenceLevel::new(c).unwrap()
    }

    #[test]
    fn test_z_score() {
        assert_relative_eq!(z_score(conf(0.95)).unwrap(), -1.644_853_6, epsilon = 1e-6);
        assert_relative_eq!(z_score(conf(0.99)).unwrap(), -2.326_347_9, epsilon = 1e-6);
        assert_relative_eq!(z_score(conf(0.5)).unwrap(), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_parametric_var() {
        // μ = 0.001, sample σ = 0.02 exactly for this symmetric pair
        let s = 0.02 / std::f64::consts::SQRT_2;
        let returns = ReturnSeries::from_values(vec![0.001 - s, 0.001 + s]).unwrap();
        let config = EstimatorConfig::default().with_precision(8);

        let var = parametric_var(&returns, conf(0.95), &config).unwrap();
        let expected = 0.001 - 1.644_853_63 * 0.02;
        assert_relative_eq!(var, expected, epsilon = 1e-7);
    }

    #[test]
    fn test_zero_sigma_returns_mean() {
        let returns = ReturnSeries::from_values(vec![0.003; 20]).unwrap();
        for c in [0.01, 0.5, 0.95, 0.999] {
            let var = parametric_var(&returns, conf(c), &EstimatorConfig::default()).unwrap();
            assert_eq!(var, 0.003);
        }
    }

    #[test]
    fn test_single_return_is_degenerate() {
        let returns = ReturnSeries::from_values(vec![-0.0125]).unwrap();
        let var = parametric_var(&returns, conf(0.99), &EstimatorConfig::default()).unwrap();
        assert_eq!(var, -0.0125);
    }

    #[test]
    fn test_median_confidence_is_mean() {
        let returns = ReturnSeries::from_values(vec![-0.02, 0.01, 0.03, -0.005, 0.012]).unwrap();
        let var = parametric_var(&returns, conf(0.5), &EstimatorConfig::default()).unwrap();
        assert_relative_eq!(var, 0.0054, epsilon = 1e-4);
    }

    #[test]
    fn test_population_form_is_narrower() {
        let returns = ReturnSeries::from_values(vec![-0.02, 0.01, 0.03, -0.005]).unwrap();
        let sample = parametric_var(&returns, conf(0.95), &EstimatorConfig::default()).unwrap();
        let population = parametric_var(
            &returns,
            conf(0.95),
            &EstimatorConfig::default().with_variance(VarianceKind::Population),
        )
        .unwrap();
        assert!(population > sample);
    }

    #[test]
    fn test_higher_confidence_larger_loss() {
        let returns = ReturnSeries::from_values(vec![-0.02, 0.01, 0.03, -0.005]).unwrap();
        let config = EstimatorConfig::default();
        let v95 = parametric_var(&returns, conf(0.95), &config).unwrap();
        let v99 = parametric_var(&returns, conf(0.99), &config).unwrap();
        assert!(v99 < v95);
    }
}
