//! Descriptive statistics over return samples.
//!
//! Thin wrappers around [`statrs::statistics::Statistics`] that reject empty
//! and non-finite samples instead of returning `NaN`.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::{MathError, MathResult};

/// Denominator used for the second moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VarianceKind {
    /// Unbiased sample estimator, divides by `n - 1`.
    #[default]
    Sample,
    /// Population estimator, divides by `n`.
    Population,
}

impl std::fmt::Display for VarianceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sample => write!(f, "sample"),
            Self::Population => write!(f, "population"),
        }
    }
}

fn check_sample(values: &[f64], operation: &str) -> MathResult<()> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::non_finite(operation));
    }
    Ok(())
}

/// Arithmetic mean of a sample.
///
/// # Errors
///
/// Returns `MathError::InsufficientData` for an empty sample and
/// `MathError::NonFinite` if any observation is NaN or infinite.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    check_sample(values, "mean")?;
    Ok(values.iter().mean())
}

/// Variance of a sample.
///
/// A single observation has zero sample variance: the series is treated as
/// degenerate rather than dividing by `n - 1 = 0`.
pub fn variance(values: &[f64], kind: VarianceKind) -> MathResult<f64> {
    check_sample(values, "variance")?;
    if values.len() == 1 {
        return Ok(0.0);
    }
    let var = match kind {
        VarianceKind::Sample => values.iter().variance(),
        VarianceKind::Population => values.iter().population_variance(),
    };
    // Rounding noise on a constant sample can leave a tiny negative value.
    Ok(var.max(0.0))
}

/// Standard deviation of a sample.
pub fn std_dev(values: &[f64], kind: VarianceKind) -> MathResult<f64> {
    variance(values, kind).map(f64::sqrt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), Err(MathError::insufficient_data(1, 0)));
    }

    #[test]
    fn test_mean_rejects_nan() {
        assert!(matches!(
            mean(&[1.0, f64::NAN]),
            Err(MathError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_sample_vs_population_variance() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(
            variance(&values, VarianceKind::Population).unwrap(),
            4.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            variance(&values, VarianceKind::Sample).unwrap(),
            32.0 / 7.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            std_dev(&values, VarianceKind::Population).unwrap(),
            2.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_single_observation_is_degenerate() {
        assert_eq!(variance(&[0.01], VarianceKind::Sample).unwrap(), 0.0);
        assert_eq!(std_dev(&[0.01], VarianceKind::Population).unwrap(), 0.0);
    }

    #[test]
    fn test_constant_sample_has_zero_variance() {
        let values = [0.5; 16];
        assert_eq!(variance(&values, VarianceKind::Sample).unwrap(), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(VarianceKind::Sample.to_string(), "sample");
        assert_eq!(VarianceKind::Population.to_string(), "population");
    }

    proptest! {
        #[test]
        fn prop_population_variance_not_above_sample(
            values in proptest::collection::vec(-1.0f64..1.0, 2..64)
        ) {
            let sample = variance(&values, VarianceKind::Sample).unwrap();
            let population = variance(&values, VarianceKind::Population).unwrap();
            prop_assert!(population <= sample + 1e-15);
            prop_assert!(population >= 0.0);
        }
    }
}
