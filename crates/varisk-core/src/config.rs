//! Estimator configuration.
//!
//! Settings that used to be process-wide (diagnostic output, path capture)
//! are fields here and travel with every estimator call.

use serde::{Deserialize, Serialize};
use varisk_math::statistics::VarianceKind;

use crate::error::{RiskError, RiskResult};

/// Decimal places of every reported VaR figure.
pub const DEFAULT_PRECISION: u32 = 4;

/// Largest supported rounding precision.
pub const MAX_PRECISION: u32 = 12;

/// Options shared by all estimators.
///
/// # Example
///
/// ```rust
/// use varisk_core::config::EstimatorConfig;
/// use varisk_core::VarianceKind;
///
/// let config = EstimatorConfig::default()
///     .with_variance(VarianceKind::Population)
///     .with_diagnostics(true);
/// assert_eq!(config.precision, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// Denominator for variance and standard deviation.
    #[serde(default)]
    pub variance: VarianceKind,

    /// Decimal places of the returned VaR.
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Emit intermediate quantities at debug level.
    #[serde(default)]
    pub diagnostics: bool,

    /// Return the simulated path matrix from Monte Carlo runs.
    #[serde(default)]
    pub capture_paths: bool,
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            variance: VarianceKind::Sample,
            precision: DEFAULT_PRECISION,
            diagnostics: false,
            capture_paths: false,
        }
    }
}

impl EstimatorConfig {
    /// Sets the variance denominator.
    #[must_use]
    pub fn with_variance(mut self, variance: VarianceKind) -> Self {
        self.variance = variance;
        self
    }

    /// Sets the rounding precision.
    #[must_use]
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Enables or disables diagnostic logging.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Enables or disables Monte Carlo path capture.
    #[must_use]
    pub fn with_capture_paths(mut self, capture_paths: bool) -> Self {
        self.capture_paths = capture_paths;
        self
    }

    /// Checks that the settings are usable.
    pub fn validate(&self) -> RiskResult<()> {
        if self.precision > MAX_PRECISION {
            return Err(RiskError::configuration(format!(
                "precision must be at most {MAX_PRECISION} decimal places, got {}",
                self.precision
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EstimatorConfig::default();
        assert_eq!(config.variance, VarianceKind::Sample);
        assert_eq!(config.precision, 4);
        assert!(!config.diagnostics);
        assert!(!config.capture_paths);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_precision_bound() {
        assert!(EstimatorConfig::default().with_precision(13).validate().is_err());
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: EstimatorConfig =
            serde_json::from_str(r#"{"variance": "population"}"#).unwrap();
        assert_eq!(config.variance, VarianceKind::Population);
        assert_eq!(config.precision, 4);
    }
}
