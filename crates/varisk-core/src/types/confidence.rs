//! Confidence level type.

use serde::Serialize;
use std::fmt;

use crate::error::{RiskError, RiskResult};

/// Confidence level for a VaR estimate, strictly inside (0, 1).
///
/// # Example
///
/// ```rust
/// use varisk_core::types::ConfidenceLevel;
///
/// let c = ConfidenceLevel::new(0.99).unwrap();
/// assert_eq!(c.value(), 0.99);
/// assert!(ConfidenceLevel::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct ConfidenceLevel(f64);

impl ConfidenceLevel {
    /// Creates a confidence level.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::Configuration` unless `0 < value < 1`.
    pub fn new(value: f64) -> RiskResult<Self> {
        if value > 0.0 && value < 1.0 {
            Ok(Self(value))
        } else {
            Err(RiskError::configuration(format!(
                "confidence level must be strictly between 0 and 1, got {value}"
            )))
        }
    }

    /// The confidence level as a probability.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Tail probability `1 - c`.
    pub fn tail(self) -> f64 {
        1.0 - self.0
    }
}

impl TryFrom<f64> for ConfidenceLevel {
    type Error = RiskError;

    fn try_from(value: f64) -> RiskResult<Self> {
        Self::new(value)
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}
