//! Return series types.
//!
//! Simple and log returns are kept as distinct types so a log series cannot
//! be handed to an estimator that reads simple returns.

use serde::Serialize;

use crate::error::{RiskError, RiskResult};

fn validate(values: &[f64], label: &str) -> RiskResult<()> {
    if values.is_empty() {
        return Err(RiskError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(RiskError::computation(format!(
            "non-finite {label} return at position {i}"
        )));
    }
    Ok(())
}

/// Per-period simple returns `(P_i - P_{i-1}) / P_{i-1}`. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReturnSeries(Vec<f64>);

impl ReturnSeries {
    /// Wraps precomputed simple returns.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InsufficientData` for an empty series and
    /// `RiskError::Computation` for non-finite values.
    pub fn from_values(values: Vec<f64>) -> RiskResult<Self> {
        validate(&values, "simple")?;
        Ok(Self(values))
    }

    /// The returns, oldest first.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of returns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Per-period log returns `ln(P_i / P_{i-1})`. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LogReturnSeries(Vec<f64>);

impl LogReturnSeries {
    /// Wraps precomputed log returns.
    pub fn from_values(values: Vec<f64>) -> RiskResult<Self> {
        validate(&values, "log")?;
        Ok(Self(values))
    }

    /// The log returns, oldest first.
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of log returns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
