//! Error types for the Varisk library.
//!
//! Every failure falls into one of three categories, exposed through
//! [`RiskError::kind`]:
//!
//! - **Configuration**: invalid parameters supplied by the caller. Never retried.
//! - **Data**: missing, insufficient, or malformed price history.
//! - **Computation**: numerically invalid values reaching an estimator.

use thiserror::Error;
use varisk_math::MathError;

/// A specialized Result type for Varisk operations.
pub type RiskResult<T> = Result<T, RiskError>;

/// The main error type for Varisk operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    /// Invalid confidence level, simulation size, method name, or weight.
    #[error("Configuration error: {reason}")]
    Configuration {
        /// Description of the invalid setting.
        reason: String,
    },

    /// Too few observations for the requested operation.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum number of observations.
        required: usize,
        /// Number of observations supplied.
        actual: usize,
    },

    /// The price provider has no history for an instrument or range.
    #[error("Data unavailable for {instrument}: {reason}")]
    DataUnavailable {
        /// Instrument identifier.
        instrument: String,
        /// Provider-supplied reason.
        reason: String,
    },

    /// Price history that violates series invariants.
    #[error("Invalid data: {reason}")]
    InvalidData {
        /// Description of the violation.
        reason: String,
    },

    /// Numerically invalid input or intermediate result.
    #[error("Computation error: {reason}")]
    Computation {
        /// Description of what went wrong.
        reason: String,
    },
}

/// Broad category of a [`RiskError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller-supplied parameters are invalid.
    Configuration,
    /// Price history is missing, short, or malformed.
    Data,
    /// A numerical guard tripped.
    Computation,
}

impl RiskError {
    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates an invalid data error.
    #[must_use]
    pub fn invalid_data(reason: impl Into<String>) -> Self {
        Self::InvalidData {
            reason: reason.into(),
        }
    }

    /// Creates a computation error.
    #[must_use]
    pub fn computation(reason: impl Into<String>) -> Self {
        Self::Computation {
            reason: reason.into(),
        }
    }

    /// Creates a data unavailable error.
    #[must_use]
    pub fn data_unavailable(instrument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            instrument: instrument.into(),
            reason: reason.into(),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration { .. } => ErrorKind::Configuration,
            Self::InsufficientData { .. }
            | Self::DataUnavailable { .. }
            | Self::InvalidData { .. } => ErrorKind::Data,
            Self::Computation { .. } => ErrorKind::Computation,
        }
    }
}

impl From<MathError> for RiskError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                Self::InsufficientData { required, actual }
            }
            MathError::InvalidProbability { p } => {
                Self::configuration(format!("probability {p} is outside (0, 1)"))
            }
            MathError::NonFinite { .. } | MathError::InvalidInput { .. } => {
                Self::computation(err.to_string())
            }
        }
    }
}
