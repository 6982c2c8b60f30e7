//! Engine error types.

use thiserror::Error;
use varisk_core::{ErrorKind, RiskError};

/// A specialized Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Estimation or data error
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// A blocking estimation task did not complete
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngineError {
    /// Category of the underlying risk error, if any.
    pub fn risk_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Risk(e) => Some(e.kind()),
            Self::Internal(_) => None,
        }
    }
}
