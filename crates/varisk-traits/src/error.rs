//! Error types for trait operations.

use thiserror::Error;

/// Common error type for trait operations.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Requested instrument not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Instrument known but no prices in the requested range
    #[error("no data: {0}")]
    NoData(String),

    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}

impl From<varisk_core::RiskError> for TraitError {
    fn from(e: varisk_core::RiskError) -> Self {
        TraitError::InvalidInput(e.to_string())
    }
}
