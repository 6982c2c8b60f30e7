//! CLI error types.

use thiserror::Error;
use varisk_core::RiskError;
use varisk_engine::EngineError;
use varisk_traits::TraitError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Missing required argument.
    #[error("Missing required argument: {0}")]
    MissingArgument(String),

    /// Estimation failed.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Engine failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Price source could not be opened.
    #[error("Price data error: {0}")]
    Source(#[from] TraitError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<csv::Error> for CliError {
    fn from(e: csv::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
