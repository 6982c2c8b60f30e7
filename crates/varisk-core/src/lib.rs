//! # Varisk Core
//!
//! Core types and abstractions for the Varisk value-at-risk library.
//!
//! This crate provides the foundational building blocks used throughout Varisk:
//!
//! - **Types**: `PriceSeries`, `ReturnSeries`, `ConfidenceLevel`,
//!   `SimulationConfig`, `Portfolio`, `VaRMethod`
//! - **Return Transform**: simple and log returns from an ordered price series
//! - **Configuration**: [`EstimatorConfig`], passed explicitly into every
//!   estimator call
//! - **Errors**: the [`RiskError`] taxonomy (configuration, data, computation)
//!
//! ## Example
//!
//! ```rust
//! use varisk_core::prelude::*;
//!
//! let prices = PriceSeries::from_closes(&[100.0, 102.0, 101.0, 105.0, 103.0]).unwrap();
//! let returns = simple_returns(&prices).unwrap();
//! assert_eq!(returns.len(), 4);
//!
//! let conf = ConfidenceLevel::new(0.95).unwrap();
//! assert!((conf.tail() - 0.05).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod error;
pub mod returns;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{EstimatorConfig, DEFAULT_PRECISION};
    pub use crate::error::{ErrorKind, RiskError, RiskResult};
    pub use crate::returns::{log_returns, simple_returns, to_log_returns};
    pub use crate::types::{
        ConfidenceLevel, InstrumentId, LogReturnSeries, PathMatrix, Portfolio, PricePoint,
        PriceSeries, ReturnSeries, SimulationConfig, VaRMethod, VaRReport,
    };
    pub use varisk_math::statistics::VarianceKind;
}

pub use config::EstimatorConfig;
pub use error::{ErrorKind, RiskError, RiskResult};
pub use types::*;
pub use varisk_math::statistics::VarianceKind;
