//! # Varisk Traits
//!
//! Trait definitions for the Varisk library.
//!
//! This crate contains ONLY trait definitions. Implementations live in
//! extension crates such as `varisk-ext-file`.
//!
//! ## Module Structure
//!
//! - [`price_history`]: Sources of historical closing prices
//! - [`sink`]: Consumers of simulated Monte Carlo paths
//!
//! ## Dependency Injection
//!
//! The engine takes both seams as trait objects:
//!
//! ```ignore
//! VarEngine::new(Arc::new(CsvPriceSource::from_path("prices.csv")?))
//!     .with_sink(Arc::new(CsvPathSink::new("paths.csv")))
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod price_history;
pub mod sink;

// Re-export commonly used types
pub use error::TraitError;
pub use price_history::{PriceHistorySource, SourceType};
pub use sink::PathSink;
