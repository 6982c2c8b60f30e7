//! # Varisk Engine
//!
//! Orchestrates a VaR run end to end.
//!
//! This crate provides:
//! - [`VarEngine`]: fetches price history through a [`PriceHistorySource`],
//!   estimates VaR with a [`VaRCalculator`], and forwards Monte Carlo paths
//!   to an optional [`PathSink`]
//! - [`HistoryWindow`]: the inclusive date range to fetch
//! - [`PortfolioReport`]: portfolio VaR with per-instrument contributions
//!
//! ## Architecture
//!
//! ```text
//! PriceHistorySource ─(concurrent fetch)─> PriceSeries ─┬─> VaRCalculator ─> VaRReport
//!                                                      │
//!                                                      └─> paths ─> PathSink
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let engine = VarEngine::new(Arc::new(CsvPriceSource::new("prices.csv")?))
//!     .with_calculator(VaRCalculator::default().with_seed(7))
//!     .with_sink(Arc::new(CsvPathSink::new("paths.csv")));
//!
//! let report = engine
//!     .estimate(&"SPY".into(), VaRMethod::MonteCarlo, window, confidence)
//!     .await?;
//! ```
//!
//! [`PriceHistorySource`]: varisk_traits::PriceHistorySource
//! [`PathSink`]: varisk_traits::PathSink
//! [`VaRCalculator`]: varisk_risk::VaRCalculator

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod engine;
pub mod error;
pub mod window;

// Re-exports
pub use engine::{PortfolioReport, VarEngine};
pub use error::{EngineError, EngineResult};
pub use window::HistoryWindow;
