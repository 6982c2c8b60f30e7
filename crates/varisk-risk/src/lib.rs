//! # varisk-risk
//!
//! Value-at-Risk estimation for single instruments and weighted portfolios.
//!
//! This crate provides:
//!
//! - **Historical VaR**: empirical quantile of realised returns
//! - **Parametric VaR**: variance-covariance under normal returns
//! - **Monte Carlo VaR**: geometric Brownian motion price paths
//! - **Aggregation**: linear combination of per-instrument VaRs
//! - **Calculator**: a [`VaRCalculator`] that dispatches on [`VaRMethod`]
//!
//! Every figure is a return: `-0.0250` means a 2.5% loss at the stated
//! confidence. Figures are rounded to [`EstimatorConfig::precision`] places.
//!
//! ## Example
//!
//! ```rust
//! use varisk_core::prelude::*;
//! use varisk_risk::prelude::*;
//!
//! let prices = PriceSeries::from_closes(&[100.0, 102.0, 101.0, 105.0, 103.0])?;
//! let returns = simple_returns(&prices)?;
//! let conf = ConfidenceLevel::new(0.95)?;
//!
//! let var = historical_var(&returns, conf, &EstimatorConfig::default())?;
//! assert_eq!(var, -0.0190);
//! # Ok::<(), varisk_core::RiskError>(())
//! ```
//!
//! [`EstimatorConfig::precision`]: varisk_core::EstimatorConfig::precision
//! [`VaRMethod`]: varisk_core::VaRMethod

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod aggregate;
pub mod calculator;
pub mod random;
pub mod var;

pub use aggregate::{aggregate_var, AssetContribution, PortfolioVaR};
pub use calculator::{Estimate, PortfolioEstimate, VaRCalculator};
pub use var::{
    historical_var, monte_carlo_var, monte_carlo_var_seeded, parametric_var, GbmParameters,
    MonteCarloOutcome,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::aggregate::*;
    pub use crate::calculator::*;
    pub use crate::var::*;
}
