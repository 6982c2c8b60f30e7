//! Integrated VaR calculator.
//!
//! [`VaRCalculator`] turns a price history into a VaR figure for any
//! [`VaRMethod`], and a set of histories into a portfolio VaR.
//!
//! # Example
//!
//! ```rust
//! use varisk_core::prelude::*;
//! use varisk_risk::calculator::VaRCalculator;
//!
//! let prices = PriceSeries::from_closes(&[100.0, 102.0, 101.0, 105.0, 103.0])?;
//! let conf = ConfidenceLevel::new(0.95)?;
//!
//! let calc = VaRCalculator::new(EstimatorConfig::default()).with_seed(42);
//! let estimate = calc.estimate(VaRMethod::Historical, &prices, conf)?;
//! assert_eq!(estimate.var, -0.0190);
//! # Ok::<(), RiskError>(())
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use varisk_core::returns::simple_returns;
use varisk_core::{
    ConfidenceLevel, EstimatorConfig, InstrumentId, PathMatrix, Portfolio, PriceSeries,
    RiskError, RiskResult, SimulationConfig, VaRMethod,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::aggregate::{aggregate_var, PortfolioVaR};
use crate::random::derive_seed;
use crate::var::{historical_var, monte_carlo_var_seeded, parametric_var};

/// Default seed for Monte Carlo runs.
pub const DEFAULT_SEED: u64 = 0x5EED_0F_7A12;

/// VaR of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    /// Rounded VaR.
    pub var: f64,
    /// Simulated paths, for Monte Carlo with path capture enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathMatrix>,
}

/// Portfolio VaR together with the stand-alone estimates it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioEstimate {
    /// Aggregated figure and per-instrument contributions.
    pub portfolio: PortfolioVaR,
    /// Stand-alone estimate per instrument.
    pub estimates: BTreeMap<InstrumentId, Estimate>,
}

/// Calculator for VaR figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VaRCalculator {
    config: EstimatorConfig,
    simulation: SimulationConfig,
    seed: u64,
}

impl Default for VaRCalculator {
    fn default() -> Self {
        Self::new(EstimatorConfig::default())
    }
}

impl VaRCalculator {
    /// Creates a calculator with default simulation settings.
    pub fn new(config: EstimatorConfig) -> Self {
        Self {
            config,
            simulation: SimulationConfig::default(),
            seed: DEFAULT_SEED,
        }
    }

    /// Replaces the estimator settings.
    #[must_use]
    pub fn with_config(mut self, config: EstimatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the Monte Carlo horizon and trial count.
    #[must_use]
    pub fn with_simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    /// Sets the Monte Carlo seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Estimator settings.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Monte Carlo horizon and trial count.
    pub fn simulation(&self) -> &SimulationConfig {
        &self.simulation
    }

    /// Monte Carlo seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Estimates the VaR of a single price history.
    ///
    /// # Errors
    ///
    /// Fails with a data error for fewer than two prices, and with a
    /// computation error for prices that do not yield finite returns.
    pub fn estimate(
        &self,
        method: VaRMethod,
        prices: &PriceSeries,
        confidence: ConfidenceLevel,
    ) -> RiskResult<Estimate> {
        self.estimate_seeded(method, prices, confidence, self.seed)
    }

    fn estimate_seeded(
        &self,
        method: VaRMethod,
        prices: &PriceSeries,
        confidence: ConfidenceLevel,
        seed: u64,
    ) -> RiskResult<Estimate> {
        let returns = simple_returns(prices)?;
        match method {
            VaRMethod::Historical => Ok(Estimate {
                var: historical_var(&returns, confidence, &self.config)?,
                paths: None,
            }),
            VaRMethod::VarianceCovariance => Ok(Estimate {
                var: parametric_var(&returns, confidence, &self.config)?,
                paths: None,
            }),
            VaRMethod::MonteCarlo => {
                let last_price = prices.last_close().ok_or(RiskError::InsufficientData {
                    required: 2,
                    actual: 0,
                })?;
                let outcome = monte_carlo_var_seeded(
                    &returns,
                    last_price,
                    confidence,
                    &self.simulation,
                    &self.config,
                    seed,
                )?;
                Ok(Estimate {
                    var: outcome.var,
                    paths: outcome.paths,
                })
            }
        }
    }

    /// Estimates every portfolio member and aggregates the results.
    ///
    /// Each instrument's Monte Carlo run is seeded from the calculator seed
    /// and the instrument's position in the portfolio.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::DataUnavailable` if `histories` lacks a portfolio
    /// instrument, or the first estimator error encountered.
    pub fn portfolio(
        &self,
        method: VaRMethod,
        portfolio: &Portfolio,
        histories: &BTreeMap<InstrumentId, PriceSeries>,
        confidence: ConfidenceLevel,
    ) -> RiskResult<PortfolioEstimate> {
        let jobs = portfolio
            .instruments()
            .enumerate()
            .map(|(i, id)| {
                histories
                    .get(id)
                    .map(|prices| (id, prices, derive_seed(self.seed, i as u64)))
                    .ok_or_else(|| {
                        RiskError::data_unavailable(id.as_str(), "no price history supplied")
                    })
            })
            .collect::<RiskResult<Vec<_>>>()?;

        let run = |(id, prices, seed): (&InstrumentId, &PriceSeries, u64)| {
            self.estimate_seeded(method, prices, confidence, seed)
                .map(|estimate| (id.clone(), estimate))
        };

        #[cfg(feature = "parallel")]
        let estimates = jobs
            .into_par_iter()
            .map(run)
            .collect::<RiskResult<BTreeMap<_, _>>>()?;

        #[cfg(not(feature = "parallel"))]
        let estimates = jobs
            .into_iter()
            .map(run)
            .collect::<RiskResult<BTreeMap<_, _>>>()?;

        let per_asset = estimates
            .iter()
            .map(|(id, estimate)| (id.clone(), estimate.var))
            .collect();

        Ok(PortfolioEstimate {
            portfolio: aggregate_var(portfolio, &per_asset, &self.config)?,
            estimates,
        })
    }
}
