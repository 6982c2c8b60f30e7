//! VaR method selector.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RiskError;

/// VaR calculation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VaRMethod {
    /// Parametric (variance-covariance) under normal returns.
    VarianceCovariance,
    /// Historical simulation from the empirical return distribution.
    Historical,
    /// Monte Carlo simulation of geometric Brownian motion paths.
    MonteCarlo,
}

impl VaRMethod {
    /// All methods, in selector order.
    pub const ALL: [VaRMethod; 3] = [Self::VarianceCovariance, Self::Historical, Self::MonteCarlo];

    /// The selector string for this method.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VarianceCovariance => "variance-covariance",
            Self::Historical => "historical",
            Self::MonteCarlo => "monte-carlo",
        }
    }

    /// Whether the method consumes a simulation horizon and trial count.
    pub fn is_simulated(self) -> bool {
        matches!(self, Self::MonteCarlo)
    }
}

impl fmt::Display for VaRMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VaRMethod {
    type Err = RiskError;

    /// Parses a method selector. Unrecognised names are an error; there is
    /// no fallback method.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| {
                RiskError::configuration(format!(
                    "unknown method '{s}': expected 'variance-covariance', 'historical', or 'monte-carlo'"
                ))
            })
    }
}
