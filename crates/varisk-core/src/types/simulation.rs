//! Monte Carlo simulation size.

use serde::Serialize;

use crate::error::{RiskError, RiskResult};

/// Default projection horizon in days.
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Default number of simulated paths.
pub const DEFAULT_TRIALS: u32 = 1000;

/// Horizon and trial count for a Monte Carlo run. Both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimulationConfig {
    horizon_days: u32,
    trials: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            horizon_days: DEFAULT_HORIZON_DAYS,
            trials: DEFAULT_TRIALS,
        }
    }
}

impl SimulationConfig {
    /// Creates a simulation config.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::Configuration` if either value is zero.
    pub fn new(horizon_days: u32, trials: u32) -> RiskResult<Self> {
        if horizon_days < 1 {
            return Err(RiskError::configuration(
                "horizon must be at least 1 day",
            ));
        }
        if trials < 1 {
            return Err(RiskError::configuration("trials must be at least 1"));
        }
        Ok(Self {
            horizon_days,
            trials,
        })
    }

    /// Number of simulated steps per path.
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Number of simulated paths.
    pub fn trials(&self) -> u32 {
        self.trials
    }
}
