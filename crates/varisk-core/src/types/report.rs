//! Reported VaR figures.

use serde::Serialize;
use std::fmt;

use super::VaRMethod;

/// A VaR figure together with the parameters that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VaRReport {
    /// Instrument identifiers covered by the figure.
    pub instruments: Vec<String>,
    /// Estimation method.
    pub method: VaRMethod,
    /// Confidence level (e.g. 0.95).
    pub confidence_level: f64,
    /// Projection horizon, for simulated methods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizon_days: Option<u32>,
    /// Simulated paths, for simulated methods.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trials: Option<u32>,
    /// The VaR return; more negative means a larger loss.
    pub var: f64,
}

impl fmt::Display for VaRReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VaR({:.0}%, {}",
            self.confidence_level * 100.0,
            self.method
        )?;
        if let Some(days) = self.horizon_days {
            write!(f, ", {}d", days)?;
        }
        write!(f, ") [{}]: {:.4}", self.instruments.join(", "), self.var)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let report = VaRReport {
            instruments: vec!["SPY".into()],
            method: VaRMethod::MonteCarlo,
            confidence_level: 0.95,
            horizon_days: Some(30),
            trials: Some(1000),
            var: -0.0812,
        };
        assert_eq!(report.to_string(), "VaR(95%, monte-carlo, 30d) [SPY]: -0.0812");
    }

    #[test]
    fn test_serialize_skips_unused_fields() {
        let report = VaRReport {
            instruments: vec!["SPY".into()],
            method: VaRMethod::Historical,
            confidence_level: 0.99,
            horizon_days: None,
            trials: None,
            var: -0.031,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("horizon_days").is_none());
        assert_eq!(json["method"], "historical");
    }
}
