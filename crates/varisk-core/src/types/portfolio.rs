//! Portfolio weights.

use std::collections::BTreeMap;

use serde::Serialize;

use super::InstrumentId;
use crate::error::{RiskError, RiskResult};

/// Snapshot of instrument weights, as fractions of total exposure.
///
/// Weights are caller-supplied and need not sum to 1. Iteration is ordered
/// by instrument identifier.
///
/// # Example
///
/// ```rust
/// use varisk_core::types::Portfolio;
///
/// let p = Portfolio::parse(&["AAPL=0.6", "MSFT=0.4"]).unwrap();
/// assert_eq!(p.len(), 2);
/// assert!((p.total_weight() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Portfolio {
    weights: BTreeMap<InstrumentId, f64>,
}

impl Portfolio {
    /// Creates a portfolio from `(instrument, weight)` pairs.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::Configuration` for an empty portfolio, a
    /// non-finite weight, or an instrument listed twice.
    pub fn new<I, K>(entries: I) -> RiskResult<Self>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<InstrumentId>,
    {
        let mut weights = BTreeMap::new();
        for (id, weight) in entries {
            let id = id.into();
            if !weight.is_finite() {
                return Err(RiskError::configuration(format!(
                    "weight for {id} must be finite, got {weight}"
                )));
            }
            if weights.insert(id.clone(), weight).is_some() {
                return Err(RiskError::configuration(format!(
                    "instrument {id} listed more than once"
                )));
            }
        }
        if weights.is_empty() {
            return Err(RiskError::configuration("portfolio has no instruments"));
        }
        Ok(Self { weights })
    }

    /// Parses `ID=WEIGHT` entries.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> RiskResult<Self> {
        let pairs = entries
            .iter()
            .map(|e| Self::parse_entry(e.as_ref()))
            .collect::<RiskResult<Vec<_>>>()?;
        Self::new(pairs)
    }

    /// Parses a single `ID=WEIGHT` entry.
    pub fn parse_entry(entry: &str) -> RiskResult<(InstrumentId, f64)> {
        let (id, weight) = entry.split_once('=').ok_or_else(|| {
            RiskError::configuration(format!("expected ID=WEIGHT, got '{entry}'"))
        })?;
        let id = id.trim();
        if id.is_empty() {
            return Err(RiskError::configuration(format!(
                "missing instrument in '{entry}'"
            )));
        }
        let weight: f64 = weight.trim().parse().map_err(|_| {
            RiskError::configuration(format!("invalid weight in '{entry}'"))
        })?;
        Ok((InstrumentId::new(id), weight))
    }

    /// Weight of an instrument, if held.
    pub fn weight(&self, id: &InstrumentId) -> Option<f64> {
        self.weights.get(id).copied()
    }

    /// Instruments in identifier order.
    pub fn instruments(&self) -> impl Iterator<Item = &InstrumentId> {
        self.weights.keys()
    }

    /// `(instrument, weight)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&InstrumentId, f64)> {
        self.weights.iter().map(|(id, w)| (id, *w))
    }

    /// Sum of weights.
    pub fn total_weight(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Number of instruments.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always `false`: construction rejects empty portfolios.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}
