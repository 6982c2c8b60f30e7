//! Simulated price paths.

use serde::Serialize;

/// Simulated price paths, one row per trial.
///
/// Every path starts at the last observed price (step 0) and has
/// `horizon_days + 1` entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathMatrix {
    paths: Vec<Vec<f64>>,
}

impl PathMatrix {
    /// Wraps per-trial paths.
    pub fn new(paths: Vec<Vec<f64>>) -> Self {
        Self { paths }
    }

    /// Number of paths.
    pub fn trials(&self) -> usize {
        self.paths.len()
    }

    /// Entries per path, including the starting price.
    pub fn steps(&self) -> usize {
        self.paths.first().map_or(0, Vec::len)
    }

    /// The path for one trial.
    pub fn path(&self, trial: usize) -> Option<&[f64]> {
        self.paths.get(trial).map(Vec::as_slice)
    }

    /// Prices of every trial at `step`.
    pub fn at_step(&self, step: usize) -> Vec<f64> {
        self.paths.iter().filter_map(|p| p.get(step).copied()).collect()
    }

    /// Final price of every trial.
    pub fn terminal_values(&self) -> Vec<f64> {
        self.paths.iter().filter_map(|p| p.last().copied()).collect()
    }

    /// Iterates over paths.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.paths.iter().map(Vec::as_slice)
    }
}
