//! Standard normal distribution.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{MathError, MathResult};

/// Standard normal distribution N(0, 1).
///
/// Wraps [`statrs::distribution::Normal`] with a quantile function that
/// validates its argument instead of panicking or returning infinities.
///
/// # Example
///
/// ```rust
/// use varisk_math::distributions::StandardNormal;
///
/// let n = StandardNormal::new();
/// let z = n.inverse_cdf(0.05).unwrap();
/// assert!((z + 1.644_853_6).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StandardNormal {
    inner: Normal,
}

impl Default for StandardNormal {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardNormal {
    /// Creates the standard normal distribution.
    pub fn new() -> Self {
        // Mean 0, std-dev 1 is always a valid parameterisation.
        let inner = match Normal::new(0.0, 1.0) {
            Ok(n) => n,
            Err(_) => unreachable!("N(0, 1) parameters are valid"),
        };
        Self { inner }
    }

    /// Quantile (inverse CDF) at probability `p`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InvalidProbability` unless `0 < p < 1`; the
    /// boundaries map to infinite quantiles.
    pub fn inverse_cdf(&self, p: f64) -> MathResult<f64> {
        if !(p > 0.0 && p < 1.0) {
            return Err(MathError::InvalidProbability { p });
        }
        Ok(self.inner.inverse_cdf(p))
    }

    /// Cumulative distribution function at `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        self.inner.cdf(x)
    }
}
