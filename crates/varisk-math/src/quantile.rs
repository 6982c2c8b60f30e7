//! Empirical quantiles by rank.

use crate::error::{MathError, MathResult};

/// Index of the `tail` quantile in an ascending sample of `n` observations.
///
/// Computes `floor(tail * n)` and clamps it into `[0, n - 1]`, so a tail
/// probability at or near 1 selects the largest observation rather than
/// running off the end of the sample.
///
/// # Errors
///
/// Returns `MathError::InsufficientData` when `n == 0` and
/// `MathError::InvalidProbability` when `tail` is outside `[0, 1]`.
pub fn rank_index(tail: f64, n: usize) -> MathResult<usize> {
    if n == 0 {
        return Err(MathError::insufficient_data(1, 0));
    }
    if !(0.0..=1.0).contains(&tail) {
        return Err(MathError::InvalidProbability { p: tail });
    }
    let raw = (tail * n as f64).floor();
    Ok((raw as usize).min(n - 1))
}

/// Sorts `values` ascending in place and returns the `tail` quantile by rank.
///
/// # Errors
///
/// Fails on empty or non-finite samples, see [`rank_index`].
pub fn empirical_quantile(values: &mut [f64], tail: f64) -> MathResult<f64> {
    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::non_finite("empirical quantile"));
    }
    let index = rank_index(tail, values.len())?;
    values.sort_by(f64::total_cmp);
    Ok(values[index])
}
