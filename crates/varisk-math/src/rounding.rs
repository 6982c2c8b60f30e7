//! Rounding of reported figures.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{MathError, MathResult};

/// 2^52: from here on every `f64` is a whole number.
const INTEGRAL_THRESHOLD: f64 = 4_503_599_627_370_496.0;

/// Rounds `value` to `places` decimal places.
///
/// The exact binary value of the float is carried into a [`Decimal`] before
/// rounding, and ties go to the even neighbour. The rounded decimal is read
/// back through its shortest textual form, so the result is the float nearest
/// to the printed figure and re-rounding it is a no-op.
///
/// Magnitudes of 2^52 and above carry no fractional part and are returned
/// unchanged, which also keeps them clear of the decimal range limit.
///
/// # Errors
///
/// Returns `MathError::NonFinite` for NaN or infinite input.
///
/// # Example
///
/// ```rust
/// use varisk_math::rounding::round_to;
///
/// assert_eq!(round_to(-0.023_456_78, 4).unwrap(), -0.0235);
/// ```
pub fn round_to(value: f64, places: u32) -> MathResult<f64> {
    if !value.is_finite() {
        return Err(MathError::non_finite("rounding"));
    }
    if value.abs() >= INTEGRAL_THRESHOLD {
        return Ok(value);
    }
    let exact = Decimal::from_f64_retain(value)
        .or_else(|| Decimal::from_f64(value))
        .ok_or_else(|| MathError::invalid_input(format!("{value} is outside decimal range")))?;
    exact
        .round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
        .to_string()
        .parse::<f64>()
        .map_err(|e| MathError::invalid_input(e.to_string()))
}
