//! Value at Risk (VaR) calculations.
//!
//! VaR estimates the return that is not expected to be undercut over a
//! horizon at a given confidence level. All estimators share the sign
//! convention of the underlying returns: losses are negative.

mod historical;
mod monte_carlo;
mod parametric;

pub use historical::*;
pub use monte_carlo::*;
pub use parametric::*;
