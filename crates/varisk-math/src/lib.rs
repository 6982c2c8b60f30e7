//! # Varisk Math
//!
//! Statistical utilities for the Varisk value-at-risk library.
//!
//! This crate provides:
//!
//! - **Statistics**: Mean, variance and standard deviation with a selectable
//!   sample (n−1) or population (n) denominator
//! - **Distributions**: Standard normal quantile function
//! - **Quantiles**: Clamped rank index into a sorted sample
//! - **Rounding**: Decimal-exact rounding of reported figures
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Degenerate samples are handled explicitly
//! - **No Panics**: Invalid inputs surface as [`MathError`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod distributions;
pub mod error;
pub mod quantile;
pub mod rounding;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::StandardNormal;
    pub use crate::error::{MathError, MathResult};
    pub use crate::quantile::{empirical_quantile, rank_index};
    pub use crate::rounding::round_to;
    pub use crate::statistics::{mean, std_dev, variance, VarianceKind};
}

pub use error::{MathError, MathResult};
