//! # Varisk Ext File
//!
//! File-based price history and path output for the Varisk library.
//!
//! This crate provides default implementations of the `varisk-traits` seams:
//! - CSV-based price history source (`instrument_id,date,close`)
//! - In-memory price history source for tests and embedding
//! - CSV path sink writing one row per step and one column per trial
//! - A null path sink that discards paths

#![warn(missing_docs)]
#![warn(clippy::all)]

mod path_sink;
mod price_history;

pub use path_sink::*;
pub use price_history::*;
