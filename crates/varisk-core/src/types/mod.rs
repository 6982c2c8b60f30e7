//! Domain types for value-at-risk estimation.
//!
//! All types here are immutable values: they are validated on construction
//! and carry no identity beyond their content.

mod confidence;
mod ids;
mod method;
mod paths;
mod portfolio;
mod price_series;
mod report;
mod returns;
mod simulation;

pub use confidence::ConfidenceLevel;
pub use ids::InstrumentId;
pub use method::VaRMethod;
pub use paths::PathMatrix;
pub use portfolio::Portfolio;
pub use price_series::{PricePoint, PriceSeries};
pub use report::VaRReport;
pub use returns::{LogReturnSeries, ReturnSeries};
pub use simulation::{SimulationConfig, DEFAULT_HORIZON_DAYS, DEFAULT_TRIALS};
