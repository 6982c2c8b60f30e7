//! Price history source traits.
//!
//! A [`PriceHistorySource`] answers one question: the closing prices of an
//! instrument between two dates. Fetching is the only blocking operation in
//! a VaR run, so the trait is async and implementations may overlap
//! requests for different instruments.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TraitError;
use varisk_core::{InstrumentId, PriceSeries};

/// Source type for price data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// File-based (CSV)
    File,
    /// Held in process memory
    InMemory,
    /// Remote service
    Remote,
}

/// Trait for historical price providers.
#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Closing prices of `instrument_id` with dates in `[start, end]`,
    /// oldest first.
    ///
    /// # Errors
    ///
    /// `TraitError::NotFound` for an unknown instrument and
    /// `TraitError::NoData` when the range holds no prices.
    async fn get_history(
        &self,
        instrument_id: &InstrumentId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, TraitError>;

    /// Instruments this source can serve.
    async fn instruments(&self) -> Result<Vec<InstrumentId>, TraitError> {
        Ok(Vec::new())
    }
}
