//! Price history sources.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use serde::Deserialize;

use varisk_core::{InstrumentId, PricePoint, PriceSeries};
use varisk_traits::error::TraitError;
use varisk_traits::price_history::{PriceHistorySource, SourceType};

fn lookup(
    series: Option<PriceSeries>,
    instrument_id: &InstrumentId,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, TraitError> {
    let series = series.ok_or_else(|| TraitError::NotFound(instrument_id.to_string()))?;
    let window = series.range(start, end);
    if window.is_empty() {
        return Err(TraitError::NoData(format!(
            "{instrument_id} has no prices between {start} and {end}"
        )));
    }
    Ok(window)
}

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// CSV record for closing prices.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    instrument_id: String,
    date: NaiveDate,
    close: f64,
}

/// CSV-based price history source.
///
/// The file holds one row per instrument and date with columns
/// `instrument_id,date,close`; rows may appear in any order. The whole file
/// is loaded on construction and on [`reload`](Self::reload).
pub struct CsvPriceSource {
    file_path: PathBuf,
    prices: DashMap<InstrumentId, PriceSeries>,
}

impl CsvPriceSource {
    /// Create a new CSV price source.
    ///
    /// # Errors
    ///
    /// `TraitError::SourceNotAvailable` if the file does not exist, and
    /// `TraitError::ParseError` for malformed rows.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let file_path = file_path.as_ref().to_path_buf();
        if !file_path.exists() {
            return Err(TraitError::SourceNotAvailable(format!(
                "price file {} does not exist",
                file_path.display()
            )));
        }
        let source = Self {
            file_path,
            prices: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Path of the backing file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Reload prices from file.
    ///
    /// The file is parsed completely before any cached series is replaced,
    /// so a failed reload leaves the previous contents in place.
    pub fn reload(&self) -> Result<(), TraitError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        let mut grouped: BTreeMap<InstrumentId, Vec<PricePoint>> = BTreeMap::new();
        for (row, result) in reader.deserialize().enumerate() {
            let record: PriceRecord = result
                .map_err(|e| TraitError::ParseError(format!("row {}: {e}", row + 1)))?;
            grouped
                .entry(InstrumentId::new(record.instrument_id))
                .or_default()
                .push(PricePoint::new(record.date, record.close));
        }

        let mut loaded = Vec::with_capacity(grouped.len());
        for (id, mut points) in grouped {
            points.sort_by_key(|p| p.date);
            let series = PriceSeries::new(points)
                .map_err(|e| TraitError::ParseError(format!("{id}: {e}")))?;
            loaded.push((id, series));
        }

        self.prices.clear();
        for (id, series) in loaded {
            self.prices.insert(id, series);
        }

        tracing::debug!(
            path = %self.file_path.display(),
            instruments = self.prices.len(),
            "loaded price file"
        );
        Ok(())
    }
}

#[async_trait]
impl PriceHistorySource for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn get_history(
        &self,
        instrument_id: &InstrumentId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, TraitError> {
        let series = self.prices.get(instrument_id).map(|s| s.clone());
        lookup(series, instrument_id, start, end)
    }

    async fn instruments(&self) -> Result<Vec<InstrumentId>, TraitError> {
        let mut ids: Vec<_> = self.prices.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }
}

// =============================================================================
// IN-MEMORY PRICE SOURCE
// =============================================================================

/// Price history source backed by series held in memory.
#[derive(Default)]
pub struct InMemoryPriceSource {
    prices: DashMap<InstrumentId, PriceSeries>,
}

impl InMemoryPriceSource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the series for an instrument.
    pub fn insert(&self, instrument_id: impl Into<InstrumentId>, series: PriceSeries) {
        self.prices.insert(instrument_id.into(), series);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with_series(self, instrument_id: impl Into<InstrumentId>, series: PriceSeries) -> Self {
        self.insert(instrument_id, series);
        self
    }

    /// Remove an instrument.
    pub fn remove(&self, instrument_id: &InstrumentId) -> Option<PriceSeries> {
        self.prices.remove(instrument_id).map(|(_, s)| s)
    }
}

#[async_trait]
impl PriceHistorySource for InMemoryPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::InMemory
    }

    async fn get_history(
        &self,
        instrument_id: &InstrumentId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<PriceSeries, TraitError> {
        let series = self.prices.get(instrument_id).map(|s| s.clone());
        lookup(series, instrument_id, start, end)
    }

    async fn instruments(&self) -> Result<Vec<InstrumentId>, TraitError> {
        let mut ids: Vec<_> = self.prices.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }
}
