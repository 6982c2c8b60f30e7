//! Price history windows.

use chrono::{Months, NaiveDate};
use serde::Serialize;
use varisk_core::{RiskError, RiskResult};

/// Inclusive date range of price history to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl HistoryWindow {
    /// Creates a window.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::Configuration` if `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> RiskResult<Self> {
        if start > end {
            return Err(RiskError::configuration(format!(
                "start date {start} is after end date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// The year of history ending at `end`.
    pub fn trailing_year(end: NaiveDate) -> Self {
        let start = end.checked_sub_months(Months::new(12)).unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    /// First date, inclusive.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date, inclusive.
    pub fn end(&self) -> NaiveDate {
        self.end
    }
}
