//! Closing price history.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

/// A single dated closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates a price point.
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Time-ascending closing prices for one instrument.
///
/// Dates are strictly increasing (no duplicates) and every close is finite.
/// Sign of the closes is not checked here; the return transform rejects
/// prices it cannot divide by or take the logarithm of.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a price series from dated points.
    ///
    /// # Errors
    ///
    /// Returns `RiskError::InvalidData` if dates are not strictly ascending
    /// or a close is NaN or infinite.
    pub fn new(points: Vec<PricePoint>) -> RiskResult<Self> {
        if let Some(bad) = points.iter().find(|p| !p.close.is_finite()) {
            return Err(RiskError::invalid_data(format!(
                "non-finite close {} on {}",
                bad.close, bad.date
            )));
        }
        if let Some(pair) = points.windows(2).find(|w| w[1].date <= w[0].date) {
            let reason = if pair[1].date == pair[0].date {
                format!("duplicate date {}", pair[1].date)
            } else {
                format!("date {} follows {}", pair[1].date, pair[0].date)
            };
            return Err(RiskError::invalid_data(reason));
        }
        Ok(Self { points })
    }

    /// Creates a series from bare closes on consecutive synthetic dates
    /// starting 2000-01-01.
    pub fn from_closes(closes: &[f64]) -> RiskResult<Self> {
        let origin = NaiveDate::from_ymd_opt(2000, 1, 1)
            .ok_or_else(|| RiskError::invalid_data("invalid origin date"))?;
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                origin
                    .checked_add_days(Days::new(i as u64))
                    .map(|date| PricePoint::new(date, close))
                    .ok_or_else(|| RiskError::invalid_data("date overflow"))
            })
            .collect::<RiskResult<Vec<_>>>()?;
        Self::new(points)
    }

    /// The dated points, oldest first.
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Closing prices, oldest first.
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Most recent close.
    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// First observation date.
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Last observation date.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The sub-series with dates in `[start, end]`.
    pub fn range(&self, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            points: self
                .points
                .iter()
                .filter(|p| p.date >= start && p.date <= end)
                .copied()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_new_ascending() {
        let series = PriceSeries::new(vec![
            PricePoint::new(d(2024, 1, 2), 100.0),
            PricePoint::new(d(2024, 1, 3), 101.0),
            PricePoint::new(d(2024, 1, 5), 99.5),
        ])
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.last_close(), Some(99.5));
        assert_eq!(series.first_date(), Some(d(2024, 1, 2)));
        assert_eq!(series.last_date(), Some(d(2024, 1, 5)));
    }

    #[test]
    fn test_duplicate_date_rejected() {
        let err = PriceSeries::new(vec![
            PricePoint::new(d(2024, 1, 2), 100.0),
            PricePoint::new(d(2024, 1, 2), 101.0),
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_unordered_rejected() {
        let err = PriceSeries::new(vec![
            PricePoint::new(d(2024, 1, 3), 100.0),
            PricePoint::new(d(2024, 1, 2), 101.0),
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Data);
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(PriceSeries::from_closes(&[100.0, f64::NAN]).is_err());
    }

    #[test]
    fn test_from_closes() {
        let series = PriceSeries::from_closes(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(series.closes(), vec![1.0, 2.0, 3.0]);
        assert_eq!(series.first_date(), Some(d(2000, 1, 1)));
        assert_eq!(series.last_date(), Some(d(2000, 1, 3)));
    }

    #[test]
    fn test_range_inclusive() {
        let series = PriceSeries::from_closes(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        let sub = series.range(d(2000, 1, 2), d(2000, 1, 3));
        assert_eq!(sub.closes(), vec![2.0, 3.0]);
        assert!(series.range(d(2010, 1, 1), d(2011, 1, 1)).is_empty());
    }
}
