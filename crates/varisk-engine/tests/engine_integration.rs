//! End-to-end engine tests over in-memory and file sources.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use varisk_core::prelude::*;
use varisk_engine::{EngineError, HistoryWindow, VarEngine};
use varisk_ext_file::{CsvPathSink, InMemoryPriceSource};
use varisk_risk::VaRCalculator;
use varisk_traits::{PathSink, TraitError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Closes on consecutive synthetic dates from 2000-01-01.
fn window() -> HistoryWindow {
    HistoryWindow::new(date(2000, 1, 1), date(2000, 12, 31)).unwrap()
}

fn conf(c: f64) -> ConfidenceLevel {
    ConfidenceLevel::new(c).unwrap()
}

fn source() -> Arc<InMemoryPriceSource> {
    Arc::new(
        InMemoryPriceSource::new()
            .with_series(
                "A",
                PriceSeries::from_closes(&[100.0, 98.0, 99.0]).unwrap(),
            )
            .with_series(
                "B",
                PriceSeries::from_closes(&[100.0, 96.0, 97.0]).unwrap(),
            )
            .with_series(
                "EX",
                PriceSeries::from_closes(&[100.0, 102.0, 101.0, 105.0, 103.0]).unwrap(),
            ),
    )
}

#[derive(Default)]
struct Recording(Mutex<Vec<(String, usize, usize)>>);

impl PathSink for Recording {
    fn render(&self, instrument_id: &InstrumentId, paths: &PathMatrix) -> Result<(), TraitError> {
        self.0
            .lock()
            .map_err(|e| TraitError::Internal(e.to_string()))?
            .push((instrument_id.to_string(), paths.trials(), paths.steps()));
        Ok(())
    }
}

struct Rejecting;

impl PathSink for Rejecting {
    fn render(&self, _instrument_id: &InstrumentId, _paths: &PathMatrix) -> Result<(), TraitError> {
        Err(TraitError::IoError("disk full".into()))
    }
}

#[tokio::test]
async fn historical_worked_example() {
    let engine = VarEngine::new(source());
    let report = engine
        .estimate(&"EX".into(), VaRMethod::Historical, window(), conf(0.95))
        .await
        .unwrap();

    assert_eq!(report.var, -0.0190);
    assert_eq!(report.instruments, vec!["EX".to_string()]);
    assert_eq!(report.horizon_days, None);
}

#[tokio::test]
async fn portfolio_aggregates_concurrent_fetches() {
    let engine = VarEngine::new(source());
    let portfolio = Portfolio::parse(&["A=0.5", "B=0.5"]).unwrap();

    let result = engine
        .portfolio(&portfolio, VaRMethod::Historical, window(), conf(0.95))
        .await
        .unwrap();

    assert_eq!(result.report.var, -0.03);
    assert_eq!(result.report.instruments, vec!["A".to_string(), "B".to_string()]);
    assert_eq!(result.contributions.len(), 2);
    assert_eq!(result.contributions[0].var, -0.02);
    assert_eq!(result.contributions[1].var, -0.04);
}

#[tokio::test]
async fn unknown_instrument_is_data_unavailable() {
    let engine = VarEngine::new(source());
    let portfolio = Portfolio::parse(&["A=0.5", "NOPE=0.5"]).unwrap();

    let err = engine
        .portfolio(&portfolio, VaRMethod::Historical, window(), conf(0.95))
        .await
        .unwrap_err();

    match err {
        EngineError::Risk(RiskError::DataUnavailable { instrument, .. }) => {
            assert_eq!(instrument, "NOPE");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_window_is_data_error() {
    let engine = VarEngine::new(source());
    let window = HistoryWindow::new(date(1999, 1, 1), date(1999, 12, 31)).unwrap();
    let err = engine
        .estimate(&"EX".into(), VaRMethod::VarianceCovariance, window, conf(0.95))
        .await
        .unwrap_err();
    assert_eq!(err.risk_kind(), Some(ErrorKind::Data));
}

#[tokio::test]
async fn single_point_window_is_insufficient_data() {
    let engine = VarEngine::new(source());
    let window = HistoryWindow::new(date(2000, 1, 1), date(2000, 1, 1)).unwrap();
    let err = engine
        .estimate(&"EX".into(), VaRMethod::Historical, window, conf(0.95))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Risk(RiskError::InsufficientData { .. })
    ));
}

#[tokio::test]
async fn monte_carlo_paths_reach_sink() {
    let sink = Arc::new(Recording::default());
    let calculator = VaRCalculator::default()
        .with_simulation(SimulationConfig::new(7, 25).unwrap())
        .with_seed(17);
    let engine = VarEngine::new(source())
        .with_calculator(calculator)
        .with_sink(sink.clone());

    let report = engine
        .estimate(&"EX".into(), VaRMethod::MonteCarlo, window(), conf(0.95))
        .await
        .unwrap();
    assert_eq!(report.horizon_days, Some(7));
    assert_eq!(report.trials, Some(25));

    let rendered = sink.0.lock().unwrap();
    assert_eq!(rendered.as_slice(), &[("EX".to_string(), 25, 8)]);
}

#[tokio::test]
async fn sink_does_not_change_var() {
    let calculator = VaRCalculator::default()
        .with_simulation(SimulationConfig::new(10, 300).unwrap())
        .with_seed(5);
    let plain = VarEngine::new(source()).with_calculator(calculator);
    let with_sink = VarEngine::new(source())
        .with_calculator(calculator)
        .with_sink(Arc::new(Recording::default()));

    let a = plain
        .estimate(&"EX".into(), VaRMethod::MonteCarlo, window(), conf(0.99))
        .await
        .unwrap();
    let b = with_sink
        .estimate(&"EX".into(), VaRMethod::MonteCarlo, window(), conf(0.99))
        .await
        .unwrap();
    assert_eq!(a.var, b.var);
}

#[tokio::test]
async fn portfolio_paths_written_per_instrument() {
    let dir = tempfile::tempdir().unwrap();
    let sink = Arc::new(CsvPathSink::per_instrument(dir.path().join("paths.csv")));
    let calculator = VaRCalculator::default().with_simulation(SimulationConfig::new(3, 4).unwrap());
    let engine = VarEngine::new(source())
        .with_calculator(calculator)
        .with_sink(sink);
    let portfolio = Portfolio::parse(&["A=1", "B=1"]).unwrap();

    engine
        .portfolio(&portfolio, VaRMethod::MonteCarlo, window(), conf(0.9))
        .await
        .unwrap();

    assert!(dir.path().join("paths_A.csv").exists());
    assert!(dir.path().join("paths_B.csv").exists());
}

#[tokio::test]
async fn seeded_engine_runs_are_identical() {
    let calculator = VaRCalculator::default()
        .with_simulation(SimulationConfig::new(30, 1_000).unwrap())
        .with_seed(2024);
    let engine = VarEngine::new(source()).with_calculator(calculator);
    let portfolio = Portfolio::parse(&["A=0.3", "B=0.7"]).unwrap();

    let a = engine
        .portfolio(&portfolio, VaRMethod::MonteCarlo, window(), conf(0.95))
        .await
        .unwrap();
    let b = engine
        .portfolio(&portfolio, VaRMethod::MonteCarlo, window(), conf(0.95))
        .await
        .unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn failing_sink_keeps_the_estimate() {
    let calculator = VaRCalculator::default()
        .with_simulation(SimulationConfig::new(10, 300).unwrap())
        .with_seed(5);
    let plain = VarEngine::new(source()).with_calculator(calculator);
    let rejecting = VarEngine::new(source())
        .with_calculator(calculator)
        .with_sink(Arc::new(Rejecting));

    let expected = plain
        .estimate(&"EX".into(), VaRMethod::MonteCarlo, window(), conf(0.95))
        .await
        .unwrap();
    let report = rejecting
        .estimate(&"EX".into(), VaRMethod::MonteCarlo, window(), conf(0.95))
        .await
        .unwrap();
    assert_eq!(report, expected);
}

#[tokio::test]
async fn unwritable_path_file_keeps_portfolio_var() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("missing").join("paths.csv");
    let calculator = VaRCalculator::default().with_simulation(SimulationConfig::new(3, 4).unwrap());
    let engine = VarEngine::new(source())
        .with_calculator(calculator)
        .with_sink(Arc::new(CsvPathSink::per_instrument(&target)));
    let portfolio = Portfolio::parse(&["A=0.5", "B=0.5"]).unwrap();

    let result = engine
        .portfolio(&portfolio, VaRMethod::MonteCarlo, window(), conf(0.9))
        .await
        .unwrap();
    assert_eq!(result.contributions.len(), 2);
    assert!(result.report.var.is_finite());
    assert!(!dir.path().join("missing").exists());
}
