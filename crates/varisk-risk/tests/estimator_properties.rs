//! Property and integration tests for the VaR estimators.

use std::collections::BTreeMap;

use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use varisk_core::prelude::*;
use varisk_risk::prelude::*;

fn returns_strategy() -> impl Strategy<Value = Vec<f64>> {
    proptest::collection::vec(-0.2f64..0.2, 1..300)
}

fn conf(c: f64) -> ConfidenceLevel {
    ConfidenceLevel::new(c).unwrap()
}

proptest! {
    #[test]
    fn historical_is_non_increasing_in_confidence(
        values in returns_strategy(),
        a in 0.01f64..0.99,
        b in 0.01f64..0.99,
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let returns = ReturnSeries::from_values(values).unwrap();
        let config = EstimatorConfig::default();
        let v_lo = historical_var(&returns, conf(lo), &config).unwrap();
        let v_hi = historical_var(&returns, conf(hi), &config).unwrap();
        prop_assert!(v_lo >= v_hi);
    }

    #[test]
    fn historical_selects_an_observed_return(values in returns_strategy(), c in 0.01f64..0.99) {
        let returns = ReturnSeries::from_values(values.clone()).unwrap();
        let config = EstimatorConfig::default().with_precision(12);
        let var = historical_var(&returns, conf(c), &config).unwrap();
        prop_assert!(values.iter().any(|v| (v - var).abs() < 1e-12));
    }

    #[test]
    fn parametric_flat_series_is_mean(level in -0.1f64..0.1, n in 1usize..50, c in 0.01f64..0.99) {
        let returns = ReturnSeries::from_values(vec![level; n]).unwrap();
        let config = EstimatorConfig::default();
        let var = parametric_var(&returns, conf(c), &config).unwrap();
        let mu = varisk_math::rounding::round_to(level, 4).unwrap();
        prop_assert_eq!(var, mu);
    }

    #[test]
    fn parametric_median_is_mean(values in returns_strategy()) {
        let returns = ReturnSeries::from_values(values.clone()).unwrap();
        let var = parametric_var(&returns, conf(0.5), &EstimatorConfig::default()).unwrap();
        let mu = values.iter().sum::<f64>() / values.len() as f64;
        prop_assert!((var - mu).abs() <= 5e-5 + 1e-9);
    }

    #[test]
    fn outputs_are_rounded(values in returns_strategy(), c in 0.01f64..0.99) {
        let returns = ReturnSeries::from_values(values).unwrap();
        let config = EstimatorConfig::default();
        for var in [
            historical_var(&returns, conf(c), &config).unwrap(),
            parametric_var(&returns, conf(c), &config).unwrap(),
        ] {
            let scaled = var * 10_000.0;
            prop_assert!((scaled - scaled.round()).abs() < 1e-6);
        }
    }
}

#[test]
fn worked_example_picks_worst_return() {
    let prices = PriceSeries::from_closes(&[100.0, 102.0, 101.0, 105.0, 103.0]).unwrap();
    let returns = simple_returns(&prices).unwrap();
    assert_eq!(returns.len(), 4);

    let worst = returns
        .values()
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let var = historical_var(&returns, conf(0.95), &EstimatorConfig::default()).unwrap();
    assert_abs_diff_eq!(var, worst, epsilon = 5e-5);
    assert_eq!(var, -0.019);
}

#[test]
fn rank_index_clamps_at_upper_boundary() {
    // tail * n lands on n exactly only when rounding pushes 1 - c to 1.0
    let returns = ReturnSeries::from_values(vec![-0.05, 0.0, 0.05]).unwrap();
    let var = historical_var(&returns, conf(f64::MIN_POSITIVE), &EstimatorConfig::default()).unwrap();
    assert_eq!(var, 0.05);
}

#[test]
fn monte_carlo_single_trial_reproducible() {
    let returns = ReturnSeries::from_values(vec![0.01, -0.02, 0.015, -0.005]).unwrap();
    let sim = SimulationConfig::new(30, 1).unwrap();
    let config = EstimatorConfig::default();

    let run = || {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        monte_carlo_var(&returns, 100.0, conf(0.95), &sim, &config, &mut rng)
            .unwrap()
            .var
    };
    assert_eq!(run().to_bits(), run().to_bits());
}

#[test]
fn monte_carlo_seeded_bit_identical() {
    let returns = ReturnSeries::from_values(vec![0.01, -0.02, 0.015, -0.005, 0.003]).unwrap();
    let sim = SimulationConfig::new(15, 2_000).unwrap();
    let config = EstimatorConfig::default().with_capture_paths(true);

    let a = monte_carlo_var_seeded(&returns, 42.0, conf(0.99), &sim, &config, 99).unwrap();
    let b = monte_carlo_var_seeded(&returns, 42.0, conf(0.99), &sim, &config, 99).unwrap();
    assert_eq!(a.var.to_bits(), b.var.to_bits());
    assert_eq!(a.paths, b.paths);
}

#[test]
fn monte_carlo_higher_confidence_larger_loss() {
    let returns = ReturnSeries::from_values(vec![0.01, -0.02, 0.015, -0.005, 0.003]).unwrap();
    let sim = SimulationConfig::new(10, 5_000).unwrap();
    let config = EstimatorConfig::default();

    // Same seed, same simulated sample: a lower rank cannot be larger
    let v90 = monte_carlo_var_seeded(&returns, 10.0, conf(0.90), &sim, &config, 1).unwrap();
    let v99 = monte_carlo_var_seeded(&returns, 10.0, conf(0.99), &sim, &config, 1).unwrap();
    assert!(v99.var <= v90.var);
}

#[test]
fn aggregator_equal_weights_is_exact() {
    let portfolio = Portfolio::parse(&["A=0.5", "B=0.5"]).unwrap();
    let per_asset = BTreeMap::from([
        (InstrumentId::from("A"), -0.02),
        (InstrumentId::from("B"), -0.04),
    ]);
    let result = aggregate_var(&portfolio, &per_asset, &EstimatorConfig::default()).unwrap();
    assert_eq!(result.var, -0.03);
}

#[test]
fn invalid_confidence_is_configuration_error() {
    for c in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
        let err = ConfidenceLevel::new(c).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }
}

#[test]
fn invalid_simulation_is_configuration_error() {
    assert_eq!(
        SimulationConfig::new(0, 100).unwrap_err().kind(),
        ErrorKind::Configuration
    );
    assert_eq!(
        SimulationConfig::new(30, 0).unwrap_err().kind(),
        ErrorKind::Configuration
    );
}
