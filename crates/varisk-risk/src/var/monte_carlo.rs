//! Monte Carlo VaR under geometric Brownian motion.
//!
//! Log returns are assumed i.i.d. normal. Each trial compounds daily
//! shocks from the last observed price:
//!
//! ```text
//! P_t = P_{t-1} · exp(drift + σ·Z_t),   drift = μ - σ²/2
//! ```
//!
//! The VaR is the `1 - c` rank of the simulated horizon returns
//! `(P_h - P_0) / P_0`.

use rand::Rng;
use serde::Serialize;
use varisk_core::returns::to_log_returns;
use varisk_core::{
    ConfidenceLevel, EstimatorConfig, LogReturnSeries, PathMatrix, ReturnSeries, RiskError,
    RiskResult, SimulationConfig, VarianceKind,
};
use varisk_math::distributions::StandardNormal;
use varisk_math::quantile::rank_index;
use varisk_math::rounding::round_to;
use varisk_math::statistics::{mean, std_dev, variance};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::random::{standard_normal, trial_rng};

/// Per-step parameters of the simulated price process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GbmParameters {
    /// Mean log return less half its variance.
    pub drift: f64,
    /// Standard deviation of log returns.
    pub sigma: f64,
}

impl GbmParameters {
    /// Estimates drift and volatility from log returns.
    pub fn estimate(log_returns: &LogReturnSeries, kind: VarianceKind) -> RiskResult<Self> {
        let values = log_returns.values();
        let mu = mean(values)?;
        let var = variance(values, kind)?;
        let sigma = std_dev(values, kind)?;
        Ok(Self {
            drift: mu - 0.5 * var,
            sigma,
        })
    }

    /// Advances a price by one step with standard normal shock `z`.
    #[inline]
    pub fn step(&self, price: f64, z: f64) -> f64 {
        price * (self.drift + self.sigma * z).exp()
    }
}

/// Result of a Monte Carlo run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonteCarloOutcome {
    /// Rounded VaR of the horizon return.
    pub var: f64,
    /// Simulated paths, present when `EstimatorConfig::capture_paths` is set.
    pub paths: Option<PathMatrix>,
}

/// One simulated trial: the horizon return and, optionally, the full path.
struct Trial {
    change: f64,
    path: Option<Vec<f64>>,
}

fn simulate_trial<R: Rng + ?Sized>(
    params: &GbmParameters,
    start: f64,
    steps: u32,
    normal: &StandardNormal,
    capture: bool,
    rng: &mut R,
) -> RiskResult<Trial> {
    let mut path = capture.then(|| {
        let mut p = Vec::with_capacity(steps as usize + 1);
        p.push(start);
        p
    });

    let mut price = start;
    for _ in 0..steps {
        let z = standard_normal(normal, rng)?;
        price = params.step(price, z);
        if let Some(p) = path.as_mut() {
            p.push(price);
        }
    }

    if !price.is_finite() {
        return Err(RiskError::computation(format!(
            "simulated price is not finite (drift {}, sigma {})",
            params.drift, params.sigma
        )));
    }

    Ok(Trial {
        change: (price - start) / start,
        path,
    })
}

fn validate_last_price(last_price: f64) -> RiskResult<()> {
    if last_price.is_finite() && last_price > 0.0 {
        Ok(())
    } else {
        Err(RiskError::computation(format!(
            "last observed price must be positive and finite, got {last_price}"
        )))
    }
}

fn summarize(
    trials: Vec<Trial>,
    params: &GbmParameters,
    confidence: ConfidenceLevel,
    config: &EstimatorConfig,
) -> RiskResult<MonteCarloOutcome> {
    let mut changes = Vec::with_capacity(trials.len());
    let mut paths = config.capture_paths.then(|| Vec::with_capacity(trials.len()));
    for trial in trials {
        changes.push(trial.change);
        if let (Some(all), Some(path)) = (paths.as_mut(), trial.path) {
            all.push(path);
        }
    }

    changes.sort_by(f64::total_cmp);
    let index = rank_index(confidence.tail(), changes.len())?;
    let var_return = changes[index];

    if config.diagnostics {
        tracing::debug!(
            drift = params.drift,
            sigma = params.sigma,
            trials = changes.len(),
            index,
            var_return,
            "Monte Carlo VaR"
        );
    }

    Ok(MonteCarloOutcome {
        var: round_to(var_return, config.precision)?,
        paths: paths.map(PathMatrix::new),
    })
}

fn prepare(
    returns: &ReturnSeries,
    last_price: f64,
    config: &EstimatorConfig,
) -> RiskResult<GbmParameters> {
    config.validate()?;
    validate_last_price(last_price)?;
    let logs = to_log_returns(returns)?;
    let params = GbmParameters::estimate(&logs, config.variance)?;
    if config.diagnostics {
        tracing::debug!(
            observations = logs.len(),
            mu = mean(logs.values())?,
            drift = params.drift,
            sigma = params.sigma,
            "GBM parameters"
        );
    }
    Ok(params)
}

/// Calculate Monte Carlo VaR with a caller-supplied random source.
///
/// Trials run sequentially and draw from `rng` in order, so a seeded
/// generator reproduces the result exactly.
///
/// # Arguments
///
/// * `returns` - Historical simple returns, converted to log returns internally
/// * `last_price` - Last observed price, the start of every path
/// * `confidence` - Confidence level
/// * `simulation` - Horizon in days and number of trials
/// * `config` - Variance form, rounding, diagnostics and path capture
/// * `rng` - Any uniform random source
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use varisk_core::prelude::*;
/// use varisk_risk::monte_carlo_var;
///
/// let prices = PriceSeries::from_closes(&[100.0, 101.0, 99.5, 102.0, 101.2])?;
/// let returns = simple_returns(&prices)?;
/// let conf = ConfidenceLevel::new(0.95)?;
/// let sim = SimulationConfig::new(10, 500)?;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let outcome = monte_carlo_var(&returns, 101.2, conf, &sim, &EstimatorConfig::default(), &mut rng)?;
/// assert!(outcome.var < 0.0);
/// assert!(outcome.paths.is_none());
/// # Ok::<(), RiskError>(())
/// ```
pub fn monte_carlo_var<R: Rng + ?Sized>(
    returns: &ReturnSeries,
    last_price: f64,
    confidence: ConfidenceLevel,
    simulation: &SimulationConfig,
    config: &EstimatorConfig,
    rng: &mut R,
) -> RiskResult<MonteCarloOutcome> {
    let params = prepare(returns, last_price, config)?;
    let normal = StandardNormal::new();
    let steps = simulation.horizon_days();

    let trials = (0..simulation.trials())
        .map(|_| simulate_trial(&params, last_price, steps, &normal, config.capture_paths, rng))
        .collect::<RiskResult<Vec<_>>>()?;

    summarize(trials, &params, confidence, config)
}

/// Calculate Monte Carlo VaR from a seed.
///
/// Trial `i` draws from its own ChaCha8 stream `(seed, i)`. With the
/// `parallel` feature the trials run on the rayon pool; the result is the
/// same as a sequential run with the same seed.
pub fn monte_carlo_var_seeded(
    returns: &ReturnSeries,
    last_price: f64,
    confidence: ConfidenceLevel,
    simulation: &SimulationConfig,
    config: &EstimatorConfig,
    seed: u64,
) -> RiskResult<MonteCarloOutcome> {
    let params = prepare(returns, last_price, config)?;
    let normal = StandardNormal::new();
    let steps = simulation.horizon_days();
    let capture = config.capture_paths;

    let run = |i: usize| {
        let mut rng = trial_rng(seed, i as u64);
        simulate_trial(&params, last_price, steps, &normal, capture, &mut rng)
    };

    let count = simulation.trials() as usize;

    #[cfg(feature = "parallel")]
    let trials = (0..count)
        .into_par_iter()
        .map(run)
        .collect::<RiskResult<Vec<_>>>()?;

    #[cfg(not(feature = "parallel"))]
    let trials = (0..count).map(run).collect::<RiskResult<Vec<_>>>()?;

    summarize(trials, &params, confidence, config)
}
