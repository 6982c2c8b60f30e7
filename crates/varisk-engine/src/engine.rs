//! The VaR engine.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::future::try_join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use varisk_core::{
    ConfidenceLevel, InstrumentId, Portfolio, PriceSeries, RiskError, RiskResult, VaRMethod,
    VaRReport,
};
use varisk_risk::{AssetContribution, Estimate, PortfolioEstimate, VaRCalculator};
use varisk_traits::{PathSink, PriceHistorySource, TraitError};

use crate::error::{EngineError, EngineResult};
use crate::window::HistoryWindow;

/// Portfolio VaR with its per-instrument breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioReport {
    /// Aggregated figure.
    pub report: VaRReport,
    /// Weighted stand-alone VaRs, ordered by identifier.
    pub contributions: Vec<AssetContribution>,
}

/// Fetches price history and produces VaR reports.
///
/// Fetches for different instruments are issued concurrently. Estimation
/// runs on the blocking pool so the async runtime stays responsive during
/// large simulations.
pub struct VarEngine {
    source: Arc<dyn PriceHistorySource>,
    sink: Option<Arc<dyn PathSink>>,
    calculator: VaRCalculator,
}

impl VarEngine {
    /// Create an engine over a price source with a default calculator.
    pub fn new(source: Arc<dyn PriceHistorySource>) -> Self {
        Self {
            source,
            sink: None,
            calculator: VaRCalculator::default(),
        }
    }

    /// Set the calculator (estimator settings, simulation size, seed).
    #[must_use]
    pub fn with_calculator(mut self, calculator: VaRCalculator) -> Self {
        self.calculator = calculator;
        self
    }

    /// Send Monte Carlo paths to `sink`.
    ///
    /// A failed render is logged at warn level and does not fail the estimate.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn PathSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// The configured calculator.
    pub fn calculator(&self) -> &VaRCalculator {
        &self.calculator
    }

    /// Fetch the history of one instrument.
    ///
    /// Provider failures become `RiskError::DataUnavailable`.
    pub async fn fetch(
        &self,
        instrument_id: &InstrumentId,
        window: HistoryWindow,
    ) -> RiskResult<PriceSeries> {
        let series = self
            .source
            .get_history(instrument_id, window.start(), window.end())
            .await
            .map_err(|e| unavailable(instrument_id, e))?;
        debug!(
            instrument = %instrument_id,
            points = series.len(),
            start = %window.start(),
            end = %window.end(),
            "fetched price history"
        );
        Ok(series)
    }

    /// Fetch histories for several instruments concurrently.
    ///
    /// Fails with the first provider error.
    pub async fn fetch_all<'a, I>(
        &self,
        instruments: I,
        window: HistoryWindow,
    ) -> RiskResult<BTreeMap<InstrumentId, PriceSeries>>
    where
        I: IntoIterator<Item = &'a InstrumentId>,
    {
        let fetches = instruments.into_iter().map(|id| async move {
            self.fetch(id, window).await.map(|series| (id.clone(), series))
        });
        Ok(try_join_all(fetches).await?.into_iter().collect())
    }

    fn calculator_for(&self, method: VaRMethod) -> VaRCalculator {
        if self.sink.is_some() && method.is_simulated() {
            let config = self.calculator.config().with_capture_paths(true);
            self.calculator.with_config(config)
        } else {
            self.calculator
        }
    }

    fn report(
        &self,
        instruments: Vec<String>,
        method: VaRMethod,
        confidence: ConfidenceLevel,
        var: f64,
    ) -> VaRReport {
        let simulated = method.is_simulated();
        let simulation = self.calculator.simulation();
        VaRReport {
            instruments,
            method,
            confidence_level: confidence.value(),
            horizon_days: simulated.then(|| simulation.horizon_days()),
            trials: simulated.then(|| simulation.trials()),
            var,
        }
    }

    /// Render failures are logged; the estimate stands regardless.
    fn forward_paths(&self, instrument_id: &InstrumentId, estimate: &Estimate) {
        if let (Some(sink), Some(paths)) = (self.sink.as_ref(), estimate.paths.as_ref()) {
            if let Err(e) = sink.render(instrument_id, paths) {
                warn!(instrument = %instrument_id, error = %e, "path output failed");
            }
        }
    }

    /// VaR of a single instrument.
    pub async fn estimate(
        &self,
        instrument_id: &InstrumentId,
        method: VaRMethod,
        window: HistoryWindow,
        confidence: ConfidenceLevel,
    ) -> EngineResult<VaRReport> {
        let prices = self.fetch(instrument_id, window).await?;
        let calculator = self.calculator_for(method);

        let estimate = tokio::task::spawn_blocking(move || {
            calculator.estimate(method, &prices, confidence)
        })
        .await
        .map_err(|e| EngineError::Internal(e.to_string()))??;

        self.forward_paths(instrument_id, &estimate);

        let report = self.report(
            vec![instrument_id.to_string()],
            method,
            confidence,
            estimate.var,
        );
        info!(instrument = %instrument_id, %method, var = report.var, "VaR estimated");
        Ok(report)
    }

    /// VaR of a weighted portfolio.
    ///
    /// Every member is estimated stand-alone with `method`; the portfolio
    /// figure is the weighted sum.
    pub async fn portfolio(
        &self,
        portfolio: &Portfolio,
        method: VaRMethod,
        window: HistoryWindow,
        confidence: ConfidenceLevel,
    ) -> EngineResult<PortfolioReport> {
        let histories = self.fetch_all(portfolio.instruments(), window).await?;
        let calculator = self.calculator_for(method);
        let owned = portfolio.clone();

        let PortfolioEstimate {
            portfolio: aggregated,
            estimates,
        } = tokio::task::spawn_blocking(move || {
            calculator.portfolio(method, &owned, &histories, confidence)
        })
        .await
        .map_err(|e| EngineError::Internal(e.to_string()))??;

        for (id, estimate) in &estimates {
            self.forward_paths(id, estimate);
        }

        if (portfolio.total_weight() - 1.0).abs() > 1e-9 {
            debug!(
                total_weight = portfolio.total_weight(),
                "portfolio weights do not sum to 1"
            );
        }

        let report = self.report(
            portfolio.instruments().map(ToString::to_string).collect(),
            method,
            confidence,
            aggregated.var,
        );
        info!(instruments = portfolio.len(), %method, var = report.var, "portfolio VaR estimated");

        Ok(PortfolioReport {
            report,
            contributions: aggregated.contributions,
        })
    }
}

fn unavailable(instrument_id: &InstrumentId, err: TraitError) -> RiskError {
    RiskError::data_unavailable(instrument_id.as_str(), err.to_string())
}
