//! Simulation path sinks.
//!
//! Monte Carlo estimators return their paths as data. A [`PathSink`] is
//! where the caller sends them: a file, a chart, or nowhere.

use crate::error::TraitError;
use varisk_core::{InstrumentId, PathMatrix};

/// Consumer of simulated price paths.
pub trait PathSink: Send + Sync {
    /// Renders the paths simulated for one instrument.
    fn render(&self, instrument_id: &InstrumentId, paths: &PathMatrix) -> Result<(), TraitError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<(String, usize)>>);

    impl PathSink for Recording {
        fn render(&self, instrument_id: &InstrumentId, paths: &PathMatrix) -> Result<(), TraitError> {
            self.0
                .lock()
                .map_err(|e| TraitError::Internal(e.to_string()))?
                .push((instrument_id.to_string(), paths.trials()));
            Ok(())
        }
    }

    #[test]
    fn test_render_through_trait_object() {
        let sink = Recording::default();
        let paths = PathMatrix::new(vec![vec![1.0, 1.1], vec![1.0, 0.9]]);
        let dyn_sink: &dyn PathSink = &sink;
        dyn_sink.render(&"SPY".into(), &paths).unwrap();
        assert_eq!(sink.0.lock().unwrap()[0], ("SPY".to_string(), 2));
    }
}
