//! Simulation path sinks.

use std::path::{Path, PathBuf};

use varisk_core::{InstrumentId, PathMatrix};
use varisk_traits::error::TraitError;
use varisk_traits::sink::PathSink;

// =============================================================================
// CSV PATH SINK
// =============================================================================

/// Writes simulated paths to CSV.
///
/// Layout: a `step` column followed by `trial_1 .. trial_N`, one row per
/// step starting at step 0 (the last observed price). With
/// [`per_instrument`](Self::per_instrument) each instrument goes to its own
/// file, `<stem>_<ID>.<ext>`, next to the configured path.
#[derive(Debug, Clone)]
pub struct CsvPathSink {
    file_path: PathBuf,
    per_instrument: bool,
}

impl CsvPathSink {
    /// Sink writing every render to `file_path`.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            per_instrument: false,
        }
    }

    /// Sink writing one file per instrument, named after `file_path`.
    pub fn per_instrument(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            per_instrument: true,
        }
    }

    /// File that a render for `instrument_id` writes to.
    pub fn target(&self, instrument_id: &InstrumentId) -> PathBuf {
        if !self.per_instrument {
            return self.file_path.clone();
        }
        let stem = self
            .file_path
            .file_stem()
            .map_or_else(|| "paths".into(), |s| s.to_string_lossy());
        let name = match self.file_path.extension() {
            Some(ext) => format!("{stem}_{instrument_id}.{}", ext.to_string_lossy()),
            None => format!("{stem}_{instrument_id}"),
        };
        self.file_path.with_file_name(name)
    }
}

impl PathSink for CsvPathSink {
    fn render(&self, instrument_id: &InstrumentId, paths: &PathMatrix) -> Result<(), TraitError> {
        let target = self.target(instrument_id);
        let mut writer =
            csv::Writer::from_path(&target).map_err(|e| TraitError::IoError(e.to_string()))?;

        let mut header = Vec::with_capacity(paths.trials() + 1);
        header.push("step".to_string());
        header.extend((1..=paths.trials()).map(|t| format!("trial_{t}")));
        writer
            .write_record(&header)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        for step in 0..paths.steps() {
            let mut row = Vec::with_capacity(paths.trials() + 1);
            row.push(step.to_string());
            row.extend(paths.at_step(step).iter().map(f64::to_string));
            writer
                .write_record(&row)
                .map_err(|e| TraitError::IoError(e.to_string()))?;
        }
        writer.flush()?;

        tracing::debug!(
            instrument = %instrument_id,
            path = %target.display(),
            trials = paths.trials(),
            steps = paths.steps(),
            "wrote simulated paths"
        );
        Ok(())
    }
}

// =============================================================================
// NULL PATH SINK
// =============================================================================

/// Discards all paths.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPathSink;

impl PathSink for NullPathSink {
    fn render(&self, _instrument_id: &InstrumentId, _paths: &PathMatrix) -> Result<(), TraitError> {
        Ok(())
    }
}
