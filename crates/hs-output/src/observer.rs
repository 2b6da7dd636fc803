//! `ResultsObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use log::{debug, warn};

use hs_core::RunConfig;
use hs_sim::{SimObserver, SimResults, TickSummary};

use crate::row::{AgentResultRow, HeatmapRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes tick summaries and the final results to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored because `SimObserver` methods return
/// nothing.  After `session.run()` returns, check with
/// [`take_error`][Self::take_error].
pub struct ResultsObserver<W: OutputWriter> {
    writer:          W,
    units_per_metre: f32,
    /// Write a tick summary every `summary_every` ticks; 0 disables them.
    summary_every:   u64,
    last_error:      Option<OutputError>,
}

impl<W: OutputWriter> ResultsObserver<W> {
    /// Create an observer backed by `writer` that records every tick.
    pub fn new(writer: W, config: &RunConfig) -> Self {
        Self {
            writer,
            units_per_metre: config.units_per_metre,
            summary_every:   1,
            last_error:      None,
        }
    }

    /// Only write every `n`-th tick summary (0 = none).
    pub fn summary_every(mut self, n: u64) -> Self {
        self.summary_every = n;
        self
    }

    /// Take the stored write error (if any) after `session.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!("output write failed: {e}");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for ResultsObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        if self.summary_every == 0 || summary.tick.0 % self.summary_every != 0 {
            return;
        }
        let row = TickSummaryRow::from_summary(summary, self.units_per_metre);
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_finish(&mut self, results: &SimResults) {
        let agents = AgentResultRow::from_results(results);
        let heat = HeatmapRow::from_results(results);
        debug!("writing {} agent rows, {} heatmap cells", agents.len(), heat.len());

        let result = self.writer.write_agent_results(&agents);
        self.store_err(result);
        let result = self.writer.write_heatmap(&heat);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
