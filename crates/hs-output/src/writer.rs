//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentResultRow, HeatmapRow, OutputResult, TickSummaryRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are stored by [`ResultsObserver`][crate::ResultsObserver] and
/// retrieved with [`take_error`][crate::ResultsObserver::take_error].
pub trait OutputWriter {
    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write the final per-agent totals.
    fn write_agent_results(&mut self, rows: &[AgentResultRow]) -> OutputResult<()>;

    /// Write the visited-cell counts.
    fn write_heatmap(&mut self, rows: &[HeatmapRow]) -> OutputResult<()>;

    /// Flush and close all underlying handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
