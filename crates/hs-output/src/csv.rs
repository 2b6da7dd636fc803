//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agent_results.csv`
//! - `heatmap.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentResultRow, HeatmapRow, OutputResult, TickSummaryRow};

/// Writes simulation results to three CSV files.
pub struct CsvWriter {
    agents:    Writer<File>,
    heatmap:   Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut agents = Writer::from_path(dir.join("agent_results.csv"))?;
        agents.write_record(["agent_id", "trips", "distance_m", "weight_kg", "pallets"])?;

        let mut heatmap = Writer::from_path(dir.join("heatmap.csv"))?;
        heatmap.write_record(["x", "y", "count"])?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "elapsed_secs",
            "busy_agents",
            "queued",
            "completed",
            "dropped",
            "distance_m",
        ])?;

        Ok(Self { agents, heatmap, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.1}", row.elapsed_secs),
            row.busy_agents.to_string(),
            row.queued.to_string(),
            row.completed.to_string(),
            row.dropped.to_string(),
            format!("{:.2}", row.distance_m),
        ])?;
        Ok(())
    }

    fn write_agent_results(&mut self, rows: &[AgentResultRow]) -> OutputResult<()> {
        for row in rows {
            self.agents.write_record(&[
                row.agent_id.to_string(),
                row.trips.to_string(),
                format!("{:.2}", row.distance_m),
                format!("{:.1}", row.weight_kg),
                row.pallets.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_heatmap(&mut self, rows: &[HeatmapRow]) -> OutputResult<()> {
        for row in rows {
            self.heatmap.write_record(&[row.x.to_string(), row.y.to_string(), row.count.to_string()])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.agents.flush()?;
        self.heatmap.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
