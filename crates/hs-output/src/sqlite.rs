//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `results.db` file in the configured output directory with
//! three tables: `agent_results`, `heatmap`, and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::writer::OutputWriter;
use crate::{AgentResultRow, HeatmapRow, OutputResult, TickSummaryRow};

/// Writes simulation results to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `results.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("results.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS agent_results (
                 agent_id   INTEGER PRIMARY KEY,
                 trips      INTEGER NOT NULL,
                 distance_m REAL    NOT NULL,
                 weight_kg  REAL    NOT NULL,
                 pallets    INTEGER NOT NULL
             );
             CREATE TABLE IF NOT EXISTS heatmap (
                 x     INTEGER NOT NULL,
                 y     INTEGER NOT NULL,
                 count INTEGER NOT NULL,
                 PRIMARY KEY (x, y)
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick         INTEGER PRIMARY KEY,
                 elapsed_secs REAL    NOT NULL,
                 busy_agents  INTEGER NOT NULL,
                 queued       INTEGER NOT NULL,
                 completed    INTEGER NOT NULL,
                 dropped      INTEGER NOT NULL,
                 distance_m   REAL    NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, elapsed_secs, busy_agents, queued, completed, dropped, distance_m) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                row.tick as i64,
                row.elapsed_secs,
                row.busy_agents,
                row.queued,
                row.completed,
                row.dropped,
                row.distance_m,
            ],
        )?;
        Ok(())
    }

    fn write_agent_results(&mut self, rows: &[AgentResultRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO agent_results (agent_id, trips, distance_m, weight_kg, pallets) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.agent_id,
                    row.trips,
                    row.distance_m,
                    row.weight_kg,
                    row.pallets,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_heatmap(&mut self, rows: &[HeatmapRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached("INSERT INTO heatmap (x, y, count) VALUES (?1, ?2, ?3)")?;
            for row in rows {
                stmt.execute(rusqlite::params![row.x, row.y, row.count])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
