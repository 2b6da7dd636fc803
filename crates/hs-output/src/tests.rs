//! Integration tests for hs-output.

use hs_core::{AgentId, OrderId, Tick};
use hs_sim::{AgentSummary, Aggregate, HeatCell, SimResults, StopReason, TickSummary};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn results() -> SimResults {
    let agents = vec![
        AgentSummary { id: AgentId(0), trips: 2, distance: 1234.0, weight_kg: 600.0, pallets: 60 },
        AgentSummary { id: AgentId(1), trips: 1, distance: 500.0, weight_kg: 300.0, pallets: 30 },
    ];
    SimResults {
        stop_reason:      StopReason::Completed,
        aggregate:        Aggregate::sum(&agents),
        agents,
        heatmap:          vec![
            HeatCell { x: 3, y: 1, count: 4 },
            HeatCell { x: 1, y: 2, count: 9 },
        ],
        elapsed_secs:     12.5,
        ticks:            125,
        submitted_orders: 3,
        completed_orders: vec![OrderId(1), OrderId(2), OrderId(3)],
        dropped_orders:   vec![],
        units_per_metre:  10.0,
    }
}

fn summary(tick: u64) -> TickSummary {
    TickSummary {
        tick:         Tick(tick),
        elapsed_secs: tick as f64 * 0.1,
        busy_agents:  2,
        queued:       1,
        completed:    0,
        dropped:      0,
        distance:     80.0 * tick as f64,
    }
}

// ── Rows ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod row_tests {
    use super::*;
    use crate::row::{AgentResultRow, HeatmapRow, TickSummaryRow};

    #[test]
    fn agent_distance_in_metres() {
        let rows = AgentResultRow::from_results(&results());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].agent_id, 0);
        assert!((rows[0].distance_m - 123.4).abs() < 1e-9);
        assert_eq!(rows[1].weight_kg, 300.0);
    }

    #[test]
    fn heatmap_rows_keep_order() {
        let rows = HeatmapRow::from_results(&results());
        assert_eq!(rows, vec![HeatmapRow { x: 3, y: 1, count: 4 }, HeatmapRow { x: 1, y: 2, count: 9 }]);
    }

    #[test]
    fn tick_summary_converts_units() {
        let row = TickSummaryRow::from_summary(&summary(5), 10.0);
        assert_eq!(row.tick, 5);
        assert_eq!(row.busy_agents, 2);
        assert!((row.distance_m - 40.0).abs() < 1e-9);
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::csv::CsvWriter;
    use crate::row::{AgentResultRow, HeatmapRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir.path().join("agent_results.csv")),
            ["agent_id", "trips", "distance_m", "weight_kg", "pallets"]
        );
        assert_eq!(headers(&dir.path().join("heatmap.csv")), ["x", "y", "count"]);
        assert_eq!(
            headers(&dir.path().join("tick_summaries.csv")),
            ["tick", "elapsed_secs", "busy_agents", "queued", "completed", "dropped", "distance_m"]
        );
    }

    #[test]
    fn csv_agent_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_agent_results(&AgentResultRow::from_results(&results())).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_results.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "2");        // trips
        assert_eq!(&rows[0][2], "123.40");   // metres
        assert_eq!(&rows[1][3], "300.0");    // kg
        assert_eq!(&rows[1][4], "30");       // pallets
    }

    #[test]
    fn csv_heatmap_and_summary_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_heatmap(&HeatmapRow::from_results(&results())).unwrap();
        w.write_tick_summary(&TickSummaryRow::from_summary(&summary(3), 10.0)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("heatmap.csv")).unwrap();
        let heat: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(heat.len(), 2);
        assert_eq!(&heat[1][2], "9");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let ticks: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(ticks.len(), 1);
        assert_eq!(&ticks[0][0], "3");
        assert_eq!(&ticks[0][6], "24.00");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_missing_dir_fails() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("nope")).is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use hs_core::{ObjectId, Point, Rect, RunConfig};
    use hs_orders::Order;
    use hs_sim::{SessionBuilder, SimObserver};
    use hs_spatial::{FacilityObject, Handover, Layout};
    use tempfile::TempDir;

    use super::*;
    use crate::observer::ResultsObserver;
    use crate::row::{AgentResultRow, HeatmapRow, TickSummaryRow};
    use crate::writer::OutputWriter;
    use crate::{CsvWriter, OutputError, OutputResult};

    /// Counts calls; fails every write once `fail` is set.
    #[derive(Default)]
    struct Probe {
        summaries: usize,
        agents:    usize,
        heat:      usize,
        finished:  usize,
        fail:      bool,
    }

    impl Probe {
        fn check(&self) -> OutputResult<()> {
            if self.fail {
                Err(OutputError::Io(std::io::Error::other("disk full")))
            } else {
                Ok(())
            }
        }
    }

    impl OutputWriter for Probe {
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.summaries += 1;
            self.check()
        }
        fn write_agent_results(&mut self, rows: &[AgentResultRow]) -> OutputResult<()> {
            self.agents += rows.len();
            self.check()
        }
        fn write_heatmap(&mut self, rows: &[HeatmapRow]) -> OutputResult<()> {
            self.heat += rows.len();
            self.check()
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            self.check()
        }
    }

    #[test]
    fn summary_every_filters_ticks() {
        let mut obs = ResultsObserver::new(Probe::default(), &RunConfig::default()).summary_every(2);
        for t in 1..=6 {
            obs.on_tick_end(&summary(t));
        }
        obs.on_finish(&results());
        assert!(obs.take_error().is_none());
        let probe = obs.into_writer();
        assert_eq!(probe.summaries, 3);
        assert_eq!(probe.agents, 2);
        assert_eq!(probe.heat, 2);
        assert_eq!(probe.finished, 1);
    }

    #[test]
    fn first_error_kept() {
        let probe = Probe { fail: true, ..Probe::default() };
        let mut obs = ResultsObserver::new(probe, &RunConfig::default());
        obs.on_tick_end(&summary(1));
        obs.on_finish(&results());
        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn integration_csv() {
        let layout = Layout::new(400.0, 300.0)
            .with(FacilityObject::machine(
                ObjectId(0),
                "M",
                Rect::new(40.0, 40.0, 60.0, 60.0),
                Handover::new(70.0, 30.0),
            ))
            .with(FacilityObject::warehouse(
                ObjectId(1),
                "W",
                Rect::new(300.0, 40.0, 60.0, 60.0),
                Handover::new(-10.0, 30.0),
                50,
            ));
        let orders = vec![Order::new(OrderId(1), ObjectId(0), ObjectId(1), "profile", 32)];
        let config = RunConfig { manipulant_count: 1, ..RunConfig::default() };
        assert_eq!(layout.handover_point(ObjectId(0)).unwrap(), Point::new(110.0, 70.0));

        let mut session = SessionBuilder::new(layout, vec![], orders, config.clone()).build().unwrap();
        let dir: TempDir = tempfile::tempdir().unwrap();
        let mut obs = ResultsObserver::new(CsvWriter::new(dir.path()).unwrap(), &config);
        let r = session.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count() as u64, r.ticks);

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_results.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][1], "1");
        assert_eq!(&rows[0][3], "20.0");

        let mut rdr = csv::Reader::from_path(dir.path().join("heatmap.csv")).unwrap();
        assert_eq!(rdr.records().count(), r.heatmap.len());
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::*;
    use crate::row::{AgentResultRow, HeatmapRow, TickSummaryRow};
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("results.db").exists());
    }

    #[test]
    fn sqlite_results_tables() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_agent_results(&AgentResultRow::from_results(&results())).unwrap();
        w.write_heatmap(&HeatmapRow::from_results(&results())).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("results.db")).unwrap();
        let agents: i64 = conn.query_row("SELECT COUNT(*) FROM agent_results", [], |r| r.get(0)).unwrap();
        assert_eq!(agents, 2);
        let dist: f64 = conn
            .query_row("SELECT distance_m FROM agent_results WHERE agent_id = 0", [], |r| r.get(0))
            .unwrap();
        assert!((dist - 123.4).abs() < 1e-9);
        let heat: i64 = conn.query_row("SELECT SUM(count) FROM heatmap", [], |r| r.get(0)).unwrap();
        assert_eq!(heat, 13);
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow::from_summary(&summary(7), 10.0)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("results.db")).unwrap();
        let (tick, busy, dist): (i64, i64, f64) = conn
            .query_row(
                "SELECT tick, busy_agents, distance_m FROM tick_summaries WHERE tick = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(tick, 7);
        assert_eq!(busy, 2);
        assert!((dist - 56.0).abs() < 1e-9);
    }
}
