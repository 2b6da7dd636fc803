//! `hs-output` — results writers for the hallsim simulator.
//!
//! Two backends are provided:
//!
//! | Feature   | Backend | Files created                                                |
//! |-----------|---------|--------------------------------------------------------------|
//! | *(none)*  | CSV     | `agent_results.csv`, `heatmap.csv`, `tick_summaries.csv`     |
//! | `sqlite`  | SQLite  | `results.db`                                                 |
//!
//! Both implement [`OutputWriter`] and are driven by [`ResultsObserver`],
//! which implements `hs_sim::SimObserver`.  Distances are written in metres.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hs_output::{CsvWriter, ResultsObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = ResultsObserver::new(writer, &config);
//! session.run(&mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::ResultsObserver;
pub use row::{AgentResultRow, HeatmapRow, TickSummaryRow};
pub use writer::OutputWriter;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteWriter;
