//! `hs-sim` — the simulation session for the `hallsim` framework.
//!
//! # Tick loop
//!
//! ```text
//! every tick:
//!   ⓪ Control   — halt requested, paused, or all work done?  stop / skip.
//!   ① Clock     — elapsed += 0.1 s × speed multiplier; past max_sim_secs → stop.
//!   ② Dispatch  — each idle agent (ascending id) pops the next order; orders
//!                 whose routes are missing are dropped.
//!   ③ Step      — Manipulant::step for every agent from one immutable
//!                 snapshot (parallel with the `parallel` feature).
//!   ④ Commit    — apply steps in ascending id order; feed distance, trips
//!                 and heatmap visits to the collector.
//! ```
//!
//! When the session stops it packages a [`SimResults`] and hands it once to
//! [`SimObserver::on_finish`].
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the step phase and route-table build on Rayon.    |
//! | `fx-hash`  | FxHash for the heatmap map.                            |
//! | `serde`    | `Serialize` on `SimResults` and `TickSummary`.         |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hs_core::RunConfig;
//! use hs_sim::{NoopObserver, SessionBuilder};
//!
//! let mut session = SessionBuilder::new(layout, corridors, orders, RunConfig::default())
//!     .build()?;
//! let results = session.run(&mut NoopObserver)?;
//! println!("{} trips", results.aggregate.trips);
//! ```

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod observer;
pub mod results;
pub mod session;
pub mod stats;


pub use builder::SessionBuilder;
pub use dispatch::{DropReason, DroppedOrder};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use results::{AgentSummary, Aggregate, HeatCell, SimResults, StopReason, TickSummary};
pub use session::{SessionStatus, SimulationSession, TickOutcome};
pub use stats::{Collector, Heatmap};
