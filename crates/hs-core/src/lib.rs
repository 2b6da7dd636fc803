//! `hs-core` — foundational types for the `hallsim` intralogistics simulator.
//!
//! This crate is a dependency of every other `hs-*` crate.  It has no `hs-*`
//! dependencies and only `thiserror` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module      | Contents                                                   |
//! |-------------|------------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `ObjectId`, `OrderId`                           |
//! | [`geo`]     | `Point`, `Rect`, `Segment` in floor units                  |
//! | [`time`]    | `Tick`, `SimClock`                                         |
//! | [`config`]  | `RunConfig`, `SpeedMultiplier`                             |
//! | [`error`]   | `HsError`, `HsResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{RunConfig, SpeedMultiplier};
pub use error::{HsError, HsResult};
pub use geo::{Point, Rect, Segment};
pub use ids::{AgentId, ObjectId, OrderId};
pub use time::{SimClock, Tick, TICK_SECS};
