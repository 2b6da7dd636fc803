//! `hs-agent` — manipulant state machine and waypoint motion.
//!
//! # Crate layout
//!
//! | Module          | Contents                                               |
//! |-----------------|--------------------------------------------------------|
//! | [`state`]       | `AgentState` (closed enum), `Leg`, `Job`               |
//! | [`motion`]      | `advance_along`, `Advance`                             |
//! | [`manipulant`]  | `Manipulant`, `AgentStats`, `StepParams`, `AgentStep`, `StepEvent` |
//! | [`error`]       | `AgentError`, `AgentResult<T>`                         |
//!
//! # Lifecycle
//!
//! ```text
//! Idle ─assign─▶ MovingToPickup ─arrive─▶ Loading ─dwell─▶ MovingToDropoff
//!   ▲                                                           │ arrive
//!   └──arrive── Returning ◀──dwell── Unloading ◀────────────────┘
//! ```
//!
//! # Two-phase stepping
//!
//! [`Manipulant::step`] is pure: it reads the agent and returns an
//! [`AgentStep`] describing the next state.  [`Manipulant::apply`] commits it.
//! The session computes every step from one snapshot (optionally in parallel)
//! and applies them in ascending id order.

pub mod error;
pub mod manipulant;
pub mod motion;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{AgentError, AgentResult};
pub use manipulant::{AgentStats, AgentStep, Manipulant, StepEvent, StepParams};
pub use motion::{advance_along, Advance};
pub use state::{AgentState, Job, Leg};
