//! Session observer trait for progress reporting and data collection.

use hs_core::Tick;

use crate::{DroppedOrder, SimResults, TickSummary};

/// Callbacks invoked by [`SimulationSession::tick`][crate::SimulationSession::tick].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { every: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, summary: &TickSummary) {
///         if summary.tick.0 % self.every == 0 {
///             println!("{}: {} busy", summary.tick, summary.busy_agents);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called after the clock advanced, before dispatch.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every order the dispatcher had to drop.
    fn on_order_dropped(&mut self, _dropped: &DroppedOrder) {}

    /// Called after all agents of the tick are committed.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called exactly once, when the session stops.
    fn on_finish(&mut self, _results: &SimResults) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
