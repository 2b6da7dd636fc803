//! Per-tick summaries and the final results snapshot.

use hs_agent::Manipulant;
use hs_core::{AgentId, OrderId, Tick};

use crate::dispatch::DroppedOrder;

/// Why the session stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum StopReason {
    /// Every order delivered or dropped and every agent back to idle.
    Completed,
    /// Simulated time passed `max_sim_secs`.
    TimeLimit,
    /// `halt()` was called.
    Halted,
}

/// Snapshot emitted after every committed tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TickSummary {
    pub tick:         Tick,
    pub elapsed_secs: f64,
    /// Agents not idle after the commit.
    pub busy_agents:  usize,
    pub queued:       usize,
    pub completed:    usize,
    pub dropped:      usize,
    /// Running total distance in floor units.
    pub distance:     f64,
}

/// Totals for one manipulant.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AgentSummary {
    pub id:        AgentId,
    pub trips:     u32,
    /// Floor units.
    pub distance:  f32,
    pub weight_kg: f32,
    pub pallets:   u32,
}

impl AgentSummary {
    pub fn of(agent: &Manipulant) -> Self {
        Self {
            id:        agent.id,
            trips:     agent.stats.trips,
            distance:  agent.stats.distance,
            weight_kg: agent.stats.weight_kg,
            pallets:   agent.stats.pallets,
        }
    }
}

/// Totals over all manipulants.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Aggregate {
    pub trips:     u64,
    pub distance:  f64,
    pub weight_kg: f64,
    pub pallets:   u64,
}

impl Aggregate {
    /// Sum per-agent totals in id order.
    pub fn sum(agents: &[AgentSummary]) -> Self {
        agents.iter().fold(Self::default(), |acc, a| Aggregate {
            trips:     acc.trips + u64::from(a.trips),
            distance:  acc.distance + f64::from(a.distance),
            weight_kg: acc.weight_kg + f64::from(a.weight_kg),
            pallets:   acc.pallets + u64::from(a.pallets),
        })
    }
}

/// One heatmap cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeatCell {
    pub x:     i32,
    pub y:     i32,
    pub count: u32,
}

/// Everything a finished session reports.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SimResults {
    pub stop_reason:      StopReason,
    pub agents:           Vec<AgentSummary>,
    pub aggregate:        Aggregate,
    /// Visited cells, row-major.
    pub heatmap:          Vec<HeatCell>,
    pub elapsed_secs:     f64,
    pub ticks:            u64,
    pub submitted_orders: usize,
    pub completed_orders: Vec<OrderId>,
    pub dropped_orders:   Vec<DroppedOrder>,
    /// Copied from the run config so writers can export metres.
    pub units_per_metre:  f32,
}

impl SimResults {
    #[inline]
    pub fn to_metres(&self, units: f64) -> f64 {
        units / f64::from(self.units_per_metre)
    }

    /// Visits recorded for cell `(x, y)`.
    pub fn heat_at(&self, x: i32, y: i32) -> u32 {
        self.heatmap
            .binary_search_by_key(&(y, x), |h| (h.y, h.x))
            .map_or(0, |i| self.heatmap[i].count)
    }
}
