//! Plain data row types written by output backends.

use hs_sim::{SimResults, TickSummary};

/// Final totals for one manipulant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentResultRow {
    pub agent_id:   u32,
    pub trips:      u32,
    pub distance_m: f64,
    pub weight_kg:  f64,
    pub pallets:    u32,
}

impl AgentResultRow {
    /// One row per agent, in id order.
    pub fn from_results(results: &SimResults) -> Vec<Self> {
        results
            .agents
            .iter()
            .map(|a| Self {
                agent_id:   a.id.0,
                trips:      a.trips,
                distance_m: results.to_metres(f64::from(a.distance)),
                weight_kg:  f64::from(a.weight_kg),
                pallets:    a.pallets,
            })
            .collect()
    }
}

/// Visit count of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapRow {
    pub x:     i32,
    pub y:     i32,
    pub count: u32,
}

impl HeatmapRow {
    pub fn from_results(results: &SimResults) -> Vec<Self> {
        results.heatmap.iter().map(|h| Self { x: h.x, y: h.y, count: h.count }).collect()
    }
}

/// Progress after one committed tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    pub elapsed_secs: f64,
    pub busy_agents:  u32,
    pub queued:       u32,
    pub completed:    u32,
    pub dropped:      u32,
    pub distance_m:   f64,
}

impl TickSummaryRow {
    pub fn from_summary(summary: &TickSummary, units_per_metre: f32) -> Self {
        Self {
            tick:         summary.tick.0,
            elapsed_secs: summary.elapsed_secs,
            busy_agents:  summary.busy_agents as u32,
            queued:       summary.queued as u32,
            completed:    summary.completed as u32,
            dropped:      summary.dropped as u32,
            distance_m:   summary.distance / f64::from(units_per_metre),
        }
    }
}
