//! Running statistics and the visit heatmap.

use hs_agent::{AgentStep, StepEvent};
use hs_core::OrderId;
use hs_spatial::Cell;

use crate::dispatch::DroppedOrder;
use crate::results::HeatCell;

#[cfg(feature = "fx-hash")]
type CellMap = rustc_hash::FxHashMap<Cell, u32>;

#[cfg(not(feature = "fx-hash"))]
type CellMap = std::collections::HashMap<Cell, u32>;

// ── Heatmap ───────────────────────────────────────────────────────────────────

/// Grid cell → number of agent-ticks spent there.
#[derive(Clone, Debug, Default)]
pub struct Heatmap {
    counts: CellMap,
}

impl Heatmap {
    #[inline]
    pub fn record(&mut self, cell: Cell) {
        *self.counts.entry(cell).or_insert(0) += 1;
    }

    pub fn get(&self, cell: Cell) -> u32 {
        self.counts.get(&cell).copied().unwrap_or(0)
    }

    /// Number of distinct cells visited.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts; equals agents × ticks stepped.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn max(&self) -> u32 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// All visited cells sorted row-major (by `y`, then `x`).
    pub fn to_sorted(&self) -> Vec<HeatCell> {
        let mut cells: Vec<HeatCell> = self
            .counts
            .iter()
            .map(|(c, &count)| HeatCell { x: c.x, y: c.y, count })
            .collect();
        cells.sort_unstable_by_key(|h| (h.y, h.x));
        cells
    }
}

// ── Collector ─────────────────────────────────────────────────────────────────

/// Session-wide running totals, fed once per agent per tick during commit.
#[derive(Clone, Debug, Default)]
pub struct Collector {
    pub trips:     u64,
    /// Floor units walked by all agents.
    pub distance:  f64,
    pub weight_kg: f64,
    pub pallets:   u64,
    pub heatmap:   Heatmap,
    /// Orders delivered, in delivery order.
    pub completed: Vec<OrderId>,
    pub dropped:   Vec<DroppedOrder>,
}

impl Collector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Account for one committed agent step.
    pub fn record_step(&mut self, step: &AgentStep) {
        self.distance += f64::from(step.moved);
        self.heatmap.record(Cell::containing(step.position));
        if let Some(StepEvent::Delivered { order, load_kg, pallets }) = &step.event {
            self.trips += 1;
            self.weight_kg += f64::from(*load_kg);
            self.pallets += u64::from(*pallets);
            self.completed.push(*order);
        }
    }

    pub fn record_dropped(&mut self, dropped: DroppedOrder) {
        self.dropped.push(dropped);
    }

    /// Orders either delivered or dropped.
    #[inline]
    pub fn settled(&self) -> usize {
        self.completed.len() + self.dropped.len()
    }
}
