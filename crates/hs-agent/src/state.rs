//! Per-agent state: the lifecycle enum, route legs, and the active job.

use std::fmt;
use std::sync::Arc;

use hs_core::{ObjectId, OrderId, Point};
use hs_orders::Order;
use hs_spatial::Route;

// ── Leg ───────────────────────────────────────────────────────────────────────

/// One traversal of a route, forward or reversed, with a waypoint cursor.
///
/// `index` always addresses a valid waypoint of `route` (routes are never
/// empty).
#[derive(Clone, Debug, PartialEq)]
pub struct Leg {
    pub route:    Arc<Route>,
    pub reversed: bool,
    pub index:    usize,
}

impl Leg {
    pub fn forward(route: Arc<Route>) -> Self {
        Self { route, reversed: false, index: 0 }
    }

    pub fn backward(route: Arc<Route>) -> Self {
        Self { route, reversed: true, index: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.route.waypoints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.route.waypoints.is_empty()
    }

    /// Waypoint `i` in travel order.
    pub fn waypoint(&self, i: usize) -> Option<Point> {
        let n = self.len();
        if i >= n {
            return None;
        }
        let at = if self.reversed { n - 1 - i } else { i };
        Some(self.route.waypoints[at])
    }

    /// Waypoint currently being walked toward.
    #[inline]
    pub fn target(&self) -> Option<Point> {
        self.waypoint(self.index)
    }

    /// Last waypoint in travel order.
    pub fn destination(&self) -> Option<Point> {
        self.len().checked_sub(1).and_then(|last| self.waypoint(last))
    }

    #[inline]
    pub fn at_final(&self) -> bool {
        self.index + 1 >= self.len()
    }

    pub fn with_index(&self, index: usize) -> Self {
        Self { route: Arc::clone(&self.route), reversed: self.reversed, index }
    }
}

// ── Job ───────────────────────────────────────────────────────────────────────

/// The order an agent is working on, with everything the state machine needs
/// after dispatch.
#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    pub order:    OrderId,
    pub source:   ObjectId,
    pub dest:     ObjectId,
    pub load_kg:  f32,
    pub pallets:  u32,
    /// `source → dest`; walked forward to deliver and backward to return.
    pub delivery: Arc<Route>,
}

impl Job {
    pub fn new(order: &Order, delivery: Arc<Route>) -> Self {
        Self {
            order:   order.id,
            source:  order.source,
            dest:    order.dest,
            load_kg: order.load_kg(),
            pallets: order.pallet_count(),
            delivery,
        }
    }
}

// ── AgentState ────────────────────────────────────────────────────────────────

/// Lifecycle state.  Moving states carry their leg; dwelling states carry the
/// number of ticks already spent.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AgentState {
    #[default]
    Idle,
    MovingToPickup { leg: Leg },
    Loading { elapsed: u32 },
    MovingToDropoff { leg: Leg },
    Unloading { elapsed: u32 },
    Returning { leg: Leg },
}

impl AgentState {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, AgentState::Idle)
    }

    #[inline]
    pub fn is_moving(&self) -> bool {
        self.leg().is_some()
    }

    /// The leg being walked, if any.
    pub fn leg(&self) -> Option<&Leg> {
        match self {
            AgentState::MovingToPickup { leg }
            | AgentState::MovingToDropoff { leg }
            | AgentState::Returning { leg } => Some(leg),
            AgentState::Idle | AgentState::Loading { .. } | AgentState::Unloading { .. } => None,
        }
    }

    /// Goods on board: from the end of loading until the end of unloading.
    #[inline]
    pub fn carrying(&self) -> bool {
        matches!(self, AgentState::MovingToDropoff { .. } | AgentState::Unloading { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgentState::Idle                 => "idle",
            AgentState::MovingToPickup { .. } => "moving_to_pickup",
            AgentState::Loading { .. }        => "loading",
            AgentState::MovingToDropoff { .. } => "moving_to_dropoff",
            AgentState::Unloading { .. }      => "unloading",
            AgentState::Returning { .. }      => "returning",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
