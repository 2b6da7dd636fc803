//! Precomputed routes between facility objects.
//!
//! The table is built once per session, before the first tick, from a
//! memoized [`CostGrid`].  One search runs per unordered pair of distinct
//! objects; the opposite direction is the same polyline reversed, so the two
//! directions always have identical length.  Each direction carries its own
//! search cost, since a path pays for the cells it enters.
//!
//! A pair whose search fails is simply absent.  That is not an error: orders
//! needing the pair are dropped at dispatch time.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};

use hs_core::{ObjectId, Point, Segment};

use crate::grid::{CellCost, CostGrid, FloorPlan, CORRIDOR_RADIUS};
use crate::layout::{Corridor, FacilityObject, Layout};
use crate::pathfinder::{astar, path_cost};
use crate::SpatialResult;

// ── Route ─────────────────────────────────────────────────────────────────────

/// Polyline an agent walks from one object's handover point to another's.
///
/// The first and last waypoints are the exact handover coordinates; the ones
/// in between are grid-cell corners.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub from:      ObjectId,
    pub to:        ObjectId,
    pub waypoints: Vec<Point>,
    /// Search cost (corridor-weighted), not distance.
    pub cost:      f32,
    /// Polyline length in floor units.
    pub length:    f32,
}

impl Route {
    fn new(from: ObjectId, to: ObjectId, waypoints: Vec<Point>, cost: f32) -> Self {
        let length = polyline_length(&waypoints);
        Self { from, to, waypoints, cost, length }
    }

    /// Zero-length route for an object to itself.
    pub fn stationary(id: ObjectId, at: Point) -> Self {
        Self { from: id, to: id, waypoints: vec![at], cost: 0.0, length: 0.0 }
    }

    /// The same polyline walked the other way.  `cost` is that direction's
    /// own search cost: a path pays for the cells it enters, so the two
    /// directions differ when only one end lies on a corridor.
    fn reversed(&self, cost: f32) -> Route {
        let mut waypoints = self.waypoints.clone();
        waypoints.reverse();
        Route { from: self.to, to: self.from, waypoints, cost, length: self.length }
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.waypoints.first().copied()
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.waypoints.last().copied()
    }

    /// Fraction of waypoints lying within the corridor radius of any
    /// corridor.  The editor highlights routes where this is high.
    pub fn corridor_share(&self, corridors: &[Segment]) -> f32 {
        if self.waypoints.is_empty() {
            return 0.0;
        }
        let near = self
            .waypoints
            .iter()
            .filter(|p| corridors.iter().any(|c| c.distance_to(**p) < CORRIDOR_RADIUS))
            .count();
        near as f32 / self.waypoints.len() as f32
    }
}

fn polyline_length(points: &[Point]) -> f32 {
    points.windows(2).map(|w| w[0].distance(w[1])).sum()
}

// ── RouteTable ────────────────────────────────────────────────────────────────

/// Routes keyed by `(from, to)` object ids.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes:      HashMap<(ObjectId, ObjectId), Arc<Route>>,
    handovers:   HashMap<ObjectId, Point>,
    unreachable: Vec<(ObjectId, ObjectId)>,
}

impl RouteTable {
    /// Validate `layout` and search every object pair through `corridors`.
    pub fn build(layout: &Layout, corridors: &[Corridor]) -> SpatialResult<Self> {
        layout.validate()?;
        let plan = FloorPlan::new(layout.width, layout.height, &layout.obstacles(), corridors);
        let grid = CostGrid::build(&plan);
        debug!(
            "cost grid {}x{}: {} blocked cells, {} corridors",
            grid.bounds().cols,
            grid.bounds().rows,
            grid.blocked_count(),
            corridors.len(),
        );
        Ok(Self::build_with(layout, &grid))
    }

    /// Build from an arbitrary cost source.  `layout` is assumed valid.
    pub fn build_with<C: CellCost + ?Sized>(layout: &Layout, costs: &C) -> Self {
        let objects: Vec<&FacilityObject> = layout.objects().collect();
        let pairs: Vec<(usize, usize)> = (0..objects.len())
            .flat_map(|i| (i + 1..objects.len()).map(move |j| (i, j)))
            .collect();

        let search = |&(i, j): &(usize, usize)| {
            let (a, b) = (objects[i], objects[j]);
            (a.id, b.id, search_pair(costs, a, b))
        };

        #[cfg(feature = "parallel")]
        let results: Vec<_> = {
            use rayon::prelude::*;
            pairs.par_iter().map(search).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<_> = pairs.iter().map(search).collect();

        let mut table = RouteTable {
            routes:      HashMap::with_capacity(results.len() * 2),
            handovers:   objects.iter().map(|o| (o.id, o.handover_point())).collect(),
            unreachable: Vec::new(),
        };

        for (a, b, route) in results {
            match route {
                Some((forward, backward)) => {
                    debug!("route {a} -> {b}: {} waypoints, {:.1} units", forward.waypoints.len(), forward.length);
                    table.routes.insert((b, a), Arc::new(backward));
                    table.routes.insert((a, b), Arc::new(forward));
                }
                None => {
                    warn!("no route between {a} and {b}");
                    table.unreachable.push((a, b));
                }
            }
        }

        info!(
            "route table: {} routes over {} objects, {} unreachable pairs",
            table.routes.len() / 2,
            objects.len(),
            table.unreachable.len(),
        );
        table
    }

    /// Route from `from` to `to`, or `None` if the pair is unreachable or an
    /// id is unknown.  An object to itself yields a stationary route.
    pub fn get(&self, from: ObjectId, to: ObjectId) -> Option<Arc<Route>> {
        if from == to {
            return self.handovers.get(&from).map(|&p| Arc::new(Route::stationary(from, p)));
        }
        self.routes.get(&(from, to)).cloned()
    }

    pub fn contains(&self, from: ObjectId, to: ObjectId) -> bool {
        (from == to && self.handovers.contains_key(&from)) || self.routes.contains_key(&(from, to))
    }

    /// Handover point of an object known to the table.
    pub fn handover(&self, id: ObjectId) -> Option<Point> {
        self.handovers.get(&id).copied()
    }

    /// Number of directed routes stored (two per reachable pair).
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Pairs for which no path exists, in layout order.
    pub fn unreachable(&self) -> &[(ObjectId, ObjectId)] {
        &self.unreachable
    }

    pub fn routes(&self) -> impl Iterator<Item = &Arc<Route>> + '_ {
        self.routes.values()
    }
}

/// Search `a` → `b`, pin the ends to the exact handover points, and return
/// the route in both directions.
fn search_pair<C: CellCost + ?Sized>(
    costs: &C,
    a:     &FacilityObject,
    b:     &FacilityObject,
) -> Option<(Route, Route)> {
    let (start, goal) = (a.handover_point(), b.handover_point());
    let path = astar(costs, start, goal)?;
    let mut back_cells = path.cells.clone();
    back_cells.reverse();
    let back_cost = path_cost(costs, &back_cells);

    let mut waypoints = path.waypoints;
    if waypoints.len() == 1 {
        waypoints = if start == goal { vec![start] } else { vec![start, goal] };
    } else {
        waypoints[0] = start;
        if let Some(last) = waypoints.last_mut() {
            *last = goal;
        }
    }
    let forward = Route::new(a.id, b.id, waypoints, path.cost);
    let backward = forward.reversed(back_cost);
    Some((forward, backward))
}
