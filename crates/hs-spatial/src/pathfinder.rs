//! Weighted A* over the cell grid.
//!
//! # Search rules
//!
//! - 8-connectivity.  Neighbours are expanded in the fixed order
//!   S, N, E, W, SE, NE, SW, NW (with +y pointing down the hall).
//! - Moving into a neighbour costs `step × cost(neighbour)`, where `step` is
//!   1 orthogonally and √2 diagonally.
//! - Heuristic: Euclidean distance between cell indices.  Admissible only
//!   when every cell costs ≥ 1; with corridor cells (0.1) the result is
//!   *not* guaranteed optimal, matching the editor's planner.
//! - Ties on `f` go to the entry inserted first, so equal inputs always give
//!   equal paths.
//! - A node's recorded `g` is only replaced by a strictly lower one.
//! - The start cell is expanded whatever its cost, and the goal cell may
//!   always be entered (at floor cost if blocked).  A handover on an
//!   object's top or left edge snaps into a cell overlapping that object;
//!   only its neighbours decide whether it is reachable.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hs_core::{Point, Rect, Segment};

use crate::grid::{Cell, CellCost, FloorPlan, GridBounds, FLOOR_COST};

const NEIGHBOURS: [(i32, i32); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

// ── Path ──────────────────────────────────────────────────────────────────────

/// Result of one search: cells from start to goal and their corner points.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub cells:     Vec<Cell>,
    /// `cells[i].corner()` for each cell, start first.
    pub waypoints: Vec<Point>,
    /// Accumulated `g` of the goal cell.
    pub cost:      f32,
}

impl Path {
    /// Polyline length in floor units.
    pub fn length(&self) -> f32 {
        self.waypoints.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

// ── Open list ─────────────────────────────────────────────────────────────────

struct OpenEntry {
    f:    f32,
    seq:  u64,
    cell: Cell,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for min-heap: smallest f, then earliest insertion, is greatest.
        other.f.total_cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

#[inline]
fn heuristic(a: Cell, b: Cell) -> f32 {
    ((a.x - b.x) as f32).hypot((a.y - b.y) as f32)
}

#[inline]
fn step_len(from: Cell, to: Cell) -> f32 {
    if from.x != to.x && from.y != to.y { std::f32::consts::SQRT_2 } else { 1.0 }
}

/// Cost of moving into `next` while heading for `goal`.
#[inline]
fn entry_cost<C: CellCost + ?Sized>(costs: &C, next: Cell, goal: Cell) -> f32 {
    let cost = costs.cost(next);
    if next == goal && !cost.is_finite() { FLOOR_COST } else { cost }
}

/// Search cost of walking `cells` in order, accounted exactly as [`astar`]
/// accounts it: every cell after the first is entered, the last one at
/// floor cost if blocked.
pub fn path_cost<C: CellCost + ?Sized>(costs: &C, cells: &[Cell]) -> f32 {
    let Some(&goal) = cells.last() else { return 0.0 };
    cells
        .windows(2)
        .fold(0.0, |g, w| g + step_len(w[0], w[1]) * entry_cost(costs, w[1], goal))
}

// ── Search ────────────────────────────────────────────────────────────────────

/// Find a path between the cells containing `start` and `goal`.
///
/// Returns `None` when either endpoint is outside the grid or the open set
/// runs dry before the goal cell is reached.
pub fn astar<C: CellCost + ?Sized>(costs: &C, start: Point, goal: Point) -> Option<Path> {
    let bounds = costs.bounds();
    let start_cell = Cell::containing(start);
    let goal_cell = Cell::containing(goal);

    if !bounds.contains(start_cell) || !bounds.contains(goal_cell) {
        return None;
    }

    let n = bounds.cell_count();
    let mut g_score = vec![f32::INFINITY; n];
    let mut came_from: Vec<Option<Cell>> = vec![None; n];
    let mut closed = vec![false; n];
    let mut open = BinaryHeap::new();
    let mut seq = 0_u64;

    g_score[bounds.index(start_cell)] = 0.0;
    open.push(OpenEntry { f: heuristic(start_cell, goal_cell), seq, cell: start_cell });

    while let Some(OpenEntry { cell, .. }) = open.pop() {
        let ci = bounds.index(cell);
        if closed[ci] {
            continue;
        }
        if cell == goal_cell {
            return Some(reconstruct(&came_from, bounds, goal_cell, g_score[ci]));
        }
        closed[ci] = true;

        for (dx, dy) in NEIGHBOURS {
            let next = cell.offset(dx, dy);
            if !bounds.contains(next) {
                continue;
            }
            let ni = bounds.index(next);
            if closed[ni] {
                continue;
            }
            let cost = entry_cost(costs, next, goal_cell);
            if !cost.is_finite() {
                continue;
            }
            let tentative = g_score[ci] + step_len(cell, next) * cost;
            if tentative < g_score[ni] {
                g_score[ni] = tentative;
                came_from[ni] = Some(cell);
                seq += 1;
                open.push(OpenEntry { f: tentative + heuristic(next, goal_cell), seq, cell: next });
            }
        }
    }

    None
}

fn reconstruct(
    came_from: &[Option<Cell>],
    bounds: GridBounds,
    goal: Cell,
    cost: f32,
) -> Path {
    let mut cells = vec![goal];
    let mut cur = goal;
    while let Some(prev) = came_from[bounds.index(cur)] {
        cells.push(prev);
        cur = prev;
    }
    cells.reverse();
    let waypoints = cells.iter().map(|c| c.corner()).collect();
    Path { cells, waypoints, cost }
}

/// One-shot search over raw obstacles and corridors.
///
/// Builds a [`FloorPlan`] for the call; prefer [`astar`] with a shared
/// [`CostGrid`](crate::CostGrid) when running many searches on one layout.
pub fn find_path(
    start:     Point,
    goal:      Point,
    bounds_w:  f32,
    bounds_h:  f32,
    corridors: &[Segment],
    obstacles: &[Rect],
) -> Option<Path> {
    let plan = FloorPlan::new(bounds_w, bounds_h, obstacles, corridors);
    astar(&plan, start, goal)
}
