//! The search grid and its cell costs.
//!
//! # Cost model
//!
//! The floor is divided into square cells of [`CELL_SIZE`] units.  Cell
//! `(cx, cy)` covers `[cx·S, (cx+1)·S) × [cy·S, (cy+1)·S)` and its waypoint is
//! the top-left corner `(cx·S, cy·S)`.
//!
//! | Condition                                                   | Cost  |
//! |-------------------------------------------------------------|-------|
//! | footprint overlaps the interior of any obstacle             | ∞     |
//! | corner lies within [`CORRIDOR_RADIUS`] of a corridor segment| 0.1   |
//! | otherwise                                                   | 1.0   |
//!
//! # Pluggability
//!
//! The pathfinder sees costs only through [`CellCost`].  [`FloorPlan`]
//! answers each query from two R-trees; [`CostGrid`] memoizes every cell
//! once so the many searches of a route-table build become array lookups.

use rstar::{RTree, RTreeObject, AABB};

use hs_core::{Point, Rect, Segment};

/// Edge length of one grid cell in floor units.
pub const CELL_SIZE: f32 = 10.0;

/// Distance from a corridor segment within which a cell counts as corridor.
pub const CORRIDOR_RADIUS: f32 = 20.0;

pub const FLOOR_COST: f32 = 1.0;
pub const CORRIDOR_COST: f32 = 0.1;
pub const BLOCKED: f32 = f32::INFINITY;

// ── Cell ──────────────────────────────────────────────────────────────────────

/// Integer grid coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing `p` (floor division, so negative coordinates map to
    /// negative cells).
    #[inline]
    pub fn containing(p: Point) -> Self {
        Self::new((p.x / CELL_SIZE).floor() as i32, (p.y / CELL_SIZE).floor() as i32)
    }

    /// Top-left corner; the waypoint emitted for this cell.
    #[inline]
    pub fn corner(self) -> Point {
        Point::new(self.x as f32 * CELL_SIZE, self.y as f32 * CELL_SIZE)
    }

    /// `(x0, y0, x1, y1)` of the cell's square footprint.
    #[inline]
    pub fn footprint(self) -> (f32, f32, f32, f32) {
        let c = self.corner();
        (c.x, c.y, c.x + CELL_SIZE, c.y + CELL_SIZE)
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Cell {
        Cell::new(self.x + dx, self.y + dy)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}

// ── GridBounds ────────────────────────────────────────────────────────────────

/// Number of cell columns and rows covering a hall of the given size.
///
/// A cell is in bounds when `0 <= x < width / CELL_SIZE` (likewise for y), so
/// a partial last column still counts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GridBounds {
    pub cols: i32,
    pub rows: i32,
}

impl GridBounds {
    pub fn for_hall(width: f32, height: f32) -> Self {
        let span = |v: f32| if v > 0.0 { (v / CELL_SIZE).ceil() as i32 } else { 0 };
        Self { cols: span(width), rows: span(height) }
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.cols && cell.y < self.rows
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cols.max(0) as usize * self.rows.max(0) as usize
    }

    /// Row-major dense index.  Caller must check [`contains`](Self::contains).
    #[inline]
    pub fn index(&self, cell: Cell) -> usize {
        cell.y as usize * self.cols as usize + cell.x as usize
    }

    #[inline]
    pub fn cell_at(&self, index: usize) -> Cell {
        let cols = self.cols.max(1) as usize;
        Cell::new((index % cols) as i32, (index / cols) as i32)
    }
}

// ── CellCost trait ────────────────────────────────────────────────────────────

/// Source of per-cell traversal costs.
///
/// Implementations must be `Send + Sync` so one cost source can serve every
/// pair of a parallel route-table build.
pub trait CellCost: Send + Sync {
    fn bounds(&self) -> GridBounds;

    /// Multiplier applied to a move *into* `cell`.  [`BLOCKED`] (∞) means
    /// impassable.  Cells outside [`bounds`](Self::bounds) are never queried.
    fn cost(&self, cell: Cell) -> f32;

    #[inline]
    fn passable(&self, cell: Cell) -> bool {
        self.bounds().contains(cell) && self.cost(cell).is_finite()
    }
}

// ── FloorPlan ─────────────────────────────────────────────────────────────────

#[derive(Clone)]
struct ObstacleEntry {
    rect: Rect,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.rect.x, self.rect.y], [self.rect.max_x(), self.rect.max_y()])
    }
}

/// Corridor segment indexed by its bounding box inflated by the radius, so a
/// point query returns every corridor that *might* be close enough.
#[derive(Clone)]
struct CorridorEntry {
    segment: Segment,
}

impl RTreeObject for CorridorEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        let s = &self.segment;
        let r = CORRIDOR_RADIUS;
        AABB::from_corners(
            [s.x1.min(s.x2) - r, s.y1.min(s.y2) - r],
            [s.x1.max(s.x2) + r, s.y1.max(s.y2) + r],
        )
    }
}

/// On-demand cost source over raw obstacles and corridors.
pub struct FloorPlan {
    bounds:    GridBounds,
    obstacles: RTree<ObstacleEntry>,
    corridors: RTree<CorridorEntry>,
}

impl FloorPlan {
    pub fn new(width: f32, height: f32, obstacles: &[Rect], corridors: &[Segment]) -> Self {
        // Degenerate rectangles never block; keep them out of the index.
        let obstacles = obstacles
            .iter()
            .filter(|r| !r.is_degenerate())
            .map(|&rect| ObstacleEntry { rect })
            .collect();
        let corridors = corridors.iter().map(|&segment| CorridorEntry { segment }).collect();
        Self {
            bounds:    GridBounds::for_hall(width, height),
            obstacles: RTree::bulk_load(obstacles),
            corridors: RTree::bulk_load(corridors),
        }
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.size()
    }

    pub fn corridor_count(&self) -> usize {
        self.corridors.size()
    }

    fn blocked(&self, cell: Cell) -> bool {
        let (x0, y0, x1, y1) = cell.footprint();
        // The R-tree query includes touching boxes; `overlaps_box` then
        // discards those that only share an edge with the cell.
        self.obstacles
            .locate_in_envelope_intersecting(&AABB::from_corners([x0, y0], [x1, y1]))
            .any(|e| e.rect.overlaps_box(x0, y0, x1, y1))
    }

    fn near_corridor(&self, p: Point) -> bool {
        self.corridors
            .locate_in_envelope_intersecting(&AABB::from_point([p.x, p.y]))
            .any(|e| e.segment.distance_to(p) < CORRIDOR_RADIUS)
    }
}

impl CellCost for FloorPlan {
    fn bounds(&self) -> GridBounds {
        self.bounds
    }

    fn cost(&self, cell: Cell) -> f32 {
        if self.blocked(cell) {
            BLOCKED
        } else if self.near_corridor(cell.corner()) {
            CORRIDOR_COST
        } else {
            FLOOR_COST
        }
    }
}

// ── CostGrid ──────────────────────────────────────────────────────────────────

/// Dense row-major memo of another cost source.
#[derive(Clone, Debug)]
pub struct CostGrid {
    bounds: GridBounds,
    costs:  Vec<f32>,
}

impl CostGrid {
    /// Evaluate every in-bounds cell of `source` once.
    pub fn build<C: CellCost + ?Sized>(source: &C) -> Self {
        let bounds = source.bounds();
        let n = bounds.cell_count();

        #[cfg(feature = "parallel")]
        let costs: Vec<f32> = {
            use rayon::prelude::*;
            (0..n).into_par_iter().map(|i| source.cost(bounds.cell_at(i))).collect()
        };

        #[cfg(not(feature = "parallel"))]
        let costs: Vec<f32> = (0..n).map(|i| source.cost(bounds.cell_at(i))).collect();

        Self { bounds, costs }
    }

    /// Number of blocked cells; handy for diagnostics.
    pub fn blocked_count(&self) -> usize {
        self.costs.iter().filter(|c| c.is_infinite()).count()
    }
}

impl CellCost for CostGrid {
    fn bounds(&self) -> GridBounds {
        self.bounds
    }

    #[inline]
    fn cost(&self, cell: Cell) -> f32 {
        if self.bounds.contains(cell) {
            self.costs[self.bounds.index(cell)]
        } else {
            BLOCKED
        }
    }
}
