//! Planar floor geometry.
//!
//! Coordinates are floor units (the layout editor's pixel space; 10 units per
//! metre by default, see [`RunConfig::units_per_metre`][crate::RunConfig]).
//! `f32` is plenty for a single hall and keeps waypoint vectors compact.

use std::fmt;

// ── Point ─────────────────────────────────────────────────────────────────────

/// A position on the hall floor.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in floor units.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// `self` shifted by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    /// Move toward `target` by at most `max_step` units.
    ///
    /// Returns the new position and the distance actually covered, which is
    /// `min(max_step, distance)` so a step never overshoots its target.
    pub fn step_toward(self, target: Point, max_step: f32) -> (Point, f32) {
        let d = self.distance(target);
        if d <= max_step || d == 0.0 {
            return (target, d);
        }
        let t = max_step / d;
        let next = Point::new(
            self.x + (target.x - self.x) * t,
            self.y + (target.y - self.y) * t,
        );
        (next, max_step)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle `{x, y, w, h}` with its origin at the top-left.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[inline]
    pub fn max_x(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn max_y(&self) -> f32 {
        self.y + self.h
    }

    /// A rectangle with no area never blocks anything.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Half-open containment: the left/top edges are inside, right/bottom are not.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.max_x() && p.y >= self.y && p.y < self.max_y()
    }

    /// `true` if the interiors of `self` and the box `[x0, x1) × [y0, y1)`
    /// overlap.  Boxes that only share an edge do not overlap.
    #[inline]
    pub fn overlaps_box(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> bool {
        !self.is_degenerate()
            && x0 < self.max_x()
            && x1 > self.x
            && y0 < self.max_y()
            && y1 > self.y
    }
}

// ── Segment ───────────────────────────────────────────────────────────────────

/// A line segment `{x1, y1, x2, y2}`.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Segment {
    #[inline]
    pub const fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Segment joining two points.
    #[inline]
    pub fn between(a: Point, b: Point) -> Self {
        Self::new(a.x, a.y, b.x, b.y)
    }

    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f32 {
        self.start().distance(self.end())
    }

    /// Shortest distance from `p` to any point on the segment.
    ///
    /// The projection parameter is clamped to `[0, 1]`; a zero-length segment
    /// degrades to point distance.
    pub fn distance_to(&self, p: Point) -> f32 {
        let (vx, vy) = (self.x2 - self.x1, self.y2 - self.y1);
        let l2 = vx * vx + vy * vy;
        if l2 == 0.0 {
            return p.distance(self.start());
        }
        let t = (((p.x - self.x1) * vx + (p.y - self.y1) * vy) / l2).clamp(0.0, 1.0);
        p.distance(Point::new(self.x1 + t * vx, self.y1 + t * vy))
    }
}
