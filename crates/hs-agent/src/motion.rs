//! Straight-line motion along a leg.

use hs_core::Point;

use crate::Leg;

/// Outcome of walking one tick along a leg.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Advance {
    pub position: Point,
    /// Cursor after the walk.
    pub index:    usize,
    /// Distance actually covered this tick.
    pub moved:    f32,
    /// Within `epsilon` of the leg's final waypoint.
    pub arrived:  bool,
}

/// Walk from `from` along `leg`, spending at most `budget` units.
///
/// A waypoint within `epsilon` counts as reached: the cursor moves on
/// without spending budget, or the leg ends if it was the final one.  A step
/// never overshoots its waypoint; budget left after reaching one carries over
/// to the next within the same tick.
pub fn advance_along(leg: &Leg, from: Point, budget: f32, epsilon: f32) -> Advance {
    let mut position = from;
    let mut index = leg.index;
    let mut left = budget.max(0.0);
    let mut moved = 0.0;

    while let Some(target) = leg.waypoint(index) {
        let d = position.distance(target);
        if d <= epsilon {
            if index + 1 >= leg.len() {
                return Advance { position, index, moved, arrived: true };
            }
            index += 1;
            continue;
        }
        if left <= 0.0 {
            break;
        }
        let (next, covered) = position.step_toward(target, left);
        position = next;
        moved += covered;
        left -= covered;
        if covered < d {
            break;
        }
    }

    // An empty leg has nowhere to go; treat it as already walked.
    Advance { position, index, moved, arrived: leg.is_empty() }
}
