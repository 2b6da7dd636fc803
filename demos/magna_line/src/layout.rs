//! The "Magna Line A" production hall.
//!
//! Three presses on the left feed two warehouses on the right along one main
//! aisle.  Coordinates are floor units (10 per metre).

use hs_core::{ObjectId, Rect, Segment};
use hs_spatial::{Corridor, FacilityObject, Handover, Layout};

pub const HALL_WIDTH:  f32 = 1_200.0;
pub const HALL_HEIGHT: f32 = 600.0;

pub const M1: ObjectId = ObjectId(0);
pub const M2: ObjectId = ObjectId(1);
pub const M3: ObjectId = ObjectId(2);
pub const W1: ObjectId = ObjectId(10);
pub const W2: ObjectId = ObjectId(11);

/// Build the hall and its corridors.
pub fn build_layout() -> (Layout, Vec<Corridor>) {
    // Machines hand over 10 units right of their east edge, mid-height.
    let press = |id, name: &str, y| {
        FacilityObject::machine(id, name, Rect::new(200.0, y, 100.0, 80.0), Handover::new(110.0, 40.0))
    };
    // Warehouses take goods 10 units left of their west edge.
    let store = |id, name: &str, y, capacity| {
        FacilityObject::warehouse(
            id,
            name,
            Rect::new(950.0, y, 150.0, 100.0),
            Handover::new(-10.0, 50.0),
            capacity,
        )
    };

    let layout = Layout::new(HALL_WIDTH, HALL_HEIGHT)
        .with(press(M1, "Lis 1", 150.0))
        .with(press(M2, "Lis 2", 300.0))
        .with(press(M3, "Lis 3", 450.0))
        .with(store(W1, "Sklad A", 200.0, 100))
        .with(store(W2, "Sklad B", 400.0, 80));

    let corridors = vec![
        // Main aisle between the presses and the warehouses.
        Segment::new(330.0, 340.0, 920.0, 340.0),
        // Feeder along the warehouse fronts.
        Segment::new(920.0, 250.0, 920.0, 450.0),
    ];

    (layout, corridors)
}
