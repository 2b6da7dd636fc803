//! Static facility description: machines, warehouses, and corridors.
//!
//! Every machine and warehouse is also an obstacle.  Agents never enter an
//! object's footprint; they walk to its handover point, which should sit just
//! outside the rectangle (typically on or beyond one of its edges).

use std::collections::HashSet;

use hs_core::{ObjectId, Point, Rect, Segment};

use crate::{SpatialError, SpatialResult};

/// A preferred walking lane.  Corridors bias the search but never block.
pub type Corridor = Segment;

/// Offset of an object's handover point from the object's origin.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Handover {
    pub dx: f32,
    pub dy: f32,
}

impl Handover {
    #[inline]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }
}

/// What a facility object is.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectKind {
    Machine,
    Warehouse {
        /// Pallet capacity.  Informational; the engine does not enforce it.
        capacity: u32,
    },
}

/// A machine or warehouse placed on the hall floor.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacilityObject {
    pub id:       ObjectId,
    pub name:     String,
    pub kind:     ObjectKind,
    pub rect:     Rect,
    pub handover: Handover,
}

impl FacilityObject {
    pub fn machine(id: ObjectId, name: impl Into<String>, rect: Rect, handover: Handover) -> Self {
        Self { id, name: name.into(), kind: ObjectKind::Machine, rect, handover }
    }

    pub fn warehouse(
        id:       ObjectId,
        name:     impl Into<String>,
        rect:     Rect,
        handover: Handover,
        capacity: u32,
    ) -> Self {
        Self { id, name: name.into(), kind: ObjectKind::Warehouse { capacity }, rect, handover }
    }

    /// Absolute coordinate agents travel to and from for this object.
    #[inline]
    pub fn handover_point(&self) -> Point {
        self.rect.origin().offset(self.handover.dx, self.handover.dy)
    }

    #[inline]
    pub fn is_machine(&self) -> bool {
        matches!(self.kind, ObjectKind::Machine)
    }
}

/// The hall: its bounds plus every machine and warehouse.
#[derive(Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    /// Hall width in floor units; the search grid spans `[0, width)`.
    pub width:      f32,
    /// Hall height in floor units.
    pub height:     f32,
    pub machines:   Vec<FacilityObject>,
    pub warehouses: Vec<FacilityObject>,
}

impl Layout {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, machines: Vec::new(), warehouses: Vec::new() }
    }

    /// Builder-style: add an object to the matching list by its kind.
    pub fn with(mut self, object: FacilityObject) -> Self {
        self.push(object);
        self
    }

    pub fn push(&mut self, object: FacilityObject) {
        match object.kind {
            ObjectKind::Machine => self.machines.push(object),
            ObjectKind::Warehouse { .. } => self.warehouses.push(object),
        }
    }

    /// Machines first, then warehouses, each in insertion order.
    pub fn objects(&self) -> impl Iterator<Item = &FacilityObject> + '_ {
        self.machines.iter().chain(self.warehouses.iter())
    }

    pub fn object_count(&self) -> usize {
        self.machines.len() + self.warehouses.len()
    }

    pub fn object(&self, id: ObjectId) -> Option<&FacilityObject> {
        self.objects().find(|o| o.id == id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.object(id).is_some()
    }

    pub fn handover_point(&self, id: ObjectId) -> SpatialResult<Point> {
        self.object(id)
            .map(FacilityObject::handover_point)
            .ok_or(SpatialError::ObjectNotFound(id))
    }

    /// Footprints of every object; these are the pathfinder's obstacles.
    pub fn obstacles(&self) -> Vec<Rect> {
        self.objects().map(|o| o.rect).collect()
    }

    /// Check ids are unique and the bounds are usable.
    pub fn validate(&self) -> SpatialResult<()> {
        let usable = |v: f32| v.is_finite() && v > 0.0;
        if !usable(self.width) || !usable(self.height) {
            return Err(SpatialError::InvalidBounds { width: self.width, height: self.height });
        }
        let mut seen = HashSet::with_capacity(self.object_count());
        for o in self.objects() {
            if !seen.insert(o.id) {
                return Err(SpatialError::DuplicateObject(o.id));
            }
        }
        Ok(())
    }
}
