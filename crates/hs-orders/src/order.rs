//! A single transport order.

use hs_core::{ObjectId, OrderId};

use crate::{OrderError, OrderResult};

/// Move `quantity` pieces of `product` from `source` to `dest` in one trip.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    pub id:                OrderId,
    pub source:            ObjectId,
    pub dest:              ObjectId,
    /// Free-form product label (e.g. an ERP material number and name).
    pub product:           String,
    pub quantity:          u32,
    /// Only consulted under `DispatchPolicy::Priority`; higher goes first.
    pub priority:          u8,
    pub pieces_per_pallet: u32,
    pub pallet_weight_kg:  f32,
}

impl Order {
    pub const DEFAULT_PIECES_PER_PALLET: u32 = 16;
    pub const DEFAULT_PALLET_WEIGHT_KG: f32 = 10.0;

    /// Order with default packing (16 pieces, 10 kg per pallet) and priority 0.
    pub fn new(
        id:       OrderId,
        source:   ObjectId,
        dest:     ObjectId,
        product:  impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            id,
            source,
            dest,
            product:           product.into(),
            quantity,
            priority:          0,
            pieces_per_pallet: Self::DEFAULT_PIECES_PER_PALLET,
            pallet_weight_kg:  Self::DEFAULT_PALLET_WEIGHT_KG,
        }
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_packing(mut self, pieces_per_pallet: u32, pallet_weight_kg: f32) -> Self {
        self.pieces_per_pallet = pieces_per_pallet;
        self.pallet_weight_kg = pallet_weight_kg;
        self
    }

    /// Pallets needed for the whole quantity.  0 if `pieces_per_pallet` is 0
    /// (such orders are rejected by [`validate`](Self::validate)).
    #[inline]
    pub fn pallet_count(&self) -> u32 {
        self.quantity.checked_div(self.pieces_per_pallet).map_or(0, |full| {
            full + u32::from(self.quantity % self.pieces_per_pallet != 0)
        })
    }

    /// Weight carried by the one delivery trip.
    #[inline]
    pub fn load_kg(&self) -> f32 {
        self.pallet_count() as f32 * self.pallet_weight_kg
    }

    /// Check the packing fields.  Object ids are checked by
    /// [`validate_objects`](Self::validate_objects), which needs the layout.
    pub fn validate(&self) -> OrderResult<()> {
        if self.pieces_per_pallet == 0 {
            return Err(OrderError::ZeroPiecesPerPallet(self.id));
        }
        if !self.pallet_weight_kg.is_finite() || self.pallet_weight_kg < 0.0 {
            return Err(OrderError::InvalidWeight(self.id));
        }
        Ok(())
    }

    /// Check `source` and `dest` exist according to `is_known`.
    pub fn validate_objects(&self, is_known: impl Fn(ObjectId) -> bool) -> OrderResult<()> {
        for object in [self.source, self.dest] {
            if !is_known(object) {
                return Err(OrderError::UnknownObject { order: self.id, object });
            }
        }
        Ok(())
    }
}
