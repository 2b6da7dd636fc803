//! CSV order loader.
//!
//! # CSV format
//!
//! One row per order.  `priority`, `pieces_per_pallet` and
//! `pallet_weight_kg` may be left empty to take the defaults (0, 16, 10.0).
//!
//! ```csv
//! id,source,dest,product,quantity,priority,pieces_per_pallet,pallet_weight_kg
//! 1,0,10,136333150100 F40 VODICI PROFIL,480,0,16,10
//! 2,1,10,136333150200 F40 KRYT,96,5,,
//! ```
//!
//! `source` and `dest` are object ids; whether they exist in the layout is
//! checked when the session is built, not here.  Packing fields are checked
//! per row and duplicate ids are rejected.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use hs_core::{ObjectId, OrderId};

use crate::{Order, OrderError};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct OrderRecord {
    id:                u32,
    source:            u32,
    dest:              u32,
    product:           String,
    quantity:          u32,
    priority:          Option<u8>,
    pieces_per_pallet: Option<u32>,
    pallet_weight_kg:  Option<f32>,
}

impl From<OrderRecord> for Order {
    fn from(r: OrderRecord) -> Order {
        Order {
            id:                OrderId(r.id),
            source:            ObjectId(r.source),
            dest:              ObjectId(r.dest),
            product:           r.product,
            quantity:          r.quantity,
            priority:          r.priority.unwrap_or(0),
            pieces_per_pallet: r.pieces_per_pallet.unwrap_or(Order::DEFAULT_PIECES_PER_PALLET),
            pallet_weight_kg:  r.pallet_weight_kg.unwrap_or(Order::DEFAULT_PALLET_WEIGHT_KG),
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load orders from a CSV file, in file order.
pub fn load_orders_csv(path: &Path) -> Result<Vec<Order>, OrderError> {
    let file = std::fs::File::open(path).map_err(OrderError::Io)?;
    load_orders_reader(file)
}

/// Like [`load_orders_csv`] but accepts any `Read` source.
pub fn load_orders_reader<R: Read>(reader: R) -> Result<Vec<Order>, OrderError> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut orders = Vec::new();
    let mut seen = HashSet::new();

    for result in csv_reader.deserialize::<OrderRecord>() {
        let order: Order = result.map_err(|e| OrderError::Parse(e.to_string()))?.into();
        order.validate()?;
        if !seen.insert(order.id) {
            return Err(OrderError::DuplicateOrder(order.id));
        }
        orders.push(order);
    }

    debug!("loaded {} orders", orders.len());
    Ok(orders)
}
