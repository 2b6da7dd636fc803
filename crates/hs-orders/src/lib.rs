//! `hs-orders` — transport orders, the dispatch queue, and CSV loading.
//!
//! # Crate layout
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`order`]  | `Order` and its derived pallet count / load           |
//! | [`queue`]  | `OrderQueue`, `DispatchPolicy`                        |
//! | [`loader`] | `load_orders_csv`, `load_orders_reader`               |
//! | [`error`]  | `OrderError`, `OrderResult<T>`                        |
//!
//! # Load model
//!
//! An order moves `quantity` pieces from `source` to `dest`.  Pieces travel
//! on pallets of `pieces_per_pallet`, so one delivery carries
//!
//! ```text
//! pallet_count = ceil(quantity / pieces_per_pallet)
//! load_kg      = pallet_count × pallet_weight_kg
//! ```
//!
//! and is completed in a single trip.

pub mod error;
pub mod loader;
pub mod order;
pub mod queue;

#[cfg(test)]
mod tests;

pub use error::{OrderError, OrderResult};
pub use loader::{load_orders_csv, load_orders_reader};
pub use order::Order;
pub use queue::{DispatchPolicy, OrderQueue};
