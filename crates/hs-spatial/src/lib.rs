//! `hs-spatial` — hall layout, grid pathfinding, and the route table.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`layout`]      | `Layout`, `FacilityObject`, `ObjectKind`, `Handover`, `Corridor` |
//! | [`grid`]        | `Cell`, `GridBounds`, `CellCost` trait, `FloorPlan`, `CostGrid` |
//! | [`pathfinder`]  | `astar`, `find_path`, `path_cost`, `Path`                 |
//! | [`route_table`] | `Route`, `RouteTable`                                     |
//! | [`error`]       | `SpatialError`, `SpatialResult<T>`                        |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Builds the cost grid and route pairs on Rayon.            |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.        |

pub mod error;
pub mod grid;
pub mod layout;
pub mod pathfinder;
pub mod route_table;


pub use error::{SpatialError, SpatialResult};
pub use grid::{Cell, CellCost, CostGrid, FloorPlan, GridBounds, CELL_SIZE, CORRIDOR_RADIUS};
pub use layout::{Corridor, FacilityObject, Handover, Layout, ObjectKind};
pub use pathfinder::{astar, find_path, path_cost, Path};
pub use route_table::{Route, RouteTable};
