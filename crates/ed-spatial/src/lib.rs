//! `ed-spatial` — road network, nearest-node lookup, and travel-time routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`network`] | `RoadNetwork` (CSR multi-edge + R-tree), `RoadNetworkBuilder`, `EdgeAttrs`, `nearest_node` |
//! | [`router`]  | `Router` trait, `Route`, `EdgeWeight`, `DijkstraRouter`, `route_travel_time` |
//! | [`error`]   | `SpatialError`, `LookupError`, `SpatialResult<T>`              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod network;
pub mod router;


pub use error::{LookupError, SpatialError, SpatialResult};
pub use network::{EdgeAttrs, RoadNetwork, RoadNetworkBuilder, nearest_node};
pub use router::{DijkstraRouter, EdgeWeight, Route, Router, route_travel_time};
