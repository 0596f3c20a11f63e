//! `ed-core` — foundational types for the emergency dispatch workspace.
//!
//! Every other `ed-*` crate depends on this one.  It has no `ed-*`
//! dependencies and only `rand` (plus optional `serde`) from outside.
//!
//! # What lives here
//!
//! | Module  | Contents                                       |
//! |---------|------------------------------------------------|
//! | [`ids`] | `NodeId`, `EdgeId`                             |
//! | [`geo`] | `GeoPoint` (lon/lat), centroid helper          |
//! | [`rng`] | `ScenarioRng` — seeded RNG for scenario setup  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod geo;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use geo::GeoPoint;
pub use ids::{EdgeId, NodeId};
pub use rng::ScenarioRng;
