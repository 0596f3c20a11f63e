//! `ed-dispatch` — single-incident ambulance and hospital selection.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                       |
//! |---------------|----------------------------------------------------------------|
//! | [`record`]    | `Ambulance`, `Incident`, `Hospital` and their statuses         |
//! | [`selector`]  | `select`, `select_with`, `Selection`, `Leg`, `CandidateOutcome` |
//! | [`assign`]    | `apply_assignment`, `Assignment`                               |
//! | [`hospitals`] | CSV loading and the deterministic fallback hospital set       |
//! | [`scenario`]  | `ScenarioConfig`, `Scenario` — seeded one-incident setup       |
//! | [`error`]     | `DispatchError`, `DispatchResult<T>`                           |
//!
//! # Flow
//!
//! 1. The caller loads a [`RoadNetwork`][ed_spatial::RoadNetwork] and a
//!    hospital set once and passes them in by reference.
//! 2. [`select`] times every ambulance → incident and incident → hospital
//!    route and keeps the fastest of each leg.  It mutates nothing.
//! 3. [`apply_assignment`] marks the chosen ambulance dispatched and the
//!    incident assigned.

pub mod assign;
pub mod error;
pub mod hospitals;
pub mod record;
pub mod scenario;
pub mod selector;

#[cfg(test)]
mod tests;

pub use assign::{Assignment, UNKNOWN_HOSPITAL_NAME, apply_assignment};
pub use error::{DispatchError, DispatchResult};
pub use hospitals::{fallback_hospitals, hospitals_with_fallback, load_hospitals_csv, load_hospitals_reader};
pub use record::{Ambulance, AmbulanceStatus, DispatchDetails, Hospital, Incident, IncidentStatus};
pub use scenario::{Scenario, ScenarioConfig};
pub use selector::{CandidateOutcome, Leg, Selection, select, select_with};
