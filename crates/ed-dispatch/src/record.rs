//! Ambulance, incident, and hospital records.
//!
//! Records are created once per scenario and mutated in place by
//! [`apply_assignment`](crate::apply_assignment).  Nothing deletes them.

use ed_core::{GeoPoint, NodeId};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AmbulanceStatus {
    #[default]
    Available,
    Dispatched,
}

impl AmbulanceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AmbulanceStatus::Available  => "available",
            AmbulanceStatus::Dispatched => "dispatched",
        }
    }
}

impl std::fmt::Display for AmbulanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IncidentStatus {
    #[default]
    Unassigned,
    Assigned,
}

impl IncidentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            IncidentStatus::Unassigned => "unassigned",
            IncidentStatus::Assigned   => "assigned",
        }
    }
}

impl std::fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a dispatched ambulance has been told to do.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchDetails {
    pub route_to_incident: Vec<NodeId>,
    /// `None` when no hospital was reachable from the incident.
    pub route_to_hospital: Option<Vec<NodeId>>,
    pub eta_to_incident_secs: f64,
    pub hospital_name: String,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ambulance {
    pub id: String,
    /// Current position on the road network.
    pub node: NodeId,
    pub status: AmbulanceStatus,
    /// Set when `status` becomes `Dispatched`.
    pub dispatch: Option<DispatchDetails>,
}

impl Ambulance {
    /// A new, available ambulance at `node`.
    pub fn new(id: impl Into<String>, node: NodeId) -> Self {
        Self {
            id: id.into(),
            node,
            status: AmbulanceStatus::Available,
            dispatch: None,
        }
    }

    #[inline]
    pub fn is_available(&self) -> bool {
        self.status == AmbulanceStatus::Available
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Incident {
    pub id: String,
    pub location: GeoPoint,
    pub status: IncidentStatus,
    /// Id of the ambulance sent, once `status` is `Assigned`.
    pub assigned_to: Option<String>,
}

impl Incident {
    pub fn new(id: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            location,
            status: IncidentStatus::Unassigned,
            assigned_to: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hospital {
    pub name: String,
    pub location: GeoPoint,
}

impl Hospital {
    pub fn new(name: impl Into<String>, location: GeoPoint) -> Self {
        Self { name: name.into(), location }
    }
}
