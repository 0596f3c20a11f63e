//! Applying a [`Selection`] to the scenario's records.

use std::fmt;

use log::info;

use crate::record::{Ambulance, AmbulanceStatus, DispatchDetails, Hospital, Incident, IncidentStatus};
use crate::selector::Selection;

/// Name recorded on the ambulance when no hospital could be reached.
pub const UNKNOWN_HOSPITAL_NAME: &str = "Hospital";

/// Summary of an applied assignment.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub ambulance_id: String,
    pub incident_id: String,
    /// `None` if the hospital leg found nothing.
    pub hospital_name: Option<String>,
    pub eta_to_incident_secs: f64,
    /// `f64::INFINITY` if the hospital leg found nothing.
    pub eta_to_hospital_secs: f64,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ambulance {} assigned (ETA {}s)",
            self.ambulance_id, self.eta_to_incident_secs as u64
        )?;
        match &self.hospital_name {
            Some(name) => write!(
                f,
                " -> hospital {name} (ETA from incident {}s)",
                self.eta_to_hospital_secs as u64
            ),
            None => f.write_str(" -> no reachable hospital"),
        }
    }
}

/// Mark the selected ambulance dispatched and the incident assigned.
///
/// `ambulances` and `hospitals` must be the slices `selection` was computed
/// from.  Returns `None` and changes nothing when no ambulance was chosen.
pub fn apply_assignment(
    selection:  &Selection,
    ambulances: &mut [Ambulance],
    incident:   &mut Incident,
    hospitals:  &[Hospital],
) -> Option<Assignment> {
    let route_to_incident = selection.ambulance.route()?.nodes.clone();
    let ambulance = ambulances.get_mut(selection.ambulance.chosen()?)?;

    let hospital_name = selection.hospital(hospitals).map(|h| h.name.clone());
    let eta_to_incident_secs = selection.ambulance.time_secs();

    ambulance.status = AmbulanceStatus::Dispatched;
    ambulance.dispatch = Some(DispatchDetails {
        route_to_incident,
        route_to_hospital: selection.hospital.path().map(<[_]>::to_vec),
        eta_to_incident_secs,
        hospital_name: hospital_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_HOSPITAL_NAME.to_string()),
    });

    incident.status = IncidentStatus::Assigned;
    incident.assigned_to = Some(ambulance.id.clone());

    let assignment = Assignment {
        ambulance_id: ambulance.id.clone(),
        incident_id: incident.id.clone(),
        hospital_name,
        eta_to_incident_secs,
        eta_to_hospital_secs: selection.hospital.time_secs(),
    };
    info!("{assignment}");
    Some(assignment)
}
