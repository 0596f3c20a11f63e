//! One-incident scenario setup.
//!
//! A scenario places `ambulance_count` ambulances on distinct, randomly
//! sampled nodes and one incident a fixed offset away from the centroid of
//! all nodes.  The RNG is seeded from [`ScenarioConfig::seed`], so the same
//! config over the same network always yields the same scenario.

use log::debug;
use serde::{Deserialize, Serialize};

use ed_core::{GeoPoint, NodeId, ScenarioRng};
use ed_spatial::{LookupError, RoadNetwork, SpatialError};

use crate::assign::{Assignment, apply_assignment};
use crate::record::{Ambulance, Hospital, Incident, IncidentStatus};
use crate::selector::{Selection, select};
use crate::{DispatchError, DispatchResult};

/// Scenario parameters.  Every field has a default, so an empty TOML table
/// is a valid config.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Seed for ambulance placement.
    pub seed: u64,
    pub ambulance_count: usize,
    /// Fewer loaded hospitals than this triggers the fallback set.
    pub min_hospitals: usize,
    /// Incident longitude offset from the node centroid, in degrees.
    pub incident_offset_lon: f64,
    /// Incident latitude offset from the node centroid, in degrees.
    pub incident_offset_lat: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed:                42,
            ambulance_count:     3,
            min_hospitals:       5,
            incident_offset_lon: 0.002,
            incident_offset_lat: -0.0015,
        }
    }
}

/// Records for a single dispatch decision.
#[derive(Clone, Debug)]
pub struct Scenario {
    pub ambulances: Vec<Ambulance>,
    pub incident:   Incident,
    pub hospitals:  Vec<Hospital>,
}

impl Scenario {
    /// Place ambulances and the incident on `network`.
    ///
    /// Ambulances are named `A1..An` in sampling order; the incident is `I1`.
    pub fn build(
        network:   &RoadNetwork,
        hospitals: Vec<Hospital>,
        config:    &ScenarioConfig,
    ) -> DispatchResult<Self> {
        let centroid = GeoPoint::centroid(network.node_pos.iter().copied())
            .ok_or(SpatialError::Lookup(LookupError::EmptyNetwork))?;

        let available = network.node_count();
        if config.ambulance_count > available {
            return Err(DispatchError::NotEnoughNodes {
                requested: config.ambulance_count,
                available,
            });
        }

        let mut rng = ScenarioRng::new(config.seed);
        let ambulances = rng
            .sample_indices(available, config.ambulance_count)
            .into_iter()
            .enumerate()
            .map(|(i, node)| Ambulance::new(format!("A{}", i + 1), NodeId(node as u32)))
            .collect();

        let incident = Incident::new(
            "I1",
            centroid.offset(config.incident_offset_lon, config.incident_offset_lat),
        );

        Ok(Self { ambulances, incident, hospitals })
    }

    /// Run [`select`] over the available ambulances and apply its result to
    /// this scenario's records.
    ///
    /// Returns the selection alongside the assignment, which is `None` if no
    /// available ambulance can reach the incident.  Indices in the ambulance
    /// leg refer to [`Scenario::ambulances`]; dispatched units have no
    /// outcome.  An incident that is already assigned is left untouched and
    /// yields [`DispatchError::AlreadyAssigned`].
    pub fn dispatch(
        &mut self,
        network: &RoadNetwork,
    ) -> DispatchResult<(Selection, Option<Assignment>)> {
        if self.incident.status == IncidentStatus::Assigned {
            return Err(DispatchError::AlreadyAssigned(self.incident.id.clone()));
        }

        let positions: Vec<usize> = self
            .ambulances
            .iter()
            .enumerate()
            .filter(|(_, amb)| amb.is_available())
            .map(|(i, _)| i)
            .collect();
        let candidates: Vec<Ambulance> = positions
            .iter()
            .map(|&i| self.ambulances[i].clone())
            .collect();
        if candidates.len() < self.ambulances.len() {
            debug!(
                "incident {}: {} of {} ambulances already dispatched",
                self.incident.id,
                self.ambulances.len() - candidates.len(),
                self.ambulances.len()
            );
        }

        let mut selection = select(network, &candidates, &self.incident, &self.hospitals)?;
        selection.ambulance = selection.ambulance.reindex(&positions);

        let assignment = apply_assignment(
            &selection,
            &mut self.ambulances,
            &mut self.incident,
            &self.hospitals,
        );
        Ok((selection, assignment))
    }
}
