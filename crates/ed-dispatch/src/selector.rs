//! Greedy selection of the fastest ambulance and the fastest hospital.
//!
//! Each leg of the response is solved on its own:
//!
//! | Leg       | Routes timed                       |
//! |-----------|------------------------------------|
//! | ambulance | every ambulance node → incident    |
//! | hospital  | incident → every hospital's node   |
//!
//! Candidates are scanned in input order and the running best is replaced
//! only on a strictly smaller time, so the earliest candidate wins a tie.
//! A candidate whose routing fails is recorded as a failed
//! [`CandidateOutcome`] and skipped; it never aborts the scan.  A leg with
//! no successful candidate reports no choice and an infinite time.

use log::{debug, info, warn};

use ed_core::NodeId;
use ed_spatial::{DijkstraRouter, RoadNetwork, Route, Router, SpatialError, SpatialResult, nearest_node};

use crate::record::{Ambulance, Hospital, Incident};

// ── Per-candidate outcome ─────────────────────────────────────────────────────

/// Routing result for one candidate of a leg.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateOutcome {
    /// Position of the candidate in the caller's slice.
    pub index: usize,
    pub result: SpatialResult<Route>,
}

impl CandidateOutcome {
    /// Travel time if routing succeeded.
    pub fn time_secs(&self) -> Option<f64> {
        self.result.as_ref().ok().map(|r| r.total_travel_secs)
    }
}

// ── Leg ───────────────────────────────────────────────────────────────────────

/// All outcomes of one leg plus the index of the winner, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    /// One entry per candidate, in input order.
    pub outcomes: Vec<CandidateOutcome>,
    best: Option<usize>,
}

impl Leg {
    /// Pick the fastest successful outcome (strict `<`, first wins).
    pub fn from_outcomes(outcomes: Vec<CandidateOutcome>) -> Self {
        let mut best: Option<usize> = None;
        let mut best_time = f64::INFINITY;
        for (pos, outcome) in outcomes.iter().enumerate() {
            if let Some(t) = outcome.time_secs() {
                if t < best_time {
                    best_time = t;
                    best = Some(pos);
                }
            }
        }
        Self { outcomes, best }
    }

    /// Index of the chosen candidate in the caller's slice.
    pub fn chosen(&self) -> Option<usize> {
        self.best.map(|pos| self.outcomes[pos].index)
    }

    pub fn route(&self) -> Option<&Route> {
        self.best
            .and_then(|pos| self.outcomes[pos].result.as_ref().ok())
    }

    pub fn path(&self) -> Option<&[NodeId]> {
        self.route().map(|r| r.nodes.as_slice())
    }

    /// Travel time of the chosen route; `f64::INFINITY` if nothing was chosen.
    pub fn time_secs(&self) -> f64 {
        self.route().map_or(f64::INFINITY, |r| r.total_travel_secs)
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_none()
    }

    /// Outcome for the candidate at `index` in the caller's slice; `None` if
    /// that candidate was not routed.
    pub fn outcome(&self, index: usize) -> Option<&CandidateOutcome> {
        self.outcomes.iter().find(|o| o.index == index)
    }

    /// Map candidate indices back to a wider slice: the candidate routed at
    /// position `i` sits at `positions[i]` in that slice.
    pub(crate) fn reindex(mut self, positions: &[usize]) -> Self {
        for outcome in &mut self.outcomes {
            outcome.index = positions[outcome.index];
        }
        self
    }

    /// Candidates whose routing failed, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &SpatialError)> + '_ {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (o.index, e)))
    }
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Result of [`select`]: the incident's snapped node and both legs.
///
/// Legs refer to candidates by index so the caller's slices stay free for
/// [`apply_assignment`](crate::apply_assignment) to mutate.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub incident_node: NodeId,
    pub ambulance: Leg,
    pub hospital: Leg,
}

impl Selection {
    /// The chosen ambulance, looked up in the same slice passed to `select`.
    pub fn ambulance<'a>(&self, ambulances: &'a [Ambulance]) -> Option<&'a Ambulance> {
        self.ambulance.chosen().and_then(|i| ambulances.get(i))
    }

    /// The chosen hospital, looked up in the same slice passed to `select`.
    pub fn hospital<'a>(&self, hospitals: &'a [Hospital]) -> Option<&'a Hospital> {
        self.hospital.chosen().and_then(|i| hospitals.get(i))
    }
}

// ── Entry points ──────────────────────────────────────────────────────────────

/// [`select_with`] using the default [`DijkstraRouter`].
pub fn select(
    network:    &RoadNetwork,
    ambulances: &[Ambulance],
    incident:   &Incident,
    hospitals:  &[Hospital],
) -> SpatialResult<Selection> {
    select_with(&DijkstraRouter, network, ambulances, incident, hospitals)
}

/// Choose the fastest ambulance to `incident` and the fastest hospital
/// from it.
///
/// Fails only if the incident's own location cannot be snapped to the
/// network.  Per-candidate failures end up in [`Leg::outcomes`].
pub fn select_with<R: Router>(
    router:     &R,
    network:    &RoadNetwork,
    ambulances: &[Ambulance],
    incident:   &Incident,
    hospitals:  &[Hospital],
) -> SpatialResult<Selection> {
    let incident_node = nearest_node(network, incident.location)?;
    debug!("incident {} at {} snapped to {incident_node}", incident.id, incident.location);

    let ambulance = Leg::from_outcomes(
        ambulances
            .iter()
            .enumerate()
            .map(|(index, amb)| {
                let result = router.route(network, amb.node, incident_node);
                log_outcome("ambulance", &amb.id, &result);
                CandidateOutcome { index, result }
            })
            .collect(),
    );

    let hospital = Leg::from_outcomes(
        hospitals
            .iter()
            .enumerate()
            .map(|(index, hosp)| {
                let result = nearest_node(network, hosp.location)
                    .and_then(|node| router.route(network, incident_node, node));
                log_outcome("hospital", &hosp.name, &result);
                CandidateOutcome { index, result }
            })
            .collect(),
    );

    if ambulance.is_empty() && !ambulances.is_empty() {
        warn!("incident {}: none of {} ambulances can reach it", incident.id, ambulances.len());
    }
    if hospital.is_empty() && !hospitals.is_empty() {
        warn!("incident {}: none of {} hospitals is reachable from it", incident.id, hospitals.len());
    }
    info!(
        "incident {}: ambulance {:?} ({:.0} s), hospital {:?} ({:.0} s)",
        incident.id,
        ambulance.chosen().map(|i| ambulances[i].id.as_str()),
        ambulance.time_secs(),
        hospital.chosen().map(|i| hospitals[i].name.as_str()),
        hospital.time_secs(),
    );

    Ok(Selection { incident_node, ambulance, hospital })
}

fn log_outcome(kind: &str, name: &str, result: &SpatialResult<Route>) {
    match result {
        Ok(route) => debug!("{kind} {name}: {:.1} s over {} hops", route.total_travel_secs, route.hop_count()),
        Err(e) => debug!("{kind} {name}: skipped ({e})"),
    }
}
