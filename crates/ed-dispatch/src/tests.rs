//! Unit tests for ed-dispatch.

// ── Helpers ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod helpers {
    use ed_core::{GeoPoint, NodeId};
    use ed_spatial::{EdgeAttrs, RoadNetwork, RoadNetworkBuilder};

    /// Two-way street 0 ↔ 1 ↔ 2 ↔ 3 along the equator plus an isolated
    /// node 4 far away.  Every segment is 1000 m at 36 km/h (100 s).
    pub fn street_with_island() -> (RoadNetwork, [NodeId; 5]) {
        let mut b = RoadNetworkBuilder::new();
        let n0 = b.add_node(GeoPoint::new(0.00, 0.0));
        let n1 = b.add_node(GeoPoint::new(0.01, 0.0));
        let n2 = b.add_node(GeoPoint::new(0.02, 0.0));
        let n3 = b.add_node(GeoPoint::new(0.03, 0.0));
        let n4 = b.add_node(GeoPoint::new(5.00, 5.0));
        let seg = EdgeAttrs::new(1_000.0).with_speed(36.0);
        b.add_road(n0, n1, seg);
        b.add_road(n1, n2, seg);
        b.add_road(n2, n3, seg);
        (b.build(), [n0, n1, n2, n3, n4])
    }

    /// N1 → N2 (1000 m) → N3 (500 m) at 36 km/h; reverse edges optional.
    pub fn three_node(with_reverse: bool) -> (RoadNetwork, [NodeId; 3]) {
        let mut b = RoadNetworkBuilder::new();
        let n1 = b.add_node(GeoPoint::new(0.00, 0.0));
        let n2 = b.add_node(GeoPoint::new(0.01, 0.0));
        let n3 = b.add_node(GeoPoint::new(0.02, 0.0));
        let first = EdgeAttrs::new(1_000.0).with_speed(36.0);
        let second = EdgeAttrs::new(500.0).with_speed(36.0);
        if with_reverse {
            b.add_road(n1, n2, first);
            b.add_road(n2, n3, second);
        } else {
            b.add_directed_edge(n1, n2, first);
            b.add_directed_edge(n2, n3, second);
        }
        (b.build(), [n1, n2, n3])
    }

    pub fn point_of(net: &RoadNetwork, node: NodeId) -> GeoPoint {
        net.position(node).unwrap()
    }
}

// ── Selector ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod selector {
    use float_cmp::assert_approx_eq;

    use ed_core::{GeoPoint, NodeId};
    use ed_spatial::{LookupError, RoadNetwork, Route, Router, SpatialError, SpatialResult};

    use super::helpers::{point_of, street_with_island, three_node};
    use crate::{Ambulance, Hospital, Incident, select, select_with};

    #[test]
    fn picks_fastest_ambulance() {
        let (net, [n0, n1, _, n3, _]) = street_with_island();
        let ambulances = vec![Ambulance::new("A1", n0), Ambulance::new("A2", n1)];
        let incident = Incident::new("I1", point_of(&net, n3));

        let sel = select(&net, &ambulances, &incident, &[]).unwrap();
        assert_eq!(sel.incident_node, n3);
        assert_eq!(sel.ambulance.chosen(), Some(1));
        assert_eq!(sel.ambulance(&ambulances).unwrap().id, "A2");
        assert_approx_eq!(f64, sel.ambulance.time_secs(), 200.0, epsilon = 1e-9);
        assert_eq!(sel.ambulance.path().unwrap().first(), Some(&n1));
        assert_eq!(sel.ambulance.path().unwrap().last(), Some(&n3));
    }

    #[test]
    fn tie_goes_to_first_in_input_order() {
        // n0 and n2 are both one segment from n1.
        let (net, [n0, n1, n2, _, _]) = street_with_island();
        let incident = Incident::new("I1", point_of(&net, n1));

        let ambulances = vec![Ambulance::new("A1", n2), Ambulance::new("A2", n0)];
        let sel = select(&net, &ambulances, &incident, &[]).unwrap();
        assert_eq!(sel.ambulance.chosen(), Some(0));

        let swapped = vec![Ambulance::new("A2", n0), Ambulance::new("A1", n2)];
        let sel = select(&net, &swapped, &incident, &[]).unwrap();
        assert_eq!(sel.ambulance(&swapped).unwrap().id, "A2");
    }

    #[test]
    fn unreachable_candidate_is_skipped() {
        let (net, [n0, _, n2, n3, island]) = street_with_island();
        let ambulances = vec![
            Ambulance::new("A1", n0),
            Ambulance::new("A2", island),
            Ambulance::new("A3", n2),
        ];
        let incident = Incident::new("I1", point_of(&net, n3));

        let sel = select(&net, &ambulances, &incident, &[]).unwrap();
        assert_eq!(sel.ambulance(&ambulances).unwrap().id, "A3");
        assert_eq!(sel.ambulance.outcomes.len(), 3);

        let failures: Vec<_> = sel.ambulance.failures().collect();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].0, 1);
        assert!(matches!(failures[0].1, SpatialError::NoPath { .. }));
    }

    #[test]
    fn unknown_ambulance_node_is_skipped() {
        let (net, [n0, _, _, n3, _]) = street_with_island();
        let ghost = NodeId(77);
        let ambulances = vec![Ambulance::new("A1", ghost), Ambulance::new("A2", n0)];
        let incident = Incident::new("I1", point_of(&net, n3));

        let sel = select(&net, &ambulances, &incident, &[]).unwrap();
        assert_eq!(sel.ambulance.chosen(), Some(1));
        assert_eq!(
            sel.ambulance.outcomes[0].result,
            Err(SpatialError::Lookup(LookupError::NodeNotFound(ghost)))
        );
    }

    #[test]
    fn empty_ambulance_list_yields_sentinel() {
        let (net, [_, _, _, n3, _]) = street_with_island();
        let incident = Incident::new("I1", point_of(&net, n3));
        let sel = select(&net, &[], &incident, &[]).unwrap();
        assert!(sel.ambulance.is_empty());
        assert_eq!(sel.ambulance.chosen(), None);
        assert_eq!(sel.ambulance.path(), None);
        assert_eq!(sel.ambulance.time_secs(), f64::INFINITY);
        assert_eq!(sel.hospital.time_secs(), f64::INFINITY);
    }

    #[test]
    fn all_candidates_failing_yields_sentinel() {
        let (net, [_, _, _, n3, island]) = street_with_island();
        let ambulances = vec![Ambulance::new("A1", island)];
        let incident = Incident::new("I1", point_of(&net, n3));
        let sel = select(&net, &ambulances, &incident, &[]).unwrap();
        assert!(sel.ambulance(&ambulances).is_none());
        assert_eq!(sel.ambulance.time_secs(), f64::INFINITY);
        assert_eq!(sel.ambulance.failures().count(), 1);
    }

    #[test]
    fn hospital_leg_snaps_and_picks_fastest() {
        let (net, [n0, n1, _, n3, _]) = street_with_island();
        let hospitals = vec![
            Hospital::new("Far", point_of(&net, n0).offset(-0.001, 0.0)),
            Hospital::new("Near", point_of(&net, n1).offset(0.0, 0.001)),
        ];
        let incident = Incident::new("I1", point_of(&net, n3));

        let sel = select(&net, &[], &incident, &hospitals).unwrap();
        assert_eq!(sel.hospital(&hospitals).unwrap().name, "Near");
        assert_approx_eq!(f64, sel.hospital.time_secs(), 200.0, epsilon = 1e-9);
        assert_eq!(sel.hospital.path().unwrap(), &[n3, NodeId(2), n1]);
    }

    #[test]
    fn hospital_on_island_is_skipped() {
        let (net, [n0, _, _, n3, island]) = street_with_island();
        let hospitals = vec![
            Hospital::new("Island", point_of(&net, island)),
            Hospital::new("Mainland", point_of(&net, n0)),
        ];
        let incident = Incident::new("I1", point_of(&net, n3));
        let sel = select(&net, &[], &incident, &hospitals).unwrap();
        assert_eq!(sel.hospital.chosen(), Some(1));
        assert_eq!(sel.hospital.failures().count(), 1);
    }

    #[test]
    fn unresolvable_hospital_point_is_skipped() {
        let (net, [n0, _, _, n3, _]) = street_with_island();
        let hospitals = vec![
            Hospital::new("Nowhere", GeoPoint::new(f64::NAN, 0.0)),
            Hospital::new("Mainland", point_of(&net, n0)),
        ];
        let incident = Incident::new("I1", point_of(&net, n3));

        let sel = select(&net, &[], &incident, &hospitals).unwrap();
        assert_eq!(sel.hospital(&hospitals).unwrap().name, "Mainland");
        assert_approx_eq!(f64, sel.hospital.time_secs(), 300.0, epsilon = 1e-9);
        assert!(matches!(
            sel.hospital.outcomes[0].result,
            Err(SpatialError::Lookup(LookupError::InvalidPoint(_)))
        ));
        assert_eq!(sel.hospital.failures().count(), 1);
    }

    #[test]
    fn legs_are_independent() {
        let (net, [n1, _, n3]) = three_node(false);
        let ambulances = vec![Ambulance::new("A1", n1)];
        let hospitals = vec![Hospital::new("H1", point_of(&net, n1))];
        let incident = Incident::new("I1", point_of(&net, n3));

        let sel = select(&net, &ambulances, &incident, &hospitals).unwrap();
        assert!(!sel.ambulance.is_empty());
        assert!(sel.hospital.is_empty());
    }

    #[test]
    fn three_node_one_way_scenario() {
        let (net, [n1, n2, n3]) = three_node(false);
        let ambulances = vec![Ambulance::new("A1", n1)];
        let hospitals = vec![Hospital::new("H1", point_of(&net, n1).offset(-0.0001, 0.0))];
        let incident = Incident::new("I1", point_of(&net, n3).offset(0.0001, 0.0));

        let sel = select(&net, &ambulances, &incident, &hospitals).unwrap();
        assert_eq!(sel.incident_node, n3);
        assert_eq!(sel.ambulance.path().unwrap(), &[n1, n2, n3]);
        assert_approx_eq!(f64, sel.ambulance.time_secs(), 150.0, epsilon = 1e-9);

        assert!(sel.hospital.is_empty());
        assert_eq!(
            sel.hospital.outcomes[0].result,
            Err(SpatialError::NoPath { from: n3, to: n1 })
        );
    }

    #[test]
    fn three_node_two_way_scenario() {
        let (net, [n1, n2, n3]) = three_node(true);
        let ambulances = vec![Ambulance::new("A1", n1)];
        let hospitals = vec![Hospital::new("H1", point_of(&net, n1))];
        let incident = Incident::new("I1", point_of(&net, n3));

        let sel = select(&net, &ambulances, &incident, &hospitals).unwrap();
        assert_eq!(sel.hospital.path().unwrap(), &[n3, n2, n1]);
        assert_approx_eq!(f64, sel.hospital.time_secs(), 150.0, epsilon = 1e-9);
    }

    #[test]
    fn selection_is_deterministic() {
        let (net, [n0, n1, n2, n3, _]) = street_with_island();
        let ambulances = vec![
            Ambulance::new("A1", n0),
            Ambulance::new("A2", n2),
            Ambulance::new("A3", n2),
        ];
        let hospitals = vec![
            Hospital::new("H1", point_of(&net, n1)),
            Hospital::new("H2", point_of(&net, n3)),
        ];
        let incident = Incident::new("I1", point_of(&net, n1));

        let first = select(&net, &ambulances, &incident, &hospitals).unwrap();
        for _ in 0..5 {
            assert_eq!(select(&net, &ambulances, &incident, &hospitals).unwrap(), first);
        }
    }

    #[test]
    fn unresolvable_incident_is_an_error() {
        let net = RoadNetwork::empty();
        let incident = Incident::new("I1", GeoPoint::new(0.0, 0.0));
        let result = select(&net, &[], &incident, &[]);
        assert_eq!(result, Err(SpatialError::Lookup(LookupError::EmptyNetwork)));
    }

    /// Router that refuses every request.
    struct ClosedRoads;

    impl Router for ClosedRoads {
        fn route(&self, _: &RoadNetwork, from: NodeId, to: NodeId) -> SpatialResult<Route> {
            Err(SpatialError::NoPath { from, to })
        }
    }

    #[test]
    fn custom_router_failures_are_absorbed() {
        let (net, [n0, n1, _, n3, _]) = street_with_island();
        let ambulances = vec![Ambulance::new("A1", n0)];
        let hospitals = vec![Hospital::new("H1", point_of(&net, n1))];
        let incident = Incident::new("I1", point_of(&net, n3));

        let sel = select_with(&ClosedRoads, &net, &ambulances, &incident, &hospitals).unwrap();
        assert!(sel.ambulance.is_empty());
        assert!(sel.hospital.is_empty());
        assert_eq!(sel.ambulance.failures().count(), 1);
        assert_eq!(sel.hospital.failures().count(), 1);
    }
}

// ── Assignment ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod assign {
    use super::helpers::{point_of, street_with_island, three_node};
    use crate::{
        Ambulance, AmbulanceStatus, Hospital, Incident, IncidentStatus, UNKNOWN_HOSPITAL_NAME,
        apply_assignment, select,
    };

    #[test]
    fn marks_ambulance_and_incident() {
        let (net, [n0, n1, _, n3, _]) = street_with_island();
        let mut ambulances = vec![Ambulance::new("A1", n0), Ambulance::new("A2", n1)];
        let hospitals = vec![Hospital::new("City", point_of(&net, n0))];
        let mut incident = Incident::new("I1", point_of(&net, n3));

        let sel = select(&net, &ambulances, &incident, &hospitals).unwrap();
        let a = apply_assignment(&sel, &mut ambulances, &mut incident, &hospitals).unwrap();

        assert_eq!(a.ambulance_id, "A2");
        assert_eq!(a.incident_id, "I1");
        assert_eq!(a.hospital_name.as_deref(), Some("City"));

        assert!(ambulances[0].is_available());
        assert_eq!(ambulances[1].status, AmbulanceStatus::Dispatched);
        let details = ambulances[1].dispatch.as_ref().unwrap();
        assert_eq!(details.route_to_incident, sel.ambulance.path().unwrap());
        assert_eq!(details.route_to_hospital.as_deref(), sel.hospital.path());
        assert_eq!(details.eta_to_incident_secs, sel.ambulance.time_secs());
        assert_eq!(details.hospital_name, "City");

        assert_eq!(incident.status, IncidentStatus::Assigned);
        assert_eq!(incident.assigned_to.as_deref(), Some("A2"));
    }

    #[test]
    fn nothing_changes_without_an_ambulance() {
        let (net, [_, _, _, n3, island]) = street_with_island();
        let mut ambulances = vec![Ambulance::new("A1", island)];
        let mut incident = Incident::new("I1", point_of(&net, n3));
        let before = (ambulances.clone(), incident.clone());

        let sel = select(&net, &ambulances, &incident, &[]).unwrap();
        assert!(apply_assignment(&sel, &mut ambulances, &mut incident, &[]).is_none());
        assert_eq!((ambulances, incident), before);
    }

    #[test]
    fn missing_hospital_uses_placeholder_name() {
        let (net, [n1, _, n3]) = three_node(false);
        let mut ambulances = vec![Ambulance::new("A1", n1)];
        let hospitals = vec![Hospital::new("Unreachable", point_of(&net, n1))];
        let mut incident = Incident::new("I1", point_of(&net, n3));

        let sel = select(&net, &ambulances, &incident, &hospitals).unwrap();
        let a = apply_assignment(&sel, &mut ambulances, &mut incident, &hospitals).unwrap();

        assert_eq!(a.hospital_name, None);
        assert_eq!(a.eta_to_hospital_secs, f64::INFINITY);
        let details = ambulances[0].dispatch.as_ref().unwrap();
        assert_eq!(details.hospital_name, UNKNOWN_HOSPITAL_NAME);
        assert_eq!(details.route_to_hospital, None);
        assert_eq!(a.to_string(), "Ambulance A1 assigned (ETA 150s) -> no reachable hospital");
    }

    #[test]
    fn display_matches_dispatch_message() {
        let (net, [n1, _, n3]) = three_node(true);
        let mut ambulances = vec![Ambulance::new("A1", n1)];
        let hospitals = vec![Hospital::new("Kiran Hospital", point_of(&net, n1))];
        let mut incident = Incident::new("I1", point_of(&net, n3));

        let sel = select(&net, &ambulances, &incident, &hospitals).unwrap();
        let a = apply_assignment(&sel, &mut ambulances, &mut incident, &hospitals).unwrap();
        assert_eq!(
            a.to_string(),
            "Ambulance A1 assigned (ETA 150s) -> hospital Kiran Hospital (ETA from incident 150s)"
        );
    }
}

// ── Hospital provisioning ─────────────────────────────────────────────────────

#[cfg(test)]
mod hospitals {
    use std::io::Cursor;

    use ed_core::GeoPoint;
    use crate::{
        DispatchError, Hospital, fallback_hospitals, hospitals_with_fallback,
        load_hospitals_reader,
    };

    const CSV: &str = "\
name,lon,lat\n\
New Civil Hospital Surat,72.8311,21.2090\n\
,72.7804,21.1702\n\
";

    #[test]
    fn reader_parses_rows() {
        let hospitals = load_hospitals_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(hospitals.len(), 2);
        assert_eq!(hospitals[0].name, "New Civil Hospital Surat");
        assert_eq!(hospitals[0].location, GeoPoint::new(72.8311, 21.2090));
        assert_eq!(hospitals[1].name, "Hospital");
    }

    #[test]
    fn bad_coordinate_is_parse_error() {
        let bad = "name,lon,lat\nX,not-a-number,21.0\n";
        let result = load_hospitals_reader(Cursor::new(bad));
        assert!(matches!(result, Err(DispatchError::Parse(_))));
    }

    #[test]
    fn fallback_set_is_fixed() {
        let hospitals = fallback_hospitals();
        assert_eq!(hospitals.len(), 5);
        assert_eq!(hospitals[0].name, "New Civil Hospital Surat");
        assert_eq!(hospitals[4].location, GeoPoint::new(72.7991, 21.1911));
        assert_eq!(fallback_hospitals(), hospitals);
    }

    #[test]
    fn enough_hospitals_are_kept() {
        let loaded = vec![Hospital::new("Only", GeoPoint::new(1.0, 1.0))];
        let result = hospitals_with_fallback::<DispatchError>(Ok(loaded.clone()), 1);
        assert_eq!(result, loaded);
    }

    #[test]
    fn short_list_falls_back() {
        let loaded = vec![Hospital::new("Only", GeoPoint::new(1.0, 1.0))];
        let result = hospitals_with_fallback::<DispatchError>(Ok(loaded), 5);
        assert_eq!(result, fallback_hospitals());
    }

    #[test]
    fn load_error_falls_back() {
        let result = hospitals_with_fallback(Err("connection refused"), 5);
        assert_eq!(result, fallback_hospitals());
    }
}

// ── Scenario ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenario {
    use float_cmp::assert_approx_eq;

    use ed_core::GeoPoint;
    use ed_spatial::RoadNetwork;

    use super::helpers::street_with_island;
    use crate::{AmbulanceStatus, DispatchError, Incident, IncidentStatus, Scenario, ScenarioConfig};

    #[test]
    fn default_config_matches_surat_setup() {
        let c = ScenarioConfig::default();
        assert_eq!(c.ambulance_count, 3);
        assert_eq!(c.min_hospitals, 5);
        assert_eq!(c.incident_offset_lon, 0.002);
        assert_eq!(c.incident_offset_lat, -0.0015);
    }

    #[test]
    fn build_is_seeded() {
        let (net, _) = street_with_island();
        let config = ScenarioConfig::default();
        let a = Scenario::build(&net, vec![], &config).unwrap();
        let b = Scenario::build(&net, vec![], &config).unwrap();
        let nodes = |s: &Scenario| s.ambulances.iter().map(|a| a.node).collect::<Vec<_>>();
        assert_eq!(nodes(&a), nodes(&b));
    }

    #[test]
    fn ambulances_on_distinct_nodes() {
        let (net, _) = street_with_island();
        let config = ScenarioConfig { ambulance_count: 5, ..ScenarioConfig::default() };
        let s = Scenario::build(&net, vec![], &config).unwrap();

        let ids: Vec<_> = s.ambulances.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["A1", "A2", "A3", "A4", "A5"]);
        let mut nodes: Vec<_> = s.ambulances.iter().map(|a| a.node).collect();
        nodes.sort_unstable();
        nodes.dedup();
        assert_eq!(nodes.len(), 5);
        assert!(s.ambulances.iter().all(|a| a.status == AmbulanceStatus::Available));
    }

    #[test]
    fn incident_is_offset_from_centroid() {
        let (net, _) = street_with_island();
        let s = Scenario::build(&net, vec![], &ScenarioConfig::default()).unwrap();
        // Centroid of the five nodes: lon (0.06 + 5) / 5, lat 5 / 5.
        assert_approx_eq!(f64, s.incident.location.lon, 1.012 + 0.002, epsilon = 1e-12);
        assert_approx_eq!(f64, s.incident.location.lat, 1.0 - 0.0015, epsilon = 1e-12);
        assert_eq!(s.incident.id, "I1");
        assert_eq!(s.incident.status, IncidentStatus::Unassigned);
    }

    #[test]
    fn too_many_ambulances_is_an_error() {
        let (net, _) = street_with_island();
        let config = ScenarioConfig { ambulance_count: 6, ..ScenarioConfig::default() };
        let result = Scenario::build(&net, vec![], &config);
        assert!(matches!(
            result,
            Err(DispatchError::NotEnoughNodes { requested: 6, available: 5 })
        ));
    }

    #[test]
    fn empty_network_is_an_error() {
        let result = Scenario::build(&RoadNetwork::empty(), vec![], &ScenarioConfig::default());
        assert!(matches!(result, Err(DispatchError::Spatial(_))));
    }

    #[test]
    fn dispatch_applies_selection() {
        let (net, [n0, ..]) = street_with_island();
        let hospitals = vec![crate::Hospital::new("H1", GeoPoint::new(0.0, 0.0))];
        let config = ScenarioConfig {
            ambulance_count: 2,
            incident_offset_lon: 0.0,
            incident_offset_lat: 0.0,
            ..ScenarioConfig::default()
        };
        let mut s = Scenario::build(&net, hospitals, &config).unwrap();
        // Pin the incident onto the street so at least one ambulance is in reach.
        s.incident.location = net.position(n0).unwrap();
        s.ambulances[0].node = n0;

        let (selection, assignment) = s.dispatch(&net).unwrap();
        let assignment = assignment.unwrap();
        assert_eq!(selection.incident_node, n0);
        assert_eq!(s.incident.status, IncidentStatus::Assigned);
        assert_eq!(s.incident.assigned_to.as_deref(), Some(assignment.ambulance_id.as_str()));
        assert_eq!(assignment.eta_to_incident_secs, 0.0);
        assert_eq!(assignment.hospital_name.as_deref(), Some("H1"));
    }

    #[test]
    fn second_dispatch_of_same_incident_is_refused() {
        let (net, [n0, n1, ..]) = street_with_island();
        let config = ScenarioConfig { ambulance_count: 2, ..ScenarioConfig::default() };
        let mut s = Scenario::build(&net, vec![], &config).unwrap();
        s.incident.location = net.position(n0).unwrap();
        s.ambulances[0].node = n0;
        s.ambulances[1].node = n1;

        let (_, first) = s.dispatch(&net).unwrap();
        assert_eq!(first.unwrap().ambulance_id, "A1");
        let before = s.clone();

        let second = s.dispatch(&net);
        assert!(matches!(second, Err(DispatchError::AlreadyAssigned(ref id)) if id == "I1"));
        assert_eq!(s.ambulances, before.ambulances);
        assert_eq!(s.incident, before.incident);
        let statuses: Vec<_> = s.ambulances.iter().map(|a| a.status).collect();
        assert_eq!(statuses, [AmbulanceStatus::Dispatched, AmbulanceStatus::Available]);
    }

    #[test]
    fn dispatched_ambulances_are_not_candidates() {
        let (net, [n0, n1, ..]) = street_with_island();
        let config = ScenarioConfig { ambulance_count: 2, ..ScenarioConfig::default() };
        let mut s = Scenario::build(&net, vec![], &config).unwrap();
        s.incident.location = net.position(n0).unwrap();
        s.ambulances[0].node = n0;
        s.ambulances[1].node = n1;
        s.dispatch(&net).unwrap();
        let first_details = s.ambulances[0].dispatch.clone();

        // A new incident at the same spot: A1 is closer but already out.
        s.incident = Incident::new("I2", net.position(n0).unwrap());
        let (selection, assignment) = s.dispatch(&net).unwrap();

        assert_eq!(selection.ambulance.outcomes.len(), 1);
        assert_eq!(selection.ambulance.outcome(0), None);
        assert_eq!(selection.ambulance.chosen(), Some(1));
        assert_eq!(selection.ambulance(&s.ambulances).unwrap().id, "A2");
        let assignment = assignment.unwrap();
        assert_eq!(assignment.ambulance_id, "A2");
        assert_approx_eq!(f64, assignment.eta_to_incident_secs, 100.0, epsilon = 1e-9);
        assert_eq!(s.ambulances[0].dispatch, first_details);
        assert_eq!(s.incident.assigned_to.as_deref(), Some("A2"));
    }
}
