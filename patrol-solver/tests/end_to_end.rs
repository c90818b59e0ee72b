//! Runs the full patrol pipeline with the default solver.

use patrol_core::test_support::{RecordingSink, at};
use patrol_core::{
    GeoPoint, IncidentRecord, InfrastructureWaypoint, LastRouteSlot, MarkerKind, PatrolPlanner,
    PlannerConfig, TourClosure, TourQuality, tour_distance_km,
};
use patrol_solver::PatrolSolver;
use rstest::{fixture, rstest};

struct Toronto {
    incidents: Vec<IncidentRecord>,
    junctions: Vec<InfrastructureWaypoint>,
}

#[fixture]
fn toronto() -> Toronto {
    let north = GeoPoint::new(43.66, -79.385);
    let south = GeoPoint::new(43.645, -79.375);
    Toronto {
        incidents: vec![
            IncidentRecord::new(north, at(2024, 3, 4, 19)),
            IncidentRecord::new(north, at(2024, 3, 6, 20)),
            IncidentRecord::new(south, at(2024, 3, 6, 21)),
            IncidentRecord::new(south, at(2024, 3, 8, 8)),
        ],
        junctions: vec![
            InfrastructureWaypoint::new("J1", GeoPoint::new(43.651, -79.381)),
            InfrastructureWaypoint::new("J2", GeoPoint::new(43.7, -79.5)),
        ],
    }
}

#[rstest]
#[case(TourClosure::Open)]
#[case(TourClosure::Closed)]
fn evening_patrol_starts_at_the_nearest_junction(toronto: Toronto, #[case] closure: TourClosure) {
    let config = PlannerConfig {
        closure,
        ..PlannerConfig::default()
    };
    let planner = PatrolPlanner::with_config(
        &toronto.incidents,
        &toronto.junctions,
        PatrolSolver::new(),
        config,
    );
    let sink = RecordingSink::default();
    let slot = LastRouteSlot::new();

    let route = planner
        .generate_patrol_route(
            43.65,
            -79.38,
            "2024-03-01 18:00:00",
            "2024-03-01 22:00:00",
            &sink,
            &slot,
        )
        .expect("route generated");

    assert_eq!(route.waypoint.id, "J1");
    assert_eq!(route.quality, TourQuality::Optimal);
    assert_eq!(route.hotspots.len(), 2);
    let intensities: Vec<f64> = route.hotspots.iter().map(|h| h.intensity).collect();
    assert_eq!(intensities, vec![0.5, 1.0]);

    let mut reversed = route.tour.stops().to_vec();
    reversed.reverse();
    let mut alternative = vec![route.waypoint.location];
    alternative.extend(reversed);
    assert!(route.tour.total_km() <= tour_distance_km(&alternative, closure));

    let rendered = sink.rendered();
    let artefact = rendered.first().expect("artefact rendered");
    let hotspot_markers = artefact
        .markers()
        .filter(|marker| marker.kind == MarkerKind::Hotspot)
        .count();
    assert_eq!(hotspot_markers, 2);
    assert!(slot.latest().is_some());
}
