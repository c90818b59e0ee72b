//! Facade crate for the patrol route planner.
//!
//! This crate re-exports the core domain types and exposes the tour solver
//! and dataset adapters behind feature flags.

#![forbid(unsafe_code)]

pub use patrol_core::{
    DEFAULT_MAX_RADIUS_KM, Diagnostics, FailureKind, GeoPoint, Graph, Hotspot, HotspotError,
    HotspotWindow, IncidentRecord, InfrastructureWaypoint, LastRouteSlot, MapArtefact, Marker,
    MarkerKind, ParseError, PatrolError, PatrolPlanner, PatrolRoute, PlannerConfig, RenderError,
    RouteSink, Tour, TourClosure, TourError, TourOutcome, TourQuality, TourRequest, TourSolver,
    WaypointError, build_complete_graph, extract_hotspots, haversine_km, nearest_waypoint,
    parse_window_timestamp, shortest_path,
};

#[cfg(feature = "solver")]
pub use patrol_solver::{
    DEFAULT_EXACT_STOP_LIMIT, ExhaustiveSolver, HeuristicSolver, PatrolSolver, PatrolSolverConfig,
};

#[cfg(feature = "data")]
pub use patrol_data::{
    DatasetError, GeoJsonRouteSink, load_incidents, load_waypoints, read_artefact,
};
