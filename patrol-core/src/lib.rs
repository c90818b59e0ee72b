//! Core domain types and algorithms for patrol route planning.
//!
//! The crate turns historical incident records and a set of infrastructure
//! waypoints into an ordered patrol tour:
//!
//! 1. [`extract_hotspots`] filters incidents to a time window and groups
//!    them by coordinate.
//! 2. [`nearest_waypoint`] anchors the tour at the closest waypoint.
//! 3. A [`TourSolver`] orders the hotspots after the anchor.
//! 4. A [`RouteSink`] persists the resulting [`MapArtefact`].
//!
//! [`PatrolPlanner`] drives the whole pipeline and records each successful
//! run in a [`LastRouteSlot`]. Solver implementations live in
//! `patrol-solver`; file formats and sinks live in `patrol-data`.

#![forbid(unsafe_code)]

mod distance;
mod graph;
mod hotspot;
mod incident;
mod pipeline;
mod point;
mod render;
mod search;
mod slot;
mod tour;
mod waypoint;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use distance::{EARTH_RADIUS_KM, haversine_km, path_length_km};
pub use graph::{Graph, build_complete_graph};
pub use hotspot::{
    DEFAULT_MAX_RADIUS_KM, Hotspot, HotspotError, HotspotWindow, ParseError,
    WINDOW_TIMESTAMP_FORMAT, extract_hotspots, parse_window_timestamp,
};
pub use incident::{IncidentRecord, InfrastructureWaypoint};
pub use pipeline::{FailureKind, PatrolError, PatrolPlanner, PatrolRoute, PlannerConfig};
pub use point::GeoPoint;
pub use render::{
    MapArtefact, Marker, MarkerKind, ROUTE_LABEL, RenderError, RouteSink, STATION_LABEL,
};
pub use search::shortest_path;
pub use slot::LastRouteSlot;
pub use tour::{
    Diagnostics, Tour, TourClosure, TourError, TourOutcome, TourQuality, TourRequest, TourSolver,
    tour_distance_km,
};
pub use waypoint::{WaypointError, nearest_waypoint};
