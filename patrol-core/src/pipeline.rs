//! Patrol route pipeline.
//!
//! Extracts hotspots, anchors the route at the nearest waypoint, orders the
//! hotspots with a [`TourSolver`] and hands the result to a [`RouteSink`].
//! Any failure aborts the run before anything is rendered or stored.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use thiserror::Error;

use crate::{
    DEFAULT_MAX_RADIUS_KM, GeoPoint, Graph, Hotspot, HotspotError, HotspotWindow, IncidentRecord,
    InfrastructureWaypoint, LastRouteSlot, MapArtefact, ParseError, RenderError, RouteSink, Tour,
    TourClosure, TourError, TourQuality, TourRequest, TourSolver, WaypointError,
    build_complete_graph, extract_hotspots, nearest_waypoint,
};

/// Broad category of a pipeline failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FailureKind {
    /// A window timestamp was malformed.
    Parse,
    /// No incidents or no hotspots matched.
    NoData,
    /// The waypoint dataset was empty.
    EmptyReferenceSet,
    /// The optimizer received no stops.
    EmptyStops,
    /// The sink failed to persist the artefact.
    Render,
}

/// Errors surfaced by [`PatrolPlanner`].
#[derive(Debug, Error)]
pub enum PatrolError {
    /// A window timestamp could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// Hotspot extraction found nothing to patrol.
    #[error(transparent)]
    NoData(#[from] HotspotError),
    /// No waypoint was available to anchor the route.
    #[error(transparent)]
    Waypoint(#[from] WaypointError),
    /// The optimizer rejected the stop set.
    #[error(transparent)]
    Tour(#[from] TourError),
    /// The sink failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl PatrolError {
    /// Failure category for structured reporting.
    #[must_use]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Parse(_) => FailureKind::Parse,
            Self::NoData(_) => FailureKind::NoData,
            Self::Waypoint(WaypointError::EmptyReferenceSet) => FailureKind::EmptyReferenceSet,
            Self::Tour(TourError::EmptyStops) => FailureKind::EmptyStops,
            Self::Render(_) => FailureKind::Render,
        }
    }
}

/// Tunables for [`PatrolPlanner`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Hotspots further than this from the origin are ignored.
    pub max_radius_km: f64,
    /// Whether tours return to the waypoint.
    pub closure: TourClosure,
    /// Also build the complete graph over the waypoint and hotspots.
    pub build_graph: bool,
    /// Time budget handed to the solver for each run.
    pub deadline: Option<Duration>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_radius_km: DEFAULT_MAX_RADIUS_KM,
            closure: TourClosure::Open,
            build_graph: false,
            deadline: None,
        }
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PatrolRoute {
    /// Patrol origin.
    pub origin: GeoPoint,
    /// Anchor waypoint nearest the origin.
    pub waypoint: InfrastructureWaypoint,
    /// Hotspots visited by the tour.
    pub hotspots: Vec<Hotspot>,
    /// Ordered tour starting at the waypoint.
    pub tour: Tour,
    /// Exactness of the tour.
    pub quality: TourQuality,
    /// Complete graph over the waypoint and hotspots, when requested.
    pub graph: Option<Graph>,
}

impl PatrolRoute {
    /// Map artefact describing this route.
    #[must_use]
    pub fn artefact(&self) -> MapArtefact {
        MapArtefact::assemble(self.origin, &self.waypoint, &self.hotspots, &self.tour)
    }
}

/// Runs the patrol pipeline against read-only reference datasets.
pub struct PatrolPlanner<'a, S>
where
    S: TourSolver,
{
    incidents: &'a [IncidentRecord],
    waypoints: &'a [InfrastructureWaypoint],
    solver: S,
    config: PlannerConfig,
}

impl<'a, S> PatrolPlanner<'a, S>
where
    S: TourSolver,
{
    /// Construct a planner with default configuration.
    pub fn new(
        incidents: &'a [IncidentRecord],
        waypoints: &'a [InfrastructureWaypoint],
        solver: S,
    ) -> Self {
        Self::with_config(incidents, waypoints, solver, PlannerConfig::default())
    }

    /// Construct a planner with explicit configuration.
    pub const fn with_config(
        incidents: &'a [IncidentRecord],
        waypoints: &'a [InfrastructureWaypoint],
        solver: S,
        config: PlannerConfig,
    ) -> Self {
        Self {
            incidents,
            waypoints,
            solver,
            config,
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Compute a patrol route without rendering it.
    pub fn plan(
        &self,
        origin: GeoPoint,
        window: &HotspotWindow,
    ) -> Result<PatrolRoute, PatrolError> {
        let hotspots = extract_hotspots(self.incidents, origin, window, self.config.max_radius_km)?;
        let waypoint = nearest_waypoint(self.waypoints, origin)?.clone();
        info!(
            "nearest waypoint {} at {:.3} km",
            waypoint.id,
            origin.distance_km(waypoint.location)
        );

        let stops: Vec<GeoPoint> = hotspots.iter().map(|hotspot| hotspot.location).collect();
        let graph = self.config.build_graph.then(|| {
            let mut nodes = Vec::with_capacity(stops.len() + 1);
            nodes.push(waypoint.location);
            nodes.extend_from_slice(&stops);
            let graph = build_complete_graph(&nodes);
            debug!(
                "complete graph: {} nodes, {} edges",
                graph.len(),
                graph.edge_count()
            );
            graph
        });

        let mut request =
            TourRequest::new(waypoint.location, stops).with_closure(self.config.closure);
        if let Some(budget) = self.config.deadline {
            request = request.with_deadline(Instant::now() + budget);
        }
        let outcome = self.solver.solve(&request)?;
        if outcome.quality == TourQuality::Partial {
            warn!(
                "solver deadline expired after {} candidates; using best tour found",
                outcome.diagnostics.candidates_evaluated
            );
        }
        info!(
            "tour over {} hotspots: {:.3} km ({:?})",
            outcome.tour.stop_count(),
            outcome.tour.total_km(),
            outcome.quality
        );

        Ok(PatrolRoute {
            origin,
            waypoint,
            hotspots,
            tour: outcome.tour,
            quality: outcome.quality,
            graph,
        })
    }

    /// Parse the window, plan the route, render it, then record it in `slot`.
    ///
    /// Nothing is rendered or stored when any step fails.
    pub fn generate_patrol_route(
        &self,
        origin_lat: f64,
        origin_lon: f64,
        window_start: &str,
        window_end: &str,
        sink: &dyn RouteSink,
        slot: &LastRouteSlot,
    ) -> Result<Arc<PatrolRoute>, PatrolError> {
        let window = HotspotWindow::parse(window_start, window_end)?;
        let route = self.plan(GeoPoint::new(origin_lat, origin_lon), &window)?;
        sink.render(&route.artefact())?;
        let route = Arc::new(route);
        slot.replace(Arc::clone(&route));
        Ok(route)
    }
}
