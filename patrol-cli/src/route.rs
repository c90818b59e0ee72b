//! Route command implementation for the patrol CLI.

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, ValueEnum};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use patrol_core::{
    DEFAULT_MAX_RADIUS_KM, GeoPoint, Hotspot, InfrastructureWaypoint, LastRouteSlot,
    PatrolPlanner, PatrolRoute, PlannerConfig, TourClosure, TourQuality, TourSolver,
};
use patrol_data::{GeoJsonRouteSink, load_incidents, load_waypoints};
use patrol_solver::{DEFAULT_EXACT_STOP_LIMIT, PatrolSolver, PatrolSolverConfig};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;

use crate::{
    ARG_OUTPUT, ARG_ROUTE_CLOSURE, ARG_ROUTE_DEADLINE_MS, ARG_ROUTE_EXACT_STOP_LIMIT,
    ARG_ROUTE_INCIDENTS, ARG_ROUTE_ORIGIN_LAT, ARG_ROUTE_ORIGIN_LON, ARG_ROUTE_RADIUS_KM,
    ARG_ROUTE_WAYPOINTS, ARG_ROUTE_WINDOW_END, ARG_ROUTE_WINDOW_START, CliError, DEFAULT_OUTPUT,
    ENV_ROUTE_INCIDENTS, ENV_ROUTE_ORIGIN_LAT, ENV_ROUTE_ORIGIN_LON, ENV_ROUTE_WAYPOINTS,
    ENV_ROUTE_WINDOW_END, ENV_ROUTE_WINDOW_START, write_json,
};

/// Whether the patrol returns to its starting junction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ClosureMode {
    /// End at the last hotspot.
    #[default]
    Open,
    /// Return to the junction after the last hotspot.
    Closed,
}

impl From<ClosureMode> for TourClosure {
    fn from(mode: ClosureMode) -> Self {
        match mode {
            ClosureMode::Open => Self::Open,
            ClosureMode::Closed => Self::Closed,
        }
    }
}

/// CLI arguments for the `route` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Plan a patrol route from historical incidents. Hotspots \
                 active during the window are ordered into a tour starting \
                 at the junction nearest the origin, written to a GeoJSON \
                 map artefact, and summarised on stdout as JSON.",
    about = "Plan a patrol route through incident hotspots"
)]
#[ortho_config(prefix = "PATROL")]
pub(crate) struct RouteArgs {
    /// Incident CSV (`Lat`, `Long`, `occurrencedate`).
    #[arg(long = ARG_ROUTE_INCIDENTS, value_name = "path")]
    #[serde(default)]
    pub(crate) incidents: Option<Utf8PathBuf>,
    /// Junction CSV (`Junction_ID`, `Lat`, `Long`).
    #[arg(long = ARG_ROUTE_WAYPOINTS, value_name = "path")]
    #[serde(default)]
    pub(crate) waypoints: Option<Utf8PathBuf>,
    /// Latitude of the patrol origin.
    #[arg(long = ARG_ROUTE_ORIGIN_LAT, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) origin_lat: Option<f64>,
    /// Longitude of the patrol origin.
    #[arg(long = ARG_ROUTE_ORIGIN_LON, value_name = "degrees", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) origin_lon: Option<f64>,
    /// Window start, `YYYY-MM-DD HH:MM:SS`.
    #[arg(long = ARG_ROUTE_WINDOW_START, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) window_start: Option<String>,
    /// Window end, `YYYY-MM-DD HH:MM:SS`.
    #[arg(long = ARG_ROUTE_WINDOW_END, value_name = "timestamp")]
    #[serde(default)]
    pub(crate) window_end: Option<String>,
    /// Ignore hotspots further than this from the origin (default 5 km).
    #[arg(long = ARG_ROUTE_RADIUS_KM, value_name = "km")]
    #[serde(default)]
    pub(crate) radius_km: Option<f64>,
    /// Whether the tour returns to the junction.
    #[arg(long = ARG_ROUTE_CLOSURE, value_enum, value_name = "mode")]
    #[serde(default)]
    pub(crate) closure: Option<ClosureMode>,
    /// Largest hotspot count solved exactly (default 9).
    #[arg(long = ARG_ROUTE_EXACT_STOP_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) exact_stop_limit: Option<usize>,
    /// Solver time budget in milliseconds.
    #[arg(long = ARG_ROUTE_DEADLINE_MS, value_name = "ms")]
    #[serde(default)]
    pub(crate) deadline_ms: Option<u64>,
    /// Where to write the GeoJSON map artefact.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RouteArgs {
    pub(crate) fn into_config(self) -> Result<RouteConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RouteConfig::try_from(merged)
    }
}

/// Resolved `route` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RouteConfig {
    pub(crate) incidents: Utf8PathBuf,
    pub(crate) waypoints: Utf8PathBuf,
    pub(crate) origin: GeoPoint,
    pub(crate) window_start: String,
    pub(crate) window_end: String,
    pub(crate) planner: PlannerConfig,
    pub(crate) solver: PatrolSolverConfig,
    pub(crate) output: Utf8PathBuf,
}

impl RouteConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.incidents, ARG_ROUTE_INCIDENTS)?;
        Self::require_existing(&self.waypoints, ARG_ROUTE_WAYPOINTS)?;
        Ok(())
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match patrol_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

fn require_range(
    field: &'static str,
    value: f64,
    range: std::ops::RangeInclusive<f64>,
) -> Result<f64, CliError> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(CliError::InvalidArgument {
            field,
            reason: format!("{value} is outside {}..={}", range.start(), range.end()),
        })
    }
}

impl TryFrom<RouteArgs> for RouteConfig {
    type Error = CliError;

    fn try_from(args: RouteArgs) -> Result<Self, Self::Error> {
        let incidents = args.incidents.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_INCIDENTS,
            env: ENV_ROUTE_INCIDENTS,
        })?;
        let waypoints = args.waypoints.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_WAYPOINTS,
            env: ENV_ROUTE_WAYPOINTS,
        })?;
        let origin_lat = args.origin_lat.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_ORIGIN_LAT,
            env: ENV_ROUTE_ORIGIN_LAT,
        })?;
        let origin_lon = args.origin_lon.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_ORIGIN_LON,
            env: ENV_ROUTE_ORIGIN_LON,
        })?;
        let window_start = args.window_start.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_WINDOW_START,
            env: ENV_ROUTE_WINDOW_START,
        })?;
        let window_end = args.window_end.ok_or(CliError::MissingArgument {
            field: ARG_ROUTE_WINDOW_END,
            env: ENV_ROUTE_WINDOW_END,
        })?;

        let origin = GeoPoint::new(
            require_range(ARG_ROUTE_ORIGIN_LAT, origin_lat, -90.0..=90.0)?,
            require_range(ARG_ROUTE_ORIGIN_LON, origin_lon, -180.0..=180.0)?,
        );
        let max_radius_km = args.radius_km.unwrap_or(DEFAULT_MAX_RADIUS_KM);
        if !(max_radius_km.is_finite() && max_radius_km >= 0.0) {
            return Err(CliError::InvalidArgument {
                field: ARG_ROUTE_RADIUS_KM,
                reason: format!("{max_radius_km} is not a non-negative distance"),
            });
        }

        Ok(Self {
            incidents,
            waypoints,
            origin,
            window_start,
            window_end,
            planner: PlannerConfig {
                max_radius_km,
                closure: args.closure.unwrap_or_default().into(),
                deadline: args.deadline_ms.map(Duration::from_millis),
                ..PlannerConfig::default()
            },
            solver: PatrolSolverConfig {
                exact_stop_limit: args.exact_stop_limit.unwrap_or(DEFAULT_EXACT_STOP_LIMIT),
            },
            output: args.output.unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT)),
        })
    }
}

/// JSON summary printed after a successful route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct RouteReport {
    pub(crate) origin: GeoPoint,
    pub(crate) waypoint: InfrastructureWaypoint,
    pub(crate) hotspots: Vec<Hotspot>,
    pub(crate) tour: Vec<GeoPoint>,
    pub(crate) distance_km: f64,
    pub(crate) quality: TourQuality,
    pub(crate) artefact: Utf8PathBuf,
}

impl RouteReport {
    fn new(route: &PatrolRoute, artefact: &Utf8Path) -> Self {
        Self {
            origin: route.origin,
            waypoint: route.waypoint.clone(),
            hotspots: route.hotspots.clone(),
            tour: route.tour.points().to_vec(),
            distance_km: route.tour.total_km(),
            quality: route.quality,
            artefact: artefact.to_path_buf(),
        }
    }
}

/// Builds a solver instance for the current route invocation.
pub(crate) trait RouteSolverBuilder {
    fn build(&self, config: &RouteConfig) -> Result<Box<dyn TourSolver>, CliError>;
}

pub(crate) struct DefaultRouteSolverBuilder;

impl RouteSolverBuilder for DefaultRouteSolverBuilder {
    fn build(&self, config: &RouteConfig) -> Result<Box<dyn TourSolver>, CliError> {
        Ok(Box::new(PatrolSolver::with_config(config.solver)))
    }
}

pub(crate) fn run_route(args: RouteArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_route_with(args, &DefaultRouteSolverBuilder, &mut stdout)
}

pub(crate) fn run_route_with(
    args: RouteArgs,
    builder: &dyn RouteSolverBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let report = execute_route(args, builder)?;
    write_json(writer, &report)
}

fn execute_route(
    args: RouteArgs,
    builder: &dyn RouteSolverBuilder,
) -> Result<RouteReport, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;

    let incidents = load_incidents(&config.incidents).map_err(|source| CliError::Dataset {
        field: ARG_ROUTE_INCIDENTS,
        path: config.incidents.clone(),
        source,
    })?;
    let waypoints = load_waypoints(&config.waypoints).map_err(|source| CliError::Dataset {
        field: ARG_ROUTE_WAYPOINTS,
        path: config.waypoints.clone(),
        source,
    })?;
    info!(
        "loaded {} incidents and {} waypoints",
        incidents.len(),
        waypoints.len()
    );

    let solver = builder.build(&config)?;
    let planner =
        PatrolPlanner::with_config(&incidents, &waypoints, solver, config.planner.clone());
    let sink = GeoJsonRouteSink::new(config.output.clone());
    let slot = LastRouteSlot::new();
    let route = planner.generate_patrol_route(
        config.origin.lat,
        config.origin.lon,
        &config.window_start,
        &config.window_end,
        &sink,
        &slot,
    )?;
    Ok(RouteReport::new(&route, sink.path()))
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RouteConfig, CliError> {
    let merged = RouteArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RouteConfig::try_from(merged)
}
