//! Command-line interface for patrol route planning.
//!
//! `patrol route` loads incident and junction CSVs, plans a patrol tour,
//! writes the GeoJSON map artefact and prints a JSON report. `patrol view`
//! prints a previously written artefact. Options can come from flags,
//! `PATROL_CMDS_<COMMAND>_<FIELD>` environment variables or configuration
//! files.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Write;

mod error;
mod route;
mod view;

pub use error::CliError;

use route::{RouteArgs, run_route};
use view::{ViewArgs, run_view};

const ARG_ROUTE_INCIDENTS: &str = "incidents";
const ARG_ROUTE_WAYPOINTS: &str = "waypoints";
const ARG_ROUTE_ORIGIN_LAT: &str = "origin-lat";
const ARG_ROUTE_ORIGIN_LON: &str = "origin-lon";
const ARG_ROUTE_WINDOW_START: &str = "window-start";
const ARG_ROUTE_WINDOW_END: &str = "window-end";
const ARG_ROUTE_RADIUS_KM: &str = "radius-km";
const ARG_ROUTE_CLOSURE: &str = "closure";
const ARG_ROUTE_EXACT_STOP_LIMIT: &str = "exact-stop-limit";
const ARG_ROUTE_DEADLINE_MS: &str = "deadline-ms";
const ARG_OUTPUT: &str = "output";
const ENV_ROUTE_INCIDENTS: &str = "PATROL_CMDS_ROUTE_INCIDENTS";
const ENV_ROUTE_WAYPOINTS: &str = "PATROL_CMDS_ROUTE_WAYPOINTS";
const ENV_ROUTE_ORIGIN_LAT: &str = "PATROL_CMDS_ROUTE_ORIGIN_LAT";
const ENV_ROUTE_ORIGIN_LON: &str = "PATROL_CMDS_ROUTE_ORIGIN_LON";
const ENV_ROUTE_WINDOW_START: &str = "PATROL_CMDS_ROUTE_WINDOW_START";
const ENV_ROUTE_WINDOW_END: &str = "PATROL_CMDS_ROUTE_WINDOW_END";

/// Artefact path used when `--output` is not given.
const DEFAULT_OUTPUT: &str = "optimized_patrol_route.geojson";

/// Run the patrol CLI with the current process arguments and environment.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Route(args) => run_route(args),
        Command::View(args) => run_view(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "patrol",
    about = "Plan patrol routes through historical incident hotspots",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan a patrol route and write its map artefact.
    Route(RouteArgs),
    /// Print the map artefact written by the last route.
    View(ViewArgs),
}

fn write_json<T: Serialize>(writer: &mut dyn Write, value: &T) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::Serialise)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
mod tests;
