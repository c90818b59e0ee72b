//! CSV loaders for incident and waypoint datasets.
//!
//! Column names follow the public Toronto open-data exports (`Lat`, `Long`,
//! `occurrencedate`, `Junction_ID`) and the lowercase names used elsewhere in
//! the workspace. Unknown columns are ignored.

use std::io::Read;

use camino::Utf8Path;
use log::debug;
use patrol_core::{GeoPoint, IncidentRecord, InfrastructureWaypoint};
use serde::Deserialize;

use crate::{DatasetError, parse_occurrence_timestamp};

#[derive(Debug, Deserialize)]
struct IncidentRow {
    #[serde(rename = "latitude", alias = "Lat", alias = "lat")]
    latitude: f64,
    #[serde(rename = "longitude", alias = "Long", alias = "lon", alias = "long")]
    longitude: f64,
    #[serde(rename = "occurrence_timestamp", alias = "occurrencedate")]
    occurred_at: String,
}

#[derive(Debug, Deserialize)]
struct WaypointRow {
    #[serde(rename = "id", alias = "Junction_ID")]
    id: String,
    #[serde(rename = "latitude", alias = "Lat", alias = "lat")]
    latitude: f64,
    #[serde(rename = "longitude", alias = "Long", alias = "lon", alias = "long")]
    longitude: f64,
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn finite_point(row: u64, latitude: f64, longitude: f64) -> Result<GeoPoint, DatasetError> {
    if latitude.is_finite() && longitude.is_finite() {
        Ok(GeoPoint::new(latitude, longitude))
    } else {
        Err(DatasetError::Coordinate {
            row,
            latitude,
            longitude,
        })
    }
}

fn open(path: &Utf8Path) -> Result<impl Read, DatasetError> {
    patrol_fs::open_utf8_file(path).map_err(|source| DatasetError::Open {
        path: path.to_owned(),
        source,
    })
}

/// Decode incident records from CSV.
///
/// # Examples
/// ```
/// use patrol_data::read_incidents;
///
/// let csv = "Lat,Long,occurrencedate\n43.65,-79.38,2024-03-01T19:00:00\n";
/// let incidents = read_incidents(csv.as_bytes())?;
/// assert_eq!(incidents.len(), 1);
/// # Ok::<(), patrol_data::DatasetError>(())
/// ```
pub fn read_incidents<R: Read>(reader: R) -> Result<Vec<IncidentRecord>, DatasetError> {
    let mut incidents = Vec::new();
    for (row, record) in (1_u64..).zip(csv_reader(reader).deserialize::<IncidentRow>()) {
        let record = record.map_err(|source| DatasetError::Decode { row, source })?;
        let location = finite_point(row, record.latitude, record.longitude)?;
        let occurred_at = parse_occurrence_timestamp(&record.occurred_at).ok_or_else(|| {
            DatasetError::Timestamp {
                row,
                input: record.occurred_at.clone(),
            }
        })?;
        incidents.push(IncidentRecord::new(location, occurred_at));
    }
    debug!("decoded {} incidents", incidents.len());
    Ok(incidents)
}

/// Decode infrastructure waypoints from CSV, preserving row order.
pub fn read_waypoints<R: Read>(reader: R) -> Result<Vec<InfrastructureWaypoint>, DatasetError> {
    let mut waypoints = Vec::new();
    for (row, record) in (1_u64..).zip(csv_reader(reader).deserialize::<WaypointRow>()) {
        let record = record.map_err(|source| DatasetError::Decode { row, source })?;
        let location = finite_point(row, record.latitude, record.longitude)?;
        waypoints.push(InfrastructureWaypoint::new(record.id, location));
    }
    debug!("decoded {} waypoints", waypoints.len());
    Ok(waypoints)
}

/// Load incident records from a CSV file.
pub fn load_incidents(path: &Utf8Path) -> Result<Vec<IncidentRecord>, DatasetError> {
    read_incidents(open(path)?)
}

/// Load infrastructure waypoints from a CSV file.
pub fn load_waypoints(path: &Utf8Path) -> Result<Vec<InfrastructureWaypoint>, DatasetError> {
    read_waypoints(open(path)?)
}
