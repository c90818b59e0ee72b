//! GeoJSON map artefacts.
//!
//! Each marker becomes a `Point` feature and the tour becomes a single
//! `LineString` feature. Every feature carries a `kind` property (`station`,
//! `waypoint`, `hotspot` or `route`) and a `label`; hotspots also carry
//! `intensity`. Coordinates follow GeoJSON order: longitude, then latitude.

use std::io::{Read, Write};

use camino::{Utf8Path, Utf8PathBuf};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use log::info;
use patrol_core::{GeoPoint, MapArtefact, Marker, MarkerKind, RenderError, RouteSink};

use crate::DatasetError;

const KIND: &str = "kind";
const LABEL: &str = "label";
const INTENSITY: &str = "intensity";
const ROUTE_KIND: &str = "route";

/// [`RouteSink`] writing a GeoJSON `FeatureCollection` to a file.
///
/// Missing parent directories are created. An existing file is replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoJsonRouteSink {
    path: Utf8PathBuf,
}

impl GeoJsonRouteSink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Destination file.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

impl RouteSink for GeoJsonRouteSink {
    fn render(&self, artefact: &MapArtefact) -> Result<(), RenderError> {
        let target = self.path.as_str();
        let payload = serde_json::to_vec_pretty(&to_feature_collection(artefact))
            .map_err(|err| RenderError::new(target, err))?;
        let mut file =
            patrol_fs::create_utf8_file(&self.path).map_err(|err| RenderError::new(target, err))?;
        file.write_all(&payload)
            .and_then(|()| file.flush())
            .map_err(|err| RenderError::new(target, err))?;
        info!("wrote map artefact to {target}");
        Ok(())
    }
}

fn marker_kind(kind: MarkerKind) -> &'static str {
    match kind {
        MarkerKind::Station => "station",
        MarkerKind::Waypoint => "waypoint",
        MarkerKind::Hotspot => "hotspot",
    }
}

fn point_feature(marker: &Marker) -> Feature {
    let point = geo::Point::from(marker.location);
    let mut feature = Feature::from(Geometry::new(Value::from(&point)));
    feature.set_property(KIND, marker_kind(marker.kind));
    feature.set_property(LABEL, marker.label.as_str());
    if let Some(intensity) = marker.intensity {
        feature.set_property(INTENSITY, intensity);
    }
    feature
}

/// Convert an artefact to GeoJSON.
#[must_use]
pub fn to_feature_collection(artefact: &MapArtefact) -> FeatureCollection {
    let line: geo::LineString<f64> = artefact
        .route
        .iter()
        .copied()
        .map(geo::Coord::from)
        .collect();
    let mut route = Feature::from(Geometry::new(Value::from(&line)));
    route.set_property(KIND, ROUTE_KIND);
    route.set_property(LABEL, artefact.route_label.as_str());

    let features = artefact
        .markers()
        .map(point_feature)
        .chain(std::iter::once(route))
        .collect();
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn string_property<'a>(feature: &'a Feature, key: &str) -> Result<&'a str, DatasetError> {
    feature
        .property(key)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| DatasetError::Artefact(format!("feature without a {key:?} property")))
}

fn feature_geometry(feature: &Feature) -> Result<Value, DatasetError> {
    feature
        .geometry
        .as_ref()
        .map(|geometry| geometry.value.clone())
        .ok_or_else(|| DatasetError::Artefact("feature without geometry".to_owned()))
}

fn read_marker(feature: &Feature, kind: MarkerKind) -> Result<Marker, DatasetError> {
    let point = geo::Point::<f64>::try_from(feature_geometry(feature)?)?;
    Ok(Marker {
        kind,
        location: GeoPoint::from(point.0),
        label: string_property(feature, LABEL)?.to_owned(),
        intensity: feature
            .property(INTENSITY)
            .and_then(serde_json::Value::as_f64),
    })
}

/// Rebuild an artefact from GeoJSON written by [`GeoJsonRouteSink`].
///
/// Hotspot order is preserved. Exactly one station, waypoint and route
/// feature must be present.
pub fn from_feature_collection(
    collection: &FeatureCollection,
) -> Result<MapArtefact, DatasetError> {
    let mut station = None;
    let mut waypoint = None;
    let mut hotspots = Vec::new();
    let mut route = None;

    for feature in &collection.features {
        match string_property(feature, KIND)? {
            "station" => station = Some(read_marker(feature, MarkerKind::Station)?),
            "waypoint" => waypoint = Some(read_marker(feature, MarkerKind::Waypoint)?),
            "hotspot" => hotspots.push(read_marker(feature, MarkerKind::Hotspot)?),
            ROUTE_KIND => {
                let line = geo::LineString::<f64>::try_from(feature_geometry(feature)?)?;
                let points = line.coords().copied().map(GeoPoint::from).collect();
                route = Some((points, string_property(feature, LABEL)?.to_owned()));
            }
            other => {
                return Err(DatasetError::Artefact(format!(
                    "unknown feature kind {other:?}"
                )));
            }
        }
    }

    let missing = |what: &str| DatasetError::Artefact(format!("no {what} feature"));
    let (route, route_label) = route.ok_or_else(|| missing(ROUTE_KIND))?;
    Ok(MapArtefact {
        station: station.ok_or_else(|| missing("station"))?,
        waypoint: waypoint.ok_or_else(|| missing("waypoint"))?,
        hotspots,
        route,
        route_label,
    })
}

/// Decode an artefact from a GeoJSON reader.
pub fn read_artefact_from<R: Read>(reader: R) -> Result<MapArtefact, DatasetError> {
    let geojson: GeoJson = std::io::read_to_string(reader)?.parse()?;
    let collection = FeatureCollection::try_from(geojson)?;
    from_feature_collection(&collection)
}

/// Load the artefact stored at `path`.
pub fn read_artefact(path: &Utf8Path) -> Result<MapArtefact, DatasetError> {
    let file = patrol_fs::open_utf8_file(path).map_err(|source| DatasetError::Open {
        path: path.to_owned(),
        source,
    })?;
    read_artefact_from(file)
}
