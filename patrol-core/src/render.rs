//! Map artefacts and the sink that persists them.
//!
//! The core never draws maps. It assembles a [`MapArtefact`] describing the
//! markers and route polyline and hands it to a [`RouteSink`].

use thiserror::Error;

use crate::{GeoPoint, Hotspot, InfrastructureWaypoint, Tour};

/// Popup label of the origin marker.
pub const STATION_LABEL: &str = "Police Station";

/// Popup label of the route polyline.
pub const ROUTE_LABEL: &str = "Optimized Patrol Route";

/// Role a marker plays on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MarkerKind {
    /// The patrol origin.
    Station,
    /// The nearest infrastructure waypoint.
    Waypoint,
    /// An incident hotspot.
    Hotspot,
}

/// A labelled point on the map.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marker {
    /// Marker role.
    pub kind: MarkerKind,
    /// Marker position.
    pub location: GeoPoint,
    /// Popup text.
    pub label: String,
    /// Incidents per day, for hotspot markers.
    pub intensity: Option<f64>,
}

/// Everything a map renderer needs to draw one patrol route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapArtefact {
    /// Origin marker.
    pub station: Marker,
    /// Nearest waypoint marker.
    pub waypoint: Marker,
    /// One marker per hotspot.
    pub hotspots: Vec<Marker>,
    /// Tour coordinates in visiting order.
    pub route: Vec<GeoPoint>,
    /// Popup text of the route polyline.
    pub route_label: String,
}

impl MapArtefact {
    /// Assemble an artefact from pipeline results.
    ///
    /// # Examples
    /// ```
    /// use patrol_core::{GeoPoint, Hotspot, InfrastructureWaypoint, MapArtefact, Tour, TourClosure};
    ///
    /// let waypoint = InfrastructureWaypoint::new("J1", GeoPoint::new(43.651, -79.381));
    /// let hotspot = Hotspot {
    ///     location: GeoPoint::new(43.652, -79.382),
    ///     intensity: 1.5,
    ///     distance_km: 0.2,
    ///     incident_count: 3,
    /// };
    /// let tour = Tour::new(waypoint.location, &[hotspot.location], TourClosure::Open);
    /// let artefact = MapArtefact::assemble(GeoPoint::new(43.65, -79.38), &waypoint, &[hotspot], &tour);
    /// assert_eq!(artefact.waypoint.label, "Nearest Junction J1");
    /// assert_eq!(artefact.hotspots[0].label, "Hotspot: 1.50 incidents/day");
    /// assert_eq!(artefact.route.len(), 2);
    /// ```
    #[must_use]
    pub fn assemble(
        origin: GeoPoint,
        waypoint: &InfrastructureWaypoint,
        hotspots: &[Hotspot],
        tour: &Tour,
    ) -> Self {
        Self {
            station: Marker {
                kind: MarkerKind::Station,
                location: origin,
                label: STATION_LABEL.to_owned(),
                intensity: None,
            },
            waypoint: Marker {
                kind: MarkerKind::Waypoint,
                location: waypoint.location,
                label: format!("Nearest Junction {}", waypoint.id),
                intensity: None,
            },
            hotspots: hotspots
                .iter()
                .map(|hotspot| Marker {
                    kind: MarkerKind::Hotspot,
                    location: hotspot.location,
                    label: hotspot.label(),
                    intensity: Some(hotspot.intensity),
                })
                .collect(),
            route: tour.points().to_vec(),
            route_label: ROUTE_LABEL.to_owned(),
        }
    }

    /// All markers: station, waypoint, then hotspots.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        [&self.station, &self.waypoint]
            .into_iter()
            .chain(self.hotspots.iter())
    }
}

/// A sink failed to persist an artefact.
#[derive(Debug, Error)]
#[error("failed to render route to {target}: {source}")]
pub struct RenderError {
    /// Where the sink was writing.
    pub target: String,
    /// Underlying failure.
    #[source]
    pub source: Box<dyn std::error::Error + Send + Sync>,
}

impl RenderError {
    /// Wrap a sink-specific failure.
    pub fn new(
        target: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            target: target.into(),
            source: source.into(),
        }
    }
}

/// Persist or display a rendered patrol route.
///
/// # Examples
///
/// ```
/// use std::cell::Cell;
/// use patrol_core::{MapArtefact, RenderError, RouteSink};
///
/// struct CountingSink(Cell<usize>);
///
/// impl RouteSink for CountingSink {
///     fn render(&self, _artefact: &MapArtefact) -> Result<(), RenderError> {
///         self.0.set(self.0.get() + 1);
///         Ok(())
///     }
/// }
///
/// let sink = CountingSink(Cell::new(0));
/// assert_eq!(sink.0.get(), 0);
/// ```
pub trait RouteSink {
    /// Persist `artefact`.
    fn render(&self, artefact: &MapArtefact) -> Result<(), RenderError>;
}

impl<T: RouteSink + ?Sized> RouteSink for &T {
    fn render(&self, artefact: &MapArtefact) -> Result<(), RenderError> {
        (**self).render(artefact)
    }
}
