//! Geographic coordinate value type.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use geo::{Coord, Point};

use crate::distance::haversine_km;

/// A latitude/longitude pair in decimal degrees.
///
/// Equality and hashing compare the exact bit patterns of both coordinates,
/// so two points are the same graph node or hotspot group only when their
/// coordinates match exactly. No range validation is applied.
///
/// # Examples
/// ```
/// use patrol_core::GeoPoint;
///
/// let a = GeoPoint::new(43.65, -79.38);
/// let b = GeoPoint::new(43.65, -79.38);
/// assert_eq!(a, b);
/// assert_eq!(a.distance_km(b), 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl GeoPoint {
    /// Construct a point from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(self, other: Self) -> f64 {
        haversine_km(self, other)
    }

    /// Total order on latitude then longitude, used to keep grouped output
    /// deterministic.
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.lat
            .total_cmp(&other.lat)
            .then_with(|| self.lon.total_cmp(&other.lon))
    }

    fn key(self) -> (u64, u64) {
        (self.lat.to_bits(), self.lon.to_bits())
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for GeoPoint {}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// WGS84 axis order: `x = longitude`, `y = latitude`.
impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.lon,
            y: point.lat,
        }
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Self::from(Coord::from(point))
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}
