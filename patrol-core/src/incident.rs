//! Reference dataset records.
//!
//! Both datasets are loaded once and only ever read by the core.

use chrono::NaiveDateTime;

use crate::GeoPoint;

/// A historical incident with its location and local occurrence time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IncidentRecord {
    /// Where the incident occurred.
    pub location: GeoPoint,
    /// Wall-clock time of the occurrence.
    pub occurred_at: NaiveDateTime,
}

impl IncidentRecord {
    /// Construct an incident record.
    #[must_use]
    pub const fn new(location: GeoPoint, occurred_at: NaiveDateTime) -> Self {
        Self {
            location,
            occurred_at,
        }
    }
}

/// A fixed infrastructure point, such as a road junction, that anchors a
/// patrol route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfrastructureWaypoint {
    /// Identifier from the reference dataset.
    pub id: String,
    /// Position of the waypoint.
    pub location: GeoPoint,
}

impl InfrastructureWaypoint {
    /// Construct a waypoint.
    pub fn new(id: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            id: id.into(),
            location,
        }
    }
}
