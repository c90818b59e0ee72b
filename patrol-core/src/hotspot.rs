//! Hotspot extraction from historical incidents.
//!
//! Incidents are filtered to the month of the window start and to the
//! inclusive hour range of the window, grouped by exact coordinate, and
//! normalised to incidents per day. Only groups within the search radius of
//! the origin survive.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, NaiveDateTime, Timelike};
use log::debug;
use thiserror::Error;

use crate::{GeoPoint, IncidentRecord};

/// Radius applied when the caller does not supply one.
pub const DEFAULT_MAX_RADIUS_KM: f64 = 5.0;

/// Literal format of window timestamps.
pub const WINDOW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A window timestamp could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid timestamp {input:?}: expected YYYY-MM-DD HH:MM:SS")]
pub struct ParseError {
    /// The rejected input.
    pub input: String,
    /// Underlying chrono failure.
    #[source]
    pub source: chrono::ParseError,
}

/// Failures from [`extract_hotspots`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HotspotError {
    /// No incident matched the month and hour filter.
    #[error("no incidents in window")]
    NoIncidentsInWindow,
    /// Incidents matched the window but none lie within the radius.
    #[error("no hotspots within radius of {radius_km} km")]
    NoHotspotsWithinRadius {
        /// Radius that was applied.
        radius_km: f64,
    },
}

/// Requested time window.
///
/// Only the month of `start` and the hours of `start` and `end` take part in
/// filtering. A window whose end hour precedes its start hour matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotspotWindow {
    /// Window start.
    pub start: NaiveDateTime,
    /// Window end.
    pub end: NaiveDateTime,
}

impl HotspotWindow {
    /// Construct a window from parsed timestamps.
    #[must_use]
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Parse a window from two `YYYY-MM-DD HH:MM:SS` strings.
    ///
    /// # Examples
    /// ```
    /// use patrol_core::HotspotWindow;
    ///
    /// let window = HotspotWindow::parse("2024-03-01 18:00:00", "2024-03-01 22:00:00")?;
    /// assert!(window.contains_hour(20));
    /// assert!(!window.contains_hour(23));
    /// # Ok::<(), patrol_core::ParseError>(())
    /// ```
    pub fn parse(start: &str, end: &str) -> Result<Self, ParseError> {
        Ok(Self::new(parse_window_timestamp(start)?, parse_window_timestamp(end)?))
    }

    /// Month (1-12) every matching incident must share.
    #[must_use]
    pub fn target_month(&self) -> u32 {
        self.start.month()
    }

    /// Whether `hour` lies in the inclusive hour range of the window.
    #[must_use]
    pub fn contains_hour(&self, hour: u32) -> bool {
        (self.start.hour()..=self.end.hour()).contains(&hour)
    }

    /// Whether `incident` passes the month and hour filter.
    #[must_use]
    pub fn matches(&self, incident: &IncidentRecord) -> bool {
        incident.occurred_at.month() == self.target_month()
            && self.contains_hour(incident.occurred_at.hour())
    }
}

/// Parse a single window timestamp.
pub fn parse_window_timestamp(input: &str) -> Result<NaiveDateTime, ParseError> {
    NaiveDateTime::parse_from_str(input.trim(), WINDOW_TIMESTAMP_FORMAT).map_err(|source| {
        ParseError {
            input: input.to_owned(),
            source,
        }
    })
}

/// A cluster of incidents at one exact coordinate.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hotspot {
    /// Cluster coordinate.
    pub location: GeoPoint,
    /// Mean incidents per day across the filtered window.
    pub intensity: f64,
    /// Great-circle distance to the origin in kilometres.
    pub distance_km: f64,
    /// Raw number of incidents in the cluster.
    pub incident_count: usize,
}

impl Hotspot {
    /// Popup text shown for the hotspot on a map.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Hotspot: {:.2} incidents/day", self.intensity)
    }
}

/// Extract hotspots active in `window` within `max_radius_km` of `origin`.
///
/// Intensity divides each cluster's count by the number of distinct calendar
/// days present in the whole filtered subset. Results are ordered by
/// latitude, then longitude.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use patrol_core::{GeoPoint, HotspotWindow, IncidentRecord, extract_hotspots};
///
/// let at = |day, hour| {
///     NaiveDate::from_ymd_opt(2024, 3, day)
///         .and_then(|date| date.and_hms_opt(hour, 0, 0))
///         .ok_or("bad date")
/// };
/// let spot = GeoPoint::new(43.651, -79.381);
/// let incidents = vec![
///     IncidentRecord::new(spot, at(1, 19)?),
///     IncidentRecord::new(spot, at(2, 20)?),
/// ];
/// let window = HotspotWindow::new(at(1, 18)?, at(1, 22)?);
/// let hotspots = extract_hotspots(&incidents, GeoPoint::new(43.65, -79.38), &window, 5.0)?;
/// assert_eq!(hotspots.len(), 1);
/// assert_eq!(hotspots[0].intensity, 1.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn extract_hotspots(
    incidents: &[IncidentRecord],
    origin: GeoPoint,
    window: &HotspotWindow,
    max_radius_km: f64,
) -> Result<Vec<Hotspot>, HotspotError> {
    let filtered: Vec<&IncidentRecord> = incidents
        .iter()
        .filter(|incident| window.matches(incident))
        .collect();
    debug!("filtered incident count: {}", filtered.len());
    if filtered.is_empty() {
        return Err(HotspotError::NoIncidentsInWindow);
    }

    let distinct_days = filtered
        .iter()
        .map(|incident| incident.occurred_at.date())
        .collect::<HashSet<_>>()
        .len();

    let mut counts: HashMap<GeoPoint, usize> = HashMap::new();
    for incident in &filtered {
        *counts.entry(incident.location).or_default() += 1;
    }

    let mut hotspots: Vec<Hotspot> = counts
        .into_iter()
        .filter_map(|(location, incident_count)| {
            let distance_km = origin.distance_km(location);
            (distance_km <= max_radius_km).then(|| Hotspot {
                location,
                intensity: per_day(incident_count, distinct_days),
                distance_km,
                incident_count,
            })
        })
        .collect();
    hotspots.sort_by(|lhs, rhs| lhs.location.total_cmp(&rhs.location));
    debug!("hotspots within {max_radius_km} km: {}", hotspots.len());

    if hotspots.is_empty() {
        return Err(HotspotError::NoHotspotsWithinRadius {
            radius_km: max_radius_km,
        });
    }
    Ok(hotspots)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "incident and day counts stay far below 2^52"
)]
fn per_day(count: usize, days: usize) -> f64 {
    count as f64 / days as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};

    fn at(month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, month, day)
            .and_then(|date| date.and_hms_opt(hour, 15, 0))
            .expect("valid timestamp")
    }

    fn incident(lat: f64, lon: f64, occurred_at: NaiveDateTime) -> IncidentRecord {
        IncidentRecord::new(GeoPoint::new(lat, lon), occurred_at)
    }

    #[fixture]
    fn evening_window() -> HotspotWindow {
        HotspotWindow::new(at(3, 1, 18), at(3, 1, 22))
    }

    #[fixture]
    fn origin() -> GeoPoint {
        GeoPoint::new(1.0, 1.0)
    }

    #[rstest]
    fn intensity_uses_shared_day_denominator(evening_window: HotspotWindow, origin: GeoPoint) {
        let incidents = vec![
            incident(1.0, 1.0, at(3, 4, 18)),
            incident(1.0, 1.0, at(3, 4, 19)),
            incident(1.0, 1.0, at(3, 5, 20)),
            incident(1.0, 1.0, at(3, 5, 21)),
            incident(1.01, 1.01, at(3, 4, 22)),
            incident(1.01, 1.01, at(3, 5, 18)),
        ];

        let hotspots = extract_hotspots(&incidents, origin, &evening_window, 5.0)
            .expect("hotspots within radius");

        assert_eq!(hotspots.len(), 2);
        assert_eq!(hotspots[0].location, GeoPoint::new(1.0, 1.0));
        assert_eq!(hotspots[0].intensity, 2.0);
        assert_eq!(hotspots[0].incident_count, 4);
        assert_eq!(hotspots[1].location, GeoPoint::new(1.01, 1.01));
        assert_eq!(hotspots[1].intensity, 1.0);
    }

    #[rstest]
    fn incidents_from_other_months_are_ignored(evening_window: HotspotWindow, origin: GeoPoint) {
        let incidents = vec![
            incident(1.0, 1.0, at(4, 1, 19)),
            incident(1.0, 1.0, at(2, 28, 19)),
        ];
        let err = extract_hotspots(&incidents, origin, &evening_window, 5.0)
            .expect_err("no incidents in March");
        assert_eq!(err, HotspotError::NoIncidentsInWindow);
    }

    #[rstest]
    fn hour_bounds_are_inclusive(evening_window: HotspotWindow, origin: GeoPoint) {
        let incidents = vec![
            incident(1.0, 1.0, at(3, 2, 17)),
            incident(1.0, 1.0, at(3, 2, 18)),
            incident(1.0, 1.0, at(3, 2, 22)),
            incident(1.0, 1.0, at(3, 2, 23)),
        ];
        let hotspots =
            extract_hotspots(&incidents, origin, &evening_window, 5.0).expect("hotspots");
        assert_eq!(hotspots[0].incident_count, 2);
    }

    #[rstest]
    fn window_crossing_midnight_matches_nothing(origin: GeoPoint) {
        let window = HotspotWindow::new(at(3, 1, 22), at(3, 2, 2));
        let incidents = vec![
            incident(1.0, 1.0, at(3, 2, 23)),
            incident(1.0, 1.0, at(3, 2, 1)),
        ];
        let err = extract_hotspots(&incidents, origin, &window, 5.0).expect_err("empty window");
        assert_eq!(err, HotspotError::NoIncidentsInWindow);
    }

    #[rstest]
    fn distant_clusters_are_dropped(evening_window: HotspotWindow, origin: GeoPoint) {
        let incidents = vec![
            incident(1.0, 1.0, at(3, 2, 19)),
            incident(2.0, 2.0, at(3, 2, 19)),
        ];
        let hotspots =
            extract_hotspots(&incidents, origin, &evening_window, 5.0).expect("hotspots");
        assert_eq!(hotspots.len(), 1);
        assert_eq!(hotspots[0].location, GeoPoint::new(1.0, 1.0));
        assert_eq!(hotspots[0].distance_km, 0.0);
    }

    #[rstest]
    fn all_clusters_outside_radius_fails(evening_window: HotspotWindow, origin: GeoPoint) {
        let incidents = vec![incident(2.0, 2.0, at(3, 2, 19))];
        let err = extract_hotspots(&incidents, origin, &evening_window, 5.0)
            .expect_err("outside radius");
        assert_eq!(err, HotspotError::NoHotspotsWithinRadius { radius_km: 5.0 });
        assert_eq!(err.to_string(), "no hotspots within radius of 5 km");
    }

    #[rstest]
    fn label_uses_two_decimals() {
        let hotspot = Hotspot {
            location: GeoPoint::new(0.0, 0.0),
            intensity: 4.0 / 3.0,
            distance_km: 0.0,
            incident_count: 4,
        };
        assert_eq!(hotspot.label(), "Hotspot: 1.33 incidents/day");
    }

    #[rstest]
    #[case("2024-03-01 18:00")]
    #[case("2024-03-01T18:00:00")]
    #[case("yesterday")]
    fn malformed_window_timestamps_are_rejected(#[case] input: &str) {
        let err = parse_window_timestamp(input).expect_err("malformed timestamp");
        assert_eq!(err.input, input);
    }

    #[rstest]
    fn window_parse_reads_both_bounds() {
        let window = HotspotWindow::parse("2024-03-01 18:00:00", "2024-03-01 22:30:00")
            .expect("valid window");
        assert_eq!(window.target_month(), 3);
        assert!(window.contains_hour(22));
        assert!(!window.contains_hour(17));
    }
}
