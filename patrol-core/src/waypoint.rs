//! Nearest infrastructure waypoint lookup.

use thiserror::Error;

use crate::{GeoPoint, InfrastructureWaypoint};

/// Errors returned by [`nearest_waypoint`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WaypointError {
    /// The waypoint reference dataset held no records.
    #[error("waypoint reference set is empty")]
    EmptyReferenceSet,
}

/// Return the waypoint closest to `origin`.
///
/// Exact distance ties keep the waypoint seen first. Waypoints whose
/// distance is not finite (NaN or infinite coordinates) are skipped; a set
/// holding only such waypoints is treated as empty.
///
/// # Examples
/// ```
/// use patrol_core::{GeoPoint, InfrastructureWaypoint, nearest_waypoint};
///
/// let waypoints = vec![
///     InfrastructureWaypoint::new("J1", GeoPoint::new(43.651, -79.381)),
///     InfrastructureWaypoint::new("J2", GeoPoint::new(43.7, -79.5)),
/// ];
/// let nearest = nearest_waypoint(&waypoints, GeoPoint::new(43.65, -79.38))?;
/// assert_eq!(nearest.id, "J1");
/// # Ok::<(), patrol_core::WaypointError>(())
/// ```
pub fn nearest_waypoint(
    waypoints: &[InfrastructureWaypoint],
    origin: GeoPoint,
) -> Result<&InfrastructureWaypoint, WaypointError> {
    let mut best: Option<(&InfrastructureWaypoint, f64)> = None;
    for waypoint in waypoints {
        let distance = origin.distance_km(waypoint.location);
        if !distance.is_finite() {
            continue;
        }
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((waypoint, distance)),
        }
    }
    best.map(|(waypoint, _)| waypoint)
        .ok_or(WaypointError::EmptyReferenceSet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_reference_set_is_an_error() {
        let err = nearest_waypoint(&[], GeoPoint::new(0.0, 0.0)).expect_err("empty set");
        assert_eq!(err, WaypointError::EmptyReferenceSet);
    }

    #[rstest]
    fn picks_the_closest_waypoint() {
        let waypoints = vec![
            InfrastructureWaypoint::new("far", GeoPoint::new(1.0, 1.0)),
            InfrastructureWaypoint::new("near", GeoPoint::new(0.1, 0.1)),
            InfrastructureWaypoint::new("middle", GeoPoint::new(0.5, 0.5)),
        ];
        let nearest = nearest_waypoint(&waypoints, GeoPoint::new(0.0, 0.0)).expect("waypoint");
        assert_eq!(nearest.id, "near");
    }

    #[rstest]
    fn ties_keep_the_first_waypoint() {
        let waypoints = vec![
            InfrastructureWaypoint::new("east", GeoPoint::new(0.0, 0.5)),
            InfrastructureWaypoint::new("west", GeoPoint::new(0.0, -0.5)),
        ];
        let nearest = nearest_waypoint(&waypoints, GeoPoint::new(0.0, 0.0)).expect("waypoint");
        assert_eq!(nearest.id, "east");
    }

    #[rstest]
    fn non_finite_waypoints_are_skipped() {
        let waypoints = vec![
            InfrastructureWaypoint::new("J1", GeoPoint::new(43.651, -79.381)),
            InfrastructureWaypoint::new("BAD", GeoPoint::new(f64::NAN, -79.4)),
            InfrastructureWaypoint::new("J2", GeoPoint::new(43.7, -79.5)),
        ];
        let nearest =
            nearest_waypoint(&waypoints, GeoPoint::new(43.65, -79.38)).expect("waypoint");
        assert_eq!(nearest.id, "J1");
    }

    #[rstest]
    fn only_non_finite_waypoints_count_as_empty() {
        let waypoints = vec![InfrastructureWaypoint::new(
            "BAD",
            GeoPoint::new(f64::INFINITY, 0.0),
        )];
        let err = nearest_waypoint(&waypoints, GeoPoint::new(0.0, 0.0)).expect_err("no usable");
        assert_eq!(err, WaypointError::EmptyReferenceSet);
    }
}
