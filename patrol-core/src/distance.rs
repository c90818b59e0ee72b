//! Great-circle distance on a spherical Earth.

use crate::GeoPoint;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between `a` and `b` in kilometres.
///
/// Symmetric, zero for identical points and non-negative for all finite
/// inputs. Out-of-range coordinates are accepted as-is.
///
/// # Examples
/// ```
/// use patrol_core::{GeoPoint, haversine_km};
///
/// let toronto = GeoPoint::new(43.65, -79.38);
/// let junction = GeoPoint::new(43.651, -79.381);
/// let km = haversine_km(toronto, junction);
/// assert!(km > 0.1 && km < 0.2);
/// ```
#[must_use]
pub fn haversine_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Sum of consecutive-pair distances along `points`.
///
/// Returns `0.0` for fewer than two points.
#[must_use]
pub fn path_length_km(points: &[GeoPoint]) -> f64 {
    points
        .windows(2)
        .map(|pair| match pair {
            [from, to] => haversine_km(*from, *to),
            _ => 0.0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn coordinate() -> impl Strategy<Value = GeoPoint> {
        (-90.0_f64..=90.0, -180.0_f64..=180.0).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
    }

    proptest! {
        #[test]
        fn distance_is_symmetric(a in coordinate(), b in coordinate()) {
            prop_assert!((haversine_km(a, b) - haversine_km(b, a)).abs() <= 1e-9);
        }

        #[test]
        fn distance_to_self_is_zero(a in coordinate()) {
            prop_assert_eq!(haversine_km(a, a), 0.0);
        }

        #[test]
        fn distance_respects_triangle_inequality(
            a in coordinate(),
            b in coordinate(),
            c in coordinate(),
        ) {
            let direct = haversine_km(a, c);
            let detour = haversine_km(a, b) + haversine_km(b, c);
            prop_assert!(direct <= detour + 1e-6);
        }
    }

    #[rstest]
    fn quarter_meridian_matches_known_length() {
        let equator = GeoPoint::new(0.0, 0.0);
        let pole = GeoPoint::new(90.0, 0.0);
        let expected = EARTH_RADIUS_KM * std::f64::consts::FRAC_PI_2;
        assert!((haversine_km(equator, pole) - expected).abs() < 1e-9);
    }

    #[rstest]
    fn one_degree_of_longitude_at_equator() {
        let km = haversine_km(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0));
        assert!((km - 111.194_926_644_558_73).abs() < 1e-6);
    }

    #[rstest]
    #[case(&[], 0.0)]
    #[case(&[GeoPoint::new(0.0, 0.0)], 0.0)]
    fn short_paths_have_zero_length(#[case] points: &[GeoPoint], #[case] expected: f64) {
        assert_eq!(path_length_km(points), expected);
    }

    #[rstest]
    fn path_length_sums_each_leg() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let c = GeoPoint::new(1.0, 1.0);
        let expected = haversine_km(a, b) + haversine_km(b, c);
        assert_eq!(path_length_km(&[a, b, c]), expected);
    }
}
