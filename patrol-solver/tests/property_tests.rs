//! Property-based tests for the patrol solver.
//!
//! # Invariants tested
//!
//! - **Optimality:** exact tours are never longer than any other order.
//! - **Permutation:** every stop is visited exactly once.
//! - **Anchoring:** tours start at the request start and closed tours end there.
//! - **Heuristic soundness:** the fallback never beats the exact optimum.

use proptest::prelude::*;
use patrol_core::{GeoPoint, TourClosure, TourQuality, TourRequest, TourSolver, tour_distance_km};
use patrol_solver::{PatrolSolver, PatrolSolverConfig};

const TOLERANCE_KM: f64 = 1e-9;

fn point_strategy() -> impl Strategy<Value = GeoPoint> {
    (43.5_f64..44.0, -79.7_f64..-79.1).prop_map(|(lat, lon)| GeoPoint::new(lat, lon))
}

fn closure_strategy() -> impl Strategy<Value = TourClosure> {
    prop_oneof![Just(TourClosure::Open), Just(TourClosure::Closed)]
}

/// Lengths of every visiting order, by brute force over index permutations.
fn all_lengths(start: GeoPoint, stops: &[GeoPoint], closure: TourClosure) -> Vec<f64> {
    fn permute(
        start: GeoPoint,
        remaining: &mut Vec<GeoPoint>,
        path: &mut Vec<GeoPoint>,
        closure: TourClosure,
        out: &mut Vec<f64>,
    ) {
        if remaining.is_empty() {
            let mut points = vec![start];
            points.extend_from_slice(path);
            out.push(tour_distance_km(&points, closure));
            return;
        }
        for index in 0..remaining.len() {
            let next = remaining.remove(index);
            path.push(next);
            permute(start, remaining, path, closure, out);
            path.pop();
            remaining.insert(index, next);
        }
    }
    let mut out = Vec::new();
    permute(start, &mut stops.to_vec(), &mut Vec::new(), closure, &mut out);
    out
}

fn sorted(points: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut points = points.to_vec();
    points.sort_by(GeoPoint::total_cmp);
    points
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: exact tours match the brute-force minimum.
    #[test]
    fn exact_tours_are_minimal(
        start in point_strategy(),
        stops in prop::collection::vec(point_strategy(), 1..=6),
        closure in closure_strategy(),
    ) {
        let request = TourRequest::new(start, stops.clone()).with_closure(closure);
        let outcome = PatrolSolver::new().solve(&request).expect("solve should succeed");
        prop_assert_eq!(outcome.quality, TourQuality::Optimal);

        let best = all_lengths(start, &stops, closure)
            .into_iter()
            .fold(f64::INFINITY, f64::min);
        prop_assert!(
            outcome.tour.total_km() <= best + TOLERANCE_KM,
            "tour {} km exceeds optimum {} km",
            outcome.tour.total_km(),
            best
        );
    }

    /// Property: tours visit each stop once and stay anchored at the start.
    #[test]
    fn tours_are_anchored_permutations(
        start in point_strategy(),
        stops in prop::collection::vec(point_strategy(), 1..=14),
        closure in closure_strategy(),
    ) {
        let request = TourRequest::new(start, stops.clone()).with_closure(closure);
        let outcome = PatrolSolver::new().solve(&request).expect("solve should succeed");

        prop_assert_eq!(sorted(outcome.tour.stops()), sorted(&stops));
        prop_assert_eq!(outcome.tour.start(), Some(start));
        if closure == TourClosure::Closed {
            prop_assert_eq!(outcome.tour.points().last(), Some(&start));
        }
    }

    /// Property: the heuristic is never shorter than the exact optimum.
    #[test]
    fn heuristic_never_beats_the_optimum(
        start in point_strategy(),
        stops in prop::collection::vec(point_strategy(), 2..=6),
    ) {
        let request = TourRequest::new(start, stops);
        let exact = PatrolSolver::new().solve(&request).expect("exact solve");
        let heuristic = PatrolSolver::with_config(PatrolSolverConfig { exact_stop_limit: 1 })
            .solve(&request)
            .expect("heuristic solve");
        prop_assert_eq!(heuristic.quality, TourQuality::Heuristic);
        prop_assert!(heuristic.tour.total_km() + TOLERANCE_KM >= exact.tour.total_km());
    }
}
