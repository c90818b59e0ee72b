//! Nearest-neighbour construction followed by 2-opt improvement.

use patrol_core::{TourClosure, TourRequest};

use crate::exhaustive::SearchResult;
use crate::matrix::DistanceMatrix;

// Gains smaller than this are rounding noise.
const MIN_GAIN_KM: f64 = 1e-9;

/// Build a tour greedily, then apply improving segment reversals until none
/// remain or the request deadline passes.
pub(crate) fn search(
    matrix: &DistanceMatrix,
    closure: TourClosure,
    request: &TourRequest,
) -> SearchResult {
    let mut order = nearest_neighbour(matrix);
    let (passes, complete) = two_opt(matrix, &mut order, closure, request);
    SearchResult {
        length_km: matrix.tour_length(&order, closure),
        order,
        evaluated: passes,
        complete,
    }
}

/// Visit the closest unvisited stop next; ties go to the lowest index.
fn nearest_neighbour(matrix: &DistanceMatrix) -> Vec<usize> {
    let mut remaining: Vec<usize> = (1..matrix.size()).collect();
    let mut order = Vec::with_capacity(remaining.len());
    let mut current = 0;
    while !remaining.is_empty() {
        let mut best_pos = 0;
        let mut best_leg = f64::INFINITY;
        for (pos, &candidate) in remaining.iter().enumerate() {
            let leg = matrix.leg(current, candidate);
            if leg < best_leg {
                best_leg = leg;
                best_pos = pos;
            }
        }
        current = remaining.remove(best_pos);
        order.push(current);
    }
    order
}

/// Returns the number of passes made and whether the search converged.
fn two_opt(
    matrix: &DistanceMatrix,
    order: &mut [usize],
    closure: TourClosure,
    request: &TourRequest,
) -> (u64, bool) {
    let mut passes = 0;
    loop {
        if request.deadline_passed() {
            return (passes, false);
        }
        passes += 1;
        let mut improved = false;
        for first in 0..order.len() {
            for last in first + 1..order.len() {
                if reversal_gain(matrix, order, first, last, closure) > MIN_GAIN_KM {
                    if let Some(segment) = order.get_mut(first..=last) {
                        segment.reverse();
                    }
                    improved = true;
                }
            }
        }
        if !improved {
            return (passes, true);
        }
    }
}

/// Kilometres saved by reversing `order[first..=last]`.
#[expect(
    clippy::float_arithmetic,
    reason = "2-opt compares sums of floating-point legs"
)]
fn reversal_gain(
    matrix: &DistanceMatrix,
    order: &[usize],
    first: usize,
    last: usize,
    closure: TourClosure,
) -> f64 {
    let node = |pos: usize| order.get(pos).copied().unwrap_or_default();
    let before = first.checked_sub(1).map_or(0, node);
    let after = match (order.get(last + 1), closure) {
        (Some(&next), _) => Some(next),
        (None, TourClosure::Closed) => Some(0),
        (None, TourClosure::Open) => None,
    };
    let (head, tail) = (node(first), node(last));
    let trailing = |from: usize| after.map_or(0.0, |to| matrix.leg(from, to));
    let current = matrix.leg(before, head) + trailing(tail);
    let reversed = matrix.leg(before, tail) + trailing(head);
    current - reversed
}
