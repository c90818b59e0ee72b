//! Exact search over every visiting order.

use patrol_core::{TourClosure, TourRequest};

use crate::matrix::DistanceMatrix;

/// Best order found by a search, as stop indices into a [`DistanceMatrix`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SearchResult {
    pub(crate) order: Vec<usize>,
    pub(crate) length_km: f64,
    pub(crate) evaluated: u64,
    pub(crate) complete: bool,
}

/// Compare every permutation of the stops in lexicographic index order.
///
/// Only strictly shorter tours replace the incumbent, so among equal-length
/// tours the first one enumerated wins. When the request deadline passes the
/// search stops and reports itself incomplete.
pub(crate) fn search(
    matrix: &DistanceMatrix,
    closure: TourClosure,
    request: &TourRequest,
) -> SearchResult {
    let mut order: Vec<usize> = (1..matrix.size()).collect();
    let mut best = SearchResult {
        length_km: matrix.tour_length(&order, closure),
        order: order.clone(),
        evaluated: 1,
        complete: true,
    };

    while next_permutation(&mut order) {
        if request.deadline_passed() {
            best.complete = false;
            break;
        }
        let length_km = matrix.tour_length(&order, closure);
        best.evaluated += 1;
        if length_km < best.length_km {
            best.length_km = length_km;
            best.order.clone_from(&order);
        }
    }
    best
}

/// Advance `order` to its lexicographic successor.
///
/// Returns `false`, leaving `order` untouched, once the last permutation has
/// been reached.
fn next_permutation(order: &mut [usize]) -> bool {
    let Some(pivot) = order
        .windows(2)
        .rposition(|pair| matches!(pair, [lhs, rhs] if lhs < rhs))
    else {
        return false;
    };
    let Some(&pivot_value) = order.get(pivot) else {
        return false;
    };
    let Some(successor) = order.iter().rposition(|&value| value > pivot_value) else {
        return false;
    };
    order.swap(pivot, successor);
    if let Some(suffix) = order.get_mut(pivot + 1..) {
        suffix.reverse();
    }
    true
}
