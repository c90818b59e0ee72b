//! A* shortest-path search over a [`Graph`].
//!
//! Edge costs and the heuristic are both great-circle distances, so the
//! heuristic is admissible and consistent and returned paths are optimal.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::{GeoPoint, Graph};

#[derive(Debug, Clone, Copy)]
struct Frontier {
    estimate: f64,
    sequence: u64,
    node: GeoPoint,
}

// Min-heap by estimate, then by push order.
impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .total_cmp(&self.estimate)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

/// Find the shortest path from `start` to `goal`.
///
/// Returns the visited nodes from `start` to `goal` inclusive, or `None` when
/// the frontier empties before `goal` is reached. Popped nodes without an
/// adjacency entry are treated as dead ends. Equal estimates are expanded in
/// the order they were discovered.
///
/// # Examples
/// ```
/// use patrol_core::{GeoPoint, Graph, shortest_path};
///
/// let a = GeoPoint::new(0.0, 0.0);
/// let b = GeoPoint::new(0.0, 1.0);
/// let c = GeoPoint::new(0.0, 2.0);
/// let graph = Graph::from_adjacency([(a, vec![b]), (b, vec![c])]);
/// assert_eq!(shortest_path(a, c, &graph), Some(vec![a, b, c]));
/// assert_eq!(shortest_path(c, a, &graph), None);
/// ```
#[must_use]
pub fn shortest_path(start: GeoPoint, goal: GeoPoint, graph: &Graph) -> Option<Vec<GeoPoint>> {
    let mut open = BinaryHeap::new();
    let mut came_from: HashMap<GeoPoint, GeoPoint> = HashMap::new();
    let mut best_cost: HashMap<GeoPoint, f64> = HashMap::from([(start, 0.0)]);
    let mut sequence = 0_u64;

    open.push(Frontier {
        estimate: start.distance_km(goal),
        sequence,
        node: start,
    });

    while let Some(Frontier { estimate, node, .. }) = open.pop() {
        if node == goal {
            return Some(reconstruct(&came_from, start, goal));
        }

        let cost = best_cost.get(&node).copied().unwrap_or(f64::INFINITY);
        if estimate > cost + node.distance_km(goal) {
            continue;
        }

        let Some(neighbours) = graph.neighbours(&node) else {
            continue;
        };

        for &next in neighbours {
            let tentative = cost + node.distance_km(next);
            let known = best_cost.get(&next).copied().unwrap_or(f64::INFINITY);
            if tentative < known {
                came_from.insert(next, node);
                best_cost.insert(next, tentative);
                sequence += 1;
                open.push(Frontier {
                    estimate: tentative + next.distance_km(goal),
                    sequence,
                    node: next,
                });
            }
        }
    }
    None
}

fn reconstruct(
    came_from: &HashMap<GeoPoint, GeoPoint>,
    start: GeoPoint,
    goal: GeoPoint,
) -> Vec<GeoPoint> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        match came_from.get(&current) {
            Some(previous) => {
                current = *previous;
                path.push(current);
            }
            None => break,
        }
    }
    path.reverse();
    path
}
