//! Pairwise great-circle distances between the tour start and its stops.

use patrol_core::{GeoPoint, TourClosure, haversine_km};

/// Square matrix of leg lengths in kilometres.
///
/// Index `0` is the tour start; index `i + 1` is stop `i`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DistanceMatrix {
    size: usize,
    cells: Vec<f64>,
}

impl DistanceMatrix {
    pub(crate) fn new(start: GeoPoint, stops: &[GeoPoint]) -> Self {
        let nodes: Vec<GeoPoint> = std::iter::once(start)
            .chain(stops.iter().copied())
            .collect();
        let size = nodes.len();
        let cells = nodes
            .iter()
            .flat_map(|from| nodes.iter().map(|to| haversine_km(*from, *to)))
            .collect();
        Self { size, cells }
    }

    /// Number of nodes, start included.
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    /// Leg length between nodes `from` and `to`; zero for unknown indices.
    pub(crate) fn leg(&self, from: usize, to: usize) -> f64 {
        if from >= self.size || to >= self.size {
            return 0.0;
        }
        self.cells
            .get(from * self.size + to)
            .copied()
            .unwrap_or_default()
    }

    /// Length of the path `0 -> order[0] -> order[1] -> ...`, plus the
    /// return leg for closed tours.
    #[expect(
        clippy::float_arithmetic,
        reason = "tour lengths are sums of floating-point legs"
    )]
    pub(crate) fn tour_length(&self, order: &[usize], closure: TourClosure) -> f64 {
        let mut previous = 0;
        let mut total = 0.0;
        for &node in order {
            total += self.leg(previous, node);
            previous = node;
        }
        if closure == TourClosure::Closed {
            total += self.leg(previous, 0);
        }
        total
    }
}
