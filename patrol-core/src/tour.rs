//! Patrol tours and the solver seam that produces them.
//!
//! A [`TourSolver`] orders a set of stops after a fixed start point so that
//! the summed great-circle distance is as small as the implementation can
//! make it. Implementations live outside this crate.

use std::time::{Duration, Instant};

use geo::LineString;
use thiserror::Error;

use crate::{GeoPoint, haversine_km};

/// Whether a tour returns to its start after the last stop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TourClosure {
    /// Start, then each stop once; ends at the last stop.
    #[default]
    Open,
    /// As `Open`, plus a final leg back to the start.
    Closed,
}

/// Total length of `points` visited in order, adding the leg from the last
/// point back to the first when `closure` is [`TourClosure::Closed`].
#[must_use]
pub fn tour_distance_km(points: &[GeoPoint], closure: TourClosure) -> f64 {
    let legs: f64 = crate::path_length_km(points);
    match (closure, points.first(), points.last()) {
        (TourClosure::Closed, Some(first), Some(last)) if points.len() > 1 => {
            legs + haversine_km(*last, *first)
        }
        _ => legs,
    }
}

/// An ordered patrol path starting at the anchor waypoint.
///
/// Open tours over `n` stops hold `n + 1` points; closed tours repeat the
/// start at the end and hold `n + 2`.
///
/// # Examples
/// ```
/// use patrol_core::{GeoPoint, Tour, TourClosure};
///
/// let start = GeoPoint::new(0.0, 0.0);
/// let tour = Tour::new(start, &[GeoPoint::new(0.0, 1.0)], TourClosure::Closed);
/// assert_eq!(tour.points().len(), 3);
/// assert_eq!(tour.stop_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    points: Vec<GeoPoint>,
    total_km: f64,
    closure: TourClosure,
}

impl Tour {
    /// Build a tour visiting `stops` in the given order after `start`.
    #[must_use]
    pub fn new(start: GeoPoint, stops: &[GeoPoint], closure: TourClosure) -> Self {
        let mut points = Vec::with_capacity(stops.len() + 2);
        points.push(start);
        points.extend_from_slice(stops);
        let total_km = tour_distance_km(&points, closure);
        if closure == TourClosure::Closed {
            points.push(start);
        }
        Self {
            points,
            total_km,
            closure,
        }
    }

    /// Points in visiting order, including the start (and the return to it
    /// for closed tours).
    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// The anchor point every tour starts from.
    #[must_use]
    pub fn start(&self) -> Option<GeoPoint> {
        self.points.first().copied()
    }

    /// Stops in visiting order, excluding the start and any return leg.
    #[must_use]
    pub fn stops(&self) -> &[GeoPoint] {
        let end = match self.closure {
            TourClosure::Open => self.points.len(),
            TourClosure::Closed => self.points.len().saturating_sub(1),
        };
        self.points.get(1..end).unwrap_or(&[])
    }

    /// Number of stops visited.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.stops().len()
    }

    /// Total great-circle length in kilometres.
    #[must_use]
    pub const fn total_km(&self) -> f64 {
        self.total_km
    }

    /// Closure mode the tour was built with.
    #[must_use]
    pub const fn closure(&self) -> TourClosure {
        self.closure
    }

    /// Polyline of the tour in WGS84 (`x = longitude`, `y = latitude`).
    #[must_use]
    pub fn to_line_string(&self) -> LineString<f64> {
        self.points.iter().copied().map(geo::Coord::from).collect()
    }
}

/// How much confidence a caller can place in a returned tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TourQuality {
    /// Every ordering was compared; the tour is minimal.
    Optimal,
    /// Produced by a construction and improvement heuristic.
    Heuristic,
    /// The deadline expired; the tour is the best one found so far.
    Partial,
}

/// Parameters for a tour solve.
#[derive(Debug, Clone, PartialEq)]
pub struct TourRequest {
    /// Anchor the tour starts from.
    pub start: GeoPoint,
    /// Points to visit exactly once each.
    pub stops: Vec<GeoPoint>,
    /// Whether to return to `start`.
    pub closure: TourClosure,
    /// Optional instant after which the solver returns its best-so-far tour.
    pub deadline: Option<Instant>,
}

impl TourRequest {
    /// Construct an open, unbounded request.
    #[must_use]
    pub const fn new(start: GeoPoint, stops: Vec<GeoPoint>) -> Self {
        Self {
            start,
            stops,
            closure: TourClosure::Open,
            deadline: None,
        }
    }

    /// Set the closure mode.
    #[must_use]
    pub fn with_closure(mut self, closure: TourClosure) -> Self {
        self.closure = closure;
        self
    }

    /// Set a deadline.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Reject requests without stops.
    pub fn validate(&self) -> Result<(), TourError> {
        if self.stops.is_empty() {
            return Err(TourError::EmptyStops);
        }
        Ok(())
    }

    /// Whether the deadline, if any, has passed.
    #[must_use]
    pub fn deadline_passed(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Solver bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent solving.
    pub solve_time: Duration,
    /// Complete candidate tours (or improvement passes) evaluated.
    pub candidates_evaluated: u64,
}

/// Result of a successful solve.
#[derive(Debug, Clone, PartialEq)]
pub struct TourOutcome {
    /// The selected tour.
    pub tour: Tour,
    /// Exactness of `tour`.
    pub quality: TourQuality,
    /// Solver bookkeeping.
    pub diagnostics: Diagnostics,
}

/// Errors returned by [`TourSolver::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    /// There were no stops to order.
    #[error("tour requires at least one stop")]
    EmptyStops,
}

/// Order the stops of a [`TourRequest`].
///
/// Implementations must return [`TourError::EmptyStops`] for an empty stop
/// list rather than a degenerate tour, and must return a tour whose stops
/// are a permutation of the requested stops.
pub trait TourSolver: Send + Sync {
    /// Solve `request`.
    fn solve(&self, request: &TourRequest) -> Result<TourOutcome, TourError>;
}

impl<T: TourSolver + ?Sized> TourSolver for &T {
    fn solve(&self, request: &TourRequest) -> Result<TourOutcome, TourError> {
        (**self).solve(request)
    }
}

impl<T: TourSolver + ?Sized> TourSolver for Box<T> {
    fn solve(&self, request: &TourRequest) -> Result<TourOutcome, TourError> {
        (**self).solve(request)
    }
}
