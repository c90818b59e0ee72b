//! [`PatrolSolver`] dispatch between exact and heuristic search.

use std::time::Instant;

use log::debug;
use patrol_core::{
    Diagnostics, GeoPoint, Tour, TourError, TourOutcome, TourQuality, TourRequest, TourSolver,
};

use crate::exhaustive;
use crate::heuristic;
use crate::matrix::DistanceMatrix;

/// Stop count up to which [`PatrolSolver`] enumerates every order.
pub const DEFAULT_EXACT_STOP_LIMIT: usize = 9;

/// Configuration for [`PatrolSolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatrolSolverConfig {
    /// Requests with at most this many stops are solved exactly; larger
    /// requests fall back to nearest-neighbour construction and 2-opt.
    pub exact_stop_limit: usize,
}

impl Default for PatrolSolverConfig {
    fn default() -> Self {
        Self {
            exact_stop_limit: DEFAULT_EXACT_STOP_LIMIT,
        }
    }
}

/// Default [`TourSolver`] for patrol routes.
///
/// # Examples
/// ```
/// use patrol_core::{GeoPoint, TourQuality, TourRequest, TourSolver};
/// use patrol_solver::PatrolSolver;
///
/// let request = TourRequest::new(
///     GeoPoint::new(0.0, 0.0),
///     vec![GeoPoint::new(0.0, 0.2), GeoPoint::new(0.0, 0.1)],
/// );
/// let outcome = PatrolSolver::new().solve(&request)?;
/// assert_eq!(outcome.quality, TourQuality::Optimal);
/// assert_eq!(outcome.tour.stops(), &[GeoPoint::new(0.0, 0.1), GeoPoint::new(0.0, 0.2)]);
/// # Ok::<(), patrol_core::TourError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PatrolSolver {
    config: PatrolSolverConfig,
}

impl PatrolSolver {
    /// Construct a solver with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a solver with explicit configuration.
    #[must_use]
    pub const fn with_config(config: PatrolSolverConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &PatrolSolverConfig {
        &self.config
    }
}

impl TourSolver for PatrolSolver {
    fn solve(&self, request: &TourRequest) -> Result<TourOutcome, TourError> {
        let strategy = if request.stops.len() <= self.config.exact_stop_limit {
            Strategy::Exact
        } else {
            Strategy::Heuristic
        };
        solve_with(request, strategy)
    }
}

/// Enumerates every visiting order regardless of stop count.
///
/// Cost grows factorially; prefer [`PatrolSolver`] unless the request is
/// known to be small or a deadline bounds the search.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExhaustiveSolver;

impl TourSolver for ExhaustiveSolver {
    fn solve(&self, request: &TourRequest) -> Result<TourOutcome, TourError> {
        solve_with(request, Strategy::Exact)
    }
}

/// Nearest-neighbour construction refined by 2-opt.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicSolver;

impl TourSolver for HeuristicSolver {
    fn solve(&self, request: &TourRequest) -> Result<TourOutcome, TourError> {
        solve_with(request, Strategy::Heuristic)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Exact,
    Heuristic,
}

fn solve_with(request: &TourRequest, strategy: Strategy) -> Result<TourOutcome, TourError> {
    request.validate()?;
    let started_at = Instant::now();
    let matrix = DistanceMatrix::new(request.start, &request.stops);

    let result = match strategy {
        Strategy::Exact => exhaustive::search(&matrix, request.closure, request),
        Strategy::Heuristic => heuristic::search(&matrix, request.closure, request),
    };
    let quality = match (result.complete, strategy) {
        (false, _) => TourQuality::Partial,
        (true, Strategy::Exact) => TourQuality::Optimal,
        (true, Strategy::Heuristic) => TourQuality::Heuristic,
    };
    debug!(
        "ordered {} stops ({quality:?}) after {} candidates",
        request.stops.len(),
        result.evaluated
    );

    let stops = ordered_stops(&request.stops, &result.order);
    Ok(TourOutcome {
        tour: Tour::new(request.start, &stops, request.closure),
        quality,
        diagnostics: Diagnostics {
            solve_time: started_at.elapsed(),
            candidates_evaluated: result.evaluated,
        },
    })
}

// Matrix index `i` is stop `i - 1`.
fn ordered_stops(stops: &[GeoPoint], order: &[usize]) -> Vec<GeoPoint> {
    order
        .iter()
        .filter_map(|&node| node.checked_sub(1).and_then(|stop| stops.get(stop)))
        .copied()
        .collect()
}
