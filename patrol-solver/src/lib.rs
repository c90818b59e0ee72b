//! Tour solvers for patrol routes.
//!
//! [`PatrolSolver`] implements [`patrol_core::TourSolver`]. Small requests
//! are solved exactly by enumerating every visiting order in lexicographic
//! index order, so ties resolve to the first order enumerated. Requests with
//! more stops than [`PatrolSolverConfig::exact_stop_limit`] are ordered by a
//! nearest-neighbour tour refined with 2-opt. Either search honours the
//! request deadline and reports a partial result when it fires.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod exhaustive;
mod heuristic;
mod matrix;
mod solver;

pub use solver::{
    DEFAULT_EXACT_STOP_LIMIT, ExhaustiveSolver, HeuristicSolver, PatrolSolver, PatrolSolverConfig,
};
