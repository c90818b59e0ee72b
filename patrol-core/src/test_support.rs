//! Helpers shared by unit, behaviour and downstream tests.

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
    Diagnostics, GeoPoint, Hotspot, InfrastructureWaypoint, MapArtefact, PatrolRoute, RenderError,
    RouteSink, Tour, TourError, TourOutcome, TourQuality, TourRequest, TourSolver,
};

/// Timestamp at the top of `hour` on the given day.
///
/// # Panics
/// Panics when the date or hour is out of range.
#[must_use]
pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, 0, 0))
        .unwrap_or_else(|| panic!("invalid test timestamp {year}-{month}-{day} {hour}:00"))
}

/// Small route anchored at a waypoint named `id`.
#[must_use]
pub fn sample_route(id: &str) -> PatrolRoute {
    let waypoint = InfrastructureWaypoint::new(id, GeoPoint::new(43.651, -79.381));
    let hotspot = Hotspot {
        location: GeoPoint::new(43.652, -79.382),
        intensity: 1.0,
        distance_km: 0.28,
        incident_count: 2,
    };
    let tour = Tour::new(waypoint.location, &[hotspot.location], Default::default());
    PatrolRoute {
        origin: GeoPoint::new(43.65, -79.38),
        waypoint,
        hotspots: vec![hotspot],
        tour,
        quality: TourQuality::Optimal,
        graph: None,
    }
}

/// Solver that visits stops in the order given.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputOrderSolver;

impl TourSolver for InputOrderSolver {
    fn solve(&self, request: &TourRequest) -> Result<TourOutcome, TourError> {
        request.validate()?;
        let started = Instant::now();
        let tour = Tour::new(request.start, &request.stops, request.closure);
        Ok(TourOutcome {
            tour,
            quality: TourQuality::Heuristic,
            diagnostics: Diagnostics {
                solve_time: started.elapsed(),
                candidates_evaluated: 1,
            },
        })
    }
}

/// Sink that keeps every artefact it receives.
#[derive(Debug, Default)]
pub struct RecordingSink {
    artefacts: Mutex<Vec<MapArtefact>>,
}

impl RecordingSink {
    /// Artefacts rendered so far, oldest first.
    #[must_use]
    pub fn rendered(&self) -> Vec<MapArtefact> {
        self.artefacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RouteSink for RecordingSink {
    fn render(&self, artefact: &MapArtefact) -> Result<(), RenderError> {
        self.artefacts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(artefact.clone());
        Ok(())
    }
}

/// Sink that always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingSink;

impl RouteSink for FailingSink {
    fn render(&self, _artefact: &MapArtefact) -> Result<(), RenderError> {
        Err(RenderError::new("nowhere", "sink unavailable"))
    }
}
