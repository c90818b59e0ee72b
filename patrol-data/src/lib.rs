//! Dataset loading and map artefact persistence for patrol planning.
//!
//! Responsibilities:
//! - Decode incident and waypoint CSV exports into core types.
//! - Parse the timestamp variants found in incident exports.
//! - Persist map artefacts as GeoJSON and read them back.
//!
//! Boundaries:
//! - Domain rules live in `patrol-core`; this crate only converts formats.

#![forbid(unsafe_code)]

mod artefact;
mod dataset;
mod error;
mod timestamp;

pub use artefact::{
    GeoJsonRouteSink, from_feature_collection, read_artefact, read_artefact_from,
    to_feature_collection,
};
pub use dataset::{load_incidents, load_waypoints, read_incidents, read_waypoints};
pub use error::DatasetError;
pub use timestamp::parse_occurrence_timestamp;
