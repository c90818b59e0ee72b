//! Errors raised while loading datasets and map artefacts.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures from the dataset loaders and [`crate::read_artefact`].
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        /// File that failed to open.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// A row could not be decoded.
    #[error("row {row}: {source}")]
    Decode {
        /// 1-based data row, excluding the header.
        row: u64,
        /// Underlying CSV failure.
        #[source]
        source: csv::Error,
    },
    /// A row carried an unrecognised occurrence timestamp.
    #[error("row {row}: unrecognised occurrence timestamp {input:?}")]
    Timestamp {
        /// 1-based data row, excluding the header.
        row: u64,
        /// The rejected value.
        input: String,
    },
    /// A row carried a NaN or infinite coordinate.
    #[error("row {row}: non-finite coordinate ({latitude}, {longitude})")]
    Coordinate {
        /// 1-based data row, excluding the header.
        row: u64,
        /// Decoded latitude.
        latitude: f64,
        /// Decoded longitude.
        longitude: f64,
    },
    /// Reading an already opened file failed.
    #[error("failed to read input: {0}")]
    Read(#[from] io::Error),
    /// The artefact file is not valid GeoJSON.
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] geojson::Error),
    /// The artefact is GeoJSON but does not describe a patrol route.
    #[error("malformed map artefact: {0}")]
    Artefact(String),
}
