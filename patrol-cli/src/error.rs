//! Error types emitted by the patrol CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use patrol_core::PatrolError;
use patrol_data::DatasetError;
use thiserror::Error;

/// Errors emitted by the patrol CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// An option holds a value outside its accepted range.
    #[error("invalid {field}: {reason}")]
    InvalidArgument {
        /// Flag name without leading dashes.
        field: &'static str,
        /// What is wrong with the value.
        reason: String,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// A dataset failed to load.
    #[error("failed to load {field} from {path:?}: {source}")]
    Dataset {
        /// Flag name without leading dashes.
        field: &'static str,
        /// Dataset path.
        path: Utf8PathBuf,
        /// Underlying loader error.
        #[source]
        source: DatasetError,
    },
    /// The patrol pipeline failed.
    #[error("patrol route failed: {0}")]
    Patrol(#[from] PatrolError),
    /// Serialising the JSON report failed.
    #[error("failed to serialise output: {0}")]
    Serialise(#[source] serde_json::Error),
    /// Writing to the output stream failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
