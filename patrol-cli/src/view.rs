//! View command: print a previously written map artefact.

use camino::Utf8PathBuf;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use patrol_core::MapArtefact;
use patrol_data::read_artefact;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{ARG_OUTPUT, CliError, DEFAULT_OUTPUT, write_json};

/// CLI arguments for the `view` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(about = "Print the most recently written patrol map artefact")]
#[ortho_config(prefix = "PATROL")]
pub(crate) struct ViewArgs {
    /// GeoJSON map artefact written by `patrol route`.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

pub(crate) fn run_view(args: ViewArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_view_with(args, &mut stdout)
}

pub(crate) fn run_view_with(args: ViewArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let artefact = load_view(args)?;
    write_json(writer, &artefact)
}

fn load_view(args: ViewArgs) -> Result<MapArtefact, CliError> {
    let merged = args.load_and_merge().map_err(CliError::Configuration)?;
    let path = merged
        .output
        .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_OUTPUT));
    read_artefact(&path).map_err(|source| CliError::Dataset {
        field: ARG_OUTPUT,
        path,
        source,
    })
}
