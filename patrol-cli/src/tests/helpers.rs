//! Test helpers for writing CLI datasets to a temporary workspace.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

pub(super) const INCIDENTS_CSV: &str = "\
Lat,Long,occurrencedate
43.652,-79.382,2024-03-04T19:00:00
43.652,-79.382,2024-03-05T20:00:00
43.649,-79.379,2024-03-05T21:00:00
44.5,-79.0,2024-03-05T21:00:00
43.652,-79.382,2024-06-05T20:00:00
";

pub(super) const JUNCTIONS_CSV: &str = "\
Junction_ID,Lat,Long
J1,43.651,-79.381
J2,43.7,-79.5
";

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary directory holding the default datasets.
#[derive(Debug)]
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let workspace = Self { _dir: dir, root };
        write_utf8(&workspace.incidents(), INCIDENTS_CSV.as_bytes());
        write_utf8(&workspace.junctions(), JUNCTIONS_CSV.as_bytes());
        workspace
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn incidents(&self) -> Utf8PathBuf {
        self.root.join("incidents.csv")
    }

    pub(super) fn junctions(&self) -> Utf8PathBuf {
        self.root.join("junctions.csv")
    }

    pub(super) fn output(&self) -> Utf8PathBuf {
        self.root.join("maps/patrol.geojson")
    }
}
