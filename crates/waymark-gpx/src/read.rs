//! Reading traces from disk.
//!
//! A file that fails to parse is fatal for the whole load: nothing is
//! silently skipped.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use waymark_core::Coordinate;

use crate::error::{Error, Result};
use crate::parse::{parse, Gpx};

/// Extension of trace files picked up by [`read_dir`].
pub const GPX_EXTENSION: &str = "gpx";

/// Read and parse a single GPX file.
pub fn read(path: impl AsRef<Path>) -> Result<Gpx> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let gpx = parse(&text).map_err(|e| e.in_file(path))?;
    debug!(
        path = %path.display(),
        waypoints = gpx.waypoints.len(),
        tracks = gpx.tracks.len(),
        "parsed trace"
    );
    Ok(gpx)
}

/// Read every `.gpx` file in `dir`, sorted by file name.
///
/// Other files and subdirectories are ignored.
pub fn read_dir(dir: impl AsRef<Path>) -> Result<Vec<(PathBuf, Gpx)>> {
    let dir = dir.as_ref();
    let io_err = |source: std::io::Error| Error::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_gpx = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(GPX_EXTENSION));
        if is_gpx && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let traces = paths
        .into_iter()
        .map(|path| read(&path).map(|gpx| (path, gpx)))
        .collect::<Result<Vec<_>>>()?;

    info!(dir = %dir.display(), files = traces.len(), "loaded trace directory");
    Ok(traces)
}

/// Flatten every track point of every trace, in order.
pub fn track_points<'a, I>(traces: I) -> Vec<Coordinate>
where
    I: IntoIterator<Item = &'a Gpx>,
{
    traces
        .into_iter()
        .flat_map(|gpx| gpx.track_points())
        .collect()
}
