//! Heat-map input from a directory of traces.

use std::io::Write;
use std::path::Path;

use crate::error::Result;

/// Every track point of every trace in `dir`, as `[lat, lon]` pairs.
pub fn heat_points(dir: impl AsRef<Path>) -> Result<Vec<[f64; 2]>> {
    let traces = waymark_gpx::read_dir(dir)?;
    let points = waymark_gpx::track_points(traces.iter().map(|(_, gpx)| gpx));
    Ok(points.into_iter().map(|c| [c.lat, c.lon]).collect())
}

/// Write `points` as a single JSON array.
pub fn write_heat<W: Write>(mut out: W, points: &[[f64; 2]]) -> Result<()> {
    serde_json::to_writer(&mut out, points)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
