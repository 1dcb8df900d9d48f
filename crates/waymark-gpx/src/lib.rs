//! Waymark GPX
//!
//! Reads field traces recorded as GPX: the named waypoints a surveyor
//! dropped, and the raw track points used for heat maps.
//!
//! # Example
//!
//! ```no_run
//! let gpx = waymark_gpx::read("trazas/bus_alajuela-giralda/2546300.gpx")?;
//! for waypoint in &gpx.waypoints {
//!     println!("{} -> {}", waypoint.name, waypoint.position);
//! }
//! # Ok::<(), waymark_gpx::Error>(())
//! ```

mod error;
mod parse;
mod read;

pub use error::{Error, Result};
pub use parse::{parse, Gpx, Track};
pub use read::{read, read_dir, track_points, GPX_EXTENSION};
