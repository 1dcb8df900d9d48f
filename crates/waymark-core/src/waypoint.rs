//! Surveyed waypoints.

use crate::geo::Coordinate;

/// A named point of interest captured in a field trace.
///
/// The name doubles as the schema lookup key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    /// Human-readable name (empty when the trace carried none)
    pub name: String,
    /// Where the waypoint was captured
    pub position: Coordinate,
}

impl Waypoint {
    /// Create a waypoint.
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            position: Coordinate::new(lat, lon),
        }
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.position.lat
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.position.lon
    }
}
