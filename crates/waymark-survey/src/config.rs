//! Survey configuration.

use std::path::PathBuf;

use waymark_core::DEFAULT_RADIUS_M;

use crate::error::{Error, Result};

/// How the report is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// One human-readable line per waypoint plus a summary
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Configuration for a survey run.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SurveyConfig {
    /// GPX trace holding the surveyed waypoints
    pub trace: PathBuf,

    /// Schema document (waypoint name -> expected tags)
    pub schema: PathBuf,

    /// Node snapshot answering vicinity lookups
    pub nodes: PathBuf,

    /// Search radius around each waypoint, in meters
    pub radius_m: f64,

    /// Concurrent lookups; 1 walks the trace sequentially
    pub workers: usize,

    /// Report rendering
    pub format: ReportFormat,

    /// Verbose logging
    pub debug: bool,
}

impl SurveyConfig {
    /// Create a config with default radius, one worker and text output.
    pub fn new(trace: impl Into<PathBuf>, schema: impl Into<PathBuf>, nodes: impl Into<PathBuf>) -> Self {
        Self {
            trace: trace.into(),
            schema: schema.into(),
            nodes: nodes.into(),
            radius_m: DEFAULT_RADIUS_M,
            workers: 1,
            format: ReportFormat::default(),
            debug: false,
        }
    }

    /// Reject values no run can work with.
    pub fn validate(&self) -> Result<()> {
        if !self.radius_m.is_finite() || self.radius_m <= 0.0 {
            return Err(Error::Config(format!(
                "radius must be a positive number of meters, got {}",
                self.radius_m
            )));
        }
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".into()));
        }
        Ok(())
    }

    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        log_filter(self.debug)
    }
}

/// Default log filter for the given verbosity.
pub fn log_filter(debug: bool) -> &'static str {
    if debug {
        "waymark=debug"
    } else {
        "waymark=info"
    }
}
