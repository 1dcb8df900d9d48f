//! Error types for waymark-core.

use thiserror::Error;

/// A node lookup failed for one waypoint.
///
/// Lookup failures are scoped to the waypoint that triggered them; the rest
/// of the trace keeps going.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    /// The node source could not be reached or refused the query
    #[error("node source unavailable: {0}")]
    Unavailable(String),

    /// The query or the node source's answer was unusable
    #[error("invalid lookup: {0}")]
    InvalidResponse(String),
}
