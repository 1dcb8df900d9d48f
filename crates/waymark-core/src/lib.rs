//! Waymark Tag Reconciliation
//!
//! Decides what editing action each surveyed waypoint needs on the map.
//!
//! # Pipeline
//!
//! ```text
//! TraceWalker ─ waypoint ─▶ select_for_waypoint ─ node, schema tags ─▶ classify ─▶ Verdict
//! ```
//!
//! 1. [`compare`] splits two tag sets into shared pairs and one-sided pairs.
//! 2. [`classify`] turns that split into one [`Verdict`] using a fixed rule
//!    order (Info, Edit, Review, NoAction).
//! 3. [`select_for_waypoint`] classifies every nearby node and keeps one
//!    verdict for the waypoint, ranked Info > Review > Edit, falling back to
//!    Create when no node is related.
//! 4. [`walk`] does that for every waypoint of a trace, lazily and in order.
//!
//! Everything here is pure except the [`NodeLookup`] calls made by the
//! walker. The [`Schema`] is an immutable value handed in by the caller.

mod candidate;
mod diff;
mod error;
mod geo;
mod schema;
mod select;
mod tag_set;
mod verdict;
mod walk;
mod waypoint;

pub use candidate::{CandidateNode, NodeId};
pub use diff::{compare, TagDiff};
pub use error::LookupError;
pub use geo::{Coordinate, EARTH_RADIUS_M};
pub use schema::Schema;
pub use select::{select_for_waypoint, Selection};
pub use tag_set::{Iter as TagIter, TagSet};
pub use verdict::{classify, Verdict, VerdictKind};
pub use walk::{resolve_waypoint, walk, NodeLookup, Outcome, TraceWalker, WalkEntry};
pub use waypoint::Waypoint;

/// Default search radius around a waypoint, in meters.
pub const DEFAULT_RADIUS_M: f64 = 20.0;
