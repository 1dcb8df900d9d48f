//! Map nodes found near a waypoint.

use std::fmt;

use crate::tag_set::TagSet;

/// Identifier of a map node, as used by OpenStreetMap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId(id)
    }
}

/// A map node returned by a vicinity lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateNode {
    /// Stable identifier
    pub id: NodeId,
    /// Tags currently recorded on the node
    pub tags: TagSet,
}

impl CandidateNode {
    pub fn new(id: i64, tags: TagSet) -> Self {
        Self {
            id: NodeId(id),
            tags,
        }
    }
}
