//! Expected tags per waypoint name.
//!
//! A [`Schema`] is built once at startup and shared read-only for the whole
//! run. Waypoints whose name has no entry are out of scope and get skipped.

use std::collections::BTreeMap;

use crate::tag_set::TagSet;

/// Mapping from waypoint name to the tags its map node should carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    id: Option<String>,
    entries: BTreeMap<String, TagSet>,
}

impl Schema {
    /// Build a schema from `(name, tags)` entries. Later duplicates win.
    pub fn new<I, N>(id: Option<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (N, TagSet)>,
        N: Into<String>,
    {
        Self {
            id,
            entries: entries.into_iter().map(|(n, t)| (n.into(), t)).collect(),
        }
    }

    /// Schema identifier from the document metadata, if any.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Expected tags for a waypoint name.
    pub fn get(&self, name: &str) -> Option<&TagSet> {
        self.entries.get(name)
    }

    /// Whether the schema covers this waypoint name.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of waypoint entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schema has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Waypoint names, in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
