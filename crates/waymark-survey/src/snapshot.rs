//! Node snapshots.
//!
//! A snapshot is an Overpass-style JSON export of the map around a survey
//! area. Loaded once, it answers every vicinity query of a run without
//! touching the network.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};
use waymark_core::{CandidateNode, Coordinate, LookupError, NodeLookup, TagSet};

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum Element {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
        #[serde(default)]
        tags: BTreeMap<String, String>,
    },
    #[serde(other)]
    Other,
}

/// A map node held by a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotNode {
    pub id: i64,
    pub position: Coordinate,
    pub tags: TagSet,
}

/// In-memory set of map nodes.
#[derive(Debug, Clone, Default)]
pub struct NodeSnapshot {
    nodes: Vec<SnapshotNode>,
}

impl NodeSnapshot {
    /// Build a snapshot from nodes already in memory.
    ///
    /// Nodes keep their order; it breaks distance ties in lookups.
    pub fn new(nodes: Vec<SnapshotNode>) -> Result<Self> {
        for node in &nodes {
            if !node.position.is_valid() {
                return Err(Error::Snapshot(format!(
                    "node {} has invalid coordinates {}",
                    node.id, node.position
                )));
            }
        }
        Ok(Self { nodes })
    }

    /// Read a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot = Self::from_json(&text)?;
        info!(path = %path.display(), nodes = snapshot.len(), "loaded node snapshot");
        Ok(snapshot)
    }

    /// Parse a snapshot document. Elements other than nodes are ignored.
    pub fn from_json(text: &str) -> Result<Self> {
        let document: Document = serde_json::from_str(text)?;
        let nodes = document
            .elements
            .into_iter()
            .filter_map(|element| match element {
                Element::Node { id, lat, lon, tags } => Some(SnapshotNode {
                    id,
                    position: Coordinate::new(lat, lon),
                    tags: TagSet::from(tags),
                }),
                Element::Other => None,
            })
            .collect();
        Self::new(nodes)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[SnapshotNode] {
        &self.nodes
    }
}

impl NodeLookup for NodeSnapshot {
    fn nearby(&self, at: Coordinate, radius_m: f64) -> std::result::Result<Vec<CandidateNode>, LookupError> {
        if !at.is_valid() {
            return Err(LookupError::InvalidResponse(format!("invalid query position {}", at)));
        }
        if !radius_m.is_finite() || radius_m < 0.0 {
            return Err(LookupError::InvalidResponse(format!("invalid search radius {}", radius_m)));
        }

        let mut hits: Vec<(f64, &SnapshotNode)> = self
            .nodes
            .iter()
            .map(|node| (node.position.distance_m(&at), node))
            .filter(|(distance, _)| *distance <= radius_m)
            .collect();
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));

        debug!(%at, radius_m, hits = hits.len(), "snapshot lookup");
        Ok(hits
            .into_iter()
            .map(|(_, node)| CandidateNode::new(node.id, node.tags.clone()))
            .collect())
    }
}
