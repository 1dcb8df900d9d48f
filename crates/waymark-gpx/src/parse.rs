//! GPX document parsing.
//!
//! Reads GPX 1.0 and 1.1 without caring about the namespace: elements are
//! matched on their local name. Only the parts a survey needs are kept:
//! waypoints (`wpt`) and track points (`trk/trkseg/trkpt`). Elevation,
//! timestamps and extensions are ignored.

use roxmltree::{Document, Node};
use waymark_core::{Coordinate, Waypoint};

use crate::error::{Error, Result};

/// A parsed GPX document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gpx {
    /// Named waypoints, in document order
    pub waypoints: Vec<Waypoint>,
    /// Recorded tracks, in document order
    pub tracks: Vec<Track>,
}

/// A recorded track.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Track {
    /// Track name, if the device recorded one
    pub name: Option<String>,
    /// Continuous runs of points
    pub segments: Vec<Vec<Coordinate>>,
}

impl Gpx {
    /// All track points of all tracks, in document order.
    pub fn track_points(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.tracks
            .iter()
            .flat_map(|t| t.segments.iter())
            .flat_map(|s| s.iter().copied())
    }
}

/// Parse a GPX document.
pub fn parse(text: &str) -> Result<Gpx> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();
    if root.tag_name().name() != "gpx" {
        return Err(Error::NotGpx(root.tag_name().name().to_string()));
    }

    let mut gpx = Gpx::default();
    for child in root.children().filter(Node::is_element) {
        match child.tag_name().name() {
            "wpt" => gpx.waypoints.push(parse_waypoint(&doc, child)?),
            "trk" => gpx.tracks.push(parse_track(&doc, child)?),
            _ => {}
        }
    }
    Ok(gpx)
}

fn parse_waypoint(doc: &Document<'_>, node: Node<'_, '_>) -> Result<Waypoint> {
    let position = coordinate(doc, node)?;
    let name = child_text(node, "name").unwrap_or_default();
    Ok(Waypoint { name, position })
}

fn parse_track(doc: &Document<'_>, node: Node<'_, '_>) -> Result<Track> {
    let mut track = Track {
        name: child_text(node, "name"),
        segments: Vec::new(),
    };

    for segment in children_named(node, "trkseg") {
        let points = children_named(segment, "trkpt")
            .map(|point| coordinate(doc, point))
            .collect::<Result<Vec<_>>>()?;
        track.segments.push(points);
    }
    Ok(track)
}

fn coordinate(doc: &Document<'_>, node: Node<'_, '_>) -> Result<Coordinate> {
    let lat = number_attribute(doc, node, "lat")?;
    let lon = number_attribute(doc, node, "lon")?;
    let position = Coordinate::new(lat, lon);
    if !position.is_valid() {
        return Err(Error::OutOfRange {
            lat,
            lon,
            line: line_of(doc, node),
        });
    }
    Ok(position)
}

fn number_attribute(doc: &Document<'_>, node: Node<'_, '_>, attribute: &'static str) -> Result<f64> {
    let raw = node
        .attribute(attribute)
        .ok_or_else(|| Error::MissingAttribute {
            element: node.tag_name().name().to_string(),
            attribute,
            line: line_of(doc, node),
        })?;

    raw.trim().parse().map_err(|_| Error::InvalidNumber {
        attribute,
        value: raw.to_string(),
        line: line_of(doc, node),
    })
}

fn children_named<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |c| c.is_element() && c.tag_name().name() == name)
}

fn child_text(node: Node<'_, '_>, name: &'static str) -> Option<String> {
    children_named(node, name)
        .next()
        .and_then(|c| c.text())
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn line_of(doc: &Document<'_>, node: Node<'_, '_>) -> u32 {
    doc.text_pos_at(node.range().start).row
}
