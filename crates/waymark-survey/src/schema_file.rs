//! Schema documents.
//!
//! A schema is a JSON object keyed by waypoint name:
//!
//! ```json
//! {
//!   "schema": "movilidad-v1",
//!   "parada": { "highway": "bus_stop", "shelter": "yes" },
//!   "taxi":   { "amenity": "taxi" }
//! }
//! ```
//!
//! The reserved `schema` key names the document and is never a waypoint.
//! A string or number there becomes the schema identifier; any other value
//! is ignored.
//! Tag values may be strings, numbers or booleans; numbers and booleans are
//! stored in their JSON spelling.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};
use waymark_core::{Schema, TagSet};

use crate::error::{Error, Result};

/// Top-level key holding the schema identifier.
pub const SCHEMA_META_KEY: &str = "schema";

/// Read and parse a schema document.
pub fn load_schema(path: impl AsRef<Path>) -> Result<Schema> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let schema = parse_schema(&text)?;
    info!(
        path = %path.display(),
        id = schema.id().unwrap_or("-"),
        entries = schema.len(),
        "loaded schema"
    );
    Ok(schema)
}

/// Parse a schema document.
pub fn parse_schema(text: &str) -> Result<Schema> {
    let document: Value = serde_json::from_str(text)?;
    let Value::Object(entries) = document else {
        return Err(Error::schema("<document>", "expected a JSON object at the top level"));
    };

    let mut id = None;
    let mut waypoints = Vec::with_capacity(entries.len());

    for (name, value) in entries {
        if name == SCHEMA_META_KEY {
            id = schema_id(value);
            continue;
        }
        let tags = tag_set(&name, value)?;
        waypoints.push((name, tags));
    }

    Ok(Schema::new(id, waypoints))
}

fn schema_id(value: Value) -> Option<String> {
    match value {
        Value::String(id) => Some(id),
        Value::Number(n) => Some(n.to_string()),
        other => {
            debug!(metadata = %other, "schema metadata has no scalar identifier");
            None
        }
    }
}

fn tag_set(name: &str, value: Value) -> Result<TagSet> {
    let Value::Object(tags) = value else {
        return Err(Error::schema(
            name,
            format!("expected an object of tags, got {}", kind_of(&value)),
        ));
    };

    let mut set = TagSet::new();
    for (key, value) in tags {
        let value = match value {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(Error::schema(
                    name,
                    format!("tag {:?} has unsupported value {}", key, kind_of(&other)),
                ))
            }
        };
        set.insert(key, value);
    }
    Ok(set)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
