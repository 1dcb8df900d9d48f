//! Error types for GPX reading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for GPX operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading a trace.
#[derive(Debug, Error)]
pub enum Error {
    /// The file or directory could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Well-formed XML, but not a GPX document
    #[error("not a GPX document (root element <{0}>)")]
    NotGpx(String),

    /// A point element lacks a required attribute
    #[error("<{element}> at line {line} is missing the `{attribute}` attribute")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
        line: u32,
    },

    /// A coordinate attribute is not a number
    #[error("invalid `{attribute}` value {value:?} at line {line}")]
    InvalidNumber {
        attribute: &'static str,
        value: String,
        line: u32,
    },

    /// A coordinate lies outside WGS84 bounds
    #[error("coordinate ({lat}, {lon}) at line {line} is out of range")]
    OutOfRange { lat: f64, lon: f64, line: u32 },

    /// A file failed to parse
    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            // I/O errors already carry their path
            Error::Io { .. } | Error::File { .. } => self,
            other => Error::File {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }
}
