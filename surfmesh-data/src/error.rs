//! Error types for mesh access and PLY I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, writing or querying a mesh.
#[derive(Debug, Error)]
pub enum MeshError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Cannot access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed PLY header (line {line}): {message}")]
    MalformedHeader { line: usize, message: String },

    #[error("Unsupported PLY format: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot parse PLY row (line {line}): {message}")]
    RowParse { line: usize, message: String },

    #[error("Invalid attribute name: '{0}'")]
    InvalidAttributeName(String),

    #[error("Unknown attribute: {0}")]
    KeyNotFound(String),

    #[error("Attribute '{name}' has {actual} values, mesh has {expected} vertices")]
    LengthMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("Face {face} has {arity} vertices, only triangles are supported")]
    UnsupportedArity { face: usize, arity: usize },
}

impl MeshError {
    /// Map an I/O failure on `path` to the matching variant.
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            MeshError::FileNotFound(path)
        } else {
            MeshError::FileAccess { path, source }
        }
    }
}

pub type Result<T> = std::result::Result<T, MeshError>;
