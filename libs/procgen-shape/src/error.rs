//! # Shape Errors
//!
//! Error types for initial shape construction. Both geometry errors are
//! recoverable per shape: callers fall back to the default quad.

use thiserror::Error;

/// Caller-supplied buffers violate the geometry invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidGeometryError {
    /// Vertex buffer length is not a multiple of 3.
    #[error("Vertex buffer length {len} is not a multiple of 3")]
    RaggedVertices { len: usize },

    /// Face counts do not add up to the number of indices.
    #[error("Face counts sum to {face_total} but there are {index_count} indices")]
    FaceCountMismatch {
        face_total: usize,
        index_count: usize,
    },

    /// A face has no vertices.
    #[error("Face {face} has zero vertices")]
    EmptyFace { face: usize },

    /// An index points past the last vertex.
    #[error("Index {index} at position {position} exceeds vertex count {vertex_count}")]
    IndexOutOfRange {
        index: u32,
        position: usize,
        vertex_count: usize,
    },
}

/// Geometry could not be loaded from a URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not resolve geometry from '{uri}': {reason}")]
pub struct GeometryResolutionError {
    pub uri: String,
    pub reason: String,
}

impl GeometryResolutionError {
    pub fn new(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            reason: reason.into(),
        }
    }
}

/// A filesystem path could not be turned into a file URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    #[error("Path '{0}' cannot be expressed as a file URI")]
    NotAFilePath(String),

    #[error("Current directory is unavailable: {0}")]
    CurrentDir(String),
}

/// Any failure while turning a [`crate::ShapeSource`] into geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error(transparent)]
    Invalid(#[from] InvalidGeometryError),

    #[error(transparent)]
    Resolution(#[from] GeometryResolutionError),

    #[error(transparent)]
    Uri(#[from] UriError),
}
