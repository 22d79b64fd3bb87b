//! # Initial Shape Geometry
//!
//! Polygon soup describing one initial shape: flat vertex triples, vertex
//! indices, and the number of indices each face consumes.

use config::constants::{DEFAULT_QUAD_FACE_COUNTS, DEFAULT_QUAD_INDICES, DEFAULT_QUAD_VERTICES};
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::InvalidGeometryError;

/// Validated geometry of one initial shape.
///
/// Invariants, checked at construction:
/// - `vertices.len()` is a multiple of 3
/// - `sum(face_counts) == indices.len()`, no face is empty
/// - every index references an existing vertex triple
///
/// # Example
///
/// ```rust
/// use procgen_shape::InitialShapeGeometry;
///
/// let triangle = InitialShapeGeometry::from_vertices(vec![
///     0.0, 0.0, 0.0,
///     1.0, 0.0, 0.0,
///     0.0, 0.0, 1.0,
/// ])
/// .unwrap();
/// assert_eq!(triangle.indices(), &[0, 1, 2]);
/// assert_eq!(triangle.face_counts(), &[3]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitialShapeGeometry {
    vertices: Vec<f64>,
    indices: Vec<u32>,
    face_counts: Vec<u32>,
}

impl InitialShapeGeometry {
    /// Builds geometry from caller buffers, enforcing the invariants.
    pub fn from_buffers(
        vertices: Vec<f64>,
        indices: Vec<u32>,
        face_counts: Vec<u32>,
    ) -> Result<Self, InvalidGeometryError> {
        if vertices.len() % 3 != 0 {
            return Err(InvalidGeometryError::RaggedVertices {
                len: vertices.len(),
            });
        }

        if let Some(face) = face_counts.iter().position(|&count| count == 0) {
            return Err(InvalidGeometryError::EmptyFace { face });
        }

        let face_total: usize = face_counts.iter().map(|&count| count as usize).sum();
        if face_total != indices.len() {
            return Err(InvalidGeometryError::FaceCountMismatch {
                face_total,
                index_count: indices.len(),
            });
        }

        let vertex_count = vertices.len() / 3;
        if let Some((position, &index)) = indices
            .iter()
            .enumerate()
            .find(|(_, &index)| index as usize >= vertex_count)
        {
            return Err(InvalidGeometryError::IndexOutOfRange {
                index,
                position,
                vertex_count,
            });
        }

        Ok(Self {
            vertices,
            indices,
            face_counts,
        })
    }

    /// Builds a single polygon through all vertices, in order.
    pub fn from_vertices(vertices: Vec<f64>) -> Result<Self, InvalidGeometryError> {
        let count = (vertices.len() / 3) as u32;
        let indices: Vec<u32> = (0..count).collect();
        let face_counts = if count == 0 { Vec::new() } else { vec![count] };
        Self::from_buffers(vertices, indices, face_counts)
    }

    /// The fallback quad: 4 vertices, 4 indices, one face.
    pub fn default_quad() -> Self {
        Self {
            vertices: DEFAULT_QUAD_VERTICES.to_vec(),
            indices: DEFAULT_QUAD_INDICES.to_vec(),
            face_counts: DEFAULT_QUAD_FACE_COUNTS.to_vec(),
        }
    }

    /// Flat vertex coordinates `[x, y, z, x, y, z, ...]`.
    #[inline]
    pub fn vertices(&self) -> &[f64] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    #[inline]
    pub fn face_counts(&self) -> &[u32] {
        &self.face_counts
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_counts.len()
    }

    /// Returns true if there are no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.face_counts.is_empty()
    }

    /// Returns the vertex at the given index.
    ///
    /// Panics if `index` is out of range, like slice indexing.
    #[inline]
    pub fn vertex(&self, index: u32) -> DVec3 {
        let base = index as usize * 3;
        DVec3::new(
            self.vertices[base],
            self.vertices[base + 1],
            self.vertices[base + 2],
        )
    }

    /// Iterates the index slice of each face.
    pub fn faces(&self) -> impl Iterator<Item = &[u32]> {
        let mut offset = 0;
        self.face_counts.iter().map(move |&count| {
            let face = &self.indices[offset..offset + count as usize];
            offset += count as usize;
            face
        })
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        if self.vertices.is_empty() {
            return (DVec3::ZERO, DVec3::ZERO);
        }

        let mut min = self.vertex(0);
        let mut max = min;
        for i in 1..self.vertex_count() as u32 {
            let v = self.vertex(i);
            min = min.min(v);
            max = max.max(v);
        }
        (min, max)
    }

    /// Consumes the geometry, returning its buffers.
    pub fn into_buffers(self) -> (Vec<f64>, Vec<u32>, Vec<u32>) {
        (self.vertices, self.indices, self.face_counts)
    }
}

#[cfg(test)]
mod tests;
