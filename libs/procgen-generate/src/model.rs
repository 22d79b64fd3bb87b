//! Result of generating one initial shape.

use std::collections::BTreeMap;
use std::fmt;

use procgen_attributes::AttributeMap;
use serde::{Deserialize, Serialize};

/// Geometry, reports and interpreter output of one shape.
///
/// Reports stay split by value type so consumers can iterate each map
/// without matching on a variant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedModel {
    /// Position of the shape in the caller's input.
    pub initial_shape_index: usize,
    pub shape_name: String,
    /// Flat xyz triples.
    pub vertices: Vec<f64>,
    pub indices: Vec<u32>,
    pub face_counts: Vec<u32>,
    pub float_report: BTreeMap<String, f64>,
    pub string_report: BTreeMap<String, String>,
    pub bool_report: BTreeMap<String, bool>,
    /// Interpreter prints, one line each.
    pub prints: String,
    pub errors: Vec<String>,
    /// Attributes the shape was generated with.
    pub attributes: AttributeMap,
}

impl GeneratedModel {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn face_count(&self) -> usize {
        self.face_counts.len()
    }

    /// Vertices as `[x, y, z]` triples.
    pub fn vertex_triples(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|v| [v[0], v[1], v[2]])
    }

    /// Index slice of each face.
    pub fn faces(&self) -> impl Iterator<Item = &[u32]> {
        let mut offset = 0;
        self.face_counts.iter().map(move |&count| {
            let end = (offset + count as usize).min(self.indices.len());
            let face = &self.indices[offset.min(end)..end];
            offset = end;
            face
        })
    }

    pub fn report_len(&self) -> usize {
        self.float_report.len() + self.string_report.len() + self.bool_report.len()
    }
}

impl fmt::Display for GeneratedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shape {} '{}': {} vertices, {} faces, {} report entries",
            self.initial_shape_index,
            self.shape_name,
            self.vertex_count(),
            self.face_count(),
            self.report_len()
        )?;
        if !self.errors.is_empty() {
            write!(f, ", {} errors", self.errors.len())?;
        }
        Ok(())
    }
}
