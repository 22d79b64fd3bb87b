//! Rule programs of the in-memory engine.
//!
//! A program derives one [`InitialShape`] into a [`Derivation`]; encoders
//! then read the derivation.

use config::constants::approx_equal;
use glam::DVec3;
use procgen_shape::InitialShapeGeometry;

use crate::engine::InitialShape;
use crate::error::EngineError;

/// Attribute read by [`Extrude`].
pub const HEIGHT_ATTRIBUTE: &str = "height";

/// Height used by [`Extrude`] when the shape carries no `height` attribute.
pub const DEFAULT_EXTRUDE_HEIGHT: f64 = 3.0;

/// Output of deriving one shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derivation {
    geometry: Vec<InitialShapeGeometry>,
    float_reports: Vec<(String, f64)>,
    string_reports: Vec<(String, String)>,
    bool_reports: Vec<(String, bool)>,
    prints: Vec<String>,
    errors: Vec<String>,
}

impl Derivation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_geometry(&mut self, geometry: InitialShapeGeometry) {
        self.geometry.push(geometry);
    }

    pub fn report_float(&mut self, key: impl Into<String>, value: f64) {
        self.float_reports.push((key.into(), value));
    }

    pub fn report_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.string_reports.push((key.into(), value.into()));
    }

    pub fn report_bool(&mut self, key: impl Into<String>, value: bool) {
        self.bool_reports.push((key.into(), value));
    }

    pub fn print(&mut self, text: impl Into<String>) {
        self.prints.push(text.into());
    }

    /// Records a non-fatal rule error; derivation continues.
    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn geometry(&self) -> &[InitialShapeGeometry] {
        &self.geometry
    }

    pub fn float_reports(&self) -> &[(String, f64)] {
        &self.float_reports
    }

    pub fn string_reports(&self) -> &[(String, String)] {
        &self.string_reports
    }

    pub fn bool_reports(&self) -> &[(String, bool)] {
        &self.bool_reports
    }

    pub fn prints(&self) -> &[String] {
        &self.prints
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}

/// A compiled start rule.
///
/// Closures with the matching signature are programs too:
///
/// ```rust
/// use procgen_engine::memory::{Derivation, RuleFile};
/// use procgen_engine::{EngineError, InitialShape};
///
/// let rules = RuleFile::new().with_rule(
///     "default$init",
///     |shape: &InitialShape, out: &mut Derivation| -> Result<(), EngineError> {
///         out.report_float("seed", f64::from(shape.seed));
///         Ok(())
///     },
/// );
/// assert!(rules.rule("default$init").is_some());
/// ```
pub trait RuleProgram: Send + Sync {
    fn derive(&self, shape: &InitialShape, out: &mut Derivation) -> Result<(), EngineError>;
}

impl<F> RuleProgram for F
where
    F: Fn(&InitialShape, &mut Derivation) -> Result<(), EngineError> + Send + Sync,
{
    fn derive(&self, shape: &InitialShape, out: &mut Derivation) -> Result<(), EngineError> {
        self(shape, out)
    }
}

/// Emits the initial geometry unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl RuleProgram for Passthrough {
    fn derive(&self, shape: &InitialShape, out: &mut Derivation) -> Result<(), EngineError> {
        out.push_geometry(shape.geometry.clone());
        out.print(format!("{}: passthrough", shape.name));
        Ok(())
    }
}

/// Extrudes every face along +Y.
///
/// Output vertices are the initial vertices followed by their lifted
/// copies. Each face yields a reversed bottom face, a top face and one quad
/// per edge.
///
/// Reports `area` (summed face area), `height`, `startRule` and `extruded`.
/// A zero height emits the initial faces unchanged with `extruded` false.
#[derive(Debug, Clone, Copy)]
pub struct Extrude {
    pub default_height: f64,
}

impl Default for Extrude {
    fn default() -> Self {
        Self {
            default_height: DEFAULT_EXTRUDE_HEIGHT,
        }
    }
}

impl Extrude {
    fn height(&self, shape: &InitialShape, out: &mut Derivation) -> f64 {
        match shape.attributes.get(HEIGHT_ATTRIBUTE) {
            None => self.default_height,
            Some(value) => match value.as_f64() {
                Some(height) => height,
                None => {
                    out.error(format!(
                        "attribute '{HEIGHT_ATTRIBUTE}' must be a float, got {}",
                        value.value_type()
                    ));
                    self.default_height
                }
            },
        }
    }
}

impl RuleProgram for Extrude {
    fn derive(&self, shape: &InitialShape, out: &mut Derivation) -> Result<(), EngineError> {
        let height = self.height(shape, out);
        let base = &shape.geometry;
        let area: f64 = base.faces().map(|face| face_area(base, face)).sum();

        let extruded = !approx_equal(height, 0.0);
        if extruded {
            out.push_geometry(lift(base, height)?);
        } else {
            out.push_geometry(base.clone());
        }

        out.report_float("area", area);
        out.report_float("height", height);
        out.report_string("startRule", shape.start_rule.as_str());
        out.report_bool("extruded", extruded);
        if extruded {
            out.print(format!(
                "{}: extruded {} face(s) by {} (seed {})",
                shape.name,
                base.face_count(),
                height,
                shape.seed
            ));
        } else {
            out.print(format!(
                "{}: kept {} face(s) flat (seed {})",
                shape.name,
                base.face_count(),
                shape.seed
            ));
        }
        Ok(())
    }
}

/// Builds the solid swept by `base` moving `height` along +Y.
fn lift(base: &InitialShapeGeometry, height: f64) -> Result<InitialShapeGeometry, EngineError> {
    let offset = base.vertex_count() as u32;

    let mut vertices = Vec::with_capacity(base.vertices().len() * 2);
    vertices.extend_from_slice(base.vertices());
    for i in 0..offset {
        let lifted = base.vertex(i) + DVec3::Y * height;
        vertices.extend_from_slice(&lifted.to_array());
    }

    let mut indices: Vec<u32> = Vec::new();
    let mut face_counts: Vec<u32> = Vec::new();
    for face in base.faces() {
        indices.extend(face.iter().rev());
        face_counts.push(face.len() as u32);

        indices.extend(face.iter().map(|&i| i + offset));
        face_counts.push(face.len() as u32);

        for (k, &a) in face.iter().enumerate() {
            let b = face[(k + 1) % face.len()];
            indices.extend_from_slice(&[a, b, b + offset, a + offset]);
            face_counts.push(4);
        }
    }

    InitialShapeGeometry::from_buffers(vertices, indices, face_counts)
        .map_err(|e| EngineError::rule_failed(format!("extrusion produced {e}")))
}

/// Area of a planar polygon (Newell's method).
fn face_area(geometry: &InitialShapeGeometry, face: &[u32]) -> f64 {
    let mut normal = DVec3::ZERO;
    for (k, &a) in face.iter().enumerate() {
        let b = face[(k + 1) % face.len()];
        normal += geometry.vertex(a).cross(geometry.vertex(b));
    }
    normal.length() * 0.5
}
