//! Where an initial shape's geometry comes from.

use std::path::{Path, PathBuf};

use pipeline_types::{Cache, ResolveMap};

use crate::error::{GeometryResolutionError, ShapeError};
use crate::geometry::InitialShapeGeometry;
use crate::uri::to_file_uri;

/// Loads geometry for a URI. Implemented by engines, which know how to
/// look inside rule packages and decode geometry formats.
pub trait GeometryResolver {
    fn resolve_geometry(
        &self,
        uri: &str,
        resolve_map: Option<&ResolveMap>,
        cache: &mut Cache,
    ) -> Result<InitialShapeGeometry, GeometryResolutionError>;
}

/// Caller description of one initial shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeSource {
    /// A geometry file. An empty path means "use the default quad".
    Path(PathBuf),
    /// Raw buffers, validated on conversion.
    Buffers {
        vertices: Vec<f64>,
        indices: Vec<u32>,
        face_counts: Vec<u32>,
    },
}

impl ShapeSource {
    pub fn path(path: impl AsRef<Path>) -> Self {
        ShapeSource::Path(path.as_ref().to_path_buf())
    }

    pub fn buffers(vertices: Vec<f64>, indices: Vec<u32>, face_counts: Vec<u32>) -> Self {
        ShapeSource::Buffers {
            vertices,
            indices,
            face_counts,
        }
    }

    /// Produces validated geometry for this source.
    ///
    /// Errors are per shape; the caller decides whether to fall back to
    /// [`InitialShapeGeometry::default_quad`].
    pub fn into_geometry(
        self,
        resolver: &dyn GeometryResolver,
        resolve_map: Option<&ResolveMap>,
        cache: &mut Cache,
    ) -> Result<InitialShapeGeometry, ShapeError> {
        match self {
            ShapeSource::Path(path) if path.as_os_str().is_empty() => {
                Ok(InitialShapeGeometry::default_quad())
            }
            ShapeSource::Path(path) => {
                let uri = to_file_uri(&path)?;
                tracing::debug!(%uri, "resolving initial shape geometry");
                Ok(resolver.resolve_geometry(&uri, resolve_map, cache)?)
            }
            ShapeSource::Buffers {
                vertices,
                indices,
                face_counts,
            } => Ok(InitialShapeGeometry::from_buffers(
                vertices,
                indices,
                face_counts,
            )?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvalidGeometryError;
    use std::cell::Cell;

    /// Answers every URI with a triangle and counts calls.
    struct TriangleResolver {
        calls: Cell<usize>,
    }

    impl GeometryResolver for TriangleResolver {
        fn resolve_geometry(
            &self,
            uri: &str,
            _resolve_map: Option<&ResolveMap>,
            _cache: &mut Cache,
        ) -> Result<InitialShapeGeometry, GeometryResolutionError> {
            self.calls.set(self.calls.get() + 1);
            if uri.ends_with("missing.obj") {
                return Err(GeometryResolutionError::new(uri, "not found"));
            }
            InitialShapeGeometry::from_vertices(vec![0.0; 9])
                .map_err(|e| GeometryResolutionError::new(uri, e.to_string()))
        }
    }

    fn resolver() -> TriangleResolver {
        TriangleResolver {
            calls: Cell::new(0),
        }
    }

    #[test]
    fn empty_path_is_default_quad_without_resolving() {
        let resolver = resolver();
        let geo = ShapeSource::path("")
            .into_geometry(&resolver, None, &mut Cache::new())
            .unwrap();
        assert_eq!(geo, InitialShapeGeometry::default_quad());
        assert_eq!(resolver.calls.get(), 0);
    }

    #[test]
    fn path_is_resolved_through_resolver() {
        let resolver = resolver();
        let geo = ShapeSource::path("lot.obj")
            .into_geometry(&resolver, None, &mut Cache::new())
            .unwrap();
        assert_eq!(geo.face_counts(), &[3]);
        assert_eq!(resolver.calls.get(), 1);
    }

    #[test]
    fn resolution_failure_is_reported() {
        let err = ShapeSource::path("missing.obj")
            .into_geometry(&resolver(), None, &mut Cache::new())
            .unwrap_err();
        assert!(matches!(err, ShapeError::Resolution(_)));
    }

    #[test]
    fn invalid_buffers_are_reported() {
        let err = ShapeSource::buffers(vec![0.0; 9], vec![0, 1, 2], vec![2])
            .into_geometry(&resolver(), None, &mut Cache::new())
            .unwrap_err();
        assert_eq!(
            err,
            ShapeError::Invalid(InvalidGeometryError::FaceCountMismatch {
                face_total: 2,
                index_count: 3
            })
        );
    }
}
