//! Tests for initial shape geometry validation.

use super::*;
use glam::DVec3;

fn unit_quad_vertices() -> Vec<f64> {
    vec![0.0, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 0.0, 0.0]
}

#[test]
fn from_buffers_accepts_valid_geometry() {
    let geo = InitialShapeGeometry::from_buffers(unit_quad_vertices(), vec![0, 1, 2, 3], vec![4])
        .expect("valid quad");
    assert_eq!(geo.vertex_count(), 4);
    assert_eq!(geo.face_count(), 1);
}

/// Face counts must cover the index buffer exactly.
#[test]
fn from_buffers_rejects_face_count_mismatch() {
    let err = InitialShapeGeometry::from_buffers(unit_quad_vertices(), vec![0, 1, 2, 3], vec![3])
        .unwrap_err();
    assert_eq!(
        err,
        InvalidGeometryError::FaceCountMismatch {
            face_total: 3,
            index_count: 4
        }
    );
}

#[test]
fn from_buffers_rejects_ragged_vertices() {
    let err = InitialShapeGeometry::from_buffers(vec![0.0; 10], vec![0, 1, 2], vec![3]).unwrap_err();
    assert!(matches!(err, InvalidGeometryError::RaggedVertices { len: 10 }));
}

#[test]
fn from_buffers_rejects_out_of_range_index() {
    let err = InitialShapeGeometry::from_buffers(unit_quad_vertices(), vec![0, 1, 2, 4], vec![4])
        .unwrap_err();
    assert_eq!(
        err,
        InvalidGeometryError::IndexOutOfRange {
            index: 4,
            position: 3,
            vertex_count: 4
        }
    );
}

#[test]
fn from_buffers_rejects_empty_face() {
    let err = InitialShapeGeometry::from_buffers(unit_quad_vertices(), vec![0, 1, 2, 3], vec![4, 0])
        .unwrap_err();
    assert_eq!(err, InvalidGeometryError::EmptyFace { face: 1 });
}

#[test]
fn default_quad_matches_constants() {
    let quad = InitialShapeGeometry::default_quad();
    assert_eq!(quad.vertex_count(), 4);
    assert_eq!(quad.indices().len(), 4);
    assert_eq!(quad.face_counts(), &[4]);
    assert_eq!(quad.vertex(2), DVec3::new(1.0, 0.0, 1.0));
}

#[test]
fn from_vertices_builds_single_polygon() {
    let geo = InitialShapeGeometry::from_vertices(unit_quad_vertices()).unwrap();
    assert_eq!(geo, InitialShapeGeometry::default_quad());
}

#[test]
fn faces_split_indices_by_counts() {
    let geo = InitialShapeGeometry::from_buffers(
        unit_quad_vertices(),
        vec![0, 1, 2, 0, 2, 3],
        vec![3, 3],
    )
    .unwrap();
    let faces: Vec<&[u32]> = geo.faces().collect();
    assert_eq!(faces, vec![&[0, 1, 2][..], &[0, 2, 3][..]]);
}

#[test]
fn bounding_box_spans_vertices() {
    let (min, max) = InitialShapeGeometry::default_quad().bounding_box();
    assert_eq!(min, DVec3::ZERO);
    assert_eq!(max, DVec3::new(1.0, 0.0, 1.0));
}
