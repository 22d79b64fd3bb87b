//! Tests for request building and attribute overrides.

use super::*;
use procgen_attributes::AttributeMapBuilder;

#[test]
fn from_geometries_keeps_input_order() {
    let triangle = InitialShapeGeometry::from_vertices(vec![0.0; 9]).unwrap();
    let request = GenerationRequest::from_geometries([
        InitialShapeGeometry::default_quad(),
        triangle,
    ]);

    match &request.shapes()[1] {
        ShapeSource::Buffers { face_counts, .. } => assert_eq!(face_counts, &[3]),
        other => panic!("unexpected source: {other:?}"),
    }
}

#[test]
fn request_defaults_to_in_memory_encoder() {
    let request = GenerationRequest::from_path("");
    assert_eq!(request.encoder, EncoderChoice::default());
    assert!(request.rule_package.is_none());
    assert!(request.attributes.is_empty());
}

#[test]
fn string_override_falls_back_on_type_mismatch() {
    let attributes = AttributeMapBuilder::new()
        .set(ATTR_START_RULE, "lot$init")
        .set(ATTR_RULE_FILE, 3)
        .build();
    assert_eq!(
        string_override(&attributes, ATTR_START_RULE, "default$init"),
        "lot$init"
    );
    assert_eq!(
        string_override(&attributes, ATTR_RULE_FILE, "bin/rule.cgb"),
        "bin/rule.cgb"
    );
}

#[test]
fn seed_override_reads_int_only() {
    let seeded = AttributeMapBuilder::new().set(ATTR_SEED, 7).build();
    assert_eq!(seed_override(&seeded, 666), 7);

    let mistyped = AttributeMapBuilder::new().set(ATTR_SEED, 7.0).build();
    assert_eq!(seed_override(&mistyped, 666), 666);
    assert_eq!(seed_override(&AttributeMap::new(), 666), 666);
}

#[test]
fn progress_records_stage_on_diagnostics() {
    let mut progress = Progress::new();
    progress.advance(Stage::ResolvingPackage);
    progress.advance(Stage::BuildingShapes);
    progress.warn(2, "default quad substituted".to_string());

    let diagnostic = &progress.diagnostics[0];
    assert_eq!(diagnostic.stage, Stage::BuildingShapes);
    assert_eq!(diagnostic.shape_index, Some(2));
}

#[test]
fn session_starts_with_empty_cache() {
    let mut session = GenerationSession::new(Some(ResolveMap::new("file:///rules/city.rpk")));
    assert!(session.cache().is_empty());
    let (map, _cache) = session.parts();
    assert_eq!(map.map(ResolveMap::package_uri), Some("file:///rules/city.rpk"));
}
