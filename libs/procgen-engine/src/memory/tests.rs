//! Tests for the in-memory engine.

use super::*;
use approx::assert_relative_eq;
use config::constants::{
    ENCODER_ID_IN_MEMORY, ENCODER_ID_OBJ, ENCODER_ID_PRINT, ENCODER_ID_REPORT,
    ENCODER_OPT_BASE_NAME,
};
use procgen_attributes::{validate, AttributeMap, AttributeMapBuilder};

use crate::error::SinkError;

const PACKAGE_URI: &str = "file:///rules/city.rpk";

/// Sink recording every callback as a line of text.
#[derive(Default)]
struct TranscriptSink {
    lines: Vec<String>,
    files: Vec<(String, String)>,
}

impl OutputSink for TranscriptSink {
    fn begin_model(&mut self, shape_index: usize, shape_name: &str) -> Result<(), SinkError> {
        self.lines.push(format!("begin {shape_index} {shape_name}"));
        Ok(())
    }

    fn emit_geometry(
        &mut self,
        vertices: &[f64],
        indices: &[u32],
        face_counts: &[u32],
    ) -> Result<(), SinkError> {
        self.lines.push(format!(
            "geometry {} {} {}",
            vertices.len() / 3,
            indices.len(),
            face_counts.len()
        ));
        Ok(())
    }

    fn emit_float_report(&mut self, key: &str, value: f64) -> Result<(), SinkError> {
        self.lines.push(format!("float {key}={value}"));
        Ok(())
    }

    fn emit_string_report(&mut self, key: &str, value: &str) -> Result<(), SinkError> {
        self.lines.push(format!("string {key}={value}"));
        Ok(())
    }

    fn emit_bool_report(&mut self, key: &str, value: bool) -> Result<(), SinkError> {
        self.lines.push(format!("bool {key}={value}"));
        Ok(())
    }

    fn emit_print(&mut self, text: &str) -> Result<(), SinkError> {
        self.lines.push(format!("print {text}"));
        Ok(())
    }

    fn emit_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.lines.push(format!("error {message}"));
        Ok(())
    }

    fn end_model(&mut self) -> Result<(), SinkError> {
        self.lines.push("end".to_string());
        Ok(())
    }

    fn write_file(&mut self, name: &str, contents: &[u8]) -> Result<(), SinkError> {
        self.files
            .push((name.to_string(), String::from_utf8_lossy(contents).into_owned()));
        Ok(())
    }
}

fn started_engine() -> InMemoryEngine {
    let package = RulePackage::new()
        .with_rule_file(
            "bin/rule.cgb",
            RuleFile::new()
                .with_rule("default$init", Extrude::default())
                .with_rule("default$flat", Passthrough),
        )
        .with_asset("assets/tri.obj", "v 0 0 0\nv 1 0 0\nv 0 0 1\nf 1 2 3\n");
    let mut engine = InMemoryEngine::new().with_package_uri(PACKAGE_URI, package);
    engine
        .start(&StartupConfig {
            extension_dir: "/opt/procgen/lib".into(),
            min_log_level: LogLevel::Info,
        })
        .unwrap();
    engine
}

/// Spec with every option at its default.
fn spec(encoder_id: &str) -> EncoderSpec {
    let schema = encoders::schema(encoder_id).unwrap();
    EncoderSpec::new(encoder_id, validate(&schema, &AttributeMap::new()).unwrap())
}

#[test]
fn resolve_map_points_into_package() {
    let engine = started_engine();
    let map = engine.resolve_rule_package(PACKAGE_URI).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(
        map.resolve("assets/tri.obj"),
        Some("file:///rules/city.rpk!/assets/tri.obj")
    );
}

#[test]
fn unknown_package_fails_to_resolve() {
    let err = started_engine()
        .resolve_rule_package("file:///rules/missing.rpk")
        .unwrap_err();
    assert_eq!(err.status, Status::ResolveFailed);
}

#[test]
fn stopped_engine_refuses_work() {
    let mut engine = started_engine();
    engine.stop();
    assert!(!engine.is_started());
    assert_eq!(
        engine.resolve_rule_package(PACKAGE_URI).unwrap_err().status,
        Status::NotInitialized
    );
}

#[test]
fn generate_calls_sink_in_encoder_order() {
    let engine = started_engine();
    let map = engine.resolve_rule_package(PACKAGE_URI).unwrap();
    let shape = InitialShape::new(InitialShapeGeometry::default_quad()).with_seed(7);
    let encoders = [
        spec(ENCODER_ID_IN_MEMORY),
        spec(ENCODER_ID_REPORT),
        spec(ENCODER_ID_PRINT),
    ];

    let mut sink = TranscriptSink::default();
    engine
        .generate(&[shape], &encoders, &mut sink, &mut Cache::new(), Some(&map))
        .unwrap();

    assert_eq!(
        sink.lines,
        vec![
            "begin 0 TheInitialShape",
            "geometry 8 24 6",
            "float area=1",
            "float height=3",
            "string startRule=default$init",
            "bool extruded=true",
            "print TheInitialShape: extruded 1 face(s) by 3 (seed 7)",
            "end",
        ]
    );
}

#[test]
fn extrude_reads_height_attribute() {
    let engine = started_engine();
    let map = engine.resolve_rule_package(PACKAGE_URI).unwrap();
    let attributes = AttributeMapBuilder::new().set(HEIGHT_ATTRIBUTE, 2.5).build();
    let shape = InitialShape::new(InitialShapeGeometry::default_quad()).with_attributes(attributes);

    let mut sink = TranscriptSink::default();
    engine
        .generate(&[shape], &[spec(ENCODER_ID_REPORT)], &mut sink, &mut Cache::new(), Some(&map))
        .unwrap();
    assert!(sink.lines.contains(&"float height=2.5".to_string()));
}

#[test]
fn mistyped_height_is_a_rule_error() {
    let engine = started_engine();
    let map = engine.resolve_rule_package(PACKAGE_URI).unwrap();
    let attributes = AttributeMapBuilder::new().set(HEIGHT_ATTRIBUTE, 4).build();
    let shape = InitialShape::new(InitialShapeGeometry::default_quad()).with_attributes(attributes);

    let mut sink = TranscriptSink::default();
    engine
        .generate(&[shape], &[spec(ENCODER_ID_PRINT)], &mut sink, &mut Cache::new(), Some(&map))
        .unwrap();
    assert!(sink
        .lines
        .iter()
        .any(|line| line.starts_with("error attribute 'height' must be a float")));
}

#[test]
fn extrude_area_sums_faces() {
    let geometry = InitialShapeGeometry::from_buffers(
        vec![0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 2.0, 0.0, 2.0, 0.0, 0.0, 2.0],
        vec![0, 1, 2, 0, 2, 3],
        vec![3, 3],
    )
    .unwrap();
    let mut out = Derivation::new();
    Extrude::default()
        .derive(&InitialShape::new(geometry), &mut out)
        .unwrap();

    assert_relative_eq!(out.float_reports()[0].1, 4.0);
    assert_eq!(out.geometry()[0].face_count(), 2 * (2 + 3));
}

#[test]
fn zero_height_keeps_faces_flat() {
    let attributes = AttributeMapBuilder::new().set(HEIGHT_ATTRIBUTE, 0.0).build();
    let shape = InitialShape::new(InitialShapeGeometry::default_quad()).with_attributes(attributes);
    let mut out = Derivation::new();
    Extrude::default().derive(&shape, &mut out).unwrap();

    assert_eq!(out.geometry(), &[InitialShapeGeometry::default_quad()]);
    assert_eq!(out.bool_reports(), &[("extruded".to_string(), false)]);
    assert_relative_eq!(out.float_reports()[0].1, 1.0);
    assert_eq!(out.prints(), &["TheInitialShape: kept 1 face(s) flat (seed 666)".to_string()]);
}

#[test]
fn missing_start_rule_is_rule_not_found() {
    let engine = started_engine();
    let map = engine.resolve_rule_package(PACKAGE_URI).unwrap();
    let shape =
        InitialShape::new(InitialShapeGeometry::default_quad()).with_rule("bin/rule.cgb", "default$nope");

    let err = engine
        .generate(&[shape], &[], &mut TranscriptSink::default(), &mut Cache::new(), Some(&map))
        .unwrap_err();
    assert_eq!(err.status, Status::RuleNotFound);
}

#[test]
fn rule_file_entry_uri_works_without_resolve_map() {
    let engine = started_engine();
    let shape = InitialShape::new(InitialShapeGeometry::default_quad())
        .with_rule(entry_uri(PACKAGE_URI, "bin/rule.cgb"), "default$flat");

    let mut sink = TranscriptSink::default();
    engine
        .generate(&[shape], &[spec(ENCODER_ID_IN_MEMORY)], &mut sink, &mut Cache::new(), None)
        .unwrap();
    assert_eq!(sink.lines[1], "geometry 4 4 1");
}

#[test]
fn unknown_encoder_fails_before_any_callback() {
    let engine = started_engine();
    let map = engine.resolve_rule_package(PACKAGE_URI).unwrap();
    let shape = InitialShape::new(InitialShapeGeometry::default_quad());
    let encoders = [EncoderSpec::new("com.example.Missing", AttributeMap::new())];

    let mut sink = TranscriptSink::default();
    let err = engine
        .generate(&[shape], &encoders, &mut sink, &mut Cache::new(), Some(&map))
        .unwrap_err();
    assert_eq!(err.status, Status::EncoderNotFound);
    assert!(sink.lines.is_empty());
}

#[test]
fn obj_encoder_writes_named_file() {
    let engine = started_engine();
    let map = engine.resolve_rule_package(PACKAGE_URI).unwrap();
    let shape = InitialShape::new(InitialShapeGeometry::default_quad()).with_name("lot7");
    let options = AttributeMapBuilder::new()
        .set(ENCODER_OPT_BASE_NAME, "city")
        .build();

    let mut sink = TranscriptSink::default();
    engine
        .generate(
            &[shape],
            &[EncoderSpec::new(ENCODER_ID_OBJ, options)],
            &mut sink,
            &mut Cache::new(),
            Some(&map),
        )
        .unwrap();

    let (name, text) = &sink.files[0];
    assert_eq!(name, "city_lot7.obj");
    assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 8);
    assert_eq!(text.lines().filter(|l| l.starts_with("f ")).count(), 6);
}

#[test]
fn package_asset_geometry_resolves() {
    let engine = started_engine();
    let map = engine.resolve_rule_package(PACKAGE_URI).unwrap();
    let geometry = engine
        .resolve_geometry("assets/tri.obj", Some(&map), &mut Cache::new())
        .unwrap();
    assert_eq!(geometry.face_counts(), &[3]);
}

#[test]
fn file_geometry_is_read_once_through_cache() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lot.obj");
    std::fs::write(&path, "v 0 0 0\nv 0 0 1\nv 1 0 1\nv 1 0 0\nf 1 2 3 4\n").unwrap();
    let uri = to_file_uri(&path).unwrap();

    let engine = started_engine();
    let mut cache = Cache::new();
    let first = engine.resolve_geometry(&uri, None, &mut cache).unwrap();
    std::fs::remove_file(&path).unwrap();
    let second = engine.resolve_geometry(&uri, None, &mut cache).unwrap();

    assert_eq!(first, InitialShapeGeometry::default_quad());
    assert_eq!(first, second);
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn missing_file_is_resolution_error() {
    let engine = started_engine();
    let err = engine
        .resolve_geometry("file:///does/not/exist.obj", None, &mut Cache::new())
        .unwrap_err();
    assert_eq!(err.uri, "file:///does/not/exist.obj");
}

#[test]
fn obj_decode_handles_slashes_and_negative_indices() {
    let geometry = obj::decode(b"v 0 0 0\nv 1 0 0\nv 0 0 1\nvt 0 0\nf 1/1 -2/1 -1/1\n").unwrap();
    assert_eq!(geometry.indices(), &[0, 1, 2]);
}

#[test]
fn obj_decode_rejects_out_of_range_face() {
    assert!(obj::decode(b"v 0 0 0\nv 1 0 0\nv 0 0 1\nf 1 2 4\n").is_err());
    assert!(obj::decode(b"v 0 0 0\n").is_err());
}
