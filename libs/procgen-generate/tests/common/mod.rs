#![allow(dead_code)]

use std::path::Path;

use procgen_engine::memory::{Extrude, Passthrough, RuleFile, RulePackage};
use procgen_engine::{EngineError, EngineHandle, InMemoryEngine, InitialShape};
use procgen_engine::memory::Derivation;

pub const PACKAGE_PATH: &str = "/rules/city.rpk";
pub const ENGINE_PATH: &str = "/opt/procgen/bin/engine";

/// Rule package with an extrusion start rule, a passthrough rule and a rule
/// that fails on shapes with more than one face.
pub fn city_package() -> RulePackage {
    RulePackage::new().with_rule_file(
        "bin/rule.cgb",
        RuleFile::new()
            .with_rule("default$init", Extrude::default())
            .with_rule("default$flat", Passthrough)
            .with_rule(
                "default$picky",
                |shape: &InitialShape, out: &mut Derivation| -> Result<(), EngineError> {
                    if shape.geometry.face_count() > 1 {
                        return Err(EngineError::rule_failed("only single faces"));
                    }
                    out.push_geometry(shape.geometry.clone());
                    out.report_float("faces", shape.geometry.face_count() as f64);
                    Ok(())
                },
            ),
    )
}

pub fn handle() -> EngineHandle<InMemoryEngine> {
    let mut engine = InMemoryEngine::new();
    engine.register_package(PACKAGE_PATH, city_package()).unwrap();
    EngineHandle::initialized(engine, Some(Path::new(ENGINE_PATH))).unwrap()
}
