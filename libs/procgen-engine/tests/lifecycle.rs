use std::path::Path;

use procgen_attributes::validate_options;
use procgen_engine::memory::{Passthrough, RuleFile, RulePackage};
use procgen_engine::{Engine, EngineHandle, InMemoryEngine};

fn package() -> RulePackage {
    RulePackage::new().with_rule_file(
        "bin/rule.cgb",
        RuleFile::new().with_rule("default$init", Passthrough),
    )
}

#[test]
fn registered_package_resolves_through_handle() {
    let dir = tempfile::tempdir().unwrap();
    let rpk = dir.path().join("city.rpk");

    let mut engine = InMemoryEngine::new();
    let uri = engine.register_package(&rpk, package()).unwrap();
    assert!(uri.starts_with("file:///"));

    let handle = EngineHandle::initialized(engine, Some(Path::new("/opt/procgen/bin/engine"))).unwrap();
    let map = handle.engine().unwrap().resolve_rule_package(&uri).unwrap();
    assert_eq!(map.package_uri(), uri);
    assert!(map.contains_key("bin/rule.cgb"));
}

#[test]
fn engine_stops_with_handle_shutdown() {
    let mut handle = EngineHandle::new(InMemoryEngine::new());
    handle.initialize(Some(Path::new("/opt/procgen/bin/engine"))).unwrap();
    assert!(handle.engine().unwrap().is_started());
    handle.shutdown();
    assert!(handle.engine().is_err());
}

#[test]
fn builtin_encoders_reject_unknown_options() {
    let engine = InMemoryEngine::new();
    let raw = procgen_attributes::parse_entries(["colour:string=red"]).unwrap();
    let err = validate_options(&engine, "com.procgen.InMemoryEncoder", &raw).unwrap_err();
    assert_eq!(err.option(), Some("colour"));
}
