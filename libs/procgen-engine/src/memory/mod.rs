//! # In-Memory Engine
//!
//! Deterministic reference engine. Rule packages are registered up front
//! and addressed by URI; rule files map start rules to [`RuleProgram`]s.
//!
//! ## Resolution
//!
//! ```text
//! resolve_rule_package(uri) → { key → "<uri>!/<key>" }
//! rule file:  shape.rule_file → resolve map → package → RuleFile
//! geometry:   resolve map → package asset | file:// (cached) → OBJ decode
//! ```
//!
//! The call cache only holds geometry files read from disk. Derivations are
//! recomputed on every call; `generate` does not touch the cache.

mod encoders;
pub mod obj;
mod package;
mod program;

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use config::constants::MAX_FILE_SIZE;
use config::settings::LogLevel;
use pipeline_types::{Cache, ResolveMap};
use procgen_attributes::{EncoderSchema, EncoderSchemas};
use procgen_shape::{
    file_uri_to_path, to_file_uri, GeometryResolutionError, GeometryResolver,
    InitialShapeGeometry, UriError,
};

pub use package::{entry_uri, split_entry_uri, RuleFile, RulePackage};
pub use program::{
    Derivation, Extrude, Passthrough, RuleProgram, DEFAULT_EXTRUDE_HEIGHT, HEIGHT_ATTRIBUTE,
};

use crate::engine::{EncoderSpec, Engine, InitialShape, StartupConfig};
use crate::error::{EngineError, Status};
use crate::log::LogForwarder;
use crate::sink::OutputSink;

/// Reference engine keeping every rule package in memory.
///
/// # Example
///
/// ```rust
/// use procgen_engine::memory::{Extrude, RuleFile, RulePackage};
/// use procgen_engine::{Engine, EngineHandle, InMemoryEngine};
///
/// let package = RulePackage::new()
///     .with_rule_file("bin/rule.cgb", RuleFile::new().with_rule("default$init", Extrude::default()));
/// let engine = InMemoryEngine::new().with_package_uri("file:///rules/city.rpk", package);
///
/// let handle = EngineHandle::initialized(engine, Some("/opt/procgen/bin/engine".as_ref())).unwrap();
/// let map = handle.engine().unwrap().resolve_rule_package("file:///rules/city.rpk").unwrap();
/// assert_eq!(map.resolve("bin/rule.cgb"), Some("file:///rules/city.rpk!/bin/rule.cgb"));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryEngine {
    packages: BTreeMap<String, RulePackage>,
    log: Option<LogForwarder>,
}

impl InMemoryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `package` under an already-normalized URI.
    pub fn with_package_uri(mut self, uri: impl Into<String>, package: RulePackage) -> Self {
        self.packages.insert(uri.into(), package);
        self
    }

    /// Registers `package` under the file URI of `path` and returns that URI.
    pub fn register_package(
        &mut self,
        path: impl AsRef<Path>,
        package: RulePackage,
    ) -> Result<String, UriError> {
        let uri = to_file_uri(path.as_ref())?;
        self.packages.insert(uri.clone(), package);
        Ok(uri)
    }

    pub fn is_started(&self) -> bool {
        self.log.is_some()
    }

    fn running(&self) -> Result<LogForwarder, EngineError> {
        self.log.ok_or_else(EngineError::not_initialized)
    }

    fn package_entry<'e>(&self, entry: &'e str) -> Option<(&RulePackage, &'e str)> {
        let (package_uri, key) = split_entry_uri(entry)?;
        self.packages.get(package_uri).map(|package| (package, key))
    }

    /// Finds the start rule of `shape`. The rule file is looked up in the
    /// resolve map, or used directly when it already is an entry URI.
    fn program_for(
        &self,
        shape: &InitialShape,
        resolve_map: Option<&ResolveMap>,
    ) -> Result<&dyn RuleProgram, EngineError> {
        let entry = resolve_map
            .and_then(|map| map.resolve(&shape.rule_file))
            .or_else(|| split_entry_uri(&shape.rule_file).map(|_| shape.rule_file.as_str()))
            .ok_or_else(|| {
                EngineError::rule_not_found(format!(
                    "rule file '{}' is not in the resolve map",
                    shape.rule_file
                ))
            })?;

        let rule_file = self
            .package_entry(entry)
            .and_then(|(package, key)| package.rule_file(key))
            .ok_or_else(|| {
                EngineError::rule_not_found(format!("'{entry}' is not a rule file"))
            })?;

        rule_file.rule(&shape.start_rule).ok_or_else(|| {
            EngineError::rule_not_found(format!(
                "start rule '{}' not found in '{}'",
                shape.start_rule, shape.rule_file
            ))
        })
    }
}

impl EncoderSchemas for InMemoryEngine {
    fn encoder_schema(&self, encoder_id: &str) -> Option<EncoderSchema> {
        encoders::schema(encoder_id)
    }
}

impl GeometryResolver for InMemoryEngine {
    fn resolve_geometry(
        &self,
        uri: &str,
        resolve_map: Option<&ResolveMap>,
        cache: &mut Cache,
    ) -> Result<InitialShapeGeometry, GeometryResolutionError> {
        let target = resolve_map.and_then(|map| map.resolve(uri)).unwrap_or(uri);

        let bytes: Arc<[u8]> = if let Some((package, key)) = self.package_entry(target) {
            package
                .asset(key)
                .ok_or_else(|| GeometryResolutionError::new(uri, "no such package asset"))?
        } else if let Some(path) = file_uri_to_path(target) {
            cache.get_or_try_insert_with(target, || read_geometry_file(&path).map_err(|reason| {
                GeometryResolutionError::new(uri, reason)
            }))?
        } else {
            return Err(GeometryResolutionError::new(uri, "unsupported URI"));
        };

        obj::decode(&bytes).map_err(|reason| GeometryResolutionError::new(uri, reason))
    }
}

fn read_geometry_file(path: &Path) -> Result<Vec<u8>, String> {
    let metadata = std::fs::metadata(path).map_err(|e| e.to_string())?;
    if metadata.len() > MAX_FILE_SIZE as u64 {
        return Err(format!(
            "file is {} bytes, limit is {MAX_FILE_SIZE}",
            metadata.len()
        ));
    }
    std::fs::read(path).map_err(|e| e.to_string())
}

impl Engine for InMemoryEngine {
    fn start(&mut self, config: &StartupConfig) -> Result<(), EngineError> {
        let log = LogForwarder::new(config.min_log_level);
        log.emit(
            LogLevel::Debug,
            &format!(
                "starting with extension dir {}",
                config.extension_dir.display()
            ),
        );
        self.log = Some(log);
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(log) = self.log.take() {
            log.emit(LogLevel::Debug, "stopped");
        }
    }

    fn resolve_rule_package(&self, uri: &str) -> Result<ResolveMap, EngineError> {
        let log = self.running()?;
        let package = self.packages.get(uri).ok_or_else(|| {
            EngineError::new(Status::ResolveFailed, format!("no rule package at '{uri}'"))
        })?;

        let mut map = ResolveMap::new(uri);
        for key in package.keys() {
            map.insert(key, entry_uri(uri, key));
        }
        log.emit(
            LogLevel::Info,
            &format!("resolved rule package {uri} ({} entries)", map.len()),
        );
        Ok(map)
    }

    fn generate(
        &self,
        shapes: &[InitialShape],
        encoders: &[EncoderSpec],
        sink: &mut dyn OutputSink,
        _cache: &mut Cache,
        resolve_map: Option<&ResolveMap>,
    ) -> Result<(), EngineError> {
        let log = self.running()?;
        if let Some(unknown) = encoders
            .iter()
            .find(|spec| encoders::schema(&spec.encoder_id).is_none())
        {
            return Err(EngineError::new(
                Status::EncoderNotFound,
                format!("unknown encoder '{}'", unknown.encoder_id),
            ));
        }

        for (index, shape) in shapes.iter().enumerate() {
            let program = self.program_for(shape, resolve_map)?;
            let mut derivation = Derivation::new();
            program.derive(shape, &mut derivation)?;
            log.emit(
                LogLevel::Debug,
                &format!("derived '{}' with {}", shape.name, shape.start_rule),
            );

            sink.begin_model(index, &shape.name)?;
            for spec in encoders {
                encoders::encode(spec, shape, &derivation, sink)?;
            }
            sink.end_model()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
