//! # Engine Boundary
//!
//! The narrow interface the orchestration core calls through. Concrete
//! engines implement [`Engine`]; everything they need from the caller is
//! passed in as plain Rust values.

use std::path::PathBuf;

use config::constants::{DEFAULT_RULE_FILE, DEFAULT_SEED, DEFAULT_SHAPE_NAME, DEFAULT_START_RULE};
use config::settings::LogLevel;
use pipeline_types::{Cache, ResolveMap};
use procgen_attributes::{AttributeMap, EncoderSchemas};
use procgen_shape::{GeometryResolver, InitialShapeGeometry};

use crate::error::EngineError;
use crate::sink::OutputSink;

/// Parameters handed to [`Engine::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// Directory holding engine extensions.
    pub extension_dir: PathBuf,
    /// Engine log events below this level are dropped.
    pub min_log_level: LogLevel,
}

/// One unit of generation: geometry plus everything the rules need.
#[derive(Debug, Clone, PartialEq)]
pub struct InitialShape {
    pub name: String,
    pub geometry: InitialShapeGeometry,
    pub attributes: AttributeMap,
    /// Rule file key inside the resolve map.
    pub rule_file: String,
    pub start_rule: String,
    pub seed: i32,
}

impl InitialShape {
    /// Shape with default name, rule file, start rule and seed.
    pub fn new(geometry: InitialShapeGeometry) -> Self {
        Self {
            name: DEFAULT_SHAPE_NAME.to_string(),
            geometry,
            attributes: AttributeMap::new(),
            rule_file: DEFAULT_RULE_FILE.to_string(),
            start_rule: DEFAULT_START_RULE.to_string(),
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_attributes(mut self, attributes: AttributeMap) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_rule(mut self, rule_file: impl Into<String>, start_rule: impl Into<String>) -> Self {
        self.rule_file = rule_file.into();
        self.start_rule = start_rule.into();
        self
    }

    pub fn with_seed(mut self, seed: i32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// An encoder id with options already validated against its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderSpec {
    pub encoder_id: String,
    pub options: AttributeMap,
}

impl EncoderSpec {
    pub fn new(encoder_id: impl Into<String>, options: AttributeMap) -> Self {
        Self {
            encoder_id: encoder_id.into(),
            options,
        }
    }
}

/// A procedural generation engine.
///
/// Calls are blocking and single-threaded; `generate` returns only once
/// every shape has been derived and encoded, or on the first failure.
pub trait Engine: EncoderSchemas + GeometryResolver {
    fn start(&mut self, config: &StartupConfig) -> Result<(), EngineError>;

    fn stop(&mut self);

    /// Resolves the rule package at `uri` into a resolve map.
    fn resolve_rule_package(&self, uri: &str) -> Result<ResolveMap, EngineError>;

    /// Derives `shapes` and runs every encoder on each, in order, reporting
    /// through `sink`.
    ///
    /// `cache` is the session cache, shared by every call of one batch.
    fn generate(
        &self,
        shapes: &[InitialShape],
        encoders: &[EncoderSpec],
        sink: &mut dyn OutputSink,
        cache: &mut Cache,
        resolve_map: Option<&ResolveMap>,
    ) -> Result<(), EngineError>;
}
