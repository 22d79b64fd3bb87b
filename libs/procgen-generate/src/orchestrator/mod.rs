//! # Generation Orchestrator
//!
//! Runs one generation call:
//!
//! ```text
//! Idle → ResolvingPackage → BuildingShapes → Generating (per shape) → Done
//!              └──────────────── Failed ←──────────┘
//! ```
//!
//! Rule package, attribute and encoder problems fail the whole call.
//! Geometry problems fall back to the default quad for that shape. Engine
//! failures on a shape follow the [`FailurePolicy`].

use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

use config::constants::{ATTR_RULE_FILE, ATTR_SEED, ATTR_START_RULE};
use config::settings::GenerationSettings;
use pipeline_types::{Cache, CacheStats, Diagnostic, ResolveMap, Stage};
use procgen_attributes::{parse_entries, AttributeMap, AttributeType};
use procgen_engine::{Engine, EngineHandle, InitialShape, OutputSink};
use procgen_shape::{to_file_uri, InitialShapeGeometry, ShapeSource};

use crate::collector::ResultCollector;
use crate::error::{EngineGenerationError, GenerateError, RulePackageResolutionError};
use crate::file_sink::FileOutputSink;
use crate::model::GeneratedModel;
use crate::plan::{EncoderChoice, EncoderPlan};

/// What to do when the engine fails on one shape of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure, drop that shape and continue with the rest.
    #[default]
    SkipShape,
    /// Stop at the first failure and fail the call.
    AbortBatch,
}

/// Input of one generation call.
///
/// # Example
///
/// ```rust
/// use procgen_generate::{EncoderChoice, GenerationRequest};
///
/// let request = GenerationRequest::from_path("lots/parcel.obj")
///     .rule_package("rules/city.rpk")
///     .attributes(["seed:int=7"])
///     .encoder(EncoderChoice::default());
/// assert_eq!(request.shapes().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationRequest {
    rule_package: Option<PathBuf>,
    shapes: Vec<ShapeSource>,
    attributes: Vec<String>,
    encoder: EncoderChoice,
}

impl GenerationRequest {
    /// A single shape loaded from a geometry file.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::from_inputs([ShapeSource::path(path)])
    }

    /// Shapes given as geometry.
    pub fn from_geometries(geometries: impl IntoIterator<Item = InitialShapeGeometry>) -> Self {
        Self::from_inputs(geometries.into_iter().map(|geometry| {
            let (vertices, indices, face_counts) = geometry.into_buffers();
            ShapeSource::buffers(vertices, indices, face_counts)
        }))
    }

    pub fn from_inputs(shapes: impl IntoIterator<Item = ShapeSource>) -> Self {
        Self {
            shapes: shapes.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn rule_package(mut self, path: impl AsRef<Path>) -> Self {
        self.rule_package = Some(path.as_ref().to_path_buf());
        self
    }

    /// Shape attributes in flat `name:type=value` form.
    pub fn attributes<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = entries.into_iter().map(Into::into).collect();
        self
    }

    pub fn encoder(mut self, choice: EncoderChoice) -> Self {
        self.encoder = choice;
        self
    }

    pub fn shapes(&self) -> &[ShapeSource] {
        &self.shapes
    }
}

/// Call-scoped state shared by every shape of one batch.
#[derive(Debug, Default)]
pub struct GenerationSession {
    resolve_map: Option<ResolveMap>,
    cache: Cache,
}

impl GenerationSession {
    pub fn new(resolve_map: Option<ResolveMap>) -> Self {
        Self {
            resolve_map,
            cache: Cache::new(),
        }
    }

    pub fn resolve_map(&self) -> Option<&ResolveMap> {
        self.resolve_map.as_ref()
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Resolve map and cache, borrowed together for one engine call.
    pub fn parts(&mut self) -> (Option<&ResolveMap>, &mut Cache) {
        (self.resolve_map.as_ref(), &mut self.cache)
    }
}

/// Successful result of [`GenerationOrchestrator::try_generate`].
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    /// One model per generated shape, in input order. Empty when output
    /// went to files.
    pub models: Vec<GeneratedModel>,
    pub diagnostics: Vec<Diagnostic>,
    pub stage: Stage,
    /// Files written by a file-encoder call.
    pub files: Vec<PathBuf>,
    /// Reuse of the session cache across the batch.
    pub cache_stats: CacheStats,
}

/// Tracks the call's stage and the diagnostics collected on the way.
struct Progress {
    stage: Stage,
    diagnostics: Vec<Diagnostic>,
}

impl Progress {
    fn new() -> Self {
        Self {
            stage: Stage::Idle,
            diagnostics: Vec::new(),
        }
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(
            self.stage.can_transition_to(next),
            "{:?} -> {next:?}",
            self.stage
        );
        tracing::debug!(from = ?self.stage, to = ?next, "generation stage");
        self.stage = next;
    }

    fn warn(&mut self, shape_index: usize, message: String) {
        self.diagnostics
            .push(Diagnostic::warning(self.stage, message).for_shape(shape_index));
    }

    fn error(&mut self, shape_index: usize, message: String) {
        self.diagnostics
            .push(Diagnostic::error(self.stage, message).for_shape(shape_index));
    }
}

/// Drives generation calls against an initialized engine.
#[derive(Debug)]
pub struct GenerationOrchestrator<'h, E: Engine> {
    handle: &'h EngineHandle<E>,
    settings: GenerationSettings,
    policy: FailurePolicy,
}

impl<'h, E: Engine> GenerationOrchestrator<'h, E> {
    pub fn new(handle: &'h EngineHandle<E>) -> Self {
        Self {
            handle,
            settings: GenerationSettings::default(),
            policy: FailurePolicy::default(),
        }
    }

    /// Replaces the shape defaults. The engine log level is fixed when the
    /// handle is built, see [`EngineHandle::with_settings`].
    pub fn with_settings(mut self, settings: GenerationSettings) -> Self {
        if settings.min_log_level != self.handle.min_log_level() {
            tracing::warn!(
                settings = ?settings.min_log_level,
                engine = ?self.handle.min_log_level(),
                "min_log_level differs from the engine handle; the handle's level applies"
            );
        }
        self.settings = settings;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Runs the call and never fails: errors and panics are logged and
    /// yield an empty result.
    pub fn generate(&self, request: &GenerationRequest) -> Vec<GeneratedModel> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.try_generate(request))) {
            Ok(Ok(outcome)) => outcome.models,
            Ok(Err(err)) => {
                tracing::error!(error = %err, "generation failed");
                Vec::new()
            }
            Err(payload) => {
                let message = payload
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| payload.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                tracing::error!(%message, "generation panicked");
                Vec::new()
            }
        }
    }

    pub fn try_generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome, GenerateError> {
        let engine = self.handle.engine()?;
        let mut progress = Progress::new();

        progress.advance(Stage::ResolvingPackage);
        let resolve_map = match &request.rule_package {
            Some(path) => Some(resolve_package(engine, path)?),
            None => None,
        };
        let mut session = GenerationSession::new(resolve_map);

        progress.advance(Stage::BuildingShapes);
        let attributes = parse_entries(&request.attributes)?;
        let plan = EncoderPlan::standard(engine, &request.encoder)?;
        let batch = request.shapes.len();
        let shapes: Vec<InitialShape> = request
            .shapes
            .iter()
            .enumerate()
            .map(|(index, source)| {
                self.initial_shape(engine, index, source, &attributes, &mut session, &mut progress)
                    .with_name(self.shape_name(index, batch))
            })
            .collect();

        progress.advance(Stage::Generating);
        let (models, files) = if plan.is_in_memory() {
            let models = self.generate_in_memory(engine, &shapes, &plan, &mut session, &mut progress)?;
            (models, Vec::new())
        } else {
            let files = self.generate_files(engine, &shapes, &plan, &mut session, &mut progress)?;
            (Vec::new(), files)
        };

        progress.advance(Stage::Done);
        Ok(GenerationOutcome {
            models,
            diagnostics: progress.diagnostics,
            stage: progress.stage,
            files,
            cache_stats: session.cache().stats(),
        })
    }

    /// Name of shape `index`; unique within a batch of more than one shape.
    fn shape_name(&self, index: usize, batch: usize) -> String {
        if batch > 1 {
            format!("{}_{index}", self.settings.shape_name)
        } else {
            self.settings.shape_name.clone()
        }
    }

    fn initial_shape(
        &self,
        engine: &E,
        index: usize,
        source: &ShapeSource,
        attributes: &AttributeMap,
        session: &mut GenerationSession,
        progress: &mut Progress,
    ) -> InitialShape {
        let (resolve_map, cache) = session.parts();
        let geometry = match source.clone().into_geometry(engine, resolve_map, cache) {
            Ok(geometry) => geometry,
            Err(err) => {
                tracing::warn!(shape_index = index, error = %err, "using default quad");
                progress.warn(index, format!("default quad substituted: {err}"));
                InitialShapeGeometry::default_quad()
            }
        };

        InitialShape::new(geometry)
            .with_rule(
                string_override(attributes, ATTR_RULE_FILE, &self.settings.rule_file),
                string_override(attributes, ATTR_START_RULE, &self.settings.start_rule),
            )
            .with_seed(seed_override(attributes, self.settings.seed))
            .with_attributes(attributes.clone())
    }

    fn generate_in_memory(
        &self,
        engine: &E,
        shapes: &[InitialShape],
        plan: &EncoderPlan,
        session: &mut GenerationSession,
        progress: &mut Progress,
    ) -> Result<Vec<GeneratedModel>, GenerateError> {
        let mut models = Vec::with_capacity(shapes.len());
        for (index, shape) in shapes.iter().enumerate() {
            let mut collector = ResultCollector::new(index, shape.attributes.clone());
            if self.run_shape(engine, index, shape, plan, &mut collector, session, progress)? {
                models.push(collector.finalize());
            }
            progress.advance(Stage::Generating);
        }
        Ok(models)
    }

    fn generate_files(
        &self,
        engine: &E,
        shapes: &[InitialShape],
        plan: &EncoderPlan,
        session: &mut GenerationSession,
        progress: &mut Progress,
    ) -> Result<Vec<PathBuf>, GenerateError> {
        let dir = match &self.settings.output_dir {
            Some(dir) => dir.clone(),
            None => self.handle.output_dir()?,
        };
        let mut sink = FileOutputSink::create(&dir)
            .map_err(|source| GenerateError::OutputDirectory {
                path: dir.clone(),
                source,
            })?
            .with_report_file(plan.report_file_name());

        for (index, shape) in shapes.iter().enumerate() {
            sink.set_first_shape(index);
            self.run_shape(engine, index, shape, plan, &mut sink, session, progress)?;
            progress.advance(Stage::Generating);
        }
        Ok(sink.files_written().to_vec())
    }

    /// Generates one shape. `Ok(false)` means the shape was skipped.
    #[allow(clippy::too_many_arguments)]
    fn run_shape(
        &self,
        engine: &E,
        index: usize,
        shape: &InitialShape,
        plan: &EncoderPlan,
        sink: &mut dyn OutputSink,
        session: &mut GenerationSession,
        progress: &mut Progress,
    ) -> Result<bool, GenerateError> {
        let (resolve_map, cache) = session.parts();
        match engine.generate(std::slice::from_ref(shape), plan.specs(), sink, cache, resolve_map) {
            Ok(()) => Ok(true),
            Err(source) => {
                sink.abort_model();
                let err = EngineGenerationError {
                    shape_index: index,
                    source,
                };
                tracing::error!(shape_index = index, error = %err.source, "engine failed on shape");
                match self.policy {
                    FailurePolicy::SkipShape => {
                        progress.error(index, err.to_string());
                        Ok(false)
                    }
                    FailurePolicy::AbortBatch => {
                        progress.advance(Stage::Failed);
                        Err(err.into())
                    }
                }
            }
        }
    }
}

fn resolve_package<E: Engine>(
    engine: &E,
    path: &Path,
) -> Result<ResolveMap, RulePackageResolutionError> {
    let failure = |reason: String| RulePackageResolutionError {
        path: path.to_path_buf(),
        reason,
    };
    let uri = to_file_uri(path).map_err(|e| failure(e.to_string()))?;
    let map = engine
        .resolve_rule_package(&uri)
        .map_err(|e| failure(e.to_string()))?;
    tracing::info!(package = %uri, entries = map.len(), "resolved rule package");
    Ok(map)
}

/// String attribute `key`, or `default` when absent or not a string.
fn string_override(attributes: &AttributeMap, key: &str, default: &str) -> String {
    match attributes.get(key) {
        Some(value) => match value.as_str() {
            Some(text) => text.to_string(),
            None => {
                tracing::warn!(
                    attribute = key,
                    expected = %AttributeType::String,
                    actual = %value.value_type(),
                    "ignoring mistyped override"
                );
                default.to_string()
            }
        },
        None => default.to_string(),
    }
}

fn seed_override(attributes: &AttributeMap, default: i32) -> i32 {
    match attributes.get(ATTR_SEED) {
        Some(value) => value.as_i32().unwrap_or_else(|| {
            tracing::warn!(
                attribute = ATTR_SEED,
                expected = %AttributeType::Int,
                actual = %value.value_type(),
                "ignoring mistyped override"
            );
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests;
