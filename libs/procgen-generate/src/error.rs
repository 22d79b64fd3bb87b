//! # Generation Errors
//!
//! Call-level failures of [`crate::GenerationOrchestrator::try_generate`].
//! Per-shape geometry problems are not errors; they are recovered with the
//! default quad.

use std::io;
use std::path::PathBuf;

use procgen_attributes::{AttributeParseError, EncoderValidationError};
use procgen_engine::{EngineError, EngineNotInitializedError};
use thiserror::Error;

/// The rule package could not be resolved. Fatal for the whole call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot resolve rule package '{}': {reason}", .path.display())]
pub struct RulePackageResolutionError {
    pub path: PathBuf,
    pub reason: String,
}

/// The engine reported a non-success status for one shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Generation failed for shape {shape_index}: {source}")]
pub struct EngineGenerationError {
    pub shape_index: usize,
    #[source]
    pub source: EngineError,
}

/// Errors that abort a generation call.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    NotInitialized(#[from] EngineNotInitializedError),

    #[error(transparent)]
    RulePackage(#[from] RulePackageResolutionError),

    #[error(transparent)]
    AttributeParse(#[from] AttributeParseError),

    #[error(transparent)]
    EncoderValidation(#[from] EncoderValidationError),

    #[error("Cannot create output directory '{}': {source}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Engine(#[from] EngineGenerationError),
}
