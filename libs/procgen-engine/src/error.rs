//! # Engine Errors
//!
//! Error types crossing the engine boundary.

use std::fmt;

use thiserror::Error;

/// Engine status codes for non-success results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The engine was used before `start` or after `stop`.
    NotInitialized,
    /// An argument was malformed or missing.
    InvalidArgument,
    /// A rule package or resource could not be resolved.
    ResolveFailed,
    /// The rule file or start rule does not exist.
    RuleNotFound,
    /// A rule program failed while deriving a shape.
    RuleFailed,
    /// The encoder id is not known to the engine.
    EncoderNotFound,
    /// The output sink refused a callback.
    OutputFailed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Status::NotInitialized => "not initialized",
            Status::InvalidArgument => "invalid argument",
            Status::ResolveFailed => "resolve failed",
            Status::RuleNotFound => "rule not found",
            Status::RuleFailed => "rule failed",
            Status::EncoderNotFound => "encoder not found",
            Status::OutputFailed => "output failed",
        };
        f.write_str(text)
    }
}

/// A non-success engine result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub struct EngineError {
    pub status: Status,
    pub message: String,
}

impl EngineError {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Creates a not-initialized error.
    pub fn not_initialized() -> Self {
        Self::new(Status::NotInitialized, "engine has not been started")
    }

    /// Creates a rule-not-found error.
    pub fn rule_not_found(message: impl Into<String>) -> Self {
        Self::new(Status::RuleNotFound, message)
    }

    /// Creates a rule failure error.
    pub fn rule_failed(message: impl Into<String>) -> Self {
        Self::new(Status::RuleFailed, message)
    }
}

/// Any call made before [`crate::EngineHandle::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Engine is not initialized")]
pub struct EngineNotInitializedError;

/// An [`crate::OutputSink`] callback could not be honoured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("Callback '{callback}' arrived outside of a model")]
    NoOpenModel { callback: &'static str },

    #[error("A model is already open")]
    ModelAlreadyOpen,

    #[error("Callback '{callback}' arrived after the model was finished")]
    ModelFinished { callback: &'static str },

    #[error("Sink does not support '{operation}'")]
    Unsupported { operation: &'static str },

    #[error("Invalid output file name '{0}'")]
    InvalidFileName(String),

    #[error("I/O error on '{path}': {message}")]
    Io { path: String, message: String },
}

impl From<SinkError> for EngineError {
    fn from(err: SinkError) -> Self {
        EngineError::new(Status::OutputFailed, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_display_includes_status() {
        let err = EngineError::rule_not_found("no rule 'lot$x'");
        assert_eq!(err.to_string(), "rule not found: no rule 'lot$x'");
    }

    #[test]
    fn sink_error_becomes_output_failure() {
        let err: EngineError = SinkError::ModelAlreadyOpen.into();
        assert_eq!(err.status, Status::OutputFailed);
    }
}
