//! # Engine Handle
//!
//! Owns an [`Engine`] and its lifecycle. Initialization and shutdown are
//! explicit and idempotent; dropping the handle shuts the engine down.

use std::path::{Path, PathBuf};

use config::constants::{EXTENSION_DIR_NAME, OUTPUT_DIR_NAME};
use config::settings::{GenerationSettings, LogLevel};

use crate::engine::{Engine, StartupConfig};
use crate::error::{EngineError, EngineNotInitializedError, Status};

#[derive(Debug, Clone)]
struct Running {
    engine_path: PathBuf,
}

/// Scoped owner of an engine.
///
/// # Example
///
/// ```rust
/// use procgen_engine::{EngineHandle, InMemoryEngine};
///
/// let mut handle = EngineHandle::new(InMemoryEngine::new());
/// assert!(!handle.is_initialized());
/// handle.initialize(Some("/opt/procgen/bin/engine".as_ref())).unwrap();
/// assert!(handle.is_initialized());
/// handle.shutdown();
/// assert!(!handle.is_initialized());
/// ```
#[derive(Debug)]
pub struct EngineHandle<E: Engine> {
    engine: E,
    min_log_level: LogLevel,
    running: Option<Running>,
}

impl<E: Engine> EngineHandle<E> {
    /// Wraps `engine` without starting it.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            min_log_level: LogLevel::default(),
            running: None,
        }
    }

    /// Wraps and starts `engine` in one step.
    pub fn initialized(engine: E, engine_path: Option<&Path>) -> Result<Self, EngineError> {
        let mut handle = Self::new(engine);
        handle.initialize(engine_path)?;
        Ok(handle)
    }

    /// Sets the minimum engine log level used by the next `initialize`.
    pub fn with_min_log_level(mut self, level: LogLevel) -> Self {
        self.min_log_level = level;
        self
    }

    /// Applies the engine-side part of host settings.
    ///
    /// # Example
    ///
    /// ```rust
    /// use config::settings::{GenerationSettings, LogLevel};
    /// use procgen_engine::{EngineHandle, InMemoryEngine};
    ///
    /// let settings = GenerationSettings::from_toml_str("min_log_level = \"warning\"").unwrap();
    /// let handle = EngineHandle::new(InMemoryEngine::new()).with_settings(&settings);
    /// assert_eq!(handle.min_log_level(), LogLevel::Warning);
    /// ```
    pub fn with_settings(self, settings: &GenerationSettings) -> Self {
        self.with_min_log_level(settings.min_log_level)
    }

    pub fn min_log_level(&self) -> LogLevel {
        self.min_log_level
    }

    /// Starts the engine. A second call while running does nothing.
    ///
    /// Without `engine_path` the current executable's path is used; the
    /// extension directory is `lib` next to it.
    pub fn initialize(&mut self, engine_path: Option<&Path>) -> Result<(), EngineError> {
        if self.running.is_some() {
            tracing::debug!("engine already initialized");
            return Ok(());
        }

        let engine_path = match engine_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_exe().map_err(|e| {
                EngineError::new(
                    Status::InvalidArgument,
                    format!("cannot determine executable path: {e}"),
                )
            })?,
        };
        let extension_dir = engine_path
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join(EXTENSION_DIR_NAME);

        let config = StartupConfig {
            extension_dir,
            min_log_level: self.min_log_level,
        };
        self.engine.start(&config)?;
        tracing::debug!(
            extension_dir = %config.extension_dir.display(),
            "engine initialized"
        );

        self.running = Some(Running { engine_path });
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.running.is_some()
    }

    /// Stops the engine. Does nothing if it is not running.
    pub fn shutdown(&mut self) {
        if self.running.take().is_some() {
            self.engine.stop();
            tracing::debug!("engine shut down");
        }
    }

    /// The running engine.
    pub fn engine(&self) -> Result<&E, EngineNotInitializedError> {
        if self.running.is_some() {
            Ok(&self.engine)
        } else {
            Err(EngineNotInitializedError)
        }
    }

    /// Derived output directory: `<engine dir>/../output`.
    pub fn output_dir(&self) -> Result<PathBuf, EngineNotInitializedError> {
        let running = self.running.as_ref().ok_or(EngineNotInitializedError)?;
        let engine_dir = running.engine_path.parent().unwrap_or_else(|| Path::new(""));
        let root = engine_dir.parent().unwrap_or(engine_dir);
        Ok(root.join(OUTPUT_DIR_NAME))
    }
}

impl<E: Engine> Drop for EngineHandle<E> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
