//! Per-host generation settings.
//!
//! `GenerationSettings` bundles the defaults an orchestrator applies to every
//! initial shape. Hosts either take `GenerationSettings::default()` or load a
//! TOML file where every field is optional:
//!
//! ```toml
//! rule_file = "bin/facade.cgb"
//! start_rule = "default$lot"
//! seed = 42
//! min_log_level = "warning"
//! ```

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::constants::{DEFAULT_RULE_FILE, DEFAULT_SEED, DEFAULT_SHAPE_NAME, DEFAULT_START_RULE};

/// Severity threshold for engine log events.
///
/// # Examples
/// ```
/// use config::settings::LogLevel;
/// assert!(LogLevel::Error > LogLevel::Info);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

/// Immutable snapshot of the generation defaults shared by one orchestrator.
///
/// # Examples
/// ```
/// use config::settings::GenerationSettings;
/// let settings = GenerationSettings::default();
/// assert_eq!(settings.start_rule, "default$init");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerationSettings {
    /// Rule file key used when no `ruleFile` attribute is given.
    pub rule_file: String,
    /// Start rule used when no `startRule` attribute is given.
    pub start_rule: String,
    /// Seed used when no `seed` attribute is given.
    pub seed: i32,
    /// Name assigned to every initial shape.
    pub shape_name: String,
    /// Output directory for file encoders. `None` derives it from the
    /// engine installation.
    pub output_dir: Option<PathBuf>,
    /// Lowest engine log level forwarded to the host.
    pub min_log_level: LogLevel,
}

impl GenerationSettings {
    /// Builds settings enforcing non-empty rule file and start rule.
    ///
    /// # Examples
    /// ```
    /// use config::settings::GenerationSettings;
    /// let settings = GenerationSettings::new("bin/lot.cgb", "default$lot", 7).expect("valid settings");
    /// assert_eq!(settings.seed, 7);
    /// assert!(GenerationSettings::new("", "default$lot", 7).is_err());
    /// ```
    pub fn new(
        rule_file: impl Into<String>,
        start_rule: impl Into<String>,
        seed: i32,
    ) -> Result<Self, ConfigError> {
        let settings = Self {
            rule_file: rule_file.into(),
            start_rule: start_rule.into(),
            seed,
            ..Self::default()
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Parses settings from TOML, filling missing fields with defaults.
    ///
    /// # Examples
    /// ```
    /// use config::settings::GenerationSettings;
    /// let settings = GenerationSettings::from_toml_str("seed = 42").unwrap();
    /// assert_eq!(settings.seed, 42);
    /// assert_eq!(settings.rule_file, "bin/rule.cgb");
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let settings: Self =
            toml::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Returns a copy with an explicit output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.rule_file.trim().is_empty() {
            return Err(ConfigError::EmptyRuleFile);
        }
        if !self.start_rule.contains('$') {
            return Err(ConfigError::InvalidStartRule(self.start_rule.clone()));
        }
        if self.shape_name.is_empty() {
            return Err(ConfigError::EmptyShapeName);
        }
        // Shape names end up in output file names.
        if self.shape_name.contains(['/', '\\']) || matches!(self.shape_name.as_str(), "." | "..") {
            return Err(ConfigError::InvalidShapeName(self.shape_name.clone()));
        }
        Ok(())
    }
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            rule_file: DEFAULT_RULE_FILE.to_string(),
            start_rule: DEFAULT_START_RULE.to_string(),
            seed: DEFAULT_SEED,
            shape_name: DEFAULT_SHAPE_NAME.to_string(),
            output_dir: None,
            min_log_level: LogLevel::default(),
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Raised when the rule file is empty.
    EmptyRuleFile,
    /// Raised when the start rule is not of the form `<style>$<rule>`.
    InvalidStartRule(String),
    /// Raised when the shape name is empty.
    EmptyShapeName,
    /// Raised when the shape name cannot be used inside a file name.
    InvalidShapeName(String),
    /// Raised when a settings file is not valid TOML for these settings.
    Parse(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyRuleFile => write!(f, "rule_file must not be empty"),
            ConfigError::InvalidStartRule(value) => {
                write!(f, "start_rule must look like <style>$<rule>: {value}")
            }
            ConfigError::EmptyShapeName => write!(f, "shape_name must not be empty"),
            ConfigError::InvalidShapeName(value) => {
                write!(f, "shape_name must be usable as a file name: {value}")
            }
            ConfigError::Parse(message) => write!(f, "invalid settings file: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}
