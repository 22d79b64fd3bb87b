//! # Config Crate
//!
//! Centralized defaults for the procedural generation pipeline.
//! Every literal that more than one crate agrees on (default rule file,
//! encoder identifiers, the fallback quad, file names) is defined here so
//! the pipeline stages stay declarative.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{DEFAULT_RULE_FILE, DEFAULT_START_RULE, DEFAULT_SEED};
//! use config::settings::GenerationSettings;
//!
//! let settings = GenerationSettings::default();
//! assert_eq!(settings.rule_file, DEFAULT_RULE_FILE);
//! assert_eq!(settings.start_rule, DEFAULT_START_RULE);
//! assert_eq!(settings.seed, DEFAULT_SEED);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All defaults defined once, used everywhere
//! - **Overridable**: Hosts may load `GenerationSettings` from TOML
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
pub mod settings;
