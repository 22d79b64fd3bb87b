//! # Procgen Generate
//!
//! Turns caller input (rule package path, shapes, flat attribute strings,
//! encoder choice) into generated models.
//!
//! ## Pipeline
//!
//! ```text
//! rule package → ResolveMap ─┐
//! attributes   → AttributeMap├→ InitialShape per source → Engine::generate
//! encoder      → EncoderPlan ┘                              │
//!                               ResultCollector (in memory) ←┤
//!                               FileOutputSink (files)      ←┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use procgen_engine::memory::{Extrude, RuleFile, RulePackage};
//! use procgen_engine::{EngineHandle, InMemoryEngine};
//! use procgen_generate::{GenerationOrchestrator, GenerationRequest};
//! use procgen_shape::InitialShapeGeometry;
//!
//! let mut engine = InMemoryEngine::new();
//! engine
//!     .register_package(
//!         "/rules/city.rpk",
//!         RulePackage::new().with_rule_file(
//!             "bin/rule.cgb",
//!             RuleFile::new().with_rule("default$init", Extrude::default()),
//!         ),
//!     )
//!     .unwrap();
//! let handle = EngineHandle::initialized(engine, Some("/opt/procgen/bin/engine".as_ref())).unwrap();
//!
//! let request = GenerationRequest::from_geometries([InitialShapeGeometry::default_quad()])
//!     .rule_package("/rules/city.rpk")
//!     .attributes(["height:float=10"]);
//! let models = GenerationOrchestrator::new(&handle).generate(&request);
//!
//! assert_eq!(models.len(), 1);
//! assert_eq!(models[0].float_report["height"], 10.0);
//! ```

pub mod collector;
pub mod error;
pub mod file_sink;
pub mod model;
pub mod orchestrator;
pub mod plan;

pub use collector::ResultCollector;
pub use error::{EngineGenerationError, GenerateError, RulePackageResolutionError};
pub use file_sink::FileOutputSink;
pub use model::GeneratedModel;
pub use orchestrator::{
    FailurePolicy, GenerationOrchestrator, GenerationOutcome, GenerationRequest, GenerationSession,
};
pub use plan::{EncoderChoice, EncoderPlan};
