//! # Procgen Engine
//!
//! Abstraction boundary between the generation orchestrator and a
//! procedural generation engine.
//!
//! ## Architecture
//!
//! ```text
//! orchestrator → EngineHandle<E> → E: Engine ─┬→ OutputSink callbacks
//!                (init/shutdown)              └→ EncoderSchemas, GeometryResolver
//! ```
//!
//! [`InMemoryEngine`] is a deterministic implementation used by hosts that
//! embed their rules directly and by the test suites.

pub mod engine;
pub mod error;
pub mod handle;
pub mod log;
pub mod memory;
pub mod sink;

pub use engine::{EncoderSpec, Engine, InitialShape, StartupConfig};
pub use error::{EngineError, EngineNotInitializedError, SinkError, Status};
pub use handle::EngineHandle;
pub use log::LogForwarder;
pub use memory::InMemoryEngine;
pub use sink::OutputSink;
