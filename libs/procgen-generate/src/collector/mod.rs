//! # Result Collector
//!
//! [`OutputSink`] that accumulates the callbacks of exactly one shape into
//! a [`GeneratedModel`]. One collector per shape per call; `finalize`
//! consumes it.

use procgen_attributes::AttributeMap;
use procgen_engine::{OutputSink, SinkError};

use crate::model::GeneratedModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Pending,
    Open,
    Finished,
}

/// Single-use in-memory sink for one shape.
///
/// # Example
///
/// ```rust
/// use procgen_attributes::AttributeMap;
/// use procgen_engine::OutputSink;
/// use procgen_generate::ResultCollector;
///
/// let mut collector = ResultCollector::new(3, AttributeMap::new());
/// collector.begin_model(0, "lot").unwrap();
/// collector.emit_float_report("area", 12.5).unwrap();
/// collector.end_model().unwrap();
///
/// let model = collector.finalize();
/// assert_eq!(model.initial_shape_index, 3);
/// assert_eq!(model.float_report["area"], 12.5);
/// ```
#[derive(Debug)]
pub struct ResultCollector {
    state: State,
    model: GeneratedModel,
}

impl ResultCollector {
    /// Collector for the shape at `shape_index` of the caller's input.
    pub fn new(shape_index: usize, attributes: AttributeMap) -> Self {
        Self {
            state: State::Pending,
            model: GeneratedModel {
                initial_shape_index: shape_index,
                attributes,
                ..Default::default()
            },
        }
    }

    /// Returns true once `end_model` has been received.
    pub fn is_finished(&self) -> bool {
        self.state == State::Finished
    }

    /// Freezes and returns the accumulated model.
    pub fn finalize(self) -> GeneratedModel {
        if self.state != State::Finished {
            tracing::debug!(
                shape_index = self.model.initial_shape_index,
                "finalizing a model that was never closed"
            );
        }
        self.model
    }

    fn open_model(&mut self, callback: &'static str) -> Result<&mut GeneratedModel, SinkError> {
        match self.state {
            State::Open => Ok(&mut self.model),
            State::Pending => Err(SinkError::NoOpenModel { callback }),
            State::Finished => Err(SinkError::ModelFinished { callback }),
        }
    }
}

impl OutputSink for ResultCollector {
    fn begin_model(&mut self, _shape_index: usize, shape_name: &str) -> Result<(), SinkError> {
        match self.state {
            State::Pending => {
                self.state = State::Open;
                self.model.shape_name = shape_name.to_string();
                Ok(())
            }
            State::Open => Err(SinkError::ModelAlreadyOpen),
            State::Finished => Err(SinkError::ModelFinished {
                callback: "begin_model",
            }),
        }
    }

    fn emit_geometry(
        &mut self,
        vertices: &[f64],
        indices: &[u32],
        face_counts: &[u32],
    ) -> Result<(), SinkError> {
        let model = self.open_model("emit_geometry")?;
        let offset = model.vertex_count() as u32;
        model.vertices.extend_from_slice(vertices);
        model.indices.extend(indices.iter().map(|&i| i + offset));
        model.face_counts.extend_from_slice(face_counts);
        Ok(())
    }

    fn emit_float_report(&mut self, key: &str, value: f64) -> Result<(), SinkError> {
        self.open_model("emit_float_report")?
            .float_report
            .insert(key.to_string(), value);
        Ok(())
    }

    fn emit_string_report(&mut self, key: &str, value: &str) -> Result<(), SinkError> {
        self.open_model("emit_string_report")?
            .string_report
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn emit_bool_report(&mut self, key: &str, value: bool) -> Result<(), SinkError> {
        self.open_model("emit_bool_report")?
            .bool_report
            .insert(key.to_string(), value);
        Ok(())
    }

    fn emit_print(&mut self, text: &str) -> Result<(), SinkError> {
        let prints = &mut self.open_model("emit_print")?.prints;
        prints.push_str(text);
        if !text.ends_with('\n') {
            prints.push('\n');
        }
        Ok(())
    }

    fn emit_error(&mut self, message: &str) -> Result<(), SinkError> {
        self.open_model("emit_error")?
            .errors
            .push(message.to_string());
        Ok(())
    }

    fn end_model(&mut self) -> Result<(), SinkError> {
        self.open_model("end_model")?;
        self.state = State::Finished;
        Ok(())
    }
}
