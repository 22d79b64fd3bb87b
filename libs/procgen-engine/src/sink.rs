//! Output callbacks invoked by the engine during `generate`.

use crate::error::SinkError;

/// Receives everything one generation call produces.
///
/// Calls arrive synchronously on the caller's thread, bracketed per shape:
///
/// ```text
/// begin_model → (emit_* | write_file)* → end_model
/// ```
///
/// When the engine fails inside a model, the caller closes it with
/// `abort_model` instead of `end_model`.
pub trait OutputSink {
    /// Opens the model of the shape at `shape_index` within the call.
    fn begin_model(&mut self, shape_index: usize, shape_name: &str) -> Result<(), SinkError>;

    /// Appends one geometry block (flat vertex triples, indices, face counts).
    fn emit_geometry(
        &mut self,
        vertices: &[f64],
        indices: &[u32],
        face_counts: &[u32],
    ) -> Result<(), SinkError>;

    fn emit_float_report(&mut self, key: &str, value: f64) -> Result<(), SinkError>;

    fn emit_string_report(&mut self, key: &str, value: &str) -> Result<(), SinkError>;

    fn emit_bool_report(&mut self, key: &str, value: bool) -> Result<(), SinkError>;

    /// Interpreter print output.
    fn emit_print(&mut self, text: &str) -> Result<(), SinkError>;

    /// Non-fatal interpreter error.
    fn emit_error(&mut self, message: &str) -> Result<(), SinkError>;

    fn end_model(&mut self) -> Result<(), SinkError>;

    /// Drops the open model, if any, without finishing it.
    fn abort_model(&mut self) {}

    /// Writes an encoder output file. Sinks without file output refuse it.
    fn write_file(&mut self, name: &str, contents: &[u8]) -> Result<(), SinkError> {
        let _ = (name, contents);
        Err(SinkError::Unsupported {
            operation: "write_file",
        })
    }
}
