//! Built-in encoders of the in-memory engine.

use config::constants::{
    DEFAULT_BASE_NAME, ENCODER_ID_IN_MEMORY, ENCODER_ID_OBJ, ENCODER_ID_PRINT, ENCODER_ID_REPORT,
    ENCODER_OPT_BASE_NAME, ENCODER_OPT_NAME, PRINT_FILE_NAME, REPORT_FILE_NAME,
};
use procgen_attributes::EncoderSchema;

use super::obj;
use super::program::Derivation;
use crate::engine::{EncoderSpec, InitialShape};
use crate::error::{EngineError, Status};
use crate::sink::OutputSink;

/// Option schema of a built-in encoder.
pub fn schema(encoder_id: &str) -> Option<EncoderSchema> {
    let schema = EncoderSchema::new(encoder_id);
    match encoder_id {
        ENCODER_ID_IN_MEMORY | ENCODER_ID_OBJ => {
            Some(schema.option(ENCODER_OPT_BASE_NAME, DEFAULT_BASE_NAME))
        }
        ENCODER_ID_REPORT => Some(schema.option(ENCODER_OPT_NAME, REPORT_FILE_NAME)),
        ENCODER_ID_PRINT => Some(schema.option(ENCODER_OPT_NAME, PRINT_FILE_NAME)),
        _ => None,
    }
}

/// Runs one encoder over a finished derivation.
pub fn encode(
    spec: &EncoderSpec,
    shape: &InitialShape,
    derivation: &Derivation,
    sink: &mut dyn OutputSink,
) -> Result<(), EngineError> {
    match spec.encoder_id.as_str() {
        ENCODER_ID_IN_MEMORY => {
            for block in derivation.geometry() {
                sink.emit_geometry(block.vertices(), block.indices(), block.face_counts())?;
            }
        }
        ENCODER_ID_REPORT => {
            for (key, value) in derivation.float_reports() {
                sink.emit_float_report(key, *value)?;
            }
            for (key, value) in derivation.string_reports() {
                sink.emit_string_report(key, value)?;
            }
            for (key, value) in derivation.bool_reports() {
                sink.emit_bool_report(key, *value)?;
            }
        }
        ENCODER_ID_PRINT => {
            for text in derivation.prints() {
                sink.emit_print(text)?;
            }
            for message in derivation.errors() {
                sink.emit_error(message)?;
            }
        }
        ENCODER_ID_OBJ => {
            let base_name = spec
                .options
                .get_string(ENCODER_OPT_BASE_NAME)
                .unwrap_or(DEFAULT_BASE_NAME);
            let file_name = format!("{base_name}_{}.obj", shape.name);
            let text = obj::encode(&shape.name, derivation.geometry());
            sink.write_file(&file_name, text.as_bytes())?;
        }
        other => {
            return Err(EngineError::new(
                Status::EncoderNotFound,
                format!("unknown encoder '{other}'"),
            ))
        }
    }
    Ok(())
}
