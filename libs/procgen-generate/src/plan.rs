//! # Encoder Plan
//!
//! Ordered list of validated encoder specs for one call. The primary
//! encoder always comes first; the report and print encoders follow in that
//! order. Pure assembly: no I/O.

use config::constants::{
    DEFAULT_ENCODER_OPTIONS, ENCODER_ID_IN_MEMORY, ENCODER_ID_PRINT, ENCODER_ID_REPORT,
    ENCODER_OPT_NAME, REPORT_FILE_NAME,
};
use procgen_attributes::{
    parse_entries, validate_options, AttributeMap, EncoderSchemas, EncoderValidationError,
};
use procgen_engine::EncoderSpec;

use crate::error::GenerateError;

/// Caller's choice of primary encoder, with options in flat
/// `name:type=value` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderChoice {
    pub encoder_id: String,
    pub options: Vec<String>,
}

impl EncoderChoice {
    pub fn new<I, S>(encoder_id: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            encoder_id: encoder_id.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for EncoderChoice {
    /// The in-memory encoder with the default options.
    fn default() -> Self {
        Self::new(ENCODER_ID_IN_MEMORY, DEFAULT_ENCODER_OPTIONS)
    }
}

/// Validated encoders, primary first.
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderPlan {
    specs: Vec<EncoderSpec>,
}

impl EncoderPlan {
    /// Validates the primary options and default-fills the secondaries.
    pub fn build<S: EncoderSchemas + ?Sized>(
        schemas: &S,
        primary_id: &str,
        primary_options: &AttributeMap,
        secondary_ids: &[&str],
    ) -> Result<Self, EncoderValidationError> {
        let mut specs = Vec::with_capacity(1 + secondary_ids.len());
        specs.push(EncoderSpec::new(
            primary_id,
            validate_options(schemas, primary_id, primary_options)?,
        ));

        let no_options = AttributeMap::new();
        for &id in secondary_ids {
            specs.push(EncoderSpec::new(
                id,
                validate_options(schemas, id, &no_options)?,
            ));
        }
        Ok(Self { specs })
    }

    /// Plan for `choice` followed by the report and print encoders.
    pub fn standard<S: EncoderSchemas + ?Sized>(
        schemas: &S,
        choice: &EncoderChoice,
    ) -> Result<Self, GenerateError> {
        let options = parse_entries(&choice.options)?;
        Ok(Self::build(
            schemas,
            &choice.encoder_id,
            &options,
            &[ENCODER_ID_REPORT, ENCODER_ID_PRINT],
        )?)
    }

    pub fn specs(&self) -> &[EncoderSpec] {
        &self.specs
    }

    pub fn primary(&self) -> &EncoderSpec {
        &self.specs[0]
    }

    /// Returns true if results are delivered in memory.
    pub fn is_in_memory(&self) -> bool {
        self.primary().encoder_id == ENCODER_ID_IN_MEMORY
    }

    /// The report encoder's `name` option, used as report file name.
    pub fn report_file_name(&self) -> &str {
        self.specs
            .iter()
            .find(|spec| spec.encoder_id == ENCODER_ID_REPORT)
            .and_then(|spec| spec.options.get_string(ENCODER_OPT_NAME))
            .unwrap_or(REPORT_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::{ENCODER_ID_OBJ, ENCODER_OPT_BASE_NAME, PRINT_FILE_NAME};
    use procgen_engine::InMemoryEngine;

    #[test]
    fn primary_comes_first_then_report_then_print() {
        let plan = EncoderPlan::standard(&InMemoryEngine::new(), &EncoderChoice::default()).unwrap();
        let ids: Vec<&str> = plan.specs().iter().map(|s| s.encoder_id.as_str()).collect();
        assert_eq!(ids, [ENCODER_ID_IN_MEMORY, ENCODER_ID_REPORT, ENCODER_ID_PRINT]);
        assert!(plan.is_in_memory());
    }

    #[test]
    fn secondaries_get_default_options() {
        let plan = EncoderPlan::standard(&InMemoryEngine::new(), &EncoderChoice::default()).unwrap();
        assert_eq!(plan.report_file_name(), REPORT_FILE_NAME);
        assert_eq!(
            plan.specs()[2].options.get_string(ENCODER_OPT_NAME),
            Some(PRINT_FILE_NAME)
        );
    }

    #[test]
    fn primary_options_override_defaults() {
        let choice = EncoderChoice::new(ENCODER_ID_OBJ, ["baseName:string=district"]);
        let plan = EncoderPlan::standard(&InMemoryEngine::new(), &choice).unwrap();
        assert!(!plan.is_in_memory());
        assert_eq!(
            plan.primary().options.get_string(ENCODER_OPT_BASE_NAME),
            Some("district")
        );
    }

    #[test]
    fn mistyped_option_is_validation_error() {
        let choice = EncoderChoice::new(ENCODER_ID_IN_MEMORY, ["baseName:int=3"]);
        let err = EncoderPlan::standard(&InMemoryEngine::new(), &choice).unwrap_err();
        match err {
            GenerateError::EncoderValidation(err) => assert_eq!(err.option(), Some("baseName")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn malformed_option_is_parse_error() {
        let choice = EncoderChoice::new(ENCODER_ID_IN_MEMORY, ["baseName=oops"]);
        let err = EncoderPlan::standard(&InMemoryEngine::new(), &choice).unwrap_err();
        assert!(matches!(err, GenerateError::AttributeParse(_)));
    }

    #[test]
    fn unknown_primary_encoder_is_rejected() {
        let err = EncoderPlan::build(
            &InMemoryEngine::new(),
            "com.example.Missing",
            &AttributeMap::new(),
            &[],
        )
        .unwrap_err();
        assert!(matches!(err, EncoderValidationError::UnknownEncoder { .. }));
    }
}
