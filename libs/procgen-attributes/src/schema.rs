//! # Encoder Option Schemas
//!
//! Every encoder declares the options it understands together with their
//! defaults. Caller options are validated against that declaration and
//! completed with the defaults they leave out.

use std::collections::BTreeMap;

use crate::error::EncoderValidationError;
use crate::map::{AttributeMap, AttributeMapBuilder};
use crate::value::{AttributeType, AttributeValue};

/// What validation does with options the schema does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOptionPolicy {
    /// Fail with [`EncoderValidationError::UnknownOption`].
    #[default]
    Reject,
    /// Pass the option through unchanged.
    Keep,
}

/// Declared options of one encoder.
///
/// The type of each option is the type of its default value.
///
/// # Example
///
/// ```rust
/// use procgen_attributes::{parse_entries, validate, EncoderSchema};
///
/// let schema = EncoderSchema::new("com.example.Obj")
///     .option("baseName", "model")
///     .option("triangulate", false);
///
/// let raw = parse_entries(["baseName:string=theModel"]).unwrap();
/// let options = validate(&schema, &raw).unwrap();
/// assert_eq!(options.get_string("baseName"), Some("theModel"));
/// assert_eq!(options.get_bool("triangulate"), Some(false));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct EncoderSchema {
    encoder_id: String,
    options: BTreeMap<String, AttributeValue>,
    unknown_options: UnknownOptionPolicy,
}

impl EncoderSchema {
    pub fn new(encoder_id: impl Into<String>) -> Self {
        Self {
            encoder_id: encoder_id.into(),
            options: BTreeMap::new(),
            unknown_options: UnknownOptionPolicy::default(),
        }
    }

    /// Declares an option with its default value.
    pub fn option(mut self, name: impl Into<String>, default: impl Into<AttributeValue>) -> Self {
        self.options.insert(name.into(), default.into());
        self
    }

    pub fn with_unknown_options(mut self, policy: UnknownOptionPolicy) -> Self {
        self.unknown_options = policy;
        self
    }

    pub fn encoder_id(&self) -> &str {
        &self.encoder_id
    }

    pub fn option_type(&self, name: &str) -> Option<AttributeType> {
        self.options.get(name).map(AttributeValue::value_type)
    }

    pub fn default_value(&self, name: &str) -> Option<&AttributeValue> {
        self.options.get(name)
    }

    pub fn unknown_options(&self) -> UnknownOptionPolicy {
        self.unknown_options
    }
}

/// Source of encoder schemas, usually the engine.
pub trait EncoderSchemas {
    /// Returns the schema of `encoder_id`, or `None` if the encoder is unknown.
    fn encoder_schema(&self, encoder_id: &str) -> Option<EncoderSchema>;
}

/// Validates `raw` against `schema` and fills in defaults.
///
/// User values always win over defaults; nothing the caller set is dropped
/// silently.
pub fn validate(
    schema: &EncoderSchema,
    raw: &AttributeMap,
) -> Result<AttributeMap, EncoderValidationError> {
    let mut builder = AttributeMapBuilder::new();
    for (name, default) in &schema.options {
        builder.insert(name.clone(), default.clone());
    }

    for (name, value) in raw.iter() {
        match schema.option_type(name) {
            Some(expected) if expected != value.value_type() => {
                return Err(EncoderValidationError::TypeMismatch {
                    encoder_id: schema.encoder_id.clone(),
                    option: name.to_string(),
                    expected,
                    actual: value.value_type(),
                });
            }
            Some(_) => {}
            None if schema.unknown_options == UnknownOptionPolicy::Reject => {
                return Err(EncoderValidationError::UnknownOption {
                    encoder_id: schema.encoder_id.clone(),
                    option: name.to_string(),
                });
            }
            None => {}
        }
        builder.insert(name, value.clone());
    }

    Ok(builder.build())
}

/// Looks up the schema of `encoder_id` and validates `raw` against it.
pub fn validate_options<S: EncoderSchemas + ?Sized>(
    schemas: &S,
    encoder_id: &str,
    raw: &AttributeMap,
) -> Result<AttributeMap, EncoderValidationError> {
    let schema =
        schemas
            .encoder_schema(encoder_id)
            .ok_or_else(|| EncoderValidationError::UnknownEncoder {
                encoder_id: encoder_id.to_string(),
            })?;
    validate(&schema, raw)
}
