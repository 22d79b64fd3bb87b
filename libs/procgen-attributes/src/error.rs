//! # Attribute Errors
//!
//! Error types for attribute parsing, encoding and encoder option validation.

use thiserror::Error;

use crate::value::AttributeType;

/// Errors that can occur while parsing `name:type=value` entries.
///
/// Parsing is atomic: any of these aborts the whole call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeParseError {
    /// No `:` between name and type tag.
    #[error("Missing type separator in attribute entry '{entry}'")]
    MissingTypeSeparator { entry: String },

    /// No `=` between type tag and value.
    #[error("Missing value separator in attribute entry '{entry}'")]
    MissingValueSeparator { entry: String },

    /// The name before `:` is empty.
    #[error("Empty attribute name in entry '{entry}'")]
    EmptyName { entry: String },

    /// The type tag is not one of the recognized tags.
    #[error("Unknown type '{tag}' for attribute '{name}'")]
    UnknownType { name: String, tag: String },

    /// The value cannot be converted to the declared type.
    #[error("Invalid {ty} value '{value}' for attribute '{name}'")]
    InvalidValue {
        name: String,
        ty: AttributeType,
        value: String,
    },
}

impl AttributeParseError {
    /// Creates an invalid value error.
    pub fn invalid_value(name: &str, ty: AttributeType, value: &str) -> Self {
        Self::InvalidValue {
            name: name.to_string(),
            ty,
            value: value.to_string(),
        }
    }

    /// Name of the offending attribute, when the entry got that far.
    pub fn attribute_name(&self) -> Option<&str> {
        match self {
            Self::UnknownType { name, .. } | Self::InvalidValue { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// Errors that can occur while re-encoding a typed value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeEncodeError {
    /// A string array element contains the reserved array separator.
    #[error("Element '{element}' of attribute '{name}' contains the reserved separator '{separator}'")]
    ReservedSeparator {
        name: String,
        element: String,
        separator: char,
    },

    /// The name is empty, padded with whitespace, or contains `:` or `=`.
    #[error("Attribute name '{name}' cannot be encoded")]
    InvalidName { name: String },

    /// A string array holding one empty element encodes like an empty array.
    #[error("String array '{name}' with a single empty element has no distinct encoding")]
    SingleEmptyElement { name: String },
}

/// Errors raised when encoder options disagree with the encoder's schema.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncoderValidationError {
    /// No schema is declared for the encoder.
    #[error("Unknown encoder '{encoder_id}'")]
    UnknownEncoder { encoder_id: String },

    /// The option is not declared and the schema rejects unknown options.
    #[error("Encoder '{encoder_id}' has no option '{option}'")]
    UnknownOption { encoder_id: String, option: String },

    /// The option's type disagrees with the schema.
    #[error("Option '{option}' of encoder '{encoder_id}' expects {expected}, got {actual}")]
    TypeMismatch {
        encoder_id: String,
        option: String,
        expected: AttributeType,
        actual: AttributeType,
    },
}

impl EncoderValidationError {
    /// Name of the offending option, if any.
    pub fn option(&self) -> Option<&str> {
        match self {
            Self::UnknownOption { option, .. } | Self::TypeMismatch { option, .. } => Some(option),
            Self::UnknownEncoder { .. } => None,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AttributeParseError::invalid_value("height", AttributeType::Float, "tall");
        assert_eq!(err.to_string(), "Invalid float value 'tall' for attribute 'height'");
        assert_eq!(err.attribute_name(), Some("height"));
    }

    #[test]
    fn test_validation_error_names_option() {
        let err = EncoderValidationError::TypeMismatch {
            encoder_id: "enc".into(),
            option: "baseName".into(),
            expected: AttributeType::String,
            actual: AttributeType::Int,
        };
        assert_eq!(err.option(), Some("baseName"));
        assert!(err.to_string().contains("expects string, got int"));
    }
}
