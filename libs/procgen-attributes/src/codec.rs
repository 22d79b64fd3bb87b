//! # Attribute Codec
//!
//! Conversion between flat `name:type=value` strings and typed attributes.
//!
//! ## Grammar
//!
//! ```text
//! entry := name ':' type '=' value
//! type  := "string" | "float" | "bool" | "int" | type "[]"
//! value := scalar | scalar (';' scalar)*      (array types)
//! ```
//!
//! The name ends at the first `:`, the type tag at the first `=` after it.
//! Everything after that `=` is the value, so values may contain `:` and `=`.

use config::constants::{ATTR_ARRAY_SEPARATOR, ATTR_TYPE_SEPARATOR, ATTR_VALUE_SEPARATOR};

use crate::error::{AttributeEncodeError, AttributeParseError};
use crate::map::{AttributeMap, AttributeMapBuilder};
use crate::value::{AttributeType, AttributeValue};

/// Parses a sequence of encoded entries into an attribute map.
///
/// Fails on the first malformed entry; no partial map is ever returned.
/// A name given twice keeps the later value.
///
/// # Example
///
/// ```rust
/// use procgen_attributes::parse_entries;
///
/// let attrs = parse_entries(["levels:int[]=1;2;3", "flat:bool=true"]).unwrap();
/// assert_eq!(attrs.len(), 2);
/// assert!(parse_entries(["height:double=3"]).is_err());
/// ```
pub fn parse_entries<I, S>(entries: I) -> Result<AttributeMap, AttributeParseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut builder = AttributeMapBuilder::new();
    for entry in entries {
        let (name, value) = parse_entry(entry.as_ref())?;
        if let Some(previous) = builder.insert(name.clone(), value) {
            tracing::debug!(%name, %previous, "attribute given twice, keeping the later value");
        }
    }
    Ok(builder.build())
}

/// Parses one `name:type=value` entry.
///
/// # Example
///
/// ```rust
/// use procgen_attributes::{parse_entry, AttributeValue};
///
/// let (name, value) = parse_entry("seed:int=42").unwrap();
/// assert_eq!(name, "seed");
/// assert_eq!(value, AttributeValue::Int(42));
/// ```
pub fn parse_entry(entry: &str) -> Result<(String, AttributeValue), AttributeParseError> {
    let (name, rest) = entry
        .split_once(ATTR_TYPE_SEPARATOR)
        .ok_or_else(|| AttributeParseError::MissingTypeSeparator {
            entry: entry.to_string(),
        })?;
    let (tag, raw) = rest
        .split_once(ATTR_VALUE_SEPARATOR)
        .ok_or_else(|| AttributeParseError::MissingValueSeparator {
            entry: entry.to_string(),
        })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(AttributeParseError::EmptyName {
            entry: entry.to_string(),
        });
    }

    let ty: AttributeType = tag
        .trim()
        .parse()
        .map_err(|()| AttributeParseError::UnknownType {
            name: name.to_string(),
            tag: tag.to_string(),
        })?;

    let value = parse_value(name, ty, raw)?;
    Ok((name.to_string(), value))
}

/// Converts a raw value to the declared type.
pub fn parse_value(
    name: &str,
    ty: AttributeType,
    raw: &str,
) -> Result<AttributeValue, AttributeParseError> {
    let value = match ty {
        AttributeType::String => AttributeValue::String(raw.to_string()),
        AttributeType::Float => AttributeValue::Float(parse_float(name, raw)?),
        AttributeType::Bool => AttributeValue::Bool(parse_bool(name, raw)?),
        AttributeType::Int => AttributeValue::Int(parse_int(name, raw)?),
        AttributeType::StringArray => {
            AttributeValue::StringArray(split_array(raw).map(str::to_string).collect())
        }
        AttributeType::FloatArray => AttributeValue::FloatArray(
            split_array(raw)
                .map(|element| parse_float(name, element).map_err(|_| array_error(name, ty, raw)))
                .collect::<Result<_, _>>()?,
        ),
        AttributeType::BoolArray => AttributeValue::BoolArray(
            split_array(raw)
                .map(|element| parse_bool(name, element).map_err(|_| array_error(name, ty, raw)))
                .collect::<Result<_, _>>()?,
        ),
        AttributeType::IntArray => AttributeValue::IntArray(
            split_array(raw)
                .map(|element| parse_int(name, element).map_err(|_| array_error(name, ty, raw)))
                .collect::<Result<_, _>>()?,
        ),
    };
    Ok(value)
}

/// Encodes a typed value back into `name:type=value` form.
///
/// Floats use the shortest representation that parses back to the same
/// value. Names that would not parse back to themselves are rejected, as is
/// a string array whose only element is empty.
///
/// # Example
///
/// ```rust
/// use procgen_attributes::{encode_entry, AttributeValue};
///
/// let entry = encode_entry("height", &AttributeValue::Float(12.5)).unwrap();
/// assert_eq!(entry, "height:float=12.5");
/// ```
pub fn encode_entry(name: &str, value: &AttributeValue) -> Result<String, AttributeEncodeError> {
    if name.is_empty()
        || name.trim() != name
        || name.contains(ATTR_TYPE_SEPARATOR)
        || name.contains(ATTR_VALUE_SEPARATOR)
    {
        return Err(AttributeEncodeError::InvalidName {
            name: name.to_string(),
        });
    }

    let encoded = match value {
        AttributeValue::String(s) => s.clone(),
        AttributeValue::Float(n) => n.to_string(),
        AttributeValue::Bool(b) => b.to_string(),
        AttributeValue::Int(n) => n.to_string(),
        AttributeValue::StringArray(items) => {
            if let Some(element) = items.iter().find(|s| s.contains(ATTR_ARRAY_SEPARATOR)) {
                return Err(AttributeEncodeError::ReservedSeparator {
                    name: name.to_string(),
                    element: element.clone(),
                    separator: ATTR_ARRAY_SEPARATOR,
                });
            }
            if matches!(items.as_slice(), [only] if only.is_empty()) {
                return Err(AttributeEncodeError::SingleEmptyElement {
                    name: name.to_string(),
                });
            }
            join_array(items.iter())
        }
        AttributeValue::FloatArray(items) => join_array(items.iter()),
        AttributeValue::BoolArray(items) => join_array(items.iter()),
        AttributeValue::IntArray(items) => join_array(items.iter()),
    };
    Ok(format!(
        "{name}{ATTR_TYPE_SEPARATOR}{}{ATTR_VALUE_SEPARATOR}{encoded}",
        value.value_type().tag()
    ))
}

impl AttributeMap {
    /// Encodes every entry, in key order.
    pub fn to_entries(&self) -> Result<Vec<String>, AttributeEncodeError> {
        self.iter()
            .map(|(name, value)| encode_entry(name, value))
            .collect()
    }
}

// =============================================================================
// SCALAR CONVERSIONS
// =============================================================================

fn parse_float(name: &str, raw: &str) -> Result<f64, AttributeParseError> {
    // NaN and infinities are rejected.
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or_else(|| AttributeParseError::invalid_value(name, AttributeType::Float, raw))
}

fn parse_int(name: &str, raw: &str) -> Result<i32, AttributeParseError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AttributeParseError::invalid_value(name, AttributeType::Int, raw))
}

fn parse_bool(name: &str, raw: &str) -> Result<bool, AttributeParseError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed == "1" {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") || trimmed == "0" {
        Ok(false)
    } else {
        Err(AttributeParseError::invalid_value(name, AttributeType::Bool, raw))
    }
}

// An empty value is an empty array, not an array holding one empty element.
fn split_array(raw: &str) -> impl Iterator<Item = &str> {
    let non_empty = !raw.is_empty();
    raw.split(ATTR_ARRAY_SEPARATOR).filter(move |_| non_empty)
}

fn join_array<T: ToString>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(&ATTR_ARRAY_SEPARATOR.to_string())
}

fn array_error(name: &str, ty: AttributeType, raw: &str) -> AttributeParseError {
    AttributeParseError::invalid_value(name, ty, raw)
}
