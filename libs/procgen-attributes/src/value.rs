use std::fmt;
use std::str::FromStr;

use config::constants::ATTR_ARRAY_SUFFIX;
use serde::{Deserialize, Serialize};

/// Type tag of an attribute, as written in the `name:type=value` encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    String,
    Float,
    Bool,
    Int,
    StringArray,
    FloatArray,
    BoolArray,
    IntArray,
}

impl AttributeType {
    /// Returns the tag used in the flat encoding.
    pub fn tag(self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Float => "float",
            AttributeType::Bool => "bool",
            AttributeType::Int => "int",
            AttributeType::StringArray => "string[]",
            AttributeType::FloatArray => "float[]",
            AttributeType::BoolArray => "bool[]",
            AttributeType::IntArray => "int[]",
        }
    }

    pub fn is_array(self) -> bool {
        matches!(
            self,
            AttributeType::StringArray
                | AttributeType::FloatArray
                | AttributeType::BoolArray
                | AttributeType::IntArray
        )
    }

    /// Scalar type of the elements of an array type; scalars map to themselves.
    pub fn element(self) -> AttributeType {
        match self {
            AttributeType::StringArray => AttributeType::String,
            AttributeType::FloatArray => AttributeType::Float,
            AttributeType::BoolArray => AttributeType::Bool,
            AttributeType::IntArray => AttributeType::Int,
            scalar => scalar,
        }
    }
}

impl FromStr for AttributeType {
    type Err = ();

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let (scalar, is_array) = match tag.strip_suffix(ATTR_ARRAY_SUFFIX) {
            Some(scalar) => (scalar, true),
            None => (tag, false),
        };
        let ty = match (scalar, is_array) {
            ("string", false) => AttributeType::String,
            ("float", false) => AttributeType::Float,
            ("bool", false) => AttributeType::Bool,
            ("int", false) => AttributeType::Int,
            ("string", true) => AttributeType::StringArray,
            ("float", true) => AttributeType::FloatArray,
            ("bool", true) => AttributeType::BoolArray,
            ("int", true) => AttributeType::IntArray,
            _ => return Err(()),
        };
        Ok(ty)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A typed attribute value.
///
/// Arrays are homogeneous by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AttributeValue {
    String(String),
    Float(f64),
    Bool(bool),
    Int(i32),
    StringArray(Vec<String>),
    FloatArray(Vec<f64>),
    BoolArray(Vec<bool>),
    IntArray(Vec<i32>),
}

impl AttributeValue {
    pub fn value_type(&self) -> AttributeType {
        match self {
            AttributeValue::String(_) => AttributeType::String,
            AttributeValue::Float(_) => AttributeType::Float,
            AttributeValue::Bool(_) => AttributeType::Bool,
            AttributeValue::Int(_) => AttributeType::Int,
            AttributeValue::StringArray(_) => AttributeType::StringArray,
            AttributeValue::FloatArray(_) => AttributeType::FloatArray,
            AttributeValue::BoolArray(_) => AttributeType::BoolArray,
            AttributeValue::IntArray(_) => AttributeType::IntArray,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            AttributeValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Number of elements; scalars count as one.
    pub fn len(&self) -> usize {
        match self {
            AttributeValue::StringArray(v) => v.len(),
            AttributeValue::FloatArray(v) => v.len(),
            AttributeValue::BoolArray(v) => v.len(),
            AttributeValue::IntArray(v) => v.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<f64> for AttributeValue {
    fn from(n: f64) -> Self {
        AttributeValue::Float(n)
    }
}

impl From<i32> for AttributeValue {
    fn from(n: i32) -> Self {
        AttributeValue::Int(n)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(v: Vec<f64>) -> Self {
        AttributeValue::FloatArray(v)
    }
}

impl From<Vec<i32>> for AttributeValue {
    fn from(v: Vec<i32>) -> Self {
        AttributeValue::IntArray(v)
    }
}

impl From<Vec<bool>> for AttributeValue {
    fn from(v: Vec<bool>) -> Self {
        AttributeValue::BoolArray(v)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(v: Vec<String>) -> Self {
        AttributeValue::StringArray(v)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "\"{}\"", s),
            AttributeValue::Float(n) => write!(f, "{}", n),
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Int(n) => write!(f, "{}", n),
            AttributeValue::StringArray(v) => write_list(f, v.iter().map(|s| format!("\"{}\"", s))),
            AttributeValue::FloatArray(v) => write_list(f, v.iter()),
            AttributeValue::BoolArray(v) => write_list(f, v.iter()),
            AttributeValue::IntArray(v) => write_list(f, v.iter()),
        }
    }
}

fn write_list<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = T>,
) -> fmt::Result {
    write!(f, "[")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, "]")
}
