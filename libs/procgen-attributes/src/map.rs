//! # Attribute Maps
//!
//! Immutable name → value maps, assembled through [`AttributeMapBuilder`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::{AttributeType, AttributeValue};

/// Typed, immutable attribute map.
///
/// Keys are unique; iteration is in key order.
///
/// # Example
///
/// ```rust
/// use procgen_attributes::{AttributeMap, AttributeMapBuilder};
///
/// let attrs = AttributeMapBuilder::new()
///     .set("height", 12.5)
///     .set("ruleFile", "bin/rule.cgb")
///     .build();
/// assert_eq!(attrs.get_float("height"), Some(12.5));
/// assert_eq!(attrs.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeMap {
    entries: BTreeMap<String, AttributeValue>,
}

impl AttributeMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.get(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Type of the value stored under `key`.
    pub fn get_type(&self, key: &str) -> Option<AttributeType> {
        self.get(key).map(AttributeValue::value_type)
    }

    /// Returns the value only if it is a string.
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(AttributeValue::as_str)
    }

    /// Returns the value only if it is a float.
    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(AttributeValue::as_f64)
    }

    /// Returns the value only if it is an int.
    pub fn get_int(&self, key: &str) -> Option<i32> {
        self.get(key).and_then(AttributeValue::as_i32)
    }

    /// Returns the value only if it is a bool.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(AttributeValue::as_bool)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a builder seeded with this map's entries.
    pub fn to_builder(&self) -> AttributeMapBuilder {
        AttributeMapBuilder {
            entries: self.entries.clone(),
        }
    }
}

impl FromIterator<(String, AttributeValue)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (String, AttributeValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AttributeMap {
    type Item = (&'a String, &'a AttributeValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, AttributeValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Accumulates entries for an [`AttributeMap`].
///
/// Setting a key twice keeps the later value.
#[derive(Debug, Clone, Default)]
pub struct AttributeMapBuilder {
    entries: BTreeMap<String, AttributeValue>,
}

impl AttributeMapBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, returning the builder for chaining.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a value in place; returns the value it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Option<AttributeValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Freezes the builder into an immutable map.
    pub fn build(self) -> AttributeMap {
        AttributeMap {
            entries: self.entries,
        }
    }
}
