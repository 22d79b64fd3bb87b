use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lookup of the logical resource names inside a rule package.
///
/// Keys are package-relative names such as `bin/rule.cgb`; values are the
/// URIs the engine loads them from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveMap {
    package_uri: String,
    entries: BTreeMap<String, String>,
}

impl ResolveMap {
    pub fn new(package_uri: impl Into<String>) -> Self {
        Self {
            package_uri: package_uri.into(),
            entries: BTreeMap::new(),
        }
    }

    /// URI of the rule package this map was resolved from.
    pub fn package_uri(&self) -> &str {
        &self.package_uri
    }

    pub fn insert(&mut self, key: impl Into<String>, uri: impl Into<String>) {
        self.entries.insert(key.into(), uri.into());
    }

    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Reverse lookup: the key a URI was registered under.
    pub fn key_for_uri(&self, uri: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, value)| value.as_str() == uri)
            .map(|(key, _)| key.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_inserted_keys() {
        let mut map = ResolveMap::new("file:///rules/city.rpk");
        map.insert("bin/rule.cgb", "file:///rules/city.rpk!/bin/rule.cgb");

        assert_eq!(map.package_uri(), "file:///rules/city.rpk");
        assert_eq!(
            map.resolve("bin/rule.cgb"),
            Some("file:///rules/city.rpk!/bin/rule.cgb")
        );
        assert_eq!(
            map.key_for_uri("file:///rules/city.rpk!/bin/rule.cgb"),
            Some("bin/rule.cgb")
        );
        assert!(map.resolve("bin/other.cgb").is_none());
        assert_eq!(map.len(), 1);
    }
}
