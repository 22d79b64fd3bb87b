//! Rule packages held by the in-memory engine.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use config::constants::PACKAGE_ENTRY_SEPARATOR;

use super::program::RuleProgram;

/// Start rules of one rule file.
#[derive(Clone, Default)]
pub struct RuleFile {
    rules: BTreeMap<String, Arc<dyn RuleProgram>>,
}

impl RuleFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, start_rule: impl Into<String>, program: impl RuleProgram + 'static) -> Self {
        self.rules.insert(start_rule.into(), Arc::new(program));
        self
    }

    pub fn rule(&self, start_rule: &str) -> Option<&dyn RuleProgram> {
        self.rules.get(start_rule).map(|program| program.as_ref())
    }

    pub fn start_rules(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }
}

impl fmt::Debug for RuleFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleFile")
            .field("start_rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Rule files and assets addressed by key (`bin/rule.cgb`, `assets/lot.obj`).
#[derive(Debug, Clone, Default)]
pub struct RulePackage {
    rule_files: BTreeMap<String, RuleFile>,
    assets: BTreeMap<String, Arc<[u8]>>,
}

impl RulePackage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule_file(mut self, key: impl Into<String>, rule_file: RuleFile) -> Self {
        self.rule_files.insert(key.into(), rule_file);
        self
    }

    pub fn with_asset(mut self, key: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let bytes: Vec<u8> = bytes.into();
        self.assets.insert(key.into(), bytes.into());
        self
    }

    pub fn rule_file(&self, key: &str) -> Option<&RuleFile> {
        self.rule_files.get(key)
    }

    pub fn asset(&self, key: &str) -> Option<Arc<[u8]>> {
        self.assets.get(key).map(Arc::clone)
    }

    /// Every entry key, rule files first.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rule_files
            .keys()
            .chain(self.assets.keys())
            .map(String::as_str)
    }
}

/// `<package uri>!/<key>`
pub fn entry_uri(package_uri: &str, key: &str) -> String {
    format!("{package_uri}{PACKAGE_ENTRY_SEPARATOR}{key}")
}

/// Splits an entry URI into package URI and key.
pub fn split_entry_uri(uri: &str) -> Option<(&str, &str)> {
    uri.split_once(PACKAGE_ENTRY_SEPARATOR)
}
