//! Rule metadata types and the read-only rule registry.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid rule name {0:?}")]
pub struct InvalidRuleName(pub String);

/// Validated tslint rule identifier.
///
/// Rule names are the keys of the `rules` map in a tslint configuration
/// (`no-any`, `max-line-length`, ...). Anything empty or containing
/// whitespace is rejected at the boundary so the registry never has to
/// deal with malformed keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RuleName(String);

impl RuleName {
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidRuleName> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(InvalidRuleName(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RuleName {
    type Error = InvalidRuleName;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl FromStr for RuleName {
    type Err = InvalidRuleName;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::new(name)
    }
}

impl From<RuleName> for String {
    fn from(name: RuleName) -> Self {
        name.0
    }
}

impl Borrow<str> for RuleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Rule classification as declared by the rule author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleType {
    Functionality,
    Maintainability,
    Style,
    Typescript,
    Formatting,
}

/// Descriptive metadata for one lint rule, matching the camelCase shape
/// rule packages publish alongside their implementations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMetadata {
    pub rule_name: RuleName,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    #[serde(default)]
    pub options_description: String,
    #[serde(default)]
    pub options: Value,
    #[serde(default)]
    pub option_examples: Vec<Value>,
    #[serde(default)]
    pub typescript_only: bool,
    #[serde(default)]
    pub has_fix: bool,
    #[serde(default)]
    pub requires_type_info: bool,
}

impl RuleMetadata {
    /// Placeholder metadata for rules that ship without documentation.
    pub fn empty(rule_name: RuleName) -> Self {
        Self {
            rule_name,
            rule_type: RuleType::Style,
            description: "*No description is given*".to_string(),
            description_details: None,
            rationale: None,
            options_description: String::new(),
            options: Value::Object(serde_json::Map::new()),
            option_examples: Vec::new(),
            typescript_only: false,
            has_fix: false,
            requires_type_info: false,
        }
    }
}

/// Read-only mapping from rule name to metadata, assembled once at startup.
///
/// When the same rule name is contributed by more than one source the first
/// occurrence wins, so the bundled rule set takes precedence over additional
/// rule packages.
#[derive(Debug, Default)]
pub struct RuleRegistry {
    rules: HashMap<RuleName, RuleMetadata>,
}

impl RuleRegistry {
    pub fn new(rules: Vec<RuleMetadata>) -> Self {
        let mut map = HashMap::with_capacity(rules.len());
        for rule in rules {
            map.entry(rule.rule_name.clone()).or_insert(rule);
        }
        Self { rules: map }
    }

    pub fn get(&self, rule_name: &str) -> Option<&RuleMetadata> {
        self.rules.get(rule_name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
