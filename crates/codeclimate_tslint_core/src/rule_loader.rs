//! Rule metadata discovery.
//!
//! The registry is assembled from two sources: the bundled tslint rule
//! documentation staged at install time under `<linter-dir>/tslint/docs/`,
//! and metadata dumps shipped by additional rule packages under
//! `<linter-dir>/node_modules/`. Loading is best-effort: missing sources are
//! skipped and malformed dumps degrade to placeholder metadata, so an
//! incomplete rule ecosystem never prevents analysis.

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::rules::{RuleMetadata, RuleName, RuleRegistry};

/// Rule packages that ship their own rules next to the analyzer.
pub const ADDITIONAL_RULE_PACKAGES: [&str; 5] = [
    "codelyzer",
    "tslint-eslint-rules/dist/rules",
    "tslint-microsoft-contrib",
    "tslint-plugin-prettier/rules",
    "tslint-sonarts/lib/rules",
];

/// Location of the bundled tslint rule documentation, relative to the
/// linter directory.
const BUNDLED_RULE_FILE: &str = "tslint/docs/rules.json";

/// Assembles the rule registry from the bundled rule set plus every
/// additional rule package, in that order, so bundled metadata wins when a
/// package re-declares a rule name.
pub fn get_rules(linter_dir: &Path) -> RuleRegistry {
    let mut rules = load_bundled_rules(&linter_dir.join(BUNDLED_RULE_FILE));
    for package in ADDITIONAL_RULE_PACKAGES {
        rules.extend(load_rule_dir(&linter_dir.join("node_modules").join(package)));
    }

    let registry = RuleRegistry::new(rules);
    info!("Loaded metadata for {} rules", registry.len());
    registry
}

/// Loads the bundled rule documentation, a JSON array of rule metadata.
/// Entries that do not deserialize are dropped individually.
fn load_bundled_rules(path: &Path) -> Vec<RuleMetadata> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Skipping bundled rules at {}: {}", path.display(), e);
            return Vec::new();
        }
    };
    let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Skipping bundled rules at {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(metadata) => Some(metadata),
            Err(e) => {
                debug!("Skipping bundled rule entry: {}", e);
                None
            }
        })
        .collect()
}

/// Scans one rule-package directory for `*Rule.json` metadata dumps.
///
/// A dump that cannot be parsed, or that lacks a usable rule name, degrades
/// to placeholder metadata named after the file stem (`noUnusedVariableRule`
/// becomes `no-unused-variable`). A missing or unreadable directory yields
/// an empty result.
pub fn load_rule_dir(dir: &Path) -> Vec<RuleMetadata> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Skipping rule directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut rule_files: Vec<_> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_rule_file(path))
        .collect();
    rule_files.sort();

    rule_files
        .into_iter()
        .filter_map(|path| load_rule_file(&path))
        .collect()
}

fn is_rule_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with("Rule.json"))
}

fn load_rule_file(path: &Path) -> Option<RuleMetadata> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Skipping rule file {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            debug!("Falling back to empty metadata for {}: {}", path.display(), e);
            fallback_rule_name(path).map(RuleMetadata::empty)
        }
    }
}

/// Derives a rule name from a metadata file name: `fooBarRule.json` names
/// the rule `foo-bar`.
fn fallback_rule_name(path: &Path) -> Option<RuleName> {
    let stem = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix("Rule.json"))?;

    match RuleName::new(kebab_case(stem)) {
        Ok(name) => Some(name),
        Err(e) => {
            warn!("Skipping rule file {}: {}", path.display(), e);
            None
        }
    }
}

fn kebab_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for (i, ch) in input.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
