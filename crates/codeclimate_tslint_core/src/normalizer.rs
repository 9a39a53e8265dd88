//! tslint configuration normalization.
//!
//! Rule configurations may reference `rulesDirectory` paths that only
//! resolve next to the analyzer installation, not inside the analyzed
//! project. Normalization rewrites those references to absolute paths and
//! stages the result as a fresh JSON document in the scratch directory,
//! leaving the caller-supplied file untouched.

use std::fs;
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use path_absolutize::Absolutize;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::LinterError;

/// `rulesDirectory` as tslint accepts it: one path or an ordered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RulesDirectory {
    Single(String),
    Many(Vec<String>),
}

/// A loaded rule-configuration document.
///
/// Only `rulesDirectory` is interpreted; every other field (`rules`,
/// `extends`, `linterOptions`, ...) is carried through unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTslintConfig {
    #[serde(
        rename = "rulesDirectory",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub rules_directory: Option<RulesDirectory>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, Value>,
}

impl RawTslintConfig {
    /// Loads a rule configuration, dispatching on the file extension:
    /// `.yaml`/`.yml` parse as YAML, everything else as JSON with comments.
    pub fn load(path: &Path) -> Result<Self, LinterError> {
        let raw = fs::read_to_string(path)?;

        let value = if is_yaml_file(path) {
            serde_yaml::from_str(&raw).map_err(|e| {
                LinterError::parse(format!("Malformed rule config {}: {}", path.display(), e))
            })?
        } else {
            jsonc_parser::parse_to_serde_value(&raw, &ParseOptions::default())
                .map_err(|e| {
                    LinterError::parse(format!("Malformed rule config {}: {}", path.display(), e))
                })?
                .ok_or_else(|| {
                    LinterError::parse(format!("Empty rule config {}", path.display()))
                })?
        };

        serde_json::from_value(value).map_err(|e| {
            LinterError::parse(format!("Malformed rule config {}: {}", path.display(), e))
        })
    }
}

fn is_yaml_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Stages linter-ready rule configurations in the scratch directory.
pub struct ConfigNormalizer {
    scratch_dir: PathBuf,
}

impl ConfigNormalizer {
    pub fn new() -> Self {
        Self {
            scratch_dir: std::env::temp_dir().join("codeclimate-tslint"),
        }
    }

    pub fn with_scratch_dir(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
        }
    }

    /// Rewrites the `rulesDirectory` references of the document at `input`
    /// and writes the result as JSON to a randomly named file in the
    /// scratch directory, returning its path.
    ///
    /// The scratch directory is created on first use; the random filename
    /// keeps concurrent runs from clobbering each other. The input file is
    /// never modified.
    pub fn normalize(
        &self,
        input: &Path,
        alternate_base: &Path,
    ) -> Result<PathBuf, LinterError> {
        let mut config = RawTslintConfig::load(input)?;
        config.rules_directory =
            resolve_rules_directory(config.rules_directory.take(), alternate_base)?;

        fs::create_dir_all(&self.scratch_dir)?;
        let output = self
            .scratch_dir
            .join(format!("tslint-{}.json", Uuid::new_v4().simple()));
        let serialized = serde_json::to_string(&config)
            .map_err(|e| LinterError::parse(format!("Failed to serialize rule config: {}", e)))?;
        fs::write(&output, serialized)?;

        debug!(
            "Normalized {} into {}",
            input.display(),
            output.display()
        );
        Ok(output)
    }
}

impl Default for ConfigNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves every rules-directory reference to an absolute path, preferring
/// the literal location and falling back to `alternate_base` when only that
/// exists. References found at neither location keep their (absolutized)
/// original form.
fn resolve_rules_directory(
    rules_directory: Option<RulesDirectory>,
    alternate_base: &Path,
) -> Result<Option<RulesDirectory>, LinterError> {
    match rules_directory {
        None => Ok(None),
        Some(RulesDirectory::Single(dir)) => Ok(Some(RulesDirectory::Single(
            normalize_rules_directory_path(&dir, alternate_base)?,
        ))),
        Some(RulesDirectory::Many(dirs)) => {
            let resolved = dirs
                .iter()
                .map(|dir| normalize_rules_directory_path(dir, alternate_base))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(RulesDirectory::Many(resolved)))
        }
    }
}

fn normalize_rules_directory_path(dir: &str, alternate_base: &Path) -> Result<String, LinterError> {
    let literal = Path::new(dir);
    let alternate = alternate_base.join(dir);

    let chosen = if !literal.exists() && alternate.exists() {
        alternate
    } else {
        literal.to_path_buf()
    };
    let absolute = chosen.absolutize()?;
    Ok(absolute.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_json_with_comments() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tslint.json");
        fs::write(
            &path,
            r#"{
                // line comment
                "rules": {"semicolon": [true, "always"]},
                /* block
                   comment */
                "rulesDirectory": "custom-rules"
            }"#,
        )
        .unwrap();

        let config = RawTslintConfig::load(&path).unwrap();

        assert_eq!(
            config.rules_directory,
            Some(RulesDirectory::Single("custom-rules".to_string()))
        );
        assert_eq!(
            config.rest.get("rules"),
            Some(&json!({"semicolon": [true, "always"]}))
        );
    }

    #[test]
    fn test_load_yaml() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tslint.yaml");
        fs::write(
            &path,
            "rulesDirectory:\n  - custom-rules\n  - more-rules\nrules:\n  semicolon: true\n",
        )
        .unwrap();

        let config = RawTslintConfig::load(&path).unwrap();

        assert_eq!(
            config.rules_directory,
            Some(RulesDirectory::Many(vec![
                "custom-rules".to_string(),
                "more-rules".to_string(),
            ]))
        );
        assert_eq!(config.rest.get("rules"), Some(&json!({"semicolon": true})));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempdir().unwrap();

        let result = RawTslintConfig::load(&temp_dir.path().join("absent.json"));

        assert!(matches!(result, Err(LinterError::Io(_))));
    }

    #[test]
    fn test_load_empty_document() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("tslint.json");
        fs::write(&path, "// nothing here\n").unwrap();

        let result = RawTslintConfig::load(&path);

        assert!(matches!(result, Err(LinterError::Parse(_))));
    }

    #[test]
    fn test_resolve_prefers_existing_literal_path() {
        let temp_dir = tempdir().unwrap();
        let existing = temp_dir.path().join("rules");
        fs::create_dir_all(&existing).unwrap();

        let resolved =
            normalize_rules_directory_path(existing.to_str().unwrap(), temp_dir.path()).unwrap();

        assert_eq!(resolved, existing.to_string_lossy());
    }

    #[test]
    fn test_resolve_falls_back_to_alternate_base() {
        let temp_dir = tempdir().unwrap();
        fs::create_dir_all(temp_dir.path().join("custom-rules")).unwrap();

        let resolved = normalize_rules_directory_path("custom-rules", temp_dir.path()).unwrap();

        assert_eq!(
            resolved,
            temp_dir.path().join("custom-rules").to_string_lossy()
        );
    }

    #[test]
    fn test_resolve_keeps_nonexistent_path_absolutized() {
        let temp_dir = tempdir().unwrap();

        let resolved = normalize_rules_directory_path("missing-rules", temp_dir.path()).unwrap();

        let expected = std::env::current_dir().unwrap().join("missing-rules");
        assert_eq!(resolved, expected.to_string_lossy());
    }

    #[test]
    fn test_resolve_literal_wins_when_both_exist() {
        let temp_dir = tempdir().unwrap();

        let resolved = normalize_rules_directory_path(".", temp_dir.path()).unwrap();

        let expected = std::env::current_dir().unwrap();
        assert_eq!(resolved, expected.to_string_lossy());
    }

    #[test]
    fn test_resolve_absent_rules_directory() {
        let temp_dir = tempdir().unwrap();

        let resolved = resolve_rules_directory(None, temp_dir.path()).unwrap();

        assert_eq!(resolved, None);
    }

    #[test]
    fn test_normalize_rewrites_and_stages_config() {
        let temp_dir = tempdir().unwrap();
        let alternate_base = temp_dir.path().join("linter");
        fs::create_dir_all(alternate_base.join("custom-rules")).unwrap();

        let input = temp_dir.path().join("tslint.json");
        let original = r#"{"rules": {"semicolon": [true]}, "rulesDirectory": ["custom-rules"]}"#;
        fs::write(&input, original).unwrap();

        let scratch_dir = temp_dir.path().join("scratch");
        let normalizer = ConfigNormalizer::with_scratch_dir(&scratch_dir);
        let output = normalizer.normalize(&input, &alternate_base).unwrap();

        assert!(output.starts_with(&scratch_dir));
        assert_eq!(output.extension().unwrap(), "json");

        let normalized = RawTslintConfig::load(&output).unwrap();
        assert_eq!(
            normalized.rules_directory,
            Some(RulesDirectory::Many(vec![alternate_base
                .join("custom-rules")
                .to_string_lossy()
                .into_owned()]))
        );
        assert_eq!(
            normalized.rest.get("rules"),
            Some(&json!({"semicolon": [true]}))
        );

        // The caller's file stays as written.
        assert_eq!(fs::read_to_string(&input).unwrap(), original);
    }

    #[test]
    fn test_normalize_outputs_are_unique_per_call() {
        let temp_dir = tempdir().unwrap();
        let input = temp_dir.path().join("tslint.json");
        fs::write(&input, r#"{"rules": {}}"#).unwrap();

        let normalizer = ConfigNormalizer::with_scratch_dir(temp_dir.path().join("scratch"));
        let first = normalizer.normalize(&input, temp_dir.path()).unwrap();
        let second = normalizer.normalize(&input, temp_dir.path()).unwrap();

        assert_ne!(first, second);
    }
}
