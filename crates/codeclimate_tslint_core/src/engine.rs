//! The external lint-engine seam.
//!
//! The pipeline never executes lint rules itself. It hands a file and a
//! normalized rule configuration to a [`LintEngine`] and receives back the
//! failures tslint's JSON formatter reports. The production implementation
//! shells out to the tslint executable; tests substitute their own engines.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to run {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unreadable lint output: {0}")]
    Output(String),
    #[error("Lint engine terminated ({status}): {stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Severity marker attached to a failure, `error` unless the rule was
/// configured down to a warning. tslint emits these uppercase; parsing is
/// case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum FailureSeverity {
    #[default]
    Error,
    Warning,
    Off,
}

impl FailureSeverity {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "error" => Some(Self::Error),
            "warning" => Some(Self::Warning),
            "off" => Some(Self::Off),
            _ => None,
        }
    }
}

impl TryFrom<String> for FailureSeverity {
    type Error = String;

    fn try_from(value: String) -> Result<Self, String> {
        Self::parse(&value).ok_or_else(|| format!("unknown rule severity {:?}", value))
    }
}

/// Source position as tslint reports it: 0-based line and character, plus
/// the absolute offset into the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FailurePosition {
    pub line: u32,
    pub character: u32,
    #[serde(default)]
    pub position: u32,
}

impl FailurePosition {
    pub fn new(line: u32, character: u32) -> Self {
        Self {
            line,
            character,
            position: 0,
        }
    }
}

/// One problem reported by the lint engine, in the shape of tslint's JSON
/// formatter. Keys this pipeline does not interpret (`fix`, ...) are
/// ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    pub rule_name: String,
    /// Human-readable message.
    pub failure: String,
    /// Identity of the offending file, as the engine saw it.
    pub name: String,
    #[serde(default)]
    pub rule_severity: FailureSeverity,
    pub start_position: FailurePosition,
    pub end_position: FailurePosition,
}

impl Failure {
    pub fn new(
        rule_name: impl Into<String>,
        failure: impl Into<String>,
        name: impl Into<String>,
        rule_severity: FailureSeverity,
        start_position: FailurePosition,
        end_position: FailurePosition,
    ) -> Self {
        Self {
            rule_name: rule_name.into(),
            failure: failure.into(),
            name: name.into(),
            rule_severity,
            start_position,
            end_position,
        }
    }
}

/// Runs the lint rules for one file against a resolved rule configuration.
pub trait LintEngine {
    fn lint(&self, file: &Path, contents: &str, config: &Path)
    -> Result<Vec<Failure>, EngineError>;
}

/// Production engine: spawns the tslint executable per file and parses its
/// JSON formatter output.
pub struct TslintProcess {
    tslint_bin: PathBuf,
}

impl TslintProcess {
    pub fn new(tslint_bin: impl Into<PathBuf>) -> Self {
        Self {
            tslint_bin: tslint_bin.into(),
        }
    }
}

impl LintEngine for TslintProcess {
    /// tslint exits non-zero when it finds lint errors, so the exit status
    /// alone is not a failure; any parseable stdout wins. An empty stdout
    /// from a successful run means a clean file.
    fn lint(
        &self,
        file: &Path,
        _contents: &str,
        config: &Path,
    ) -> Result<Vec<Failure>, EngineError> {
        debug!("Linting {} with {}", file.display(), self.tslint_bin.display());

        let output = Command::new(&self.tslint_bin)
            .arg("--format")
            .arg("json")
            .arg("--config")
            .arg(config)
            .arg(file)
            .output()
            .map_err(|e| EngineError::Spawn {
                command: self.tslint_bin.display().to_string(),
                source: e,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let trimmed = stdout.trim();
        if trimmed.is_empty() {
            if output.status.success() {
                return Ok(Vec::new());
            }
            return Err(EngineError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        serde_json::from_str(trimmed).map_err(|e| EngineError::Output(e.to_string()))
    }
}
