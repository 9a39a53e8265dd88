//! Failure-to-issue conversion.

use std::error::Error as StdError;
use std::path::{Path, PathBuf};

use thiserror::Error;

use codeclimate_tslint_schema::{
    Category, Contents, Issue, IssueType, Location, Position, Severity,
};

use crate::content_renderer::render_rule_documentation;
use crate::engine::{Failure, FailurePosition, FailureSeverity};
use crate::rules::RuleRegistry;

/// `check_name` applied to degraded issues whose originating rule is
/// unknown.
pub const RUNTIME_ERROR_CHECK_NAME: &str = "(runtime error)";

/// Static cost weight attached to every issue.
const REMEDIATION_POINTS: u64 = 50_000;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("No metadata found for rule {rule_name:?}")]
    RuleNotFound { rule_name: String },
}

/// Maps lint-engine failures into issue records.
///
/// The converter is constructed once per run with the analysis target root
/// and the rule registry, and is pure per call.
pub struct IssueConverter {
    target_path: PathBuf,
    registry: RuleRegistry,
}

impl IssueConverter {
    pub fn new(target_path: impl Into<PathBuf>, registry: RuleRegistry) -> Self {
        Self {
            target_path: target_path.into(),
            registry,
        }
    }

    /// Converts one failure into an issue.
    ///
    /// The rule name and message carry over verbatim; positions shift from
    /// the engine's 0-based coordinates to the 1-based issue schema. A rule
    /// name the registry does not know is reported as `RuleNotFound` so the
    /// caller can substitute a degraded issue.
    pub fn convert(&self, failure: &Failure) -> Result<Issue, ConvertError> {
        let metadata = self.registry.get(&failure.rule_name).ok_or_else(|| {
            ConvertError::RuleNotFound {
                rule_name: failure.rule_name.clone(),
            }
        })?;

        Ok(Issue {
            issue_type: IssueType::Issue,
            check_name: failure.rule_name.clone(),
            description: failure.failure.clone(),
            content: Some(Contents::new(render_rule_documentation(metadata))),
            categories: vec![Category::Style],
            location: Location::positions(
                self.relative_file_path(&failure.name),
                convert_position(failure.start_position),
                convert_position(failure.end_position),
            ),
            other_locations: None,
            trace: None,
            remediation_points: Some(REMEDIATION_POINTS),
            severity: Some(convert_severity(failure.rule_severity)),
            fingerprint: None,
        })
    }

    /// Builds the degraded issue substituted when a file cannot be analyzed
    /// or a failure cannot be converted. `check_name` is resolved by the
    /// caller (the offending rule name when known, the runtime-error
    /// sentinel otherwise).
    pub(crate) fn issue_from_error(
        &self,
        check_name: &str,
        error: &dyn StdError,
        file: &str,
    ) -> Issue {
        Issue {
            issue_type: IssueType::Issue,
            check_name: check_name.to_string(),
            description: format!(
                "Sorry, description could not be provided due to the internal error:\n{}",
                error_trace(error)
            ),
            content: None,
            categories: vec![Category::BugRisk],
            location: Location::positions(
                self.relative_file_path(file),
                Position::line_column(0, 0),
                Position::line_column(0, 0),
            ),
            other_locations: None,
            trace: None,
            remediation_points: Some(REMEDIATION_POINTS),
            severity: None,
            fingerprint: None,
        }
    }

    /// Rewrites the engine's file identity relative to the target root.
    /// Files outside the root resolve through their parent directory, so
    /// `/code/tmp/foo.ts` under root `/code/src` becomes `../tmp/foo.ts`.
    pub(crate) fn relative_file_path(&self, file: &str) -> String {
        let path = Path::new(file);
        if let Ok(stripped) = path.strip_prefix(&self.target_path) {
            return stripped.to_string_lossy().into_owned();
        }

        let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) else {
            return file.to_string();
        };
        match pathdiff::diff_paths(parent, &self.target_path) {
            Some(relative) => relative.join(file_name).to_string_lossy().into_owned(),
            None => file.to_string(),
        }
    }
}

fn convert_position(position: FailurePosition) -> Position {
    Position::line_column(position.line + 1, position.character + 1)
}

fn convert_severity(severity: FailureSeverity) -> Severity {
    match severity {
        FailureSeverity::Error => Severity::Normal,
        FailureSeverity::Warning | FailureSeverity::Off => Severity::Info,
    }
}

/// Formats an error and its source chain, one `caused by:` line per cause.
fn error_trace(error: &dyn StdError) -> String {
    let mut trace = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        trace.push_str(&format!("\ncaused by: {}", cause));
        source = cause.source();
    }
    trace
}
