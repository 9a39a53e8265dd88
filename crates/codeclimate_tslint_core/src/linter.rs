//! The analysis session.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use codeclimate_tslint_schema::{EngineConfig, Issue};

use crate::engine::{Failure, FailureSeverity, LintEngine};
use crate::error::LinterError;
use crate::file_matcher::FileMatcher;
use crate::issue_converter::{ConvertError, IssueConverter, RUNTIME_ERROR_CHECK_NAME};
use crate::normalizer::ConfigNormalizer;
use crate::rules::RuleRegistry;

/// File name tslint looks for when no override is configured.
const DEFAULT_TSLINT_FILE_NAME: &str = "tslint.json";

/// Extensions handed to the lint engine.
const LINTABLE_EXTENSIONS: [&str; 2] = ["ts", "tsx"];

/// Paths a session operates on, together with the engine configuration the
/// platform supplied.
#[derive(Debug, Clone)]
pub struct TsLinterOptions {
    /// Root of the analyzed project.
    pub target_path: PathBuf,
    /// Installation directory of the analyzer, holding the bundled rule
    /// configuration and rule packages.
    pub linter_path: PathBuf,
    pub engine_config: EngineConfig,
}

/// One analysis run: rule-config resolution, file discovery, per-file lint
/// invocation, and failure conversion into the issue stream.
///
/// Failures are isolated at two levels. A file whose lint invocation fails
/// contributes a single degraded issue instead of aborting the run, and a
/// failure that cannot be converted is substituted by its own degraded
/// issue without affecting its neighbors.
pub struct TsLinter {
    options: TsLinterOptions,
    tslint_file: PathBuf,
    normalized_config: PathBuf,
    file_matcher: FileMatcher,
    converter: IssueConverter,
    engine: Box<dyn LintEngine>,
}

impl TsLinter {
    /// Builds a session, resolving and normalizing the active rule
    /// configuration. No candidate rule-config file existing is fatal.
    pub fn new(
        options: TsLinterOptions,
        registry: RuleRegistry,
        engine: Box<dyn LintEngine>,
    ) -> Result<Self, LinterError> {
        let tslint_file = resolve_tslint_file(&options)?;
        info!("Using rule configuration {}", tslint_file.display());

        let normalized_config =
            ConfigNormalizer::new().normalize(&tslint_file, &options.linter_path)?;
        let file_matcher = FileMatcher::new(&options.target_path, &LINTABLE_EXTENSIONS);
        let converter = IssueConverter::new(&options.target_path, registry);

        Ok(Self {
            options,
            tslint_file,
            normalized_config,
            file_matcher,
            converter,
            engine,
        })
    }

    /// The rule-configuration file this session resolved.
    pub fn tslint_file(&self) -> &Path {
        &self.tslint_file
    }

    /// Files in scope for this run, per the engine config's include paths.
    pub fn list_files(&self) -> Result<Vec<PathBuf>, LinterError> {
        self.file_matcher
            .match_files(&self.options.engine_config.include_paths)
    }

    /// Runs the session, yielding issues lazily file by file.
    pub fn lint(&self) -> Result<impl Iterator<Item = Issue> + '_, LinterError> {
        let files = self.list_files()?;
        info!("Linting {} files", files.len());
        Ok(files.into_iter().flat_map(move |file| self.lint_file(&file)))
    }

    fn lint_file(&self, file: &Path) -> Vec<Issue> {
        debug!("Linting {}", file.display());
        let file_id = file.to_string_lossy();

        let contents = match fs::read_to_string(file) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read {}: {}", file.display(), e);
                return vec![self.converter.issue_from_error(
                    RUNTIME_ERROR_CHECK_NAME,
                    &e,
                    &file_id,
                )];
            }
        };

        let failures = match self.engine.lint(file, &contents, &self.normalized_config) {
            Ok(failures) => failures,
            Err(e) => {
                warn!("Lint engine failed on {}: {}", file.display(), e);
                return vec![self.converter.issue_from_error(
                    RUNTIME_ERROR_CHECK_NAME,
                    &e,
                    &file_id,
                )];
            }
        };

        failures
            .iter()
            .filter(|failure| !self.ignores(failure))
            .map(|failure| self.convert_failure(failure, &file_id))
            .collect()
    }

    fn ignores(&self, failure: &Failure) -> bool {
        self.options.engine_config.ignore_warnings
            && failure.rule_severity == FailureSeverity::Warning
    }

    /// A conversion error never escapes: the failure is substituted by a
    /// degraded issue carrying the offending rule name when it is known.
    fn convert_failure(&self, failure: &Failure, file_id: &str) -> Issue {
        match self.converter.convert(failure) {
            Ok(issue) => issue,
            Err(e) => {
                warn!("Failed to convert a failure in {}: {}", file_id, e);
                let check_name = match &e {
                    ConvertError::RuleNotFound { rule_name } => rule_name.clone(),
                };
                self.converter.issue_from_error(&check_name, &e, file_id)
            }
        }
    }
}

/// Resolves the active rule-configuration file: the project-specified
/// override under the target root, then the default-named file under the
/// target root, then the bundled default next to the analyzer. The first
/// existing candidate wins.
fn resolve_tslint_file(options: &TsLinterOptions) -> Result<PathBuf, LinterError> {
    let mut candidates = Vec::new();
    if let Some(config) = &options.engine_config.config {
        candidates.push(options.target_path.join(config));
    }
    candidates.push(options.target_path.join(DEFAULT_TSLINT_FILE_NAME));
    candidates.push(options.linter_path.join(DEFAULT_TSLINT_FILE_NAME));

    candidates
        .iter()
        .find(|candidate| candidate.is_file())
        .cloned()
        .ok_or(LinterError::RuleConfigNotFound {
            searched: candidates,
        })
}
