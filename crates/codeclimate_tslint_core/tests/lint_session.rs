//! Integration tests for a full analysis session.
//!
//! These tests drive `TsLinter` end to end with an in-test lint engine and
//! verify the issue stream the session produces.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use codeclimate_tslint_core::{
    EngineError, Failure, FailurePosition, FailureSeverity, LintEngine, RuleMetadata,
    RuleRegistry, TsLinter, TsLinterOptions, get_rules,
};
use codeclimate_tslint_schema::{
    Category, Contents, EngineConfig, Issue, IssueType, Location, Position, Severity,
};

/// Replays prepared failures, keyed by the file identity they carry.
struct CannedEngine {
    failures: Vec<Failure>,
}

impl LintEngine for CannedEngine {
    fn lint(
        &self,
        file: &Path,
        _contents: &str,
        _config: &Path,
    ) -> Result<Vec<Failure>, EngineError> {
        Ok(self
            .failures
            .iter()
            .filter(|failure| Path::new(&failure.name) == file)
            .cloned()
            .collect())
    }
}

fn foo_rule_metadata() -> RuleMetadata {
    serde_json::from_value(serde_json::json!({
        "ruleName": "foo-rule",
        "type": "style",
        "description": "foo",
        "optionsDescription": "",
        "options": null,
        "typescriptOnly": true
    }))
    .unwrap()
}

/// Target project with one `file.ts` plus a linter directory carrying the
/// bundled default rule configuration.
fn workspace(temp_dir: &TempDir) -> TsLinterOptions {
    let target_path = temp_dir.path().join("code");
    let linter_path = temp_dir.path().join("app");
    fs::create_dir_all(&target_path).unwrap();
    fs::create_dir_all(&linter_path).unwrap();
    fs::write(linter_path.join("tslint.json"), "{}").unwrap();
    fs::write(
        target_path.join("file.ts"),
        "'use strict';\nvar unused = 32;\nlet object = { c: 42 };\n",
    )
    .unwrap();

    TsLinterOptions {
        target_path,
        linter_path,
        engine_config: EngineConfig {
            include_paths: vec!["file.ts".to_string()],
            ..EngineConfig::default()
        },
    }
}

fn target_file(options: &TsLinterOptions) -> PathBuf {
    options.target_path.join("file.ts")
}

fn session(options: TsLinterOptions, failures: Vec<Failure>) -> TsLinter {
    TsLinter::new(
        options,
        RuleRegistry::new(vec![foo_rule_metadata()]),
        Box::new(CannedEngine { failures }),
    )
    .unwrap()
}

/// Collects the session's issue stream with the content bodies blanked, so
/// expectations stay readable; rendering itself is covered elsewhere.
fn lint_without_bodies(linter: &TsLinter) -> Vec<Issue> {
    linter
        .lint()
        .unwrap()
        .map(|mut issue| {
            if issue.content.is_some() {
                issue.content = Some(Contents::new(""));
            }
            issue
        })
        .collect()
}

#[test]
fn test_session_reports_configured_failure() {
    let temp_dir = TempDir::new().unwrap();
    let options = workspace(&temp_dir);
    let failure = Failure::new(
        "foo-rule",
        "some failure",
        target_file(&options).to_string_lossy(),
        FailureSeverity::Error,
        FailurePosition::new(1, 2),
        FailurePosition::new(2, 7),
    );
    let linter = session(options, vec![failure]);

    let issues = lint_without_bodies(&linter);

    let expected = Issue {
        issue_type: IssueType::Issue,
        check_name: "foo-rule".to_string(),
        description: "some failure".to_string(),
        content: Some(Contents::new("")),
        categories: vec![Category::Style],
        location: Location::positions(
            "file.ts",
            Position::line_column(2, 3),
            Position::line_column(3, 8),
        ),
        other_locations: None,
        trace: None,
        remediation_points: Some(50_000),
        severity: Some(Severity::Normal),
        fingerprint: None,
    };
    assert_eq!(issues, vec![expected]);
}

#[test]
fn test_session_skips_warnings_when_configured() {
    let temp_dir = TempDir::new().unwrap();
    let mut options = workspace(&temp_dir);
    options.engine_config.ignore_warnings = true;
    let file = target_file(&options).to_string_lossy().into_owned();

    let warning = Failure::new(
        "foo-rule",
        "some warning",
        file.clone(),
        FailureSeverity::Warning,
        FailurePosition::new(0, 0),
        FailurePosition::new(0, 1),
    );
    let error = Failure::new(
        "foo-rule",
        "some error",
        file,
        FailureSeverity::Error,
        FailurePosition::new(0, 0),
        FailurePosition::new(0, 1),
    );
    let linter = session(options, vec![warning, error]);

    let issues = lint_without_bodies(&linter);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].description, "some error");
    assert_eq!(issues[0].severity, Some(Severity::Normal));
}

#[test]
fn test_session_substitutes_degraded_issue_for_unknown_rule() {
    let temp_dir = TempDir::new().unwrap();
    let options = workspace(&temp_dir);
    let failure = Failure::new(
        "non-existent",
        "whatever",
        target_file(&options).to_string_lossy(),
        FailureSeverity::Error,
        FailurePosition::new(0, 0),
        FailurePosition::new(0, 1),
    );
    let linter = session(options, vec![failure]);

    let issues: Vec<Issue> = linter.lint().unwrap().collect();

    let expected = Issue {
        issue_type: IssueType::Issue,
        check_name: "non-existent".to_string(),
        description: "Sorry, description could not be provided due to the internal error:\nNo metadata found for rule \"non-existent\"".to_string(),
        content: None,
        categories: vec![Category::BugRisk],
        location: Location::positions(
            "file.ts",
            Position::line_column(0, 0),
            Position::line_column(0, 0),
        ),
        other_locations: None,
        trace: None,
        remediation_points: Some(50_000),
        severity: None,
        fingerprint: None,
    };
    assert_eq!(issues, vec![expected]);
}

#[test]
fn test_session_continues_after_engine_failure() {
    struct FlakyEngine {
        failing_file: PathBuf,
        failures: Vec<Failure>,
    }

    impl LintEngine for FlakyEngine {
        fn lint(
            &self,
            file: &Path,
            _contents: &str,
            _config: &Path,
        ) -> Result<Vec<Failure>, EngineError> {
            if file == self.failing_file {
                return Err(EngineError::Output("engine exploded".to_string()));
            }
            Ok(self
                .failures
                .iter()
                .filter(|failure| Path::new(&failure.name) == file)
                .cloned()
                .collect())
        }
    }

    let temp_dir = TempDir::new().unwrap();
    let mut options = workspace(&temp_dir);
    fs::write(options.target_path.join("broken.ts"), "oops\n").unwrap();
    options.engine_config.include_paths =
        vec!["broken.ts".to_string(), "file.ts".to_string()];

    let failure = Failure::new(
        "foo-rule",
        "some failure",
        target_file(&options).to_string_lossy(),
        FailureSeverity::Error,
        FailurePosition::new(1, 2),
        FailurePosition::new(2, 7),
    );
    let linter = TsLinter::new(
        options.clone(),
        RuleRegistry::new(vec![foo_rule_metadata()]),
        Box::new(FlakyEngine {
            failing_file: options.target_path.join("broken.ts"),
            failures: vec![failure],
        }),
    )
    .unwrap();

    let issues: Vec<Issue> = linter.lint().unwrap().collect();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].check_name, "(runtime error)");
    assert_eq!(issues[0].categories, vec![Category::BugRisk]);
    assert_eq!(issues[0].location.path(), "broken.ts");
    assert!(issues[0].description.contains("engine exploded"));
    assert_eq!(issues[1].check_name, "foo-rule");
}

#[test]
fn test_session_renders_content_from_loaded_rule_packages() {
    let temp_dir = TempDir::new().unwrap();
    let options = workspace(&temp_dir);

    // Stage bundled rule docs next to the analyzer.
    let docs_dir = options.linter_path.join("tslint/docs");
    fs::create_dir_all(&docs_dir).unwrap();
    fs::write(
        docs_dir.join("rules.json"),
        r#"[{"ruleName": "foo-rule", "type": "style", "description": "Checks foo usage.", "optionsDescription": "", "options": null}]"#,
    )
    .unwrap();

    let failure = Failure::new(
        "foo-rule",
        "some failure",
        target_file(&options).to_string_lossy(),
        FailureSeverity::Error,
        FailurePosition::new(0, 0),
        FailurePosition::new(0, 1),
    );
    let registry = get_rules(&options.linter_path);
    let linter = TsLinter::new(
        options,
        registry,
        Box::new(CannedEngine {
            failures: vec![failure],
        }),
    )
    .unwrap();

    let issues: Vec<Issue> = linter.lint().unwrap().collect();

    assert_eq!(issues.len(), 1);
    let body = &issues[0].content.as_ref().unwrap().body;
    assert!(body.starts_with("# Rule: foo-rule"));
    assert!(body.contains("Checks foo usage."));
    assert!(body.contains("https://palantir.github.io/tslint/rules/foo-rule"));
}
