//! # codeclimate_tslint_core
//!
//! Analysis pipeline for the codeclimate-tslint engine.
//!
//! This crate provides:
//! - The `TsLinter` session orchestrating a full analysis run
//! - Include-path file discovery with symlink pruning
//! - tslint configuration normalization (rules-directory rewriting)
//! - Rule metadata loading and markdown documentation rendering
//! - Conversion of tslint failures into Code Climate issues
//!
//! ## Example
//!
//! ```rust,ignore
//! use codeclimate_tslint_core::{TsLinter, TsLinterOptions, TslintProcess, engine_config};
//!
//! let config = engine_config::load(Path::new("/config.json"));
//! let linter = TsLinter::new(options, registry, Box::new(engine))?;
//! for issue in linter.lint()? {
//!     println!("{}", serde_json::to_string(&issue)?);
//! }
//! ```

mod content_renderer;
mod engine;
pub mod engine_config;
mod error;
mod file_matcher;
mod issue_converter;
mod linter;
mod normalizer;
mod rule_loader;
mod rules;

pub use content_renderer::render_rule_documentation;
pub use engine::{
    EngineError, Failure, FailurePosition, FailureSeverity, LintEngine, TslintProcess,
};
pub use error::LinterError;
pub use file_matcher::FileMatcher;
pub use issue_converter::{ConvertError, IssueConverter, RUNTIME_ERROR_CHECK_NAME};
pub use linter::{TsLinter, TsLinterOptions};
pub use normalizer::{ConfigNormalizer, RawTslintConfig, RulesDirectory};
pub use rule_loader::{ADDITIONAL_RULE_PACKAGES, get_rules, load_rule_dir};
pub use rules::{InvalidRuleName, RuleMetadata, RuleName, RuleRegistry, RuleType};
