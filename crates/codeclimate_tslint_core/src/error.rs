//! Engine error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while preparing or running an analysis.
#[derive(Debug, Error)]
pub enum LinterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// No tslint configuration exists at any candidate location.
    #[error("No tslint configuration found (searched {searched:?})")]
    RuleConfigNotFound { searched: Vec<PathBuf> },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LinterError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
