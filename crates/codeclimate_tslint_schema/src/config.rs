//! Engine configuration document mounted by the platform.

use serde::{Deserialize, Serialize};

/// Analysis configuration supplied by the platform as `/config.json`.
///
/// Every field is optional on the wire. When the whole document is missing
/// the engine falls back to [`EngineConfig::default`], which analyzes the
/// conventional `src` tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Whether analysis is enabled. The platform gates runs upstream, so
    /// the engine carries but does not act on this flag.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Release channel requested by the platform.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,

    /// Path patterns to analyze, relative to the code directory.
    #[serde(default)]
    pub include_paths: Vec<String>,

    /// Path to a tslint configuration override inside the code directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,

    /// Drop failures whose severity is "warning" before conversion.
    #[serde(default)]
    pub ignore_warnings: bool,
}

fn default_enabled() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            channel: None,
            include_paths: vec!["src".to_string()],
            config: None,
            ignore_warnings: false,
        }
    }
}
