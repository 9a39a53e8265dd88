//! Engine configuration loading.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use codeclimate_tslint_schema::EngineConfig;

/// Loads the engine configuration mounted by the invoking platform.
///
/// Analysis never stalls on this file: a missing config means the defaults,
/// and an unreadable or malformed one is logged and replaced by the defaults
/// as well.
pub fn load(path: &Path) -> EngineConfig {
    if !path.exists() {
        debug!("No engine config at {}, using defaults", path.display());
        return EngineConfig::default();
    }

    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Unreadable engine config {}: {}", path.display(), e);
            return EngineConfig::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(config) => config,
        Err(e) => {
            warn!("Malformed engine config {}: {}", path.display(), e);
            EngineConfig::default()
        }
    }
}
