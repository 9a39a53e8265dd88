//! Include-path file discovery.

use std::path::{Path, PathBuf};

use globset::GlobBuilder;
use tracing::info;
use walkdir::WalkDir;

use crate::error::LinterError;

/// Resolves the set of files to analyze from include-path patterns.
///
/// Patterns expand relative to the base directory with the usual glob
/// semantics (`*`, `**`, braces, bracket classes); `*` never crosses a path
/// separator. Directory matches are expanded recursively, anything living
/// under a symbolic link is pruned, and the final set is restricted to
/// regular files carrying one of the configured extensions.
pub struct FileMatcher {
    base_dir: PathBuf,
    extensions: Vec<String>,
}

impl FileMatcher {
    pub fn new(base_dir: impl Into<PathBuf>, extensions: &[&str]) -> Self {
        Self {
            base_dir: base_dir.into(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }

    /// Expands `include_patterns` into the ordered list of files to analyze.
    ///
    /// Directory matches contribute their descendants first (in traversal
    /// order), then literal file matches follow, preserving the input
    /// pattern order. An empty pattern list yields an empty result.
    pub fn match_files(&self, include_patterns: &[String]) -> Result<Vec<PathBuf>, LinterError> {
        let mut expanded = Vec::new();
        for pattern in include_patterns {
            expanded.extend(self.expand_pattern(pattern)?);
        }

        let (directories, files): (Vec<PathBuf>, Vec<PathBuf>) =
            expanded.into_iter().partition(|path| Self::is_directory(path));

        let mut matched = Vec::new();
        for directory in &directories {
            let descendants = Self::enumerate_descendants(directory);
            matched.extend(Self::prune_paths_within_symlinks(descendants));
        }
        matched.extend(files);
        matched.retain(|path| self.is_lintable_file(path));

        info!(
            "Matched {} files under {}",
            matched.len(),
            self.base_dir.display()
        );
        Ok(matched)
    }

    /// Expands one glob pattern against the base directory.
    ///
    /// A trailing `/` restricts the expansion to directories, and `.`/`./`
    /// expand to the base directory itself, mirroring how shell-style globs
    /// behave for these inputs.
    fn expand_pattern(&self, pattern: &str) -> Result<Vec<PathBuf>, LinterError> {
        let (raw, directories_only) = match pattern.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => (stripped, true),
            _ => (pattern, false),
        };
        let raw = raw.strip_prefix("./").unwrap_or(raw);
        if raw.is_empty() || raw == "." {
            return Ok(vec![self.base_dir.clone()]);
        }

        let matcher = GlobBuilder::new(raw)
            .literal_separator(true)
            .build()
            .map_err(|e| {
                LinterError::config(format!("Invalid include pattern '{}': {}", pattern, e))
            })?
            .compile_matcher();

        let mut matches: Vec<PathBuf> = WalkDir::new(&self.base_dir)
            .follow_links(false)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| !directories_only || entry.file_type().is_dir())
            .filter(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.base_dir)
                    .is_ok_and(|relative| matcher.is_match(relative))
            })
            .map(|entry| entry.into_path())
            .collect();
        matches.sort();
        Ok(matches)
    }

    /// Enumerates every descendant of `directory` in sorted traversal order.
    /// Symbolic links are reported but never followed.
    fn enumerate_descendants(directory: &Path) -> Vec<PathBuf> {
        let mut descendants: Vec<PathBuf> = WalkDir::new(directory)
            .follow_links(false)
            .min_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.into_path())
            .collect();
        descendants.sort();
        descendants
    }

    /// Drops every path that is a symbolic link or lives under one,
    /// comparing by literal string prefix.
    fn prune_paths_within_symlinks(paths: Vec<PathBuf>) -> Vec<PathBuf> {
        let symlinks: Vec<String> = paths
            .iter()
            .filter(|path| Self::is_symlink(path))
            .map(|path| path.to_string_lossy().into_owned())
            .collect();

        paths
            .into_iter()
            .filter(|path| {
                let path = path.to_string_lossy();
                !symlinks.iter().any(|symlink| path.starts_with(symlink.as_str()))
            })
            .collect()
    }

    /// A candidate survives only as a regular, non-symlink file whose
    /// extension is configured. Paths that cannot be inspected are treated
    /// as absent.
    fn is_lintable_file(&self, path: &Path) -> bool {
        let is_regular_file = path
            .symlink_metadata()
            .is_ok_and(|metadata| metadata.file_type().is_file());
        if !is_regular_file {
            return false;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|configured| configured == ext))
    }

    fn is_directory(path: &Path) -> bool {
        path.symlink_metadata()
            .is_ok_and(|metadata| metadata.file_type().is_dir())
    }

    fn is_symlink(path: &Path) -> bool {
        path.symlink_metadata()
            .is_ok_and(|metadata| metadata.file_type().is_symlink())
    }
}
