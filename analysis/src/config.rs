//! Lint configuration
//!
//! Defaults target Go sources. Values can be overridden from a TOML file and
//! then from `OPTCHECK_*` environment variables.

use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for the source scan and typo heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LintConfig {
    /// Only files ending in this suffix are scanned
    pub source_suffix: String,
    /// Files ending in this suffix are skipped even if they match `source_suffix`
    pub test_suffix: String,
    /// Directory names never descended into (hidden directories are always skipped)
    pub skip_dirs: Vec<String>,
    /// Comments longer than this (in characters) are never treated as typos
    pub max_typo_comment_len: usize,
    /// Maximum edit distance from a known annotation to count as a typo
    pub typo_distance_threshold: usize,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            source_suffix: ".go".to_string(),
            test_suffix: "_test.go".to_string(),
            skip_dirs: vec!["vendor".to_string()],
            max_typo_comment_len: 20,
            typo_distance_threshold: 3,
        }
    }
}

impl LintConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Load from a TOML file, then apply environment overrides.
    pub fn load(path: &Path) -> AnalysisResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| AnalysisError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Ok(Self::from_toml_str(&text, path)?.with_env_overrides())
    }

    /// Parse a TOML document. `path` only labels errors.
    pub fn from_toml_str(text: &str, path: &Path) -> AnalysisResult<Self> {
        toml::from_str(text).map_err(|e| AnalysisError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Apply `OPTCHECK_*` variables. Unparseable numbers are ignored.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(suffix) = lookup("OPTCHECK_SOURCE_SUFFIX") {
            self.source_suffix = suffix;
        }
        if let Some(suffix) = lookup("OPTCHECK_TEST_SUFFIX") {
            self.test_suffix = suffix;
        }
        if let Some(dirs) = lookup("OPTCHECK_SKIP_DIRS") {
            self.skip_dirs = dirs
                .split(',')
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(len) = lookup("OPTCHECK_MAX_TYPO_LEN") {
            if let Ok(n) = len.parse() {
                self.max_typo_comment_len = n;
            }
        }
        if let Some(dist) = lookup("OPTCHECK_TYPO_DISTANCE") {
            if let Ok(n) = dist.parse() {
                self.typo_distance_threshold = n;
            }
        }

        self
    }
}
