use crate::error::{KslistError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Directories skipped by every front end unless told otherwise.
pub const DEFAULT_IGNORE_PATTERNS: &[&str] =
    &[".venv", ".git", ".idea", "__pycache__", "assets", "_kslist"];

/// Built-in extension sets, numbered from 1 on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionPreset(&'static [&'static str]);

impl ExtensionPreset {
    pub const ALL: [ExtensionPreset; 9] = [
        ExtensionPreset(&[".py", ".md"]),
        ExtensionPreset(&[".java", ".kt"]),
        ExtensionPreset(&[".js", ".ts"]),
        ExtensionPreset(&[".json", ".yaml", ".yml"]),
        ExtensionPreset(&[".py", ".yaml", ".yml"]),
        ExtensionPreset(&[".html", ".css", ".sh"]),
        ExtensionPreset(&[".c", ".cpp", ".cs"]),
        ExtensionPreset(&[".go", ".rb", ".php"]),
        ExtensionPreset(&[]),
    ];

    /// Looks up a preset by its 1-based number.
    pub fn get(number: usize) -> Result<Self> {
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
            .ok_or(KslistError::InvalidPreset(number))
    }

    pub fn extensions(&self) -> Vec<String> {
        self.0.iter().map(|s| s.to_string()).collect()
    }

    /// Human-readable label, e.g. `.py, .md` or `all extensions`.
    pub fn label(&self) -> String {
        if self.0.is_empty() {
            "all extensions".to_string()
        } else {
            self.0.join(", ")
        }
    }
}

/// Ensures an extension carries its leading dot (`py` becomes `.py`).
pub fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

/// Parameters of one tree traversal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalConfig {
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Allowed suffixes; empty admits every file.
    #[serde(default)]
    pub extensions: Vec<String>,
    /// Deepest file level collected, 1 being the files directly in the root.
    /// 0 is unlimited.
    #[serde(default)]
    pub max_depth: usize,
    #[serde(default)]
    pub paths_only: bool,
    /// The document being produced, never collected into itself.
    #[serde(skip)]
    pub output_path: Option<PathBuf>,
}

impl TraversalConfig {
    pub(crate) fn normalized_extensions(&self) -> Vec<String> {
        self.extensions
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(normalize_extension)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct TraversalBuilder {
    config: TraversalConfig,
}

impl TraversalBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.config.ignore_patterns = patterns;
        self
    }
    pub fn default_ignores(mut self) -> Self {
        for pattern in DEFAULT_IGNORE_PATTERNS {
            if !self.config.ignore_patterns.iter().any(|p| p == pattern) {
                self.config.ignore_patterns.push(pattern.to_string());
            }
        }
        self
    }
    pub fn extensions(mut self, extensions: Vec<String>) -> Self {
        self.config.extensions = extensions
            .iter()
            .map(|e| e.trim())
            .filter(|e| !e.is_empty())
            .map(normalize_extension)
            .collect();
        self
    }
    pub fn preset(self, preset: ExtensionPreset) -> Self {
        self.extensions(preset.extensions())
    }
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }
    pub fn no_limit_depth(mut self) -> Self {
        self.config.max_depth = 0;
        self
    }
    pub fn paths_only(mut self, yes: bool) -> Self {
        self.config.paths_only = yes;
        self
    }
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = Some(path.into());
        self
    }
    pub fn build(self) -> TraversalConfig {
        self.config
    }
}
