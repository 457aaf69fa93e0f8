//! Directory and file admission tests.

use crate::pathnorm::normalize_lexically;
use std::path::Path;

/// Ignore patterns prepared for matching against directory paths.
///
/// Matching is deliberately loose: a directory is ignored when its basename
/// equals the pattern (or the pattern's basename), when the pattern occurs
/// anywhere in the directory's path, or when the path ends with it. Plain
/// substring matching means `.git` also prunes `foo.gitlab/`.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    patterns: Vec<Pattern>,
}

#[derive(Debug, Clone)]
struct Pattern {
    text: String,
    basename: Option<String>,
}

impl IgnoreSet {
    /// Empty patterns (and ones that normalize to `.`) are dropped, since they
    /// would otherwise match every path.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|raw| {
                let raw = raw.as_ref().trim();
                if raw.is_empty() {
                    tracing::debug!("Ignoring empty ignore pattern");
                    return None;
                }
                let normalized = normalize_lexically(Path::new(raw));
                let text = normalized.to_string_lossy().into_owned();
                if text == "." {
                    tracing::debug!("Ignoring ignore pattern '{}'", raw);
                    return None;
                }
                let basename = normalized
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned());
                Some(Pattern { text, basename })
            })
            .collect();
        Self { patterns }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if `dir` must not be descended into.
    pub fn matches(&self, dir: &Path) -> bool {
        let full = normalize_lexically(dir);
        let full_str = full.to_string_lossy();
        let name = full.file_name().map(|n| n.to_string_lossy());
        self.patterns.iter().any(|p| {
            let by_name = name.as_deref().is_some_and(|name| {
                name == p.text || p.basename.as_deref() == Some(name)
            });
            by_name || full_str.contains(p.text.as_str()) || full_str.ends_with(p.text.as_str())
        })
    }
}

/// Suffix filter: with no extensions every name passes.
pub fn matches_extension(file_name: &str, extensions: &[String]) -> bool {
    extensions.is_empty() || extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(patterns: &[&str]) -> IgnoreSet {
        IgnoreSet::new(patterns)
    }

    #[test]
    fn basename_match() {
        assert!(set(&[".git"]).matches(Path::new("/work/repo/.git")));
        assert!(set(&["vendor/cache"]).matches(Path::new("/elsewhere/cache")));
        assert!(!set(&[".git"]).matches(Path::new("/work/repo/src")));
    }

    #[test]
    fn substring_and_suffix_match() {
        assert!(set(&["repo/build"]).matches(Path::new("/work/repo/build/out")));
        assert!(set(&["build/out"]).matches(Path::new("/work/repo/build/out")));
    }

    #[test]
    fn substring_overmatches_unrelated_names() {
        assert!(set(&[".git"]).matches(Path::new("/work/foo.gitlab")));
        assert!(set(&["assets"]).matches(Path::new("/work/old_assets_v2")));
    }

    #[test]
    fn patterns_are_normalized() {
        assert!(set(&["./node_modules/"]).matches(Path::new("/p/node_modules")));
    }

    #[test]
    fn empty_patterns_match_nothing() {
        let s = set(&["", "   ", ".", "./"]);
        assert!(s.is_empty());
        assert!(!s.matches(Path::new("/work/repo/src")));
    }

    #[test]
    fn extension_filter() {
        let exts = vec![".py".to_string(), ".md".to_string()];
        assert!(matches_extension("a.py", &exts));
        assert!(matches_extension("README.md", &exts));
        assert!(!matches_extension("b.txt", &exts));
        assert!(!matches_extension("pyfile", &exts));
        assert!(matches_extension("anything", &[]));
    }
}
