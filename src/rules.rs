use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// File names that are never collected, whatever the other filters say.
pub const SENSITIVE_FILES: &[&str] = &[
    "secrets.json",
    ".env",
    ".env.local",
    "credentials.json",
    "config.secret.json",
    "_kslist.md",
];

/// Extension (without the dot) to fenced-code language tag.
pub const LANGUAGE_TABLE: &[(&str, &str)] = &[
    ("py", "python"),
    ("java", "java"),
    ("kt", "kotlin"),
    ("kts", "kotlin"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("md", "markdown"),
    ("markdown", "markdown"),
    ("json", "json"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("toml", "toml"),
    ("xml", "xml"),
    ("html", "html"),
    ("htm", "html"),
    ("css", "css"),
    ("sh", "bash"),
    ("bash", "bash"),
    ("c", "c"),
    ("h", "c"),
    ("cpp", "cpp"),
    ("cc", "cpp"),
    ("cxx", "cpp"),
    ("hpp", "cpp"),
    ("cs", "csharp"),
    ("go", "go"),
    ("rs", "rust"),
    ("rb", "ruby"),
    ("php", "php"),
    ("swift", "swift"),
    ("scala", "scala"),
    ("dart", "dart"),
    ("txt", "text"),
];

/// The fixed data the collectors consult: which basenames are sensitive and
/// how extensions map to language tags.
///
/// [`Rules::default`] carries the built-in tables. Callers (and tests) can
/// build their own instead of relying on globals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    pub excluded_files: BTreeSet<String>,
    pub languages: BTreeMap<String, String>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            excluded_files: SENSITIVE_FILES.iter().map(|s| s.to_string()).collect(),
            languages: LANGUAGE_TABLE
                .iter()
                .map(|(ext, lang)| (ext.to_string(), lang.to_string()))
                .collect(),
        }
    }
}

impl Rules {
    /// True when the basename of `path` is on the exclusion list.
    pub fn is_excluded(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.excluded_files.contains(name))
    }

    /// Language tag for the fenced block of `path`.
    ///
    /// Unknown extensions yield the extension itself, extensionless files an
    /// empty tag.
    pub fn language_tag(&self, path: &Path) -> String {
        let Some(ext) = path.extension() else {
            return String::new();
        };
        let ext = ext.to_string_lossy();
        match self.languages.get(&*ext) {
            Some(lang) => lang.clone(),
            None => ext.into_owned(),
        }
    }
}
