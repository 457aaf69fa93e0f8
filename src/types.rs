use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Which codec produced a descriptor's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

/// One admitted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Path as discovered: joined onto the walk root, or resolved from a list entry.
    pub path: PathBuf,
    /// Tag placed on the fenced code block.
    pub language: String,
    /// File content. `None` in paths-only mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<TextEncoding>,
}

/// Why a file was left out of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Basename is on the sensitive list.
    Sensitive,
    /// List entry that is not an existing regular file.
    NotFound,
    /// The entry could not be listed or read.
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Sensitive => f.write_str("sensitive file"),
            SkipReason::NotFound => f.write_str("file not found"),
            SkipReason::Unreadable(msg) => write!(f, "unreadable: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipNotice {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// The outcome of one collection pass.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Collection {
    /// Admitted files in discovery order.
    pub files: Vec<FileDescriptor>,
    /// Files that were considered but dropped, with the reason.
    pub skipped: Vec<SkipNotice>,
    /// Directories pruned by an ignore pattern.
    pub ignored_dirs: Vec<PathBuf>,
}

impl Collection {
    pub(crate) fn skip(&mut self, path: PathBuf, reason: SkipReason) {
        match &reason {
            SkipReason::Sensitive => tracing::warn!("Skipping sensitive file: {}", path.display()),
            SkipReason::NotFound => tracing::warn!("File not found: {}", path.display()),
            SkipReason::Unreadable(msg) => {
                tracing::warn!("Could not read {}: {}", path.display(), msg)
            }
        }
        self.skipped.push(SkipNotice { path, reason });
    }

    /// Paths of the admitted files, in order.
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter().map(|f| &f.path)
    }
}

/// What a single written document contains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub output: PathBuf,
    pub files: usize,
    pub skipped: Vec<SkipNotice>,
    pub ignored_dirs: Vec<PathBuf>,
}

impl Report {
    pub(crate) fn new(output: PathBuf, collection: Collection) -> Self {
        Self {
            output,
            files: collection.files.len(),
            skipped: collection.skipped,
            ignored_dirs: collection.ignored_dirs,
        }
    }
}
