use crate::content::read_text;
use crate::error::{KslistError, Result};
use crate::filter::{IgnoreSet, matches_extension};
use crate::options::TraversalConfig;
use crate::pathnorm::comparable;
use crate::rules::Rules;
use crate::types::{Collection, FileDescriptor, SkipReason};
use ignore::WalkBuilder;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Collects files from directory trees and explicit lists.
///
/// The exclusion list and language table are supplied at construction, so
/// one collector applies the same [`Rules`] to every pass.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    rules: Rules,
}

impl Collector {
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Walks `root` and returns the admitted files in discovery order.
    ///
    /// Within a directory, files come before subdirectories and both are
    /// ordered by name. Per-file failures end up in [`Collection::skipped`];
    /// only an invalid root is an error.
    pub fn collect_tree(&self, root: &Path, config: &TraversalConfig) -> Result<Collection> {
        if !root.is_dir() {
            return Err(KslistError::InvalidRoot(root.to_path_buf()));
        }
        tracing::debug!("Collecting tree under {}", root.display());
        let walker = Walker::new(root, config);
        let ignored = Arc::clone(&walker.ignored);
        let extensions = config.normalized_extensions();
        let own_output = config.output_path.as_deref().map(comparable);

        let mut collection = Collection::default();
        for result in walker.inner {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    let path = error_path(&e).unwrap_or(root).to_path_buf();
                    collection.skip(path, SkipReason::Unreadable(e.to_string()));
                    continue;
                }
            };
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_symlink() {
                if let Err(e) = fs::metadata(entry.path()) {
                    collection.skip(entry.into_path(), SkipReason::Unreadable(e.to_string()));
                    continue;
                }
            }
            if !(file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())) {
                continue;
            }
            let path = entry.into_path();
            if self.rules.is_excluded(&path) {
                collection.skip(path, SkipReason::Sensitive);
                continue;
            }
            let wanted = path.file_name().map_or(extensions.is_empty(), |name| {
                matches_extension(&name.to_string_lossy(), &extensions)
            });
            if !wanted {
                tracing::debug!("Skipping by extension: {}", path.display());
                continue;
            }
            if own_output.as_deref() == Some(comparable(&path).as_path()) {
                tracing::debug!("Skipping the output document itself: {}", path.display());
                continue;
            }
            self.admit(path, config.paths_only, &mut collection);
        }

        collection.ignored_dirs = match ignored.lock() {
            Ok(mut dirs) => std::mem::take(&mut *dirs),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        };
        tracing::debug!(
            "Collected {} file(s) under {} ({} skipped)",
            collection.files.len(),
            root.display(),
            collection.skipped.len()
        );
        Ok(collection)
    }

    /// Reads `path` (unless `paths_only`) and appends its descriptor.
    pub(crate) fn admit(&self, path: PathBuf, paths_only: bool, collection: &mut Collection) {
        let language = self.rules.language_tag(&path);
        if paths_only {
            collection.files.push(FileDescriptor {
                path,
                language,
                content: None,
                encoding: None,
            });
            return;
        }
        match read_text(&path).into_parts() {
            Ok((content, encoding)) => collection.files.push(FileDescriptor {
                path,
                language,
                content: Some(content),
                encoding: Some(encoding),
            }),
            Err(e) => collection.skip(path, SkipReason::Unreadable(e.to_string())),
        }
    }
}

struct Walker {
    inner: ignore::Walk,
    ignored: Arc<Mutex<Vec<PathBuf>>>,
}

impl Walker {
    fn new(root: &Path, config: &TraversalConfig) -> Self {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .max_depth(depth_limit(config.max_depth))
            .sort_by_file_path(files_first);

        let ignored = Arc::new(Mutex::new(Vec::new()));
        let patterns = IgnoreSet::new(&config.ignore_patterns);
        if !patterns.is_empty() {
            let sink = Arc::clone(&ignored);
            builder.filter_entry(move |entry| {
                let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
                if !is_dir || !patterns.matches(entry.path()) {
                    return true;
                }
                tracing::debug!("Ignoring directory: {}", entry.path().display());
                if let Ok(mut dirs) = sink.lock() {
                    dirs.push(entry.path().to_path_buf());
                }
                false
            });
        }
        Self {
            inner: builder.build(),
            ignored,
        }
    }
}

/// Files directly inside the root sit at walk depth 1, so a file limit of
/// `d` is a walk limit of `d`.
fn depth_limit(max_depth: usize) -> Option<usize> {
    (max_depth > 0).then_some(max_depth)
}

fn files_first(a: &Path, b: &Path) -> Ordering {
    a.is_dir()
        .cmp(&b.is_dir())
        .then_with(|| a.file_name().cmp(&b.file_name()))
}

fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}
